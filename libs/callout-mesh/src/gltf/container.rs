//! Binary GLB container framing.
//!
//! ```text
//! ┌─────────── header (12) ───────────┐┌──── chunk ────┐┌──── chunk ────┐
//! │ magic "glTF" │ version 2 │ length ││ len │ JSON │..││ len │ BIN  │..│
//! └───────────────────────────────────┘└───────────────┘└───────────────┘
//! ```

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::MeshError;

pub(crate) const GLB_MAGIC: u32 = 0x4654_6C67;
pub(crate) const CHUNK_JSON: u32 = 0x4E4F_534A;
pub(crate) const CHUNK_BIN: u32 = 0x004E_4942;

/// Whether `bytes` start with the GLB magic.
pub(crate) fn is_glb(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == GLB_MAGIC.to_le_bytes()
}

/// Splits a GLB file into its JSON chunk and optional BIN chunk.
pub(crate) fn split_glb(bytes: &[u8]) -> Result<(&[u8], Option<&[u8]>), MeshError> {
    let mut rdr = Cursor::new(bytes);
    let magic = rdr.read_u32::<LittleEndian>()?;
    if magic != GLB_MAGIC {
        return Err(MeshError::invalid("missing GLB magic"));
    }
    let version = rdr.read_u32::<LittleEndian>()?;
    if version != 2 {
        return Err(MeshError::unsupported(format!("GLB container version {version}")));
    }
    let declared = rdr.read_u32::<LittleEndian>()? as usize;
    let total = declared.min(bytes.len());

    let mut json = None;
    let mut bin = None;
    let mut offset = 12usize;
    while offset + 8 <= total {
        rdr.set_position(offset as u64);
        let length = rdr.read_u32::<LittleEndian>()? as usize;
        let kind = rdr.read_u32::<LittleEndian>()?;
        let start = offset + 8;
        let end = start
            .checked_add(length)
            .filter(|end| *end <= total)
            .ok_or_else(|| MeshError::invalid("GLB chunk extends past end of file"))?;

        match kind {
            CHUNK_JSON if json.is_none() => json = Some(&bytes[start..end]),
            CHUNK_BIN if bin.is_none() => bin = Some(&bytes[start..end]),
            _ => {}
        }
        offset = end;
    }

    let json = json.ok_or_else(|| MeshError::invalid("GLB has no JSON chunk"))?;
    Ok((json, bin))
}

/// Bytes occupied by one `f32` triple.
pub(crate) const VEC3_F32_SIZE: usize = 12;

/// Reads `count` little-endian `f32` triples starting at `offset`, `stride`
/// bytes apart.
///
/// The full extent is checked against `data` before anything is allocated,
/// so counts and offsets from a corrupt file fail instead of overflowing.
pub(crate) fn read_vec3_f32(
    data: &[u8],
    offset: usize,
    stride: usize,
    count: usize,
) -> Result<Vec<[f32; 3]>, MeshError> {
    let stride = stride.max(VEC3_F32_SIZE);
    if count == 0 {
        return Ok(Vec::new());
    }
    let end = (count - 1)
        .checked_mul(stride)
        .and_then(|span| span.checked_add(offset))
        .and_then(|last| last.checked_add(VEC3_F32_SIZE))
        .ok_or_else(|| MeshError::reference(format!("{count} vertices at offset {offset} overflow")))?;
    if end > data.len() {
        return Err(MeshError::reference(format!(
            "{count} vertices at offset {offset} need {end} bytes, buffer view has {}",
            data.len()
        )));
    }

    let mut out = Vec::with_capacity(count);
    for start in (offset..end).step_by(stride).take(count) {
        let mut rdr = &data[start..start + VEC3_F32_SIZE];
        let mut v = [0.0f32; 3];
        for component in &mut v {
            *component = rdr.read_f32::<LittleEndian>()?;
        }
        out.push(v);
    }
    Ok(out)
}
