//! In-memory glTF fixtures shared by the unit tests.

use byteorder::{LittleEndian, WriteBytesExt};
use serde_json::{json, Value};

/// Little-endian `f32` triples, tightly packed.
pub(crate) fn positions_bin(positions: &[[f32; 3]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(positions.len() * 12);
    for p in positions {
        for c in p {
            out.write_f32::<LittleEndian>(*c).unwrap();
        }
    }
    out
}

/// Wraps a JSON document and BIN payload in a GLB container.
pub(crate) fn glb(document: &Value, bin: &[u8]) -> Vec<u8> {
    let mut json = serde_json::to_vec(document).unwrap();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = bin.to_vec();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json.len() + if bin.is_empty() { 0 } else { 8 + bin.len() };
    let mut out = Vec::with_capacity(total);
    out.write_u32::<LittleEndian>(0x4654_6C67).unwrap();
    out.write_u32::<LittleEndian>(2).unwrap();
    out.write_u32::<LittleEndian>(total as u32).unwrap();
    out.write_u32::<LittleEndian>(json.len() as u32).unwrap();
    out.write_u32::<LittleEndian>(0x4E4F_534A).unwrap();
    out.extend_from_slice(&json);
    if !bin.is_empty() {
        out.write_u32::<LittleEndian>(bin.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(0x004E_4942).unwrap();
        out.extend_from_slice(&bin);
    }
    out
}

/// glTF JSON with one mesh whose POSITION accessor covers `positions`, the
/// given nodes and a single scene rooted at `roots`. The buffer has no URI.
pub(crate) fn mesh_document(positions: &[[f32; 3]], nodes: Value, roots: &[usize]) -> Value {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in positions {
        for i in 0..3 {
            min[i] = min[i].min(p[i]);
            max[i] = max[i].max(p[i]);
        }
    }
    let byte_length = positions.len() * 12;
    json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": roots }],
        "nodes": nodes,
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": positions.len(),
            "type": "VEC3",
            "min": min,
            "max": max
        }],
        "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": byte_length }],
        "buffers": [{ "byteLength": byte_length }]
    })
}

/// GLB bytes for a single mesh node.
pub(crate) fn mesh_glb(positions: &[[f32; 3]], nodes: Value, roots: &[usize]) -> Vec<u8> {
    glb(&mesh_document(positions, nodes, roots), &positions_bin(positions))
}

/// Square in the XY plane spanning `[-1, 1]` on both axes.
pub(crate) const SQUARE: [[f32; 3]; 4] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
];
