//! # glTF Reader
//!
//! Minimal glTF 2.0 reader: enough of the format to collect world-space
//! vertex positions and node transforms from `.gltf` and `.glb` files.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ─► container::split_glb ─► schema::Root (serde_json)
//!                   │                     │
//!                   └── BIN chunk ──► buffers ─► POSITION accessors ─► world vertices
//! ```
//!
//! Only `VEC3`/`FLOAT` position accessors are read. Buffers come from the GLB
//! BIN chunk, base64 `data:` URIs or files next to the document.

mod container;
mod schema;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use glam::{DMat4, DQuat, DVec3};

use crate::error::MeshError;
use container::{is_glb, read_vec3_f32, split_glb, VEC3_F32_SIZE};
use schema::{Accessor, Node, Root, COMPONENT_FLOAT};

const POSITION: &str = "POSITION";
const DATA_URI_BASE64: &str = ";base64,";
/// Largest zero-filled accessor accepted when no buffer view backs it.
const MAX_UNBACKED_VERTICES: usize = 1 << 16;

/// A parsed glTF document plus its embedded binary chunk.
#[derive(Debug)]
pub struct GltfDocument {
    root: Root,
    bin: Option<Vec<u8>>,
}

/// A node reached from the active scene, with its accumulated transform.
#[derive(Debug, Clone, Copy)]
pub struct SceneNode<'a> {
    pub index: usize,
    pub name: Option<&'a str>,
    pub mesh: Option<usize>,
    pub extras: Option<&'a serde_json::Value>,
    pub world: DMat4,
}

impl GltfDocument {
    /// Parses either a GLB container or a glTF JSON document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MeshError> {
        let (json, bin) = if is_glb(bytes) {
            let (json, bin) = split_glb(bytes)?;
            (json, bin.map(<[u8]>::to_vec))
        } else {
            (bytes, None)
        };

        let json = json.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(json);
        let root: Root = serde_json::from_slice(json)?;
        if let Some(asset) = &root.asset {
            if !asset.version.is_empty() && !asset.version.starts_with('2') {
                return Err(MeshError::unsupported(format!("glTF version {}", asset.version)));
            }
        }
        Ok(Self { root, bin })
    }

    // =========================================================================
    // SCENE GRAPH
    // =========================================================================

    /// Nodes of the active scene in depth-first order with world transforms.
    ///
    /// The active scene is `scene`, else the first scene. Documents without
    /// scenes yield every node with its local transform. Nodes reachable
    /// twice (malformed cycles or shared children) are visited once.
    pub fn scene_nodes(&self) -> Vec<SceneNode<'_>> {
        let roots: Vec<usize> = match self.active_scene() {
            Some(scene) => scene.nodes.clone(),
            None => {
                return self
                    .root
                    .nodes
                    .iter()
                    .enumerate()
                    .map(|(index, node)| self.scene_node(index, node, local_transform(node)))
                    .collect();
            }
        };

        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<(usize, DMat4)> = roots.into_iter().rev().map(|i| (i, DMat4::IDENTITY)).collect();

        while let Some((index, parent)) = stack.pop() {
            let Some(node) = self.root.nodes.get(index) else {
                continue;
            };
            if !seen.insert(index) {
                continue;
            }
            let world = parent * local_transform(node);
            out.push(self.scene_node(index, node, world));
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }
        out
    }

    fn active_scene(&self) -> Option<&schema::Scene> {
        let scenes = &self.root.scenes;
        self.root
            .scene
            .and_then(|i| scenes.get(i))
            .or_else(|| scenes.first())
    }

    fn scene_node<'a>(&'a self, index: usize, node: &'a Node, world: DMat4) -> SceneNode<'a> {
        SceneNode {
            index,
            name: node.name.as_deref(),
            mesh: node.mesh,
            extras: node.extras.as_ref(),
            world,
        }
    }

    // =========================================================================
    // POSITIONS
    // =========================================================================

    /// All mesh vertex positions in world space.
    ///
    /// `base_dir` is where external buffer files are looked up; without it
    /// only the GLB chunk and `data:` URIs are available.
    pub fn world_positions(&self, base_dir: Option<&Path>) -> Result<Vec<DVec3>, MeshError> {
        let buffers = self.load_buffers(base_dir)?;
        let mut out = Vec::new();

        if self.active_scene().is_none() {
            for mesh in 0..self.root.meshes.len() {
                self.append_mesh(mesh, DMat4::IDENTITY, &buffers, &mut out)?;
            }
            return Ok(out);
        }

        for node in self.scene_nodes() {
            if let Some(mesh) = node.mesh {
                self.append_mesh(mesh, node.world, &buffers, &mut out)?;
            }
        }
        Ok(out)
    }

    fn append_mesh(
        &self,
        mesh: usize,
        world: DMat4,
        buffers: &[Cow<'_, [u8]>],
        out: &mut Vec<DVec3>,
    ) -> Result<(), MeshError> {
        let mesh = self
            .root
            .meshes
            .get(mesh)
            .ok_or_else(|| MeshError::reference(format!("mesh {mesh} does not exist")))?;

        for primitive in &mesh.primitives {
            let Some(&accessor) = primitive.attributes.get(POSITION) else {
                continue;
            };
            let local = self.read_positions(accessor, buffers)?;
            out.extend(local.into_iter().map(|v| world.transform_point3(v)));
        }
        Ok(())
    }

    fn read_positions(&self, index: usize, buffers: &[Cow<'_, [u8]>]) -> Result<Vec<DVec3>, MeshError> {
        let accessor = self.accessor(index)?;
        if accessor.kind != "VEC3" || accessor.component_type != COMPONENT_FLOAT {
            return Err(MeshError::unsupported(format!(
                "POSITION accessor {index} is {} with component type {}",
                accessor.kind, accessor.component_type
            )));
        }

        let Some(view_index) = accessor.buffer_view else {
            if accessor.count > MAX_UNBACKED_VERTICES {
                return Err(MeshError::reference(format!(
                    "POSITION accessor {index} has {} vertices and no buffer view",
                    accessor.count
                )));
            }
            return Ok(vec![DVec3::ZERO; accessor.count]);
        };
        let view = self
            .root
            .buffer_views
            .get(view_index)
            .ok_or_else(|| MeshError::reference(format!("buffer view {view_index} does not exist")))?;
        let buffer = buffers
            .get(view.buffer)
            .ok_or_else(|| MeshError::reference(format!("buffer {} does not exist", view.buffer)))?;
        let end = view.byte_offset.saturating_add(view.byte_length);
        let data = buffer
            .get(view.byte_offset..end)
            .ok_or_else(|| MeshError::reference(format!("buffer view {view_index} exceeds its buffer")))?;

        let stride = view.byte_stride.unwrap_or(VEC3_F32_SIZE).max(VEC3_F32_SIZE);
        let raw = read_vec3_f32(data, accessor.byte_offset, stride, accessor.count)?;
        Ok(raw
            .into_iter()
            .map(|[x, y, z]| DVec3::new(f64::from(x), f64::from(y), f64::from(z)))
            .collect())
    }

    fn accessor(&self, index: usize) -> Result<&Accessor, MeshError> {
        self.root
            .accessors
            .get(index)
            .ok_or_else(|| MeshError::reference(format!("accessor {index} does not exist")))
    }

    // =========================================================================
    // BUFFERS
    // =========================================================================

    fn load_buffers(&self, base_dir: Option<&Path>) -> Result<Vec<Cow<'_, [u8]>>, MeshError> {
        self.root
            .buffers
            .iter()
            .enumerate()
            .map(|(i, buffer)| match buffer.uri.as_deref() {
                None => self
                    .bin
                    .as_deref()
                    .map(Cow::Borrowed)
                    .ok_or_else(|| MeshError::reference(format!("buffer {i} has no uri and no GLB chunk"))),
                Some(uri) if uri.starts_with("data:") => decode_data_uri(uri).map(Cow::Owned),
                Some(uri) => {
                    let dir = base_dir.ok_or_else(|| {
                        MeshError::unsupported(format!("external buffer '{uri}' without a base directory"))
                    })?;
                    let path: PathBuf = dir.join(uri);
                    std::fs::read(&path)
                        .map(Cow::Owned)
                        .map_err(|e| MeshError::io(&path, e))
                }
            })
            .collect()
    }
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, MeshError> {
    let (_, payload) = uri
        .split_once(DATA_URI_BASE64)
        .ok_or_else(|| MeshError::unsupported("data URI without base64 payload"))?;
    STANDARD
        .decode(payload)
        .map_err(|e| MeshError::invalid(format!("bad base64 buffer: {e}")))
}

/// Local transform of a node: `matrix` if present, otherwise T·R·S.
fn local_transform(node: &Node) -> DMat4 {
    if let Some(m) = &node.matrix {
        return DMat4::from_cols_array(m);
    }
    let translation = node.translation.map(DVec3::from_array).unwrap_or(DVec3::ZERO);
    let rotation = node
        .rotation
        .map(|[x, y, z, w]| DQuat::from_xyzw(x, y, z, w).normalize())
        .unwrap_or(DQuat::IDENTITY);
    let scale = node.scale.map(DVec3::from_array).unwrap_or(DVec3::ONE);
    DMat4::from_scale_rotation_translation(scale, rotation, translation)
}
