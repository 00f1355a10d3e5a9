//! # Physics Metadata Extraction
//!
//! Callout meshes exported with their physics hull carry the intended
//! footprint of the marker in a node's `extras.physics` object: `position`,
//! `rotation`, `scale` and `globalScale` (or `global_scale`) as three-number
//! arrays.
//!
//! Only an explicit global scale counts as physics data. A node that merely
//! carries `physics` in its name, or an `extras.physics` object without a
//! global scale, yields `None` so the mesh is normalized by minimum radius
//! like any other.

use callout_geometry::PhysicsMetadata;
use glam::DVec3;
use serde_json::Value;

use crate::gltf::{GltfDocument, SceneNode};

/// Parser for physics metadata embedded in a mesh file.
///
/// Implementations see raw file bytes so they can be swapped or stubbed
/// without touching vertex loading.
pub trait PhysicsExtractor {
    fn extract(&self, bytes: &[u8]) -> Option<PhysicsMetadata>;
}

/// Reads physics metadata from glTF node extras.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfPhysicsExtractor;

/// Extractor that never finds physics data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhysics;

impl PhysicsExtractor for NoPhysics {
    fn extract(&self, _bytes: &[u8]) -> Option<PhysicsMetadata> {
        None
    }
}

impl PhysicsExtractor for GltfPhysicsExtractor {
    fn extract(&self, bytes: &[u8]) -> Option<PhysicsMetadata> {
        let document = match GltfDocument::from_slice(bytes) {
            Ok(document) => document,
            Err(error) => {
                tracing::debug!(%error, "Physics metadata unavailable, document did not parse");
                return None;
            }
        };
        extract_from_document(&document)
    }
}

/// Physics metadata from an already parsed document.
pub fn extract_from_document(document: &GltfDocument) -> Option<PhysicsMetadata> {
    document.scene_nodes().iter().find_map(from_extras)
}

fn from_extras(node: &SceneNode<'_>) -> Option<PhysicsMetadata> {
    let physics = node.extras?.get("physics")?.as_object()?;
    let field = |keys: &[&str]| keys.iter().find_map(|k| physics.get(*k)).and_then(vec3_value);

    let Some(global_scale) = field(&["globalScale", "global_scale"]) else {
        tracing::debug!(node = node.index, "Ignoring physics extras without a global scale");
        return None;
    };

    Some(PhysicsMetadata {
        position: field(&["position"]).unwrap_or(DVec3::ZERO),
        rotation_hint: field(&["rotation", "rotationHint"]).unwrap_or(DVec3::ZERO),
        scale: field(&["scale"]).unwrap_or(DVec3::ONE),
        global_scale,
        has_physics_data: true,
    })
}

fn vec3_value(value: &Value) -> Option<DVec3> {
    match value.as_array()?.as_slice() {
        [x, y, z, ..] => Some(DVec3::new(x.as_f64()?, y.as_f64()?, z.as_f64()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mesh_glb, SQUARE};
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn extras_physics_object_is_read() {
        let nodes = json!([{
            "name": "callout",
            "mesh": 0,
            "extras": { "physics": {
                "position": [1.0, 2.0, 3.0],
                "rotation": [0.0, 90.0, 0.0],
                "scale": [2.0, 2.0, 1.0],
                "globalScale": [256.0, 128.0, 16.0]
            } }
        }]);
        let meta = GltfPhysicsExtractor.extract(&mesh_glb(&SQUARE, nodes, &[0])).unwrap();

        assert!(meta.has_physics_data);
        assert_eq!(meta.position, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(meta.rotation_hint, DVec3::new(0.0, 90.0, 0.0));
        assert_eq!(meta.global_scale, DVec3::new(256.0, 128.0, 16.0));
    }

    #[test]
    fn extras_without_global_scale_are_ignored() {
        let nodes = json!([{ "mesh": 0, "extras": { "physics": { "scale": [10.0, 5.0, 1.0] } } }]);
        assert!(GltfPhysicsExtractor.extract(&mesh_glb(&SQUARE, nodes, &[0])).is_none());
    }

    #[test]
    fn physics_named_node_alone_is_not_physics_data() {
        let nodes = json!([
            { "name": "root", "translation": [100.0, 0.0, 0.0], "children": [1] },
            { "name": "Callout_Physics", "mesh": 0, "scale": [32.0, 16.0, 1.0] }
        ]);
        assert!(GltfPhysicsExtractor.extract(&mesh_glb(&SQUARE, nodes, &[0])).is_none());
    }

    #[test]
    fn global_scale_snake_case_on_child_node() {
        let nodes = json!([
            { "name": "root", "children": [1] },
            { "name": "hull", "mesh": 0, "extras": { "physics": { "global_scale": [40.0, 20.0, 2.0] } } }
        ]);
        let meta = GltfPhysicsExtractor.extract(&mesh_glb(&SQUARE, nodes, &[0])).unwrap();

        assert!(meta.has_physics_data);
        assert_eq!(meta.scale, DVec3::ONE);
        assert_relative_eq!(meta.global_scale.x, 40.0, epsilon = 1e-9);
        assert_relative_eq!(meta.global_scale.y, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn plain_mesh_has_no_physics() {
        let bytes = mesh_glb(&SQUARE, json!([{ "name": "callout", "mesh": 0 }]), &[0]);
        assert!(GltfPhysicsExtractor.extract(&bytes).is_none());
        assert!(NoPhysics.extract(&bytes).is_none());
    }

    #[test]
    fn garbage_bytes_have_no_physics() {
        assert!(GltfPhysicsExtractor.extract(b"not a mesh").is_none());
    }
}
