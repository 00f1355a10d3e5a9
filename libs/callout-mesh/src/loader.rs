//! # Mesh Loading
//!
//! The [`MeshLoader`] trait is the seam between the pipeline and mesh files.
//! [`GltfLoader`] reads glTF/GLB from disk; tests substitute counting stubs.

use std::path::Path;

use callout_geometry::PhysicsMetadata;
use glam::DVec3;

use crate::error::MeshError;
use crate::gltf::GltfDocument;
use crate::physics::{GltfPhysicsExtractor, PhysicsExtractor};

/// Vertices of one mesh plus the physics metadata found alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGeometry {
    pub vertices: Vec<DVec3>,
    pub physics: PhysicsMetadata,
}

impl MeshGeometry {
    /// Geometry with default (no physics) metadata.
    pub fn new(vertices: Vec<DVec3>) -> Self {
        Self {
            vertices,
            physics: PhysicsMetadata::default(),
        }
    }

    pub fn with_physics(vertices: Vec<DVec3>, physics: PhysicsMetadata) -> Self {
        Self { vertices, physics }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Source of mesh vertices.
pub trait MeshLoader {
    /// Loads local-space vertices. Fails with [`MeshError::FileNotFound`]
    /// when `path` does not exist.
    fn load_vertices(&self, path: &Path) -> Result<Vec<DVec3>, MeshError>;

    /// Loads vertices plus embedded physics metadata.
    ///
    /// The default implementation has no metadata to offer.
    fn load_vertices_with_physics(&self, path: &Path) -> Result<MeshGeometry, MeshError> {
        self.load_vertices(path).map(MeshGeometry::new)
    }
}

impl<L: MeshLoader + ?Sized> MeshLoader for &L {
    fn load_vertices(&self, path: &Path) -> Result<Vec<DVec3>, MeshError> {
        (**self).load_vertices(path)
    }

    fn load_vertices_with_physics(&self, path: &Path) -> Result<MeshGeometry, MeshError> {
        (**self).load_vertices_with_physics(path)
    }
}

/// Loads `.glb` and `.gltf` files from disk.
#[derive(Debug, Clone, Default)]
pub struct GltfLoader<P = GltfPhysicsExtractor> {
    extractor: P,
}

impl GltfLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PhysicsExtractor> GltfLoader<P> {
    /// Loader with a custom physics extractor.
    pub fn with_extractor(extractor: P) -> Self {
        Self { extractor }
    }

    fn read(path: &Path) -> Result<Vec<u8>, MeshError> {
        std::fs::read(path).map_err(|e| MeshError::io(path, e))
    }

    fn positions(path: &Path, bytes: &[u8]) -> Result<Vec<DVec3>, MeshError> {
        GltfDocument::from_slice(bytes)?.world_positions(path.parent())
    }
}

impl<P: PhysicsExtractor> MeshLoader for GltfLoader<P> {
    fn load_vertices(&self, path: &Path) -> Result<Vec<DVec3>, MeshError> {
        let bytes = Self::read(path)?;
        Self::positions(path, &bytes)
    }

    fn load_vertices_with_physics(&self, path: &Path) -> Result<MeshGeometry, MeshError> {
        let bytes = Self::read(path)?;
        let vertices = Self::positions(path, &bytes)?;
        let physics = self.extractor.extract(&bytes).unwrap_or_default();
        tracing::trace!(
            path = %path.display(),
            vertices = vertices.len(),
            has_physics = physics.has_physics_data,
            "Loaded mesh"
        );
        Ok(MeshGeometry::with_physics(vertices, physics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::NoPhysics;
    use crate::test_support::{mesh_glb, SQUARE};
    use approx::assert_relative_eq;
    use callout_geometry::{normalize_scale, ScaleOptions};
    use config::constants::DEFAULT_MIN_RADIUS;
    use glam::DVec2;
    use serde_json::json;

    fn temp_file(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("callout-mesh-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = GltfLoader::new()
            .load_vertices(Path::new("/definitely/not/here.glb"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn loads_vertices_and_physics_from_glb() {
        let nodes = json!([{
            "name": "marker",
            "mesh": 0,
            "extras": { "physics": { "globalScale": [100.0, 50.0, 0.0] } }
        }]);
        let path = temp_file("with_physics.glb", &mesh_glb(&SQUARE, nodes, &[0]));

        let geometry = GltfLoader::new().load_vertices_with_physics(&path).unwrap();
        assert_eq!(geometry.vertex_count(), 4);
        assert!(geometry.physics.has_physics_data);
        assert_eq!(geometry.physics.global_scale, DVec3::new(100.0, 50.0, 0.0));

        let plain = GltfLoader::with_extractor(NoPhysics)
            .load_vertices_with_physics(&path)
            .unwrap();
        assert!(!plain.physics.has_physics_data);
        assert_eq!(plain.vertices, geometry.vertices);
    }

    #[test]
    fn physics_named_mesh_still_grows_to_min_radius() {
        let nodes = json!([{ "name": "marker_physics", "mesh": 0, "scale": [50.0, 25.0, 1.0] }]);
        let path = temp_file("named_physics.glb", &mesh_glb(&SQUARE, nodes, &[0]));

        let geometry = GltfLoader::new().load_vertices_with_physics(&path).unwrap();
        assert!(!geometry.physics.has_physics_data);

        // Placed footprint is 100×50, well inside the default 100 radius.
        let polygon: Vec<DVec2> = geometry.vertices.iter().map(|v| v.truncate()).collect();
        let scaled = normalize_scale(&polygon, Some(&geometry.physics), &ScaleOptions::default());
        let radius = scaled.iter().map(|p| p.length()).fold(0.0_f64, f64::max);
        assert_relative_eq!(radius, DEFAULT_MIN_RADIUS, epsilon = 1e-6);
    }

    #[test]
    fn default_trait_method_uses_default_metadata() {
        struct Fixed;
        impl MeshLoader for Fixed {
            fn load_vertices(&self, _path: &Path) -> Result<Vec<DVec3>, MeshError> {
                Ok(vec![DVec3::X])
            }
        }
        let geometry = Fixed.load_vertices_with_physics(Path::new("any")).unwrap();
        assert_eq!(geometry, MeshGeometry::new(vec![DVec3::X]));
    }
}
