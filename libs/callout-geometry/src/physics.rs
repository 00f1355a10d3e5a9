//! # Physics Metadata
//!
//! Transform and bounds information embedded next to a callout mesh. The
//! mesh crate extracts it; the scale normalizer consumes it.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Physics transform/bounds attached to a loaded mesh.
///
/// `global_scale` is the intended footprint of the callout in world units.
/// When `has_physics_data` is false every other field is at its identity
/// value and the normalizer ignores the struct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsMetadata {
    pub position: DVec3,
    pub rotation_hint: DVec3,
    pub scale: DVec3,
    pub global_scale: DVec3,
    pub has_physics_data: bool,
}

impl Default for PhysicsMetadata {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation_hint: DVec3::ZERO,
            scale: DVec3::ONE,
            global_scale: DVec3::ONE,
            has_physics_data: false,
        }
    }
}

impl PhysicsMetadata {
    /// Metadata for a mesh that carries a physics node.
    pub fn with_global_scale(global_scale: DVec3) -> Self {
        Self {
            global_scale,
            has_physics_data: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity_without_physics() {
        let meta = PhysicsMetadata::default();
        assert!(!meta.has_physics_data);
        assert_eq!(meta.scale, DVec3::ONE);
        assert_eq!(meta.position, DVec3::ZERO);
    }

    #[test]
    fn with_global_scale_marks_physics_present() {
        let meta = PhysicsMetadata::with_global_scale(DVec3::new(128.0, 64.0, 8.0));
        assert!(meta.has_physics_data);
        assert_eq!(meta.global_scale.x, 128.0);
        assert_eq!(meta.scale, DVec3::ONE);
    }
}
