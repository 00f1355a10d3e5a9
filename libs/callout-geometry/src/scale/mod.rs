//! # Scale Normalization
//!
//! Exported callout meshes are authored at an arbitrary size. This module
//! rescales an extracted polygon to a meaningful footprint.
//!
//! ## Steps
//!
//! Applied strictly in sequence, never blended:
//!
//! 1. **Physics footprint**: when the mesh carries physics metadata, stretch
//!    each axis independently so the polygon's bounds match `global_scale`.
//! 2. **Minimum radius**: otherwise, grow the polygon uniformly until its
//!    farthest vertex is `min_radius` from the centroid.
//! 3. **Multiplier**: uniform scale about the centroid or a fixed origin.


use config::constants::{DEFAULT_MIN_RADIUS, DEFAULT_SCALE_MULTIPLIER};
use glam::DVec2;

use crate::physics::PhysicsMetadata;
use crate::points::{centroid, Bounds2D};

/// Parameters of the scale steps that do not come from the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOptions {
    /// Minimum centroid-to-vertex radius when no physics data is available.
    pub min_radius: f64,
    /// Final uniform multiplier. `1.0` and non-positive values are no-ops.
    pub multiplier: f64,
    /// Fixed origin for the multiplier. `None` scales about the centroid.
    pub origin: Option<DVec2>,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            min_radius: DEFAULT_MIN_RADIUS,
            multiplier: DEFAULT_SCALE_MULTIPLIER,
            origin: None,
        }
    }
}

/// Runs the physics or min-radius step, then the multiplier.
///
/// The physics step is taken whenever `physics.has_physics_data` is set,
/// even if its target dimensions are degenerate; the min-radius heuristic
/// is only used for meshes without physics data.
///
/// # Example
///
/// ```rust
/// use callout_geometry::{normalize_scale, ScaleOptions};
/// use glam::DVec2;
///
/// let tiny = [DVec2::new(-1.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)];
/// let scaled = normalize_scale(&tiny, None, &ScaleOptions::default());
/// assert_eq!(scaled.len(), 3);
/// ```
pub fn normalize_scale(
    polygon: &[DVec2],
    physics: Option<&PhysicsMetadata>,
    options: &ScaleOptions,
) -> Vec<DVec2> {
    let normalized = match physics {
        Some(meta) if meta.has_physics_data => scale_to_global_scale(polygon, meta.global_scale.truncate()),
        _ => expand_to_min_radius(polygon, options.min_radius),
    };
    apply_multiplier(&normalized, options.multiplier, options.origin)
}

/// Stretches `polygon` about its centroid so its bounds measure `target`.
///
/// An axis with zero current extent keeps a factor of `1.0`.
pub fn scale_to_global_scale(polygon: &[DVec2], target: DVec2) -> Vec<DVec2> {
    let Some(center) = centroid(polygon) else {
        return Vec::new();
    };
    let bounds = Bounds2D::from_points(polygon);
    let factor = DVec2::new(
        axis_factor(target.x, bounds.width()),
        axis_factor(target.y, bounds.height()),
    );
    scale_about(polygon, center, factor)
}

#[inline]
fn axis_factor(target: f64, current: f64) -> f64 {
    if current > 0.0 {
        target / current
    } else {
        1.0
    }
}

/// Grows `polygon` uniformly about its centroid to reach `min_radius`.
///
/// Polygons already at or beyond the radius, and polygons whose vertices
/// all coincide with the centroid, are returned unchanged.
pub fn expand_to_min_radius(polygon: &[DVec2], min_radius: f64) -> Vec<DVec2> {
    let Some(center) = centroid(polygon) else {
        return Vec::new();
    };
    let radius = polygon
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0_f64, f64::max);

    if radius >= min_radius || radius <= 0.0 {
        return polygon.to_vec();
    }
    scale_about(polygon, center, DVec2::splat(min_radius / radius))
}

/// Scales `polygon` uniformly by `multiplier` about `origin` (or the centroid).
///
/// A multiplier of exactly `1.0`, or one that is not strictly positive, leaves
/// the polygon untouched.
pub fn apply_multiplier(polygon: &[DVec2], multiplier: f64, origin: Option<DVec2>) -> Vec<DVec2> {
    if multiplier <= 0.0 || multiplier == 1.0 || !multiplier.is_finite() {
        return polygon.to_vec();
    }
    let Some(pivot) = origin.or_else(|| centroid(polygon)) else {
        return Vec::new();
    };
    scale_about(polygon, pivot, DVec2::splat(multiplier))
}

fn scale_about(polygon: &[DVec2], pivot: DVec2, factor: DVec2) -> Vec<DVec2> {
    polygon.iter().map(|p| pivot + (*p - pivot) * factor).collect()
}
