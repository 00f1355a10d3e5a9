//! Scale → rotate → translate helper for placing mesh vertices in the world.
//!
//! This is the only transform stage in the pipeline; the rotation inference
//! and the per-callout resolution both go through it.

use glam::DVec3;

use crate::rotation::RotationOrder;

/// Places local-space vertices into world space.
///
/// Each vertex is multiplied component-wise by `scales`, rotated by the
/// matrix `R` built from `angles_deg` with `order` (row-vector form
/// `v · Rᵀ`), then offset by `origin`.
///
/// # Examples
/// ```
/// use callout_geometry::{apply_srt, RotationOrder};
/// use glam::DVec3;
///
/// let world = apply_srt(
///     &[DVec3::new(1.0, 0.0, 0.0)],
///     DVec3::splat(2.0),
///     DVec3::new(0.0, 90.0, 0.0),
///     DVec3::new(0.0, 0.0, 5.0),
///     RotationOrder::RzRxRy,
/// );
/// assert!((world[0] - DVec3::new(0.0, 2.0, 5.0)).length() < 1e-12);
/// ```
pub fn apply_srt(
    vertices: &[DVec3],
    scales: DVec3,
    angles_deg: DVec3,
    origin: DVec3,
    order: RotationOrder,
) -> Vec<DVec3> {
    let rotation = order.matrix(angles_deg);
    vertices
        .iter()
        .map(|v| rotation * (*v * scales) + origin)
        .collect()
}
