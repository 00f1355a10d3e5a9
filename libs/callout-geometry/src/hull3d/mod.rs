//! # 3D Convex Hull
//!
//! Full spatial extent of a placed callout, reported next to the flat
//! polygon for consumers that want the volume the marker occupies.
//!
//! ## Fallback
//!
//! Callout meshes are often perfectly planar. QuickHull needs a
//! non-degenerate tetrahedron, so planar, collinear or tiny inputs return
//! the deduplicated point set unchanged instead of failing.

mod quickhull;

#[cfg(test)]
mod tests;

pub use quickhull::hull_vertex_indices;

use config::constants::DEDUP_EPSILON;
use glam::DVec3;

use crate::points::dedupe_points_3d;

/// Vertices of the 3D convex hull of `points`.
///
/// The output keeps the first-occurrence order of the deduplicated input.
/// With three or fewer distinct points, or when the hull is degenerate, the
/// deduplicated points are returned as-is.
///
/// # Example
///
/// ```rust,ignore
/// let extent = convex_hull_3d(&world_vertices);
/// let bbox = Bounds3D::from_points(&extent);
/// ```
pub fn convex_hull_3d(points: &[DVec3]) -> Vec<DVec3> {
    let unique = dedupe_points_3d(points, DEDUP_EPSILON);
    if unique.len() <= 3 {
        return unique;
    }

    match hull_vertex_indices(&unique) {
        Ok(indices) => indices.into_iter().map(|i| unique[i]).collect(),
        Err(error) => {
            tracing::trace!(%error, points = unique.len(), "3D hull degenerate, keeping unique points");
            unique
        }
    }
}
