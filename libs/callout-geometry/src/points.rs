//! # Point Utilities
//!
//! Projection, grid deduplication, centroids and axis-aligned bounds shared by
//! the boundary, hull and scale modules.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Orthographic projection onto the XY plane.
pub fn to_xy(vertices: &[DVec3]) -> Vec<DVec2> {
    vertices.iter().map(|v| v.truncate()).collect()
}

/// Removes near-coincident 2D points by snapping to a grid of size `eps`.
///
/// The first point of each grid cell is kept and the relative order of the
/// survivors is preserved.
///
/// # Example
///
/// ```rust
/// use callout_geometry::points::dedupe_points;
/// use glam::DVec2;
///
/// let pts = [DVec2::new(1.0, 1.0), DVec2::new(1.000001, 1.0), DVec2::new(2.0, 1.0)];
/// let unique = dedupe_points(&pts, 1e-5);
/// assert_eq!(unique, vec![DVec2::new(1.0, 1.0), DVec2::new(2.0, 1.0)]);
/// ```
pub fn dedupe_points(points: &[DVec2], eps: f64) -> Vec<DVec2> {
    let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| seen.insert((grid_cell(p.x, eps), grid_cell(p.y, eps))))
        .copied()
        .collect()
}

/// 3D counterpart of [`dedupe_points`].
pub fn dedupe_points_3d(points: &[DVec3], eps: f64) -> Vec<DVec3> {
    let mut seen: HashSet<(i64, i64, i64)> = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| {
            seen.insert((
                grid_cell(p.x, eps),
                grid_cell(p.y, eps),
                grid_cell(p.z, eps),
            ))
        })
        .copied()
        .collect()
}

#[inline]
fn grid_cell(value: f64, eps: f64) -> i64 {
    (value / eps).round() as i64
}

/// Arithmetic mean of the vertices, or `None` for an empty slice.
pub fn centroid(points: &[DVec2]) -> Option<DVec2> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(DVec2::ZERO, |acc, p| acc + *p);
    Some(sum / points.len() as f64)
}

/// Signed shoelace area. Positive for counter-clockwise rings.
pub fn polygon_area(polygon: &[DVec2]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let n = polygon.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            a.x * b.y - a.y * b.x
        })
        .sum();
    0.5 * twice
}

// =============================================================================
// BOUNDS
// =============================================================================

/// Axis-aligned 2D bounds. All zero for an empty input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2D {
    /// Computes the bounds of a point set.
    pub fn from_points(points: &[DVec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (min, max) = points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Self {
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Axis-aligned 3D bounds. All zero for an empty input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Bounds3D {
    /// Computes the bounds of a point set.
    pub fn from_points(points: &[DVec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (min, max) = points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Self {
            min_x: min.x,
            min_y: min.y,
            min_z: min.z,
            max_x: max.x,
            max_y: max.y,
            max_z: max.z,
        }
    }

    /// Extent along each axis.
    pub fn size(&self) -> DVec3 {
        DVec3::new(
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dedupe_keeps_first_occurrence_in_order() {
        let pts = vec![
            DVec2::new(3.0, 3.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(3.000_000_1, 3.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.0),
        ];
        let unique = dedupe_points(&pts, 1e-5);
        assert_eq!(
            unique,
            vec![DVec2::new(3.0, 3.0), DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)]
        );
    }

    #[test]
    fn dedupe_3d_distinguishes_height() {
        let pts = vec![DVec3::new(1.0, 1.0, 0.0), DVec3::new(1.0, 1.0, 5.0)];
        assert_eq!(dedupe_points_3d(&pts, 1e-5).len(), 2);
        assert_eq!(dedupe_points(&to_xy(&pts), 1e-5).len(), 1);
    }

    #[test]
    fn centroid_of_empty_is_none() {
        assert!(centroid(&[]).is_none());
        let c = centroid(&[DVec2::new(0.0, 0.0), DVec2::new(4.0, 2.0)]).unwrap();
        assert_eq!(c, DVec2::new(2.0, 1.0));
    }

    #[test]
    fn area_sign_follows_winding() {
        let ccw = [
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
        ];
        assert_relative_eq!(polygon_area(&ccw), 4.0);
        let cw: Vec<DVec2> = ccw.iter().rev().copied().collect();
        assert_relative_eq!(polygon_area(&cw), -4.0);
    }

    #[test]
    fn bounds_of_empty_are_zero() {
        assert_eq!(Bounds2D::from_points(&[]), Bounds2D::default());
        assert_eq!(Bounds3D::from_points(&[]), Bounds3D::default());
    }

    #[test]
    fn bounds_cover_all_points() {
        let b = Bounds2D::from_points(&[DVec2::new(-1.0, 5.0), DVec2::new(3.0, -2.0)]);
        assert_eq!(b.min_x, -1.0);
        assert_eq!(b.max_y, 5.0);
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 7.0);

        let b = Bounds3D::from_points(&[DVec3::new(0.0, 0.0, -1.0), DVec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(b.size(), DVec3::new(1.0, 2.0, 4.0));
    }
}
