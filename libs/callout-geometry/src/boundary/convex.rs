//! Andrew's monotone chain convex hull.

use glam::DVec2;

use crate::points::dedupe_points;
use config::constants::DEDUP_EPSILON;

#[inline]
fn cross(o: DVec2, a: DVec2, b: DVec2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Counter-clockwise convex hull starting from the lexicographically
/// smallest point.
///
/// Non-left turns (`cross <= 0`) are popped, so collinear boundary points are
/// dropped. One or zero points are returned as-is; two points or a collinear
/// set yield a degenerate one or two point ring.
pub fn convex_hull(points: &[DVec2]) -> Vec<DVec2> {
    let mut pts = dedupe_points(points, DEDUP_EPSILON);
    if pts.len() <= 1 {
        return pts;
    }
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut lower: Vec<DVec2> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<DVec2> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
