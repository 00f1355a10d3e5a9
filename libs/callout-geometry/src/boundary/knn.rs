//! k-nearest-neighbour concave hull trace.
//!
//! Walks from the leftmost point, each step moving to the unvisited neighbour
//! (among the `k` nearest) with the largest left turn. Cheap and
//! dependency-free, but the ring may cut corners on sparse meshes.

use std::f64::consts::PI;

use glam::DVec2;

use super::{BoundaryStrategy, BoundaryTier};
use crate::error::GeometryError;

const STRATEGY: &str = "knn_concave_hull";

/// kNN trace strategy, reported as [`BoundaryTier::Approximate`].
#[derive(Debug, Clone, Copy)]
pub struct KnnConcaveHull {
    k: usize,
}

impl KnnConcaveHull {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl BoundaryStrategy for KnnConcaveHull {
    fn name(&self) -> &'static str {
        STRATEGY
    }

    fn tier(&self) -> BoundaryTier {
        BoundaryTier::Approximate
    }

    fn trace(&self, points: &[DVec2], _alpha: f64) -> Result<Vec<DVec2>, GeometryError> {
        concave_hull_knn(points, self.k)
    }
}

/// Traces an approximate concave ring through `points`.
///
/// The walk stops when the start is revisited, when every neighbour has
/// already been visited, or once it has visited every point.
pub fn concave_hull_knn(points: &[DVec2], k: usize) -> Result<Vec<DVec2>, GeometryError> {
    if k == 0 {
        return Err(GeometryError::boundary_failed(STRATEGY, "k must be at least 1"));
    }
    if points.len() <= 3 {
        return Ok(points.to_vec());
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::boundary_failed(STRATEGY, "non-finite point coordinates"));
    }

    let start = leftmost(points);
    let mut hull = vec![start];
    let mut visited = vec![false; points.len()];
    visited[start] = true;
    let mut current = start;

    loop {
        let neighbors = nearest_neighbors(points, current, k.min(points.len() - 1));
        let Some(&first) = neighbors.first() else {
            break;
        };

        let here = points[current];
        let mut best_angle = -PI;
        let mut next = first;
        for &idx in &neighbors {
            if visited[idx] {
                continue;
            }
            let step = points[idx] - here;
            let angle = match hull.len() {
                1 => step.y.atan2(step.x),
                len => {
                    let heading = here - points[hull[len - 2]];
                    heading.perp_dot(step).atan2(heading.dot(step))
                }
            };
            if angle > best_angle {
                best_angle = angle;
                next = idx;
            }
        }

        if next == start || visited[next] {
            break;
        }
        hull.push(next);
        visited[next] = true;
        current = next;

        if hull.len() > points.len() {
            break;
        }
    }

    Ok(hull.into_iter().map(|i| points[i]).collect())
}

/// Index of the point with the smallest x; ties keep the first.
fn leftmost(points: &[DVec2]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.x < points[best].x {
            best = i;
        }
    }
    best
}

/// The `k` nearest points to `points[of]`, excluding itself, nearest first.
/// Equal distances are ordered by index.
fn nearest_neighbors(points: &[DVec2], of: usize, k: usize) -> Vec<usize> {
    let origin = points[of];
    let mut candidates: Vec<(f64, usize)> = points
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != of)
        .map(|(i, p)| (origin.distance_squared(*p), i))
        .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    candidates.into_iter().take(k).map(|(_, i)| i).collect()
}
