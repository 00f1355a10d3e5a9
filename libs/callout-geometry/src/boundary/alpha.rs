//! # Alpha Shape
//!
//! Detailed concave boundary built from a Bowyer-Watson Delaunay
//! triangulation. Triangles whose circumradius is below `1 / alpha` are kept
//! and the exterior ring of the largest kept region is returned.
//!
//! Orientation and in-circle tests use the adaptive predicates from `robust`,
//! so the triangulation is exact for the integer-ish coordinates that
//! exported meshes tend to have.

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec2;
use robust::{incircle, orient2d, Coord};

use super::{convex_hull, BoundaryStrategy, BoundaryTier};
use crate::error::GeometryError;
use crate::points::polygon_area;

const STRATEGY: &str = "alpha_shape";

/// Size of the enclosing super triangle relative to the point spread.
const SUPER_TRIANGLE_SCALE: f64 = 100.0;

/// Delaunay alpha-shape strategy, reported as [`BoundaryTier::Detailed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaShape;

impl BoundaryStrategy for AlphaShape {
    fn name(&self) -> &'static str {
        STRATEGY
    }

    fn tier(&self) -> BoundaryTier {
        BoundaryTier::Detailed
    }

    fn trace(&self, points: &[DVec2], alpha: f64) -> Result<Vec<DVec2>, GeometryError> {
        alpha_shape(points, alpha)
    }
}

/// Computes the exterior ring of the alpha shape of `points`.
///
/// An `alpha` of zero degenerates to the convex hull. Fails when no triangle
/// survives the radius filter or the input is collinear.
pub fn alpha_shape(points: &[DVec2], alpha: f64) -> Result<Vec<DVec2>, GeometryError> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(GeometryError::boundary_failed(
            STRATEGY,
            format!("alpha must be finite and non-negative, got {alpha}"),
        ));
    }
    if alpha == 0.0 {
        return Ok(convex_hull(points));
    }

    let triangles = delaunay_triangles(points)?;
    let max_radius = 1.0 / alpha;
    let kept: Vec<[usize; 3]> = triangles
        .into_iter()
        .filter(|t| circumradius(points[t[0]], points[t[1]], points[t[2]]) < max_radius)
        .collect();

    if kept.is_empty() {
        return Err(GeometryError::boundary_failed(
            STRATEGY,
            format!("no triangle has a circumradius below {max_radius}"),
        ));
    }

    let ring = largest_exterior_ring(points, &kept)
        .ok_or_else(|| GeometryError::boundary_failed(STRATEGY, "kept triangles have no exterior ring"))?;
    Ok(ring.into_iter().map(|i| points[i]).collect())
}

// =============================================================================
// DELAUNAY
// =============================================================================

#[inline]
fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Bowyer-Watson triangulation. Triangles are index triples in
/// counter-clockwise order.
pub(crate) fn delaunay_triangles(points: &[DVec2]) -> Result<Vec<[usize; 3]>, GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::degenerate(format!(
            "triangulation needs at least 3 points, got {}",
            points.len()
        )));
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::degenerate("non-finite point coordinates"));
    }

    let (min, max) = points
        .iter()
        .fold((points[0], points[0]), |(min, max), p| (min.min(*p), max.max(*p)));
    let center = (min + max) * 0.5;
    let spread = (max - min).max_element().max(1.0) * SUPER_TRIANGLE_SCALE;

    let n = points.len();
    let mut vertices: Vec<DVec2> = points.to_vec();
    vertices.push(center + DVec2::new(-spread, -spread));
    vertices.push(center + DVec2::new(spread, -spread));
    vertices.push(center + DVec2::new(0.0, spread));

    let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

    for i in 0..n {
        let p = coord(vertices[i]);

        let (bad, good): (Vec<[usize; 3]>, Vec<[usize; 3]>) =
            triangles.into_iter().partition(|t| {
                incircle(coord(vertices[t[0]]), coord(vertices[t[1]]), coord(vertices[t[2]]), p) > 0.0
            });
        triangles = good;

        let edges: BTreeSet<(usize, usize)> = bad
            .iter()
            .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
            .collect();

        for &(a, b) in &edges {
            if edges.contains(&(b, a)) {
                continue;
            }
            if orient2d(coord(vertices[a]), coord(vertices[b]), p) > 0.0 {
                triangles.push([a, b, i]);
            }
        }
    }

    triangles.retain(|t| t.iter().all(|&v| v < n));
    if triangles.is_empty() {
        return Err(GeometryError::degenerate("points are collinear"));
    }
    Ok(triangles)
}

fn circumradius(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    let twice_area = orient2d(coord(a), coord(b), coord(c)).abs();
    if twice_area == 0.0 {
        return f64::INFINITY;
    }
    (a.distance(b) * b.distance(c) * c.distance(a)) / (2.0 * twice_area)
}

// =============================================================================
// RING TRACING
// =============================================================================

/// Traces the boundary loops of a triangle set and returns the
/// counter-clockwise loop enclosing the largest area.
fn largest_exterior_ring(points: &[DVec2], triangles: &[[usize; 3]]) -> Option<Vec<usize>> {
    let directed: BTreeSet<(usize, usize)> = triangles
        .iter()
        .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
        .collect();

    let mut outgoing: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &(a, b) in &directed {
        if !directed.contains(&(b, a)) {
            outgoing.entry(a).or_default().push(b);
        }
    }

    let mut best: Option<(f64, Vec<usize>)> = None;
    while let Some(start) = outgoing.keys().next().copied() {
        let ring = trace_loop(points, &mut outgoing, start)?;
        let coords: Vec<DVec2> = ring.iter().map(|&i| points[i]).collect();
        let area = polygon_area(&coords);
        if area > 0.0 && best.as_ref().map_or(true, |(a, _)| area > *a) {
            best = Some((area, ring));
        }
    }
    best.map(|(_, ring)| ring)
}

/// Follows unused boundary edges from `start` until the loop closes.
///
/// At a pinch vertex the outgoing edge that turns most sharply clockwise
/// from the incoming edge is taken, which keeps loops touching at a single
/// vertex separate.
fn trace_loop(
    points: &[DVec2],
    outgoing: &mut BTreeMap<usize, Vec<usize>>,
    start: usize,
) -> Option<Vec<usize>> {
    let mut ring = vec![start];
    let mut prev = start;
    let mut current = take_edge(outgoing, start, None, points)?;

    while current != start {
        ring.push(current);
        let next = take_edge(outgoing, current, Some(prev), points)?;
        prev = current;
        current = next;
    }
    Some(ring)
}

fn take_edge(
    outgoing: &mut BTreeMap<usize, Vec<usize>>,
    from: usize,
    came_from: Option<usize>,
    points: &[DVec2],
) -> Option<usize> {
    let targets = outgoing.get_mut(&from)?;
    let pick = match came_from {
        Some(prev) if targets.len() > 1 => {
            let back = points[prev] - points[from];
            let back_angle = back.y.atan2(back.x);
            let clockwise_from_back = |to: usize| {
                let d = points[to] - points[from];
                (back_angle - d.y.atan2(d.x)).rem_euclid(std::f64::consts::TAU)
            };
            (0..targets.len())
                .min_by(|&i, &j| clockwise_from_back(targets[i]).total_cmp(&clockwise_from_back(targets[j])))
                .unwrap_or(0)
        }
        _ => 0,
    };
    let to = targets.swap_remove(pick);
    if targets.is_empty() {
        outgoing.remove(&from);
    }
    Some(to)
}
