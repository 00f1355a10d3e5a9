//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to new faces
//! 5. Repeat until no faces have outside points

use std::collections::{BTreeSet, HashMap};

use config::constants::HULL_EPSILON;
use glam::DVec3;

use crate::error::GeometryError;

/// Computes the indices of the points on the convex hull, ascending.
///
/// `points` must already be free of duplicates.
///
/// # Errors
///
/// [`GeometryError::DegenerateGeometry`] when fewer than four points are
/// given or all points are collinear or coplanar.
pub fn hull_vertex_indices(points: &[DVec3]) -> Result<Vec<usize>, GeometryError> {
    if points.len() < 4 {
        return Err(GeometryError::degenerate(
            "Convex hull requires at least 4 points",
        ));
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::degenerate("Convex hull input is not finite"));
    }

    let (faces, interior) = build_initial_simplex(points)?;
    let faces = quickhull_iterate(faces, interior, points);

    let used: BTreeSet<usize> = faces.iter().flat_map(|f| f.vertices).collect();
    Ok(used.into_iter().collect())
}

/// A face of the convex hull (triangle).
#[derive(Debug, Clone)]
struct HullFace {
    /// Indices of the three vertices
    vertices: [usize; 3],
    /// Outward-pointing normal
    normal: DVec3,
    /// Distance from origin along normal
    distance: f64,
    /// Points outside this face (indices into points array)
    outside_points: Vec<usize>,
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let normal = (points[v1] - p0).cross(points[v2] - p0).normalize_or_zero();
        Self {
            vertices: [v0, v1, v2],
            normal,
            distance: normal.dot(p0),
            outside_points: Vec::new(),
        }
    }

    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    fn is_outside(&self, point: DVec3) -> bool {
        self.signed_distance(point) > HULL_EPSILON
    }

    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points
            .iter()
            .max_by(|&&a, &&b| {
                self.signed_distance(points[a])
                    .total_cmp(&self.signed_distance(points[b]))
            })
            .copied()
    }
}

/// Builds the initial tetrahedron from extreme points and returns it with a
/// point strictly inside the hull.
fn build_initial_simplex(points: &[DVec3]) -> Result<(Vec<HullFace>, DVec3), GeometryError> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        if p.x < points[extremes[0]].x { extremes[0] = i; }
        if p.x > points[extremes[1]].x { extremes[1] = i; }
        if p.y < points[extremes[2]].y { extremes[2] = i; }
        if p.y > points[extremes[3]].y { extremes[3] = i; }
        if p.z < points[extremes[4]].z { extremes[4] = i; }
        if p.z > points[extremes[5]].z { extremes[5] = i; }
    }

    let (p0, p1) = find_farthest_pair(&extremes, points);
    let p2 = find_farthest_from_line(p0, p1, points)?;
    let p3 = find_farthest_from_plane(p0, p1, p2, points)?;

    let interior = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;
    let mut faces = vec![
        create_face_outward(p0, p1, p2, interior, points),
        create_face_outward(p0, p2, p3, interior, points),
        create_face_outward(p0, p3, p1, interior, points),
        create_face_outward(p1, p3, p2, interior, points),
    ];

    let simplex = [p0, p1, p2, p3];
    for idx in (0..points.len()).filter(|i| !simplex.contains(i)) {
        assign_outside(&mut faces, idx, points);
    }

    Ok((faces, interior))
}

fn assign_outside(faces: &mut [HullFace], idx: usize, points: &[DVec3]) {
    if let Some(face) = faces.iter_mut().find(|f| f.is_outside(points[idx])) {
        face.outside_points.push(idx);
    }
}

/// Finds the pair of points with maximum distance.
fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = 0.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in indices.iter().skip(i + 1) {
            let dist = (points[a] - points[b]).length_squared();
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

/// Finds the point farthest from a line.
fn find_farthest_from_line(p0: usize, p1: usize, points: &[DVec3]) -> Result<usize, GeometryError> {
    let line_dir = (points[p1] - points[p0]).normalize_or_zero();
    let mut max_dist = HULL_EPSILON;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let v = *p - points[p0];
        let dist = (v - v.dot(line_dir) * line_dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| GeometryError::degenerate("All points are collinear"))
}

/// Finds the point farthest from a plane.
fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
) -> Result<usize, GeometryError> {
    let normal = (points[p1] - points[p0])
        .cross(points[p2] - points[p0])
        .normalize_or_zero();

    let mut max_dist = HULL_EPSILON;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let dist = normal.dot(*p - points[p0]).abs();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| GeometryError::degenerate("All points are coplanar"))
}

/// Creates a face whose normal points away from `interior`.
fn create_face_outward(v0: usize, v1: usize, v2: usize, interior: DVec3, points: &[DVec3]) -> HullFace {
    let face = HullFace::new(v0, v1, v2, points);
    if face.signed_distance(interior) > 0.0 {
        HullFace::new(v0, v2, v1, points)
    } else {
        face
    }
}

/// Main QuickHull iteration.
fn quickhull_iterate(mut faces: Vec<HullFace>, interior: DVec3, points: &[DVec3]) -> Vec<HullFace> {
    let max_iterations = points.len() * 2;

    for _ in 0..max_iterations {
        let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) else {
            break;
        };
        let Some(farthest) = faces[face_idx].farthest_point(points) else {
            break;
        };
        let apex = points[farthest];

        let mut visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_outside(apex))
            .map(|(i, _)| i)
            .collect();
        if visible.is_empty() {
            faces[face_idx].outside_points.retain(|&p| p != farthest);
            continue;
        }

        let horizon = find_horizon_edges(&faces, &visible);

        let mut reassign: Vec<usize> = visible
            .iter()
            .flat_map(|&idx| faces[idx].outside_points.iter().copied())
            .collect();
        reassign.retain(|&p| p != farthest);

        visible.sort_unstable_by(|a, b| b.cmp(a));
        for idx in visible {
            faces.swap_remove(idx);
        }

        for (e0, e1) in horizon {
            faces.push(create_face_outward(e0, e1, farthest, interior, points));
        }

        for idx in reassign {
            assign_outside(&mut faces, idx, points);
        }
    }

    faces
}

/// Finds horizon edges from visible faces.
fn find_horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
    let face_edges = |idx: usize| {
        let v = faces[idx].vertices;
        [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])]
    };

    for &idx in visible {
        for (a, b) in face_edges(idx) {
            *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    // Horizon edges appear exactly once among visible faces
    visible
        .iter()
        .flat_map(|&idx| face_edges(idx))
        .filter(|&(a, b)| edge_count.get(&(a.min(b), a.max(b))) == Some(&1))
        .collect()
}
