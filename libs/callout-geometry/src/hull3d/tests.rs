//! # 3D Hull Tests

use super::*;
use crate::error::GeometryError;

fn box_corners(size: DVec3) -> Vec<DVec3> {
    let mut corners = Vec::new();
    for x in [0.0, size.x] {
        for y in [0.0, size.y] {
            for z in [0.0, size.z] {
                corners.push(DVec3::new(x, y, z));
            }
        }
    }
    corners
}

#[test]
fn test_tetrahedron_keeps_all_vertices() {
    let points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.5, 1.0, 0.0),
        DVec3::new(0.5, 0.5, 1.0),
    ];
    assert_eq!(hull_vertex_indices(&points).unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn test_interior_points_are_dropped() {
    let mut points = box_corners(DVec3::new(4.0, 2.0, 1.0));
    points.push(DVec3::new(2.0, 1.0, 0.5));
    points.push(DVec3::new(1.0, 1.5, 0.25));

    let hull = convex_hull_3d(&points);
    assert_eq!(hull.len(), 8);
    assert_eq!(hull, box_corners(DVec3::new(4.0, 2.0, 1.0)));
}

#[test]
fn test_duplicates_are_removed_before_hull() {
    let mut points = box_corners(DVec3::ONE);
    points.extend(box_corners(DVec3::ONE));
    assert_eq!(convex_hull_3d(&points).len(), 8);
}

#[test]
fn test_planar_input_returns_unique_points() {
    let slab = vec![
        DVec3::new(0.0, 0.0, 5.0),
        DVec3::new(3.0, 0.0, 5.0),
        DVec3::new(1.0, 1.0, 5.0),
        DVec3::new(3.0, 3.0, 5.0),
        DVec3::new(0.0, 3.0, 5.0),
        DVec3::new(0.0, 3.0, 5.0),
    ];
    assert!(matches!(
        hull_vertex_indices(&slab[..5]),
        Err(GeometryError::DegenerateGeometry { .. })
    ));
    assert_eq!(convex_hull_3d(&slab), slab[..5].to_vec());
}

#[test]
fn test_small_inputs_pass_through() {
    assert!(convex_hull_3d(&[]).is_empty());
    let tri = [DVec3::ZERO, DVec3::X, DVec3::Y];
    assert_eq!(convex_hull_3d(&tri), tri.to_vec());
}

#[test]
fn test_sphere_samples_all_on_hull() {
    let mut points = Vec::new();
    for i in 0..6 {
        for j in 1..6 {
            let theta = i as f64 * std::f64::consts::TAU / 6.0;
            let phi = j as f64 * std::f64::consts::PI / 6.0;
            points.push(DVec3::new(
                theta.cos() * phi.sin(),
                theta.sin() * phi.sin(),
                phi.cos(),
            ));
        }
    }
    points.push(DVec3::Z);
    points.push(DVec3::NEG_Z);
    points.push(DVec3::ZERO);

    let hull = convex_hull_3d(&points);
    assert_eq!(hull.len(), points.len() - 1);
    assert!(!hull.contains(&DVec3::ZERO));
}
