//! # glTF Reader Tests

use super::*;
use crate::test_support::{glb, mesh_document, mesh_glb, positions_bin, SQUARE};
use approx::assert_relative_eq;
use base64::Engine as _;
use serde_json::json;

fn assert_vec3_eq(actual: DVec3, expected: DVec3) {
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-6);
    assert_relative_eq!(actual.y, expected.y, epsilon = 1e-6);
    assert_relative_eq!(actual.z, expected.z, epsilon = 1e-6);
}

#[test]
fn test_glb_positions_follow_node_translation() {
    let bytes = mesh_glb(&SQUARE, json!([{ "mesh": 0, "translation": [10.0, 0.0, 5.0] }]), &[0]);
    let doc = GltfDocument::from_slice(&bytes).unwrap();
    let positions = doc.world_positions(None).unwrap();

    assert_eq!(positions.len(), 4);
    assert_vec3_eq(positions[0], DVec3::new(9.0, -1.0, 5.0));
    assert_vec3_eq(positions[2], DVec3::new(11.0, 1.0, 5.0));
}

#[test]
fn test_child_transform_composes_with_parent() {
    let nodes = json!([
        { "name": "root", "scale": [2.0, 2.0, 2.0], "children": [1] },
        { "mesh": 0, "translation": [1.0, 0.0, 0.0] }
    ]);
    let doc = GltfDocument::from_slice(&mesh_glb(&SQUARE, nodes, &[0])).unwrap();
    let positions = doc.world_positions(None).unwrap();

    // (v + (1,0,0)) * 2
    assert_vec3_eq(positions[0], DVec3::new(0.0, -2.0, 0.0));
    assert_vec3_eq(positions[1], DVec3::new(4.0, -2.0, 0.0));
}

#[test]
fn test_rotation_quaternion_is_applied() {
    // 90° about Z.
    let half = std::f64::consts::FRAC_1_SQRT_2;
    let nodes = json!([{ "mesh": 0, "rotation": [0.0, 0.0, half, half] }]);
    let doc = GltfDocument::from_slice(&mesh_glb(&[[1.0, 0.0, 0.0]], nodes, &[0])).unwrap();
    assert_vec3_eq(doc.world_positions(None).unwrap()[0], DVec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_matrix_overrides_trs() {
    let matrix = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        3.0, 4.0, 5.0, 1.0,
    ];
    let nodes = json!([{ "mesh": 0, "matrix": matrix, "translation": [100.0, 100.0, 100.0] }]);
    let doc = GltfDocument::from_slice(&mesh_glb(&[[0.0, 0.0, 0.0]], nodes, &[0])).unwrap();
    assert_vec3_eq(doc.world_positions(None).unwrap()[0], DVec3::new(3.0, 4.0, 5.0));
}

#[test]
fn test_document_without_scenes_uses_raw_meshes() {
    let mut document = mesh_document(&SQUARE, json!([{ "mesh": 0, "translation": [50.0, 0.0, 0.0] }]), &[0]);
    let obj = document.as_object_mut().unwrap();
    obj.remove("scene");
    obj.remove("scenes");

    let doc = GltfDocument::from_slice(&glb(&document, &positions_bin(&SQUARE))).unwrap();
    let positions = doc.world_positions(None).unwrap();
    assert_vec3_eq(positions[0], DVec3::new(-1.0, -1.0, 0.0));
}

#[test]
fn test_interleaved_stride_is_respected() {
    // position + a second vec3 attribute per vertex
    let interleaved: Vec<[f32; 3]> = vec![[1.0, 2.0, 3.0], [9.0, 9.0, 9.0], [4.0, 5.0, 6.0], [9.0, 9.0, 9.0]];
    let mut document = mesh_document(&interleaved, json!([{ "mesh": 0 }]), &[0]);
    document["accessors"][0]["count"] = json!(2);
    document["bufferViews"][0]["byteStride"] = json!(24);

    let doc = GltfDocument::from_slice(&glb(&document, &positions_bin(&interleaved))).unwrap();
    let positions = doc.world_positions(None).unwrap();
    assert_eq!(positions, vec![DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 5.0, 6.0)]);
}

#[test]
fn test_data_uri_buffer_in_json_document() {
    let bin = positions_bin(&SQUARE);
    let mut document = mesh_document(&SQUARE, json!([{ "mesh": 0 }]), &[0]);
    document["buffers"][0]["uri"] = json!(format!(
        "data:application/octet-stream;base64,{}",
        STANDARD.encode(&bin)
    ));

    let bytes = serde_json::to_vec(&document).unwrap();
    let doc = GltfDocument::from_slice(&bytes).unwrap();
    assert_eq!(doc.world_positions(None).unwrap().len(), 4);
}

#[test]
fn test_external_buffer_needs_base_dir() {
    let dir = std::env::temp_dir().join(format!("callout-mesh-gltf-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("square.bin"), positions_bin(&SQUARE)).unwrap();

    let mut document = mesh_document(&SQUARE, json!([{ "mesh": 0 }]), &[0]);
    document["buffers"][0]["uri"] = json!("square.bin");
    let gltf_path = dir.join("square.gltf");
    std::fs::write(&gltf_path, serde_json::to_vec(&document).unwrap()).unwrap();

    let doc = GltfDocument::from_slice(&std::fs::read(&gltf_path).unwrap()).unwrap();
    assert!(matches!(doc.world_positions(None), Err(MeshError::Unsupported { .. })));
    assert_eq!(doc.world_positions(Some(&dir)).unwrap().len(), 4);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_truncated_glb_is_rejected() {
    let bytes = mesh_glb(&SQUARE, json!([{ "mesh": 0 }]), &[0]);
    let err = GltfDocument::from_slice(&bytes[..10]).unwrap_err();
    assert!(matches!(err, MeshError::InvalidGltf { .. }));
}

#[test]
fn test_non_float_positions_are_unsupported() {
    let mut document = mesh_document(&SQUARE, json!([{ "mesh": 0 }]), &[0]);
    document["accessors"][0]["componentType"] = json!(5123);
    let doc = GltfDocument::from_slice(&glb(&document, &positions_bin(&SQUARE))).unwrap();
    assert!(matches!(doc.world_positions(None), Err(MeshError::Unsupported { .. })));
}

#[test]
fn test_scene_nodes_visit_shared_children_once() {
    let nodes = json!([
        { "name": "a", "children": [2] },
        { "name": "b", "children": [2] },
        { "name": "leaf", "mesh": 0 }
    ]);
    let doc = GltfDocument::from_slice(&mesh_glb(&SQUARE, nodes, &[0, 1])).unwrap();
    let names: Vec<_> = doc.scene_nodes().iter().map(|n| n.name.unwrap_or("")).collect();
    assert_eq!(names, vec!["a", "leaf", "b"]);
}

// =============================================================================
// CORRUPT ACCESSORS
// =============================================================================

fn square_with_accessor(edit: impl FnOnce(&mut serde_json::Value)) -> GltfDocument {
    let mut document = mesh_document(&SQUARE, json!([{ "mesh": 0 }]), &[0]);
    edit(&mut document["accessors"][0]);
    GltfDocument::from_slice(&glb(&document, &positions_bin(&SQUARE))).unwrap()
}

#[test]
fn test_huge_accessor_count_is_rejected_without_allocating() {
    let doc = square_with_accessor(|accessor| accessor["count"] = json!(u64::MAX / 4));
    assert!(matches!(doc.world_positions(None), Err(MeshError::InvalidReference { .. })));
}

#[test]
fn test_huge_accessor_byte_offset_is_rejected() {
    let doc = square_with_accessor(|accessor| accessor["byteOffset"] = json!(u64::MAX));
    assert!(matches!(doc.world_positions(None), Err(MeshError::InvalidReference { .. })));
}

#[test]
fn test_count_past_buffer_view_is_rejected() {
    let doc = square_with_accessor(|accessor| accessor["count"] = json!(5));
    assert!(matches!(doc.world_positions(None), Err(MeshError::InvalidReference { .. })));
}

#[test]
fn test_unbacked_accessor_count_is_capped() {
    let doc = square_with_accessor(|accessor| {
        accessor.as_object_mut().unwrap().remove("bufferView");
        accessor["count"] = json!(u64::MAX / 4);
    });
    assert!(matches!(doc.world_positions(None), Err(MeshError::InvalidReference { .. })));

    let doc = square_with_accessor(|accessor| {
        accessor.as_object_mut().unwrap().remove("bufferView");
    });
    assert_eq!(doc.world_positions(None).unwrap(), vec![DVec3::ZERO; 4]);
}
