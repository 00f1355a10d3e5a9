//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_dedup_epsilon_is_positive() {
    assert!(DEDUP_EPSILON > 0.0, "DEDUP_EPSILON must be positive");
}

#[test]
fn test_span_epsilon_smaller_than_dedup_grid() {
    assert!(
        FLATNESS_SPAN_EPSILON < DEDUP_EPSILON,
        "a deduplicated mesh with a non-zero span must never be treated as a point"
    );
}

#[test]
fn test_hull_epsilon_is_small() {
    assert!(HULL_EPSILON < 1e-6, "HULL_EPSILON should be small for precision");
}

// =============================================================================
// BOUNDARY TESTS
// =============================================================================

#[test]
fn test_alpha_values_are_positive() {
    assert!(DEFAULT_ALPHA > 0.0);
    assert!(TOP_DOWN_ALPHA > 0.0);
}

#[test]
fn test_knn_uses_three_neighbours() {
    assert_eq!(KNN_NEIGHBORS, 3);
}

// =============================================================================
// SCALING AND RESOLUTION TESTS
// =============================================================================

#[test]
fn test_default_multiplier_is_identity() {
    assert_eq!(DEFAULT_SCALE_MULTIPLIER, 1.0);
}

#[test]
fn test_sample_limits() {
    assert!(ORDER_SAMPLE_LIMIT >= 1);
    assert!(ORDER_SAMPLE_LIMIT <= GLOBAL_ORDER_SAMPLE_LIMIT);
}

// =============================================================================
// LAYOUT TESTS
// =============================================================================

#[test]
fn test_mesh_extensions_are_lowercase() {
    for ext in MESH_EXTENSIONS {
        assert_eq!(ext, ext.to_lowercase());
        assert!(!ext.starts_with('.'));
    }
}

#[test]
fn test_models_root_is_inside_export_root() {
    assert!(DEFAULT_MODELS_ROOT.starts_with(DEFAULT_EXPORT_ROOT));
}
