//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_hull_epsilon_is_positive() {
    assert!(HULL_EPSILON > 0.0, "HULL_EPSILON must be positive");
}

#[test]
fn test_hull_epsilon_matches_woolz() {
    // Woolz uses an absolute 1e-6 for all hull length tests
    assert_eq!(HULL_EPSILON, 1.0e-6);
}

// =============================================================================
// ALLOCATION TESTS
// =============================================================================

#[test]
fn test_pool_block_size_is_nonzero() {
    assert!(POOL_BLOCK_SIZE > 0);
}

#[test]
fn test_min_hull_points_is_a_tetrahedron() {
    assert_eq!(MIN_HULL_POINTS, 4);
}
