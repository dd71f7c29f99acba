//! # Batch Hulls
//!
//! Independent hulls computed in parallel, for example one per image plane.
//! Each hull owns its workspace, so nothing is shared between tasks.

use config::constants::HullConfig;
use rayon::prelude::*;

use crate::error::HullResult;
use crate::hull::{convex_hull_3d_with_config, HullOutcome};
use crate::point::Vertices;

/// Computes the convex hull of every vertex array in `inputs`.
///
/// Results are in input order. A failure in one hull does not affect the
/// others.
///
/// ## Example
///
/// ```rust
/// use config::constants::HullConfig;
/// use glam::DVec3;
/// use woolz_hull::{convex_hull_3d_batch, Vertices};
///
/// let a = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// let b = [DVec3::ZERO; 2];
/// let results = convex_hull_3d_batch(&[Vertices::D3(&a), Vertices::D3(&b)], &HullConfig::default());
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
pub fn convex_hull_3d_batch(
    inputs: &[Vertices<'_>],
    config: &HullConfig,
) -> Vec<HullResult<HullOutcome>> {
    log::debug!("computing {} hulls in parallel", inputs.len());
    inputs
        .par_iter()
        .map(|points| convex_hull_3d_with_config(points.vertex_type(), points.len(), Some(*points), config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull::{hull_of_int_points, HullStatus};
    use glam::IVec3;

    fn box_corners(size: i32) -> Vec<IVec3> {
        (0..8)
            .map(|i| IVec3::new(i & 1, (i >> 1) & 1, (i >> 2) & 1) * size)
            .collect()
    }

    #[test]
    fn test_batch_matches_sequential() {
        let boxes: Vec<Vec<IVec3>> = (1..=6).map(box_corners).collect();
        let inputs: Vec<Vertices<'_>> = boxes.iter().map(|b| Vertices::I3(b)).collect();
        let results = convex_hull_3d_batch(&inputs, &HullConfig::default());
        assert_eq!(results.len(), boxes.len());
        for (points, result) in boxes.iter().zip(&results) {
            let batch = result.as_ref().unwrap();
            let single = hull_of_int_points(points).unwrap();
            assert_eq!(batch, &single);
            assert_eq!(batch.status, HullStatus::Ok);
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(convex_hull_3d_batch(&[], &HullConfig::default()).is_empty());
    }
}
