//! # Planar Hull
//!
//! 2D convex hull used by the coplanar fallback. Andrew's monotone chain over
//! the lexicographically sorted points.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{HullError, HullResult};

/// A 2D convex polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarHull {
    /// Boundary vertices in counter-clockwise order, without collinear
    /// points.
    pub vertices: Vec<DVec2>,
    /// Mean of the boundary vertices.
    pub centroid: DVec2,
}

impl PlanarHull {
    /// Returns true if the hull is a point or a segment.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }
}

/// Twice the signed area of the triangle `o, a, b`. Positive for a left turn.
#[inline]
fn cross(o: DVec2, a: DVec2, b: DVec2) -> f64 {
    (a - o).perp_dot(b - o)
}

/// Computes the convex hull of `points`.
///
/// Points within `eps` of each other on both axes count as one. Turns with
/// twice-area at most `eps` are treated as straight and their middle point
/// dropped.
pub fn convex_hull_2d(points: &[DVec2], eps: f64) -> HullResult<PlanarHull> {
    if points.is_empty() {
        return Err(HullError::param_data("no points for planar hull"));
    }
    let mut pts = Vec::new();
    pts.try_reserve_exact(points.len())
        .map_err(|_| HullError::mem_alloc("planar point buffer"))?;
    pts.extend_from_slice(points);
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).abs().max_element() <= eps);

    let vertices = if pts.len() < 3 {
        pts
    } else {
        let mut lower: Vec<DVec2> = Vec::with_capacity(pts.len());
        for &p in &pts {
            while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= eps {
                lower.pop();
            }
            lower.push(p);
        }
        let mut upper: Vec<DVec2> = Vec::with_capacity(pts.len());
        for &p in pts.iter().rev() {
            while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= eps {
                upper.pop();
            }
            upper.push(p);
        }
        lower.pop();
        upper.pop();
        lower.extend(upper);
        lower
    };

    let centroid = vertices.iter().copied().sum::<DVec2>() / vertices.len() as f64;
    Ok(PlanarHull { vertices, centroid })
}
