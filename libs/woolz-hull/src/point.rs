//! # Vertex Representations
//!
//! Caller-facing vertex arrays and the [`HullPoint`] abstraction that lets the
//! hull workspace run unchanged over integer and double coordinates.

use std::cmp::Ordering;

use config::constants::HULL_EPSILON;
use glam::{DVec2, DVec3, IVec2, IVec3};
use serde::{Deserialize, Serialize};

use crate::domain::{HullPoint3, HullVertices};

/// Vertex representation tags, mirroring the Woolz vertex types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexType {
    /// 2D integer vertices.
    I2,
    /// 2D double vertices.
    D2,
    /// 3D integer vertices.
    I3,
    /// 3D double vertices.
    D3,
}

/// Borrowed array of caller vertices.
#[derive(Debug, Clone, Copy)]
pub enum Vertices<'a> {
    /// 2D integer vertices.
    I2(&'a [IVec2]),
    /// 2D double vertices.
    D2(&'a [DVec2]),
    /// 3D integer vertices.
    I3(&'a [IVec3]),
    /// 3D double vertices.
    D3(&'a [DVec3]),
}

impl<'a> Vertices<'a> {
    /// Returns the representation tag of the array.
    pub fn vertex_type(&self) -> VertexType {
        match self {
            Vertices::I2(_) => VertexType::I2,
            Vertices::D2(_) => VertexType::D2,
            Vertices::I3(_) => VertexType::I3,
            Vertices::D3(_) => VertexType::D3,
        }
    }

    /// Returns the number of vertices in the array.
    pub fn len(&self) -> usize {
        match self {
            Vertices::I2(v) => v.len(),
            Vertices::D2(v) => v.len(),
            Vertices::I3(v) => v.len(),
            Vertices::D3(v) => v.len(),
        }
    }

    /// Returns true if the array is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [DVec3]> for Vertices<'a> {
    fn from(points: &'a [DVec3]) -> Self {
        Vertices::D3(points)
    }
}

impl<'a> From<&'a [IVec3]> for Vertices<'a> {
    fn from(points: &'a [IVec3]) -> Self {
        Vertices::I3(points)
    }
}

/// A 3D position type the hull can be computed over.
///
/// All geometry is evaluated in `f64`; the trait only fixes how positions are
/// compared for deduplication and how results are converted back.
pub trait HullPoint: Copy + Send + Sync + 'static {
    /// Tag of this representation.
    const VERTEX_TYPE: VertexType;

    /// Position as a double vector.
    fn to_dvec3(self) -> DVec3;

    /// Lexicographic ordering used to bring duplicates together.
    fn cmp_position(a: &Self, b: &Self) -> Ordering;

    /// Whether two positions are the same point.
    fn same_position(a: Self, b: Self, eps: f64) -> bool;

    /// Converts a computed position, rounding to the nearest integer if needed.
    fn round_from(v: DVec3) -> Self;

    /// Converts a computed position, rounding away from `centre` if needed.
    fn round_away(v: DVec3, centre: DVec3) -> Self;

    /// Wraps an output vertex array.
    fn into_vertices(points: Vec<Self>) -> HullVertices;

    /// Wraps a single output position.
    fn into_point3(self) -> HullPoint3;
}

impl HullPoint for DVec3 {
    const VERTEX_TYPE: VertexType = VertexType::D3;

    #[inline]
    fn to_dvec3(self) -> DVec3 {
        self
    }

    fn cmp_position(a: &Self, b: &Self) -> Ordering {
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    }

    fn same_position(a: Self, b: Self, eps: f64) -> bool {
        let d = (a - b).abs();
        d.x <= eps && d.y <= eps && d.z <= eps
    }

    #[inline]
    fn round_from(v: DVec3) -> Self {
        v
    }

    #[inline]
    fn round_away(v: DVec3, _centre: DVec3) -> Self {
        v
    }

    fn into_vertices(points: Vec<Self>) -> HullVertices {
        HullVertices::Double(points)
    }

    fn into_point3(self) -> HullPoint3 {
        HullPoint3::Double(self)
    }
}

impl HullPoint for IVec3 {
    const VERTEX_TYPE: VertexType = VertexType::I3;

    #[inline]
    fn to_dvec3(self) -> DVec3 {
        self.as_dvec3()
    }

    fn cmp_position(a: &Self, b: &Self) -> Ordering {
        a.x.cmp(&b.x).then(a.y.cmp(&b.y)).then(a.z.cmp(&b.z))
    }

    fn same_position(a: Self, b: Self, _eps: f64) -> bool {
        a == b
    }

    fn round_from(v: DVec3) -> Self {
        v.round().as_ivec3()
    }

    fn round_away(v: DVec3, centre: DVec3) -> Self {
        // Values that are integers up to round-off are kept as they are.
        let away = |x: f64, c: f64| {
            let r = x.round();
            if (x - r).abs() <= HULL_EPSILON {
                r
            } else if x < c {
                x.floor()
            } else {
                x.ceil()
            }
        };
        DVec3::new(
            away(v.x, centre.x),
            away(v.y, centre.y),
            away(v.z, centre.z),
        )
        .as_ivec3()
    }

    fn into_vertices(points: Vec<Self>) -> HullVertices {
        HullVertices::Int(points)
    }

    fn into_point3(self) -> HullPoint3 {
        HullPoint3::Int(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_type_and_len() {
        let pts = [DVec3::ZERO, DVec3::X];
        let v = Vertices::from(&pts[..]);
        assert_eq!(v.vertex_type(), VertexType::D3);
        assert_eq!(v.len(), 2);

        let ipts = [IVec2::ZERO];
        assert_eq!(Vertices::I2(&ipts).vertex_type(), VertexType::I2);
    }

    #[test]
    fn test_double_duplicates_use_per_axis_tolerance() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        assert!(DVec3::same_position(a, a + DVec3::splat(5.0e-7), 1.0e-6));
        assert!(!DVec3::same_position(a, a + DVec3::new(0.0, 2.0e-6, 0.0), 1.0e-6));
    }

    #[test]
    fn test_integer_duplicates_are_exact() {
        assert!(IVec3::same_position(IVec3::ONE, IVec3::ONE, 1.0e-6));
        assert!(!IVec3::same_position(IVec3::ONE, IVec3::new(1, 1, 2), 10.0));
    }

    #[test]
    fn test_lexicographic_order() {
        let a = IVec3::new(0, 5, 5);
        let b = IVec3::new(1, 0, 0);
        assert_eq!(IVec3::cmp_position(&a, &b), Ordering::Less);
        let c = DVec3::new(0.0, 0.0, 1.0);
        let d = DVec3::new(0.0, 0.0, -1.0);
        assert_eq!(DVec3::cmp_position(&c, &d), Ordering::Greater);
    }

    #[test]
    fn test_integer_rounding() {
        assert_eq!(IVec3::round_from(DVec3::new(0.4, 0.6, -1.5)), IVec3::new(0, 1, -2));
        let centre = DVec3::ZERO;
        assert_eq!(
            IVec3::round_away(DVec3::new(0.2, -0.2, 1.0), centre),
            IVec3::new(1, -1, 1)
        );
        assert_eq!(
            IVec3::round_away(DVec3::new(10.0 + 1.0e-12, 5.0 - 1.0e-12, -3.0), centre),
            IVec3::new(10, 5, -3)
        );
    }
}
