//! # Degenerate Fallback
//!
//! Lower-dimensional covers for input that does not span 3D. The tier is
//! decided here from the points themselves, independently of where simplex
//! selection gave up.
//!
//! | Tier       | Vertices            | Faces                       |
//! |------------|---------------------|-----------------------------|
//! | Coincident | the point           | `[0, 0, 0]`                 |
//! | Colinear   | segment endpoints   | `[0, 1, 0]`                 |
//! | Coplanar   | hub, then boundary  | `[0, i + 1, (i + 1) % M + 1]` |

use glam::{DVec2, DVec3};

use crate::domain::HullDomain;
use crate::error::{HullError, HullResult};
use crate::planar::convex_hull_2d;
use crate::point::HullPoint;

use super::Degeneracy;

/// Builds the degenerate hull of `points`, the distinct input points.
pub(crate) fn degenerate_hull<P: HullPoint>(
    points: &[P],
    eps: f64,
) -> HullResult<(HullDomain, Degeneracy)> {
    let first = *points
        .first()
        .ok_or_else(|| HullError::param_data("no points for degenerate hull"))?;
    let pos: Vec<DVec3> = points.iter().map(|p| p.to_dvec3()).collect();
    let centre = pos.iter().copied().sum::<DVec3>() / pos.len() as f64;

    // Spread about the centroid.
    let far = farthest_from(&pos, centre);
    if pos[far].distance_squared(centre) < eps {
        log::debug!("degenerate hull: coincident points");
        return Ok((coincident(first), Degeneracy::Coincident));
    }

    // Diameter endpoints: the point farthest from the outlier, then the point
    // farthest from that segment.
    let i1 = far;
    let i0 = farthest_from(&pos, pos[i1]);
    let (v0, v1) = (pos[i0], pos[i1]);
    let (i2, off_line) = farthest_from_segment(&pos, v0, v1);
    if off_line < eps {
        log::debug!("degenerate hull: colinear points");
        return Ok((colinear(points[i0], points[i1]), Degeneracy::Colinear));
    }

    log::debug!("degenerate hull: coplanar points");
    coplanar::<P>(&pos, v0, v1, pos[i2], eps)
}

fn coincident<P: HullPoint>(p: P) -> HullDomain {
    HullDomain::new(P::into_vertices(vec![p]), vec![[0, 0, 0]], p.into_point3())
}

fn colinear<P: HullPoint>(a: P, b: P) -> HullDomain {
    let mid = P::round_from((a.to_dvec3() + b.to_dvec3()) * 0.5);
    HullDomain::new(P::into_vertices(vec![a, b]), vec![[0, 1, 0]], mid.into_point3())
}

/// Projects onto the plane through `v0, v1, v2`, takes the 2D hull and lifts
/// it back as a triangle fan around the lifted 2D centroid.
///
/// Falls back to a segment if the 2D hull has no area.
fn coplanar<P: HullPoint>(
    pos: &[DVec3],
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
    eps: f64,
) -> HullResult<(HullDomain, Degeneracy)> {
    let b0 = (v1 - v0).normalize();
    let b1 = b0.cross(b0.cross(v2 - v0)).normalize();
    let projected: Vec<DVec2> = pos
        .iter()
        .map(|&p| {
            let u = p - v0;
            DVec2::new(b0.dot(u), b1.dot(u))
        })
        .collect();
    let planar = convex_hull_2d(&projected, eps)?;
    let lift = |q: DVec2| v0 + b0 * q.x + b1 * q.y;

    if planar.is_degenerate() {
        // The off-line point collapsed under projection tolerance.
        let a = lift(planar.vertices[0]);
        let b = lift(planar.vertices[planar.vertices.len() - 1]);
        log::debug!("degenerate hull: planar hull collapsed to a segment");
        return Ok((colinear(P::round_from(a), P::round_from(b)), Degeneracy::Colinear));
    }

    let hub = lift(planar.centroid);
    let m = planar.vertices.len();
    let mut vertices = Vec::with_capacity(m + 1);
    vertices.push(P::round_from(hub));
    vertices.extend(planar.vertices.iter().map(|&q| P::round_away(lift(q), hub)));
    let faces = (0..m).map(|i| [0, i + 1, (i + 1) % m + 1]).collect();
    let domain = HullDomain::new(
        P::into_vertices(vertices),
        faces,
        P::round_from(hub).into_point3(),
    );
    Ok((domain, Degeneracy::Coplanar))
}

fn farthest_from(pos: &[DVec3], from: DVec3) -> usize {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, p) in pos.iter().enumerate() {
        let d = p.distance_squared(from);
        if d > best.1 {
            best = (i, d);
        }
    }
    best.0
}

/// Index of the point farthest from segment `a b` and its squared distance.
fn farthest_from_segment(pos: &[DVec3], a: DVec3, b: DVec3) -> (usize, f64) {
    let ab = b - a;
    let len2 = ab.length_squared();
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &p) in pos.iter().enumerate() {
        let t = if len2 > 0.0 {
            ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let d = p.distance_squared(a + ab * t);
        if d > best.1 {
            best = (i, d);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::IVec3;

    use crate::domain::{HullPoint3, HullVertices};

    const EPS: f64 = 1.0e-6;

    #[test]
    fn test_coincident() {
        let pts = [DVec3::splat(2.0)];
        let (d, kind) = degenerate_hull(&pts, EPS).unwrap();
        assert_eq!(kind, Degeneracy::Coincident);
        assert_eq!(d.vertex_count(), 1);
        assert_eq!(d.faces(), &[[0, 0, 0]]);
        assert_eq!(d.centroid(), HullPoint3::Double(DVec3::splat(2.0)));
    }

    #[test]
    fn test_symmetric_pair_is_colinear() {
        // Both points are the same distance from the centroid.
        let pts = [DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)];
        let (d, kind) = degenerate_hull(&pts, EPS).unwrap();
        assert_eq!(kind, Degeneracy::Colinear);
        assert_eq!(d.vertex_count(), 2);
        assert_eq!(d.centroid(), HullPoint3::Double(DVec3::ZERO));
    }

    #[test]
    fn test_square_is_coplanar() {
        let pts = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let (d, kind) = degenerate_hull(&pts, EPS).unwrap();
        assert_eq!(kind, Degeneracy::Coplanar);
        assert_eq!(d.vertex_count(), 5);
        assert_eq!(d.face_count(), 4);
        let hub = d.position(0);
        assert_relative_eq!(hub.x, 0.5, epsilon = 1.0e-9);
        assert_relative_eq!(hub.y, 0.5, epsilon = 1.0e-9);
    }

    #[test]
    fn test_collapsed_plane_reports_colinear() {
        let pts = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.5, 1.0e-7, 0.0),
        ];
        let (d, kind) = coplanar::<DVec3>(&pts, pts[0], pts[1], pts[2], EPS).unwrap();
        assert_eq!(kind, Degeneracy::Colinear);
        assert_eq!(d.vertex_count(), 2);
        assert_eq!(d.faces(), &[[0, 1, 0]]);
    }

    #[test]
    fn test_colinear_keeps_endpoints() {
        let pts: Vec<IVec3> = [3, 0, 1, 4, 2].iter().map(|&x| IVec3::new(x, x, 0)).collect();
        let (d, kind) = degenerate_hull(&pts, EPS).unwrap();
        assert_eq!(kind, Degeneracy::Colinear);
        assert_eq!(d.faces(), &[[0, 1, 0]]);
        let HullVertices::Int(v) = d.vertices() else {
            panic!("integer input gives integer vertices");
        };
        let mut ends = v.clone();
        ends.sort_by_key(|p| p.x);
        assert_eq!(ends, vec![IVec3::ZERO, IVec3::new(4, 4, 0)]);
        assert_eq!(d.centroid(), HullPoint3::Int(IVec3::new(2, 2, 0)));
    }

    #[test]
    fn test_coplanar_fan() {
        let pts: Vec<DVec3> = (0..6)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 6.0;
                DVec3::new(a.cos(), 1.0, a.sin())
            })
            .chain(std::iter::once(DVec3::new(0.1, 1.0, 0.0)))
            .collect();
        let (d, kind) = degenerate_hull(&pts, EPS).unwrap();
        assert_eq!(kind, Degeneracy::Coplanar);
        assert_eq!(d.vertex_count(), 7);
        assert_eq!(d.face_count(), 6);
        let hub = d.position(0);
        assert_relative_eq!(hub.x, 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(hub.y, 1.0, epsilon = 1.0e-9);
        assert_relative_eq!(hub.z, 0.0, epsilon = 1.0e-9);
        // Every fan triangle faces the same way.
        let n0 = d.face_normal(0).unwrap();
        for i in 1..d.face_count() {
            assert_relative_eq!(d.face_normal(i).unwrap().dot(n0), 1.0, epsilon = 1.0e-9);
        }
        assert_eq!(d.faces()[5], [0, 6, 1]);
    }

    #[test]
    fn test_integer_fan_covers_boundary() {
        let pts = [
            IVec3::new(0, 0, 5),
            IVec3::new(10, 0, 5),
            IVec3::new(10, 7, 5),
            IVec3::new(0, 7, 5),
            IVec3::new(3, 3, 5),
        ];
        let (d, kind) = degenerate_hull(&pts, EPS).unwrap();
        assert_eq!(kind, Degeneracy::Coplanar);
        assert_eq!(d.vertex_count(), 5);
        assert_eq!(d.centroid(), HullPoint3::Int(IVec3::new(5, 4, 5)));
        for p in &pts[..4] {
            assert!(d.positions()[1..].contains(&p.as_dvec3()));
        }
    }
}
