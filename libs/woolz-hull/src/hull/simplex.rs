//! # Initial Simplex
//!
//! Deduplication of the caller's points and selection of the starting
//! tetrahedron.
//!
//! ## Selection
//!
//! 1. Points with maximum and minimum z
//! 2. The point making the largest triangle with that segment
//! 3. The point making the largest tetrahedron with that triangle
//! 4. Swap the last two if the tetrahedron is negatively oriented
//!
//! The four indices are moved to the front of the permutation and the rest are
//! shuffled with a seeded generator, so the insertion order is reproducible.

use glam::DVec3;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::point::HullPoint;

use super::workspace::Workspace;
use super::Degeneracy;

/// Six times the signed volume of the tetrahedron `a, b, c, d`.
///
/// Positive when `d` lies on the side of `abc` that `(b - a) x (c - a)`
/// points to.
#[inline]
pub(crate) fn tetra_volume6(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> f64 {
    (b - a).cross(c - a).dot(d - a)
}

impl<'a, P: HullPoint> Workspace<'a, P> {
    /// Sorts the permutation lexicographically and squeezes out duplicate
    /// positions. Returns the number of distinct points.
    pub(crate) fn dedup(&mut self) -> usize {
        let points = self.points;
        let eps = self.eps();
        // Stable, so equal points keep their input order.
        self.perm
            .sort_by(|&a, &b| P::cmp_position(&points[a], &points[b]));
        let mut kept = 0;
        for j in 0..self.perm.len() {
            let candidate = self.perm[j];
            if kept == 0 || !P::same_position(points[self.perm[kept - 1]], points[candidate], eps) {
                self.perm[kept] = candidate;
                kept += 1;
            }
        }
        self.perm.truncate(kept);
        kept
    }

    /// Chooses the initial tetrahedron, reorders the permutation so it comes
    /// first and shuffles the remainder.
    ///
    /// Fails with the kind of degeneracy detected when no tetrahedron of
    /// non-negligible volume exists.
    pub(crate) fn select_simplex(&mut self) -> Result<(), Degeneracy> {
        let n = self.perm.len();
        let eps = self.eps();
        let pos = |ws: &Self, i: usize| ws.position(ws.perm[i]);

        // Slots in the permutation of zMax, zMin, max area, max volume.
        let mut tet = [0usize; 4];
        let mut tet_pos = [pos(self, 0); 4];
        for i in 1..n {
            let p = pos(self, i);
            if p.z > tet_pos[0].z {
                tet[0] = i;
                tet_pos[0] = p;
            } else if p.z < tet_pos[1].z {
                tet[1] = i;
                tet_pos[1] = p;
            }
        }
        let u0 = tet_pos[1] - tet_pos[0];
        if u0.length_squared() < eps {
            return Err(Degeneracy::Coincident);
        }

        let mut best = 0.0;
        for i in 0..n {
            if i == tet[0] || i == tet[1] {
                continue;
            }
            let p = pos(self, i);
            let area = u0.cross(p - tet_pos[0]).length_squared();
            if area > best {
                best = area;
                tet[2] = i;
                tet_pos[2] = p;
            }
        }
        if best < eps {
            return Err(Degeneracy::Colinear);
        }

        best = 0.0;
        for i in 0..n {
            if i == tet[0] || i == tet[1] || i == tet[2] {
                continue;
            }
            let p = pos(self, i);
            let volume = tetra_volume6(tet_pos[0], tet_pos[1], tet_pos[2], p);
            if volume * volume > best {
                best = volume * volume;
                tet[3] = i;
                tet_pos[3] = p;
            }
        }
        if best < eps {
            return Err(Degeneracy::Coplanar);
        }

        if tetra_volume6(tet_pos[0], tet_pos[1], tet_pos[2], tet_pos[3]) < 0.0 {
            tet.swap(2, 3);
        }

        // Move the chosen point indices to the front, keeping their order.
        let chosen = tet.map(|slot| self.perm[slot]);
        for (k, &idx) in chosen.iter().enumerate() {
            if let Some(j) = self.perm[k..].iter().position(|&p| p == idx) {
                self.perm.swap(k, k + j);
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.shuffle_seed);
        self.perm[4..].shuffle(&mut rng);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::HullConfig;
    use glam::IVec3;

    fn unit_tetra_plus(extra: &[DVec3]) -> Vec<DVec3> {
        let mut pts = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        pts.extend_from_slice(extra);
        pts
    }

    #[test]
    fn test_volume_sign() {
        let v = tetra_volume6(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z);
        assert_eq!(v, 1.0);
        let v = tetra_volume6(DVec3::ZERO, DVec3::Y, DVec3::X, DVec3::Z);
        assert_eq!(v, -1.0);
    }

    #[test]
    fn test_dedup_merges_near_duplicates() {
        let pts = unit_tetra_plus(&[DVec3::new(1.0, 0.0, 5.0e-7), DVec3::ZERO]);
        let mut ws = Workspace::new(&pts, HullConfig::default()).unwrap();
        assert_eq!(ws.dedup(), 4);
        assert_eq!(ws.perm.len(), 4);
        // Stable sort keeps the first occurrence of each duplicate.
        assert!(ws.perm.contains(&0));
        assert!(ws.perm.contains(&1));
    }

    #[test]
    fn test_dedup_integer_points_exact() {
        let pts = vec![IVec3::ZERO, IVec3::X, IVec3::ZERO, IVec3::new(1, 0, 0)];
        let mut ws = Workspace::new(&pts, HullConfig::default()).unwrap();
        assert_eq!(ws.dedup(), 2);
    }

    #[test]
    fn test_simplex_is_positively_oriented() {
        let pts = unit_tetra_plus(&[DVec3::splat(0.2), DVec3::new(0.5, 0.5, -0.5)]);
        let mut ws = Workspace::new(&pts, HullConfig::default()).unwrap();
        ws.dedup();
        ws.select_simplex().unwrap();
        let p: Vec<DVec3> = ws.perm[..4].iter().map(|&i| pts[i]).collect();
        assert!(tetra_volume6(p[0], p[1], p[2], p[3]) > 0.0);
        // zMax first, zMin second.
        assert_eq!(p[0].z, 1.0);
        assert_eq!(p[1].z, -0.5);
        // Every point is still present exactly once.
        let mut sorted = ws.perm.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..pts.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_simplex_detects_colinear() {
        let pts: Vec<DVec3> = (0..5).map(|i| DVec3::new(0.0, 0.0, i as f64)).collect();
        let mut ws = Workspace::new(&pts, HullConfig::default()).unwrap();
        ws.dedup();
        assert_eq!(ws.select_simplex(), Err(Degeneracy::Colinear));
    }

    #[test]
    fn test_simplex_detects_coplanar() {
        let pts = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(0.5, 0.5, 0.5),
        ];
        let mut ws = Workspace::new(&pts, HullConfig::default()).unwrap();
        ws.dedup();
        assert_eq!(ws.select_simplex(), Err(Degeneracy::Coplanar));
    }

    #[test]
    fn test_flat_z_reports_coincident_extremes() {
        let pts = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE.with_z(0.0)];
        let mut ws = Workspace::new(&pts, HullConfig::default()).unwrap();
        ws.dedup();
        assert_eq!(ws.select_simplex(), Err(Degeneracy::Coincident));
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let pts: Vec<DVec3> = (0..64)
            .map(|i| {
                let t = i as f64;
                DVec3::new(t.sin(), t.cos(), (t * 0.37).sin())
            })
            .collect();
        let order = |seed: u64| {
            let mut ws = Workspace::new(&pts, HullConfig::default().with_seed(seed)).unwrap();
            ws.dedup();
            ws.select_simplex().unwrap();
            ws.perm.clone()
        };
        assert_eq!(order(0), order(0));
        assert_ne!(order(0), order(1));
        assert_eq!(order(0)[..4], order(1)[..4]);
    }
}
