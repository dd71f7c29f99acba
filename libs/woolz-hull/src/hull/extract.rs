//! # Extraction
//!
//! Converts the finished hull into a [`HullDomain`]: hull vertices are given
//! compact indices in hull-list order and faces are rewritten in terms of
//! them. The centroid is the mean of the hull vertices.

use glam::DVec3;

use crate::domain::HullDomain;
use crate::error::{HullError, HullResult};
use crate::point::HullPoint;

use super::workspace::Workspace;

impl<'a, P: HullPoint> Workspace<'a, P> {
    pub(crate) fn extract(&mut self) -> HullResult<HullDomain> {
        let nv = self.vertex_list.len();
        let nf = self.face_list.len();
        if self.vertex_list.is_empty() || self.face_list.is_empty() {
            return Err(HullError::param_data("hull has no vertices or faces"));
        }
        log::debug!(
            "extracting {} vertices, {} faces ({} of {} arc slots free, {} face slots, {} vertex slots)",
            nv,
            nf,
            self.arcs.free_count(),
            self.arcs.capacity(),
            self.faces.capacity(),
            self.vertices.capacity()
        );

        // The permutation is no longer needed, reuse it as the index map.
        const UNMAPPED: usize = usize::MAX;
        self.perm.clear();
        Self::reserve_buf(&mut self.perm, self.points.len(), "vertex index map")?;
        self.perm.resize(self.points.len(), UNMAPPED);

        let mut vertices = Vec::new();
        Self::reserve_buf(&mut vertices, nv, "output vertices")?;
        let mut sum = DVec3::ZERO;
        for vertex in self.vertex_list.iter(&self.vertices) {
            let idx = self.vertices[vertex].idx;
            self.perm[idx] = vertices.len();
            let p = self.points[idx];
            sum += p.to_dvec3();
            vertices.push(p);
        }

        let mut faces = Vec::new();
        Self::reserve_buf(&mut faces, nf, "output faces")?;
        for face in self.face_list.iter(&self.faces) {
            let vtx = self.faces[face].vtx;
            let mapped = vtx.map(|idx| self.perm[idx]);
            if mapped.contains(&UNMAPPED) {
                return Err(HullError::param_data(format!(
                    "face {:?} references a point that is not on the hull",
                    vtx
                )));
            }
            faces.push(mapped);
        }

        let centroid = P::round_from(sum / nv as f64);
        Ok(HullDomain::new(
            P::into_vertices(vertices),
            faces,
            centroid.into_point3(),
        ))
    }
}
