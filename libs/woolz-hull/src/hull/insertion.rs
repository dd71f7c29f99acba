//! # Incremental Insertion
//!
//! Builds the starting tetrahedron, seeds the conflict graph and inserts the
//! pending vertices one at a time.
//!
//! ## Insertion step
//!
//! 1. Gather the faces visible from the vertex
//! 2. Trace the horizon around them
//! 3. Release hull vertices used only by visible faces, they are now inside
//! 4. Delete the visible faces with their conflict arcs
//! 5. Create one face per horizon edge, apex at the vertex
//! 6. Re-test the remaining pending vertices against the new faces
//! 7. Add the vertex and new faces to the hull

use crate::error::{HullError, HullResult};
use crate::point::HullPoint;

use super::workspace::{FaceId, Workspace};

/// Vertex slots and neighbour slots of the four tetrahedron faces, as
/// positions into the first four entries of the permutation.
const TETRA_VTX: [[usize; 3]; 4] = [[0, 2, 1], [1, 3, 0], [2, 0, 3], [3, 1, 2]];
const TETRA_OPP: [[usize; 3]; 4] = [[2, 3, 1], [3, 2, 0], [0, 1, 3], [1, 0, 2]];

impl<'a, P: HullPoint> Workspace<'a, P> {
    // =========================================================================
    // TETRAHEDRON
    // =========================================================================

    /// Builds the tetrahedron over the first four permuted points and
    /// classifies every remaining point against its faces.
    ///
    /// Points behind all four faces are discarded at once, the rest are
    /// queued as pending.
    pub(crate) fn build_tetrahedron(&mut self) -> HullResult<()> {
        let total = self.perm.len();
        self.vertices.reserve(total)?;
        self.faces.reserve(4)?;

        let corners = [self.perm[0], self.perm[1], self.perm[2], self.perm[3]];
        let mut faces: Vec<FaceId> = Vec::with_capacity(4);
        for vtx in TETRA_VTX {
            faces.push(self.new_face(vtx.map(|k| corners[k]))?);
        }

        for (slot, &face) in faces.iter().enumerate() {
            self.faces[face].opp = TETRA_OPP[slot].map(|k| Some(faces[k]));
            self.update_normal(face)?;
            self.add_convex_face(face);
        }
        for &idx in &corners {
            let v = self.new_vertex(idx)?;
            self.add_convex_vertex(v);
        }

        let mut discarded = 0usize;
        for k in 4..total {
            let idx = self.perm[k];
            let v = self.new_vertex(idx)?;
            for &face in &faces {
                if !self.behind(face, idx) {
                    self.add_conflict(face, v)?;
                }
            }
            if self.vertices[v].arc.is_none() {
                self.discard_vertex(v);
                discarded += 1;
            } else {
                self.push_pending(v);
            }
        }
        log::debug!(
            "tetrahedron {:?}: {} pending, {} inside",
            corners,
            self.pending.len(),
            discarded
        );
        if self.config.verify_topology {
            self.check_topology()?;
        }
        Ok(())
    }

    // =========================================================================
    // INSERTION
    // =========================================================================

    /// Inserts the next pending vertex. Returns false once the queue is empty.
    pub(crate) fn insert_next(&mut self) -> HullResult<bool> {
        let Some(vertex) = self.pop_pending() else {
            return Ok(false);
        };
        if self.vertices[vertex].arc.is_none() {
            self.discard_vertex(vertex);
            return Ok(true);
        }
        let apex = self.vertices[vertex].idx;

        self.gather_visible(vertex)?;
        self.collect_horizon()?;
        let visible = self.face_buf.len();
        let buried = self.release_buried_vertices();

        for k in 0..self.face_buf.len() {
            let face = self.face_buf[k];
            self.delete_face(face);
        }

        self.create_cone(apex)?;
        self.reclassify_pending()?;

        self.add_convex_vertex(vertex);
        for k in 0..self.face_buf.len() {
            let face = self.face_buf[k];
            self.add_convex_face(face);
        }
        log::trace!(
            "inserted point {}: {} visible, {} buried, {} new faces, {} pending",
            apex,
            visible,
            buried,
            self.face_buf.len(),
            self.pending.len()
        );

        if self.config.verify_topology {
            self.check_topology()?;
        }
        Ok(true)
    }

    /// Releases the hull vertices of the faces in `face_buf` that are not on
    /// the horizon. Returns how many were released.
    fn release_buried_vertices(&mut self) -> usize {
        let mut released = 0;
        for k in 0..self.face_buf.len() {
            let vtx = self.faces[self.face_buf[k]].vtx;
            for idx in vtx {
                if self.on_horizon(idx) {
                    continue;
                }
                if let Some(vertex) = self.hull_slot[idx] {
                    self.retire_convex_vertex(vertex);
                    released += 1;
                }
            }
        }
        released
    }

    /// Replaces the contents of `face_buf` with one new face per horizon edge,
    /// each joining the edge to `apex`.
    ///
    /// New face `i` is wound `(far, near, apex)` so its edge 0 runs opposite
    /// to the horizon edge; edges 1 and 2 are shared with faces `i - 1` and
    /// `i + 1` around the cone.
    fn create_cone(&mut self, apex: usize) -> HullResult<()> {
        let n = self.horizon.len();
        self.faces.reserve(n)?;
        self.face_buf.clear();
        Self::reserve_buf(&mut self.face_buf, n, "face buffer")?;

        for k in 0..n {
            let (near, far) = self.horizon_endpoints(self.horizon[k]);
            let face = self.new_face([far, near, apex])?;
            self.face_buf.push(face);
        }
        for k in 0..n {
            let h = self.horizon[k];
            let face = self.face_buf[k];
            let prev = self.face_buf[(k + n - 1) % n];
            let next = self.face_buf[(k + 1) % n];
            self.faces[face].opp = [Some(h.face), Some(prev), Some(next)];
            self.faces[h.face].opp[h.edge] = Some(face);
            self.update_normal(face)?;
        }
        Ok(())
    }

    /// Tests every pending vertex against the faces in `face_buf`, adding a
    /// conflict arc where the vertex is not behind the face.
    ///
    /// Vertices left without any conflict are inside the hull and released.
    fn reclassify_pending(&mut self) -> HullResult<()> {
        let mut cursor = self.pending.head();
        for _ in 0..self.pending.len() {
            let Some(v) = cursor else { break };
            cursor = self.vertices[v].links.next;
            let idx = self.vertices[v].idx;
            for k in 0..self.face_buf.len() {
                let face = self.face_buf[k];
                if !self.behind(face, idx) {
                    self.add_conflict(face, v)?;
                }
            }
            if self.vertices[v].arc.is_none() {
                self.discard_pending(v);
            }
        }
        Ok(())
    }

    // =========================================================================
    // VERIFICATION
    // =========================================================================

    /// Checks that the current hull is a closed, consistently oriented
    /// surface, that conflict arcs reference live records and that no
    /// pending vertex is behind all the faces it conflicts with.
    pub(crate) fn check_topology(&self) -> HullResult<()> {
        let fail = |message: String| {
            log::error!("hull topology check failed: {}", message);
            Err(HullError::param_data(message))
        };

        for face in self.face_list.iter(&self.faces) {
            let f = &self.faces[face];
            for edge in 0..3 {
                let Some(neighbour) = f.opp[edge] else {
                    return fail(format!("face {:?} has an open edge {}", f.vtx, edge));
                };
                if !self.faces.is_live(neighbour) {
                    return fail(format!("face {:?} borders a released face", f.vtx));
                }
                if self.matching_edge(neighbour, face, edge).is_none() {
                    return fail(format!(
                        "edge {} of face {:?} is not shared back by {:?}",
                        edge, f.vtx, self.faces[neighbour].vtx
                    ));
                }
            }
            let count = self.face_conflict_count(face);
            let mut seen = 0;
            let mut cursor = f.arc;
            while let Some(arc) = cursor {
                if seen == count {
                    break;
                }
                if self.arcs[arc].face != Some(face) {
                    return fail(format!("conflict arc of {:?} names another face", f.vtx));
                }
                seen += 1;
                cursor = self.arcs[arc].face_links.next;
            }
        }

        for vertex in self.vertex_list.iter(&self.vertices) {
            let v = &self.vertices[vertex];
            if !v.convex || v.arc.is_some() {
                return fail(format!("hull vertex {} still has conflicts", v.idx));
            }
            if self.hull_slot[v.idx] != Some(vertex) {
                return fail(format!("hull vertex {} is missing from the vertex table", v.idx));
            }
        }
        for face in self.face_list.iter(&self.faces) {
            for idx in self.faces[face].vtx {
                if self.hull_slot[idx].is_none() {
                    return fail(format!("face corner {} is not a hull vertex", idx));
                }
            }
        }

        for vertex in self.pending.iter(&self.vertices) {
            let idx = self.vertices[vertex].idx;
            let mut any = false;
            for face in self.conflict_faces(vertex) {
                if !self.faces.is_live(face) {
                    return fail(format!("pending point {} conflicts with a released face", idx));
                }
                if self.behind(face, idx) {
                    return fail(format!("pending point {} conflicts with a face it is behind", idx));
                }
                any = true;
            }
            if !any {
                return fail(format!("pending point {} has no conflicts", idx));
            }
        }

        let (nv, nf) = (self.vertex_list.len(), self.face_list.len());
        if nv < 4 || nf != 2 * nv - 4 {
            return fail(format!("{} vertices but {} faces", nv, nf));
        }
        if self.faces.live_count() != nf {
            return fail(format!("{} live faces, {} on the hull", self.faces.live_count(), nf));
        }
        if self.vertices.live_count() != nv + self.pending.len() {
            return fail(format!(
                "{} live vertices, {} on the hull and {} pending",
                self.vertices.live_count(),
                nv,
                self.pending.len()
            ));
        }
        Ok(())
    }
}
