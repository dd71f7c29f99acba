//! # Horizon
//!
//! The visible region of a vertex is the set of faces it conflicts with. Its
//! boundary, the horizon, is made of the edges of retained faces that border a
//! visible face. For a convex hull the horizon is a single closed cycle, which
//! is what the new cone of faces is stitched onto.

use std::collections::HashMap;

use crate::error::{HullError, HullResult};
use crate::point::HullPoint;

use super::workspace::{FaceId, HorizonEdge, VertexId, Workspace};

impl<'a, P: HullPoint> Workspace<'a, P> {
    /// Fills `face_buf` with the faces visible from `vertex`, without repeats.
    pub(crate) fn gather_visible(&mut self, vertex: VertexId) -> HullResult<()> {
        let mut buf = std::mem::take(&mut self.face_buf);
        buf.clear();
        for face in self.conflict_faces(vertex) {
            if !buf.contains(&face) {
                if let Err(e) = Self::reserve_buf(&mut buf, 1, "face buffer") {
                    self.face_buf = buf;
                    return Err(e);
                }
                buf.push(face);
            }
        }
        self.face_buf = buf;
        Ok(())
    }

    /// Collects the horizon of the faces in `face_buf` into `horizon`, in
    /// cycle order.
    ///
    /// Each horizon edge is recorded from the side of the retained face. The
    /// edges of a single closed loop of length three or more are expected;
    /// anything else means the topology is corrupt. Afterwards
    /// `horizon_start` holds every point on the horizon.
    pub(crate) fn collect_horizon(&mut self) -> HullResult<()> {
        self.horizon.clear();
        self.horizon_ends.clear();
        for k in 0..self.face_buf.len() {
            let face = self.face_buf[k];
            for edge in 0..3 {
                let neighbour = self.faces[face].opp[edge].ok_or_else(|| {
                    HullError::param_data("visible face with an open edge")
                })?;
                if self.face_buf.contains(&neighbour) {
                    continue;
                }
                let back = self.matching_edge(neighbour, face, edge).ok_or_else(|| {
                    HullError::param_data("face adjacency is not symmetric")
                })?;
                let h = HorizonEdge {
                    face: neighbour,
                    edge: back,
                };
                let ends = self.horizon_endpoints(h);
                Self::reserve_buf(&mut self.horizon, 1, "horizon buffer")?;
                Self::reserve_buf(&mut self.horizon_ends, 1, "horizon buffer")?;
                self.horizon.push(h);
                self.horizon_ends.push(ends);
            }
        }

        let n = self.horizon.len();
        self.horizon_start
            .try_reserve(n)
            .map_err(|_| HullError::mem_alloc("horizon index"))?;
        Self::reserve_buf(&mut self.horizon_order, n, "horizon buffer")?;
        if !order_cycle(&self.horizon_ends, &mut self.horizon_start, &mut self.horizon_order) {
            return Err(HullError::param_data(format!(
                "horizon of {} edges is not a single closed loop",
                n
            )));
        }

        self.horizon_sorted.clear();
        Self::reserve_buf(&mut self.horizon_sorted, n, "horizon buffer")?;
        for k in 0..n {
            let i = self.horizon_order[k];
            self.horizon_sorted.push(self.horizon[i]);
        }
        std::mem::swap(&mut self.horizon, &mut self.horizon_sorted);
        Ok(())
    }

    /// Returns true if point `idx` starts an edge of the last collected
    /// horizon.
    #[inline]
    pub(crate) fn on_horizon(&self, idx: usize) -> bool {
        self.horizon_start.contains_key(&idx)
    }

    /// Edge of `face` that runs opposite to edge `edge` of `other` and points
    /// back at it.
    pub(crate) fn matching_edge(&self, face: FaceId, other: FaceId, edge: usize) -> Option<usize> {
        let ov = self.faces[other].vtx;
        let (a, b) = (ov[edge], ov[(edge + 1) % 3]);
        let f = &self.faces[face];
        (0..3).find(|&j| f.vtx[j] == b && f.vtx[(j + 1) % 3] == a && f.opp[j] == Some(other))
    }

    /// Start and end point indices of a horizon edge, in the direction of the
    /// retained face's winding.
    #[inline]
    pub(crate) fn horizon_endpoints(&self, h: HorizonEdge) -> (usize, usize) {
        let vtx = self.faces[h.face].vtx;
        (vtx[h.edge], vtx[(h.edge + 1) % 3])
    }
}

/// Orders directed edges `(start, end)` into one closed chain in which each
/// edge ends where the next begins.
///
/// Fills `order` with positions into `ends`, starting with the first edge,
/// and `by_start` with the position of the edge leaving each point. Returns
/// false if there are fewer than three edges, two edges leave the same point,
/// the chain breaks, or the edges form more than one loop.
pub(crate) fn order_cycle(
    ends: &[(usize, usize)],
    by_start: &mut HashMap<usize, usize>,
    order: &mut Vec<usize>,
) -> bool {
    by_start.clear();
    order.clear();
    let n = ends.len();
    if n < 3 {
        return false;
    }
    for (i, &(start, _)) in ends.iter().enumerate() {
        if by_start.insert(start, i).is_some() {
            return false;
        }
    }
    order.push(0);
    let first = ends[0].0;
    let mut end = ends[0].1;
    while end != first {
        if order.len() == n {
            return false;
        }
        let Some(&next) = by_start.get(&end) else {
            return false;
        };
        order.push(next);
        end = ends[next].1;
    }
    order.len() == n
}
