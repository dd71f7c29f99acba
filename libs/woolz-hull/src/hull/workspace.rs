//! # Hull Workspace
//!
//! Mutable state of one hull computation: the three object pools, the hull
//! face and vertex lists, the pending vertex queue, scratch buffers and the
//! permutation over the caller's points. The caller's positions are borrowed
//! read-only. Dropping the workspace releases everything it owns, on success
//! and on every error path alike.

use std::collections::HashMap;

use config::constants::HullConfig;
use glam::DVec3;

use crate::error::{HullError, HullResult};
use crate::point::HullPoint;
use crate::pool::{Handle, Pool};
use crate::ring::{Linked, Links, Ring};

pub(crate) type ArcId = Handle<ConflictArc>;
pub(crate) type FaceId = Handle<HullFace>;
pub(crate) type VertexId = Handle<HullVertex>;

// =============================================================================
// RECORDS
// =============================================================================

/// An edge of the conflict graph: `vertex` lies strictly in front of `face`.
///
/// Each arc is a member of two rings at once, the conflict list of its face
/// and the conflict list of its vertex.
#[derive(Debug, Default)]
pub(crate) struct ConflictArc {
    pub(crate) face: Option<FaceId>,
    pub(crate) vertex: Option<VertexId>,
    pub(crate) face_links: Links<ConflictArc>,
    pub(crate) vertex_links: Links<ConflictArc>,
}

/// A triangular face of the hull under construction.
#[derive(Debug, Default)]
pub(crate) struct HullFace {
    /// Indices into the caller's points, wound counter-clockwise seen from
    /// outside.
    pub(crate) vtx: [usize; 3],
    /// `opp[i]` shares the edge directed `vtx[i] -> vtx[(i + 1) % 3]`.
    pub(crate) opp: [Option<FaceId>; 3],
    /// Outward unit normal.
    pub(crate) normal: DVec3,
    /// Head of the conflict list.
    pub(crate) arc: Option<ArcId>,
    pub(crate) links: Links<HullFace>,
}

impl Linked for HullFace {
    fn links(&self) -> &Links<Self> {
        &self.links
    }
    fn links_mut(&mut self) -> &mut Links<Self> {
        &mut self.links
    }
}

/// A vertex that is on the hull, pending insertion, or being classified.
#[derive(Debug, Default)]
pub(crate) struct HullVertex {
    /// Index into the caller's points.
    pub(crate) idx: usize,
    /// Set once the vertex is part of the hull.
    pub(crate) convex: bool,
    /// Head of the conflict list.
    pub(crate) arc: Option<ArcId>,
    pub(crate) links: Links<HullVertex>,
}

impl Linked for HullVertex {
    fn links(&self) -> &Links<Self> {
        &self.links
    }
    fn links_mut(&mut self) -> &mut Links<Self> {
        &mut self.links
    }
}

/// A horizon edge: edge `edge` of the retained face `face`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HorizonEdge {
    pub(crate) face: FaceId,
    pub(crate) edge: usize,
}

// =============================================================================
// WORKSPACE
// =============================================================================

pub(crate) struct Workspace<'a, P: HullPoint> {
    pub(crate) points: &'a [P],
    pub(crate) config: HullConfig,
    /// Permutation of point indices: deduplicated, simplex first, then
    /// shuffled insertion order.
    pub(crate) perm: Vec<usize>,
    pub(crate) arcs: Pool<ConflictArc>,
    pub(crate) faces: Pool<HullFace>,
    pub(crate) vertices: Pool<HullVertex>,
    pub(crate) face_list: Ring<HullFace>,
    pub(crate) vertex_list: Ring<HullVertex>,
    pub(crate) pending: Ring<HullVertex>,
    /// Hull vertex record of each caller point, if it is on the hull.
    pub(crate) hull_slot: Vec<Option<VertexId>>,
    /// Faces to delete, then the faces just created.
    pub(crate) face_buf: Vec<FaceId>,
    pub(crate) horizon: Vec<HorizonEdge>,
    /// Endpoints of each horizon edge, in collection order.
    pub(crate) horizon_ends: Vec<(usize, usize)>,
    /// Start point of each horizon edge to its position in `horizon_ends`.
    pub(crate) horizon_start: HashMap<usize, usize>,
    pub(crate) horizon_order: Vec<usize>,
    pub(crate) horizon_sorted: Vec<HorizonEdge>,
}

impl<'a, P: HullPoint> Workspace<'a, P> {
    /// Creates a workspace over the first `points.len()` caller points.
    pub(crate) fn new(points: &'a [P], config: HullConfig) -> HullResult<Self> {
        let mut perm = Vec::new();
        perm.try_reserve_exact(points.len())
            .map_err(|_| HullError::mem_alloc("permutation table"))?;
        perm.extend(0..points.len());
        let mut hull_slot = Vec::new();
        hull_slot
            .try_reserve_exact(points.len())
            .map_err(|_| HullError::mem_alloc("hull vertex table"))?;
        hull_slot.resize(points.len(), None);
        let block = config.pool_block_size;
        Ok(Self {
            points,
            config,
            perm,
            arcs: Pool::new("conflict arc pool", block),
            faces: Pool::new("face pool", block),
            vertices: Pool::new("vertex pool", block),
            face_list: Ring::default(),
            vertex_list: Ring::default(),
            pending: Ring::default(),
            hull_slot,
            face_buf: Vec::new(),
            horizon: Vec::new(),
            horizon_ends: Vec::new(),
            horizon_start: HashMap::new(),
            horizon_order: Vec::new(),
            horizon_sorted: Vec::new(),
        })
    }

    #[inline]
    pub(crate) fn position(&self, idx: usize) -> DVec3 {
        self.points[idx].to_dvec3()
    }

    #[inline]
    pub(crate) fn eps(&self) -> f64 {
        self.config.tolerance
    }

    /// Grows a scratch buffer, mapping failure to an allocation error.
    pub(crate) fn reserve_buf<T>(
        buf: &mut Vec<T>,
        additional: usize,
        what: &'static str,
    ) -> HullResult<()> {
        buf.try_reserve(additional)
            .map_err(|_| HullError::mem_alloc(what))
    }

    /// Takes a vertex record for caller point `idx`.
    pub(crate) fn new_vertex(&mut self, idx: usize) -> HullResult<VertexId> {
        let v = self.vertices.acquire()?;
        self.vertices[v].idx = idx;
        Ok(v)
    }

    /// Takes a face record with the given winding. Adjacency and normal are
    /// left for the caller.
    pub(crate) fn new_face(&mut self, vtx: [usize; 3]) -> HullResult<FaceId> {
        let f = self.faces.acquire()?;
        self.faces[f].vtx = vtx;
        Ok(f)
    }

    /// Adds a face to the hull face list.
    pub(crate) fn add_convex_face(&mut self, face: FaceId) {
        self.face_list.push_back(&mut self.faces, face);
    }

    /// Adds a vertex to the hull vertex list and marks it convex.
    pub(crate) fn add_convex_vertex(&mut self, vertex: VertexId) {
        let idx = self.vertices[vertex].idx;
        self.vertices[vertex].convex = true;
        self.hull_slot[idx] = Some(vertex);
        self.vertex_list.push_back(&mut self.vertices, vertex);
    }

    /// Removes a vertex from the hull vertex list and releases it.
    pub(crate) fn retire_convex_vertex(&mut self, vertex: VertexId) {
        let idx = self.vertices[vertex].idx;
        self.hull_slot[idx] = None;
        self.vertex_list.unlink(&mut self.vertices, vertex);
        self.discard_vertex(vertex);
    }

    /// Pushes a vertex onto the pending queue. The queue is LIFO.
    pub(crate) fn push_pending(&mut self, vertex: VertexId) {
        self.pending.push_front(&mut self.vertices, vertex);
    }

    /// Pops the most recently pushed pending vertex.
    pub(crate) fn pop_pending(&mut self) -> Option<VertexId> {
        self.pending.pop_front(&mut self.vertices)
    }

    /// Releases a face from the hull face list together with its conflicts.
    pub(crate) fn delete_face(&mut self, face: FaceId) {
        while let Some(arc) = self.faces[face].arc {
            self.remove_conflict(arc);
        }
        self.face_list.unlink(&mut self.faces, face);
        self.faces.release(face);
    }

    /// Releases a vertex that belongs to no list, together with its conflicts.
    pub(crate) fn discard_vertex(&mut self, vertex: VertexId) {
        while let Some(arc) = self.vertices[vertex].arc {
            self.remove_conflict(arc);
        }
        self.vertices.release(vertex);
    }

    /// Removes a pending vertex from the queue and releases it.
    pub(crate) fn discard_pending(&mut self, vertex: VertexId) {
        self.pending.unlink(&mut self.vertices, vertex);
        self.discard_vertex(vertex);
    }

    /// Recomputes the unit normal of a face from its vertices.
    ///
    /// A near-zero normal means the face is degenerate, which upstream
    /// filtering should have prevented.
    pub(crate) fn update_normal(&mut self, face: FaceId) -> HullResult<()> {
        let [a, b, c] = self.faces[face].vtx;
        let p0 = self.position(a);
        let p1 = self.position(b);
        let p2 = self.position(c);
        let n = (p1 - p0).cross(p2 - p1);
        let len = n.length();
        if len < self.eps() {
            self.faces[face].normal = DVec3::ZERO;
            return Err(HullError::param_data(format!(
                "degenerate face ({a}, {b}, {c}) with normal length {len:e}"
            )));
        }
        self.faces[face].normal = n / len;
        Ok(())
    }
}
