//! # Conflict Graph
//!
//! Bipartite graph between hull faces and outside vertices. An arc `(f, v)`
//! exists exactly while `v` lies strictly in front of the plane of `f`. Arcs
//! are spliced into the conflict ring of the face and of the vertex at once,
//! so both sides can enumerate their conflicts in O(1) per arc.

use crate::error::HullResult;
use crate::point::HullPoint;
use crate::ring::Links;

use super::workspace::{ArcId, ConflictArc, FaceId, VertexId, Workspace};

impl<'a, P: HullPoint> Workspace<'a, P> {
    /// Returns true if caller point `idx` lies on, or on the hull side of, the
    /// plane of `face`.
    ///
    /// The tolerance is absolute. This test dominates the run time and must
    /// not allocate.
    #[inline]
    pub(crate) fn behind(&self, face: FaceId, idx: usize) -> bool {
        let f = &self.faces[face];
        let u = self.points[idx].to_dvec3() - self.points[f.vtx[0]].to_dvec3();
        f.normal.dot(u) < self.config.tolerance
    }

    /// Creates a conflict arc between `face` and `vertex`.
    pub(crate) fn add_conflict(&mut self, face: FaceId, vertex: VertexId) -> HullResult<ArcId> {
        let arc = self.arcs.acquire()?;
        self.arcs[arc].face = Some(face);
        self.arcs[arc].vertex = Some(vertex);

        // Face ring, new arc goes in at the tail.
        match self.faces[face].arc {
            None => {
                self.arcs[arc].face_links = Links {
                    prev: Some(arc),
                    next: Some(arc),
                };
                self.faces[face].arc = Some(arc);
            }
            Some(head) => {
                let tail = self.arcs[head].face_links.prev.unwrap_or(head);
                self.arcs[arc].face_links = Links {
                    prev: Some(tail),
                    next: Some(head),
                };
                self.arcs[tail].face_links.next = Some(arc);
                self.arcs[head].face_links.prev = Some(arc);
            }
        }

        // Vertex ring.
        match self.vertices[vertex].arc {
            None => {
                self.arcs[arc].vertex_links = Links {
                    prev: Some(arc),
                    next: Some(arc),
                };
                self.vertices[vertex].arc = Some(arc);
            }
            Some(head) => {
                let tail = self.arcs[head].vertex_links.prev.unwrap_or(head);
                self.arcs[arc].vertex_links = Links {
                    prev: Some(tail),
                    next: Some(head),
                };
                self.arcs[tail].vertex_links.next = Some(arc);
                self.arcs[head].vertex_links.prev = Some(arc);
            }
        }
        Ok(arc)
    }

    /// Unsplices an arc from both of its rings and returns it to the pool.
    ///
    /// A ring head that was the only member becomes `None`.
    pub(crate) fn remove_conflict(&mut self, arc: ArcId) {
        let ConflictArc {
            face,
            vertex,
            face_links,
            vertex_links,
        } = std::mem::take(&mut self.arcs[arc]);

        if let Some(face) = face {
            let head = &mut self.faces[face].arc;
            match (face_links.prev, face_links.next) {
                (Some(prev), Some(next)) if next != arc => {
                    if *head == Some(arc) {
                        *head = Some(next);
                    }
                    self.arcs[prev].face_links.next = Some(next);
                    self.arcs[next].face_links.prev = Some(prev);
                }
                _ => *head = None,
            }
        }

        if let Some(vertex) = vertex {
            let head = &mut self.vertices[vertex].arc;
            match (vertex_links.prev, vertex_links.next) {
                (Some(prev), Some(next)) if next != arc => {
                    if *head == Some(arc) {
                        *head = Some(next);
                    }
                    self.arcs[prev].vertex_links.next = Some(next);
                    self.arcs[next].vertex_links.prev = Some(prev);
                }
                _ => *head = None,
            }
        }

        self.arcs.release(arc);
    }

    /// Faces in conflict with `vertex`, in ring order.
    pub(crate) fn conflict_faces(&self, vertex: VertexId) -> ConflictFaces<'_, 'a, P> {
        ConflictFaces {
            ws: self,
            head: self.vertices[vertex].arc,
            cursor: self.vertices[vertex].arc,
        }
    }

    /// Number of arcs in the conflict ring of `face`.
    pub(crate) fn face_conflict_count(&self, face: FaceId) -> usize {
        let Some(head) = self.faces[face].arc else {
            return 0;
        };
        let mut count = 1;
        let mut cursor = self.arcs[head].face_links.next;
        while let Some(arc) = cursor {
            if arc == head {
                break;
            }
            count += 1;
            cursor = self.arcs[arc].face_links.next;
        }
        count
    }
}

/// Iterator over the faces in a vertex's conflict ring.
pub(crate) struct ConflictFaces<'w, 'a, P: HullPoint> {
    ws: &'w Workspace<'a, P>,
    head: Option<ArcId>,
    cursor: Option<ArcId>,
}

impl<'w, 'a, P: HullPoint> Iterator for ConflictFaces<'w, 'a, P> {
    type Item = FaceId;

    fn next(&mut self) -> Option<FaceId> {
        let arc = self.cursor?;
        let record = &self.ws.arcs[arc];
        self.cursor = record.vertex_links.next.filter(|&n| Some(n) != self.head);
        record.face
    }
}
