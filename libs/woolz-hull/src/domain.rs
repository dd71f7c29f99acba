//! # Hull Domain
//!
//! The flat, caller-owned result of a hull computation: a compacted vertex
//! array in the caller's representation, triangle faces indexing into it, and
//! the centroid. Independent of the workspace that produced it.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

use crate::point::VertexType;

/// Hull vertex array in the representation of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HullVertices {
    /// Integer vertices, from `I3` input.
    Int(Vec<IVec3>),
    /// Double vertices, from `D3` input.
    Double(Vec<DVec3>),
}

impl HullVertices {
    /// Number of vertices.
    pub fn len(&self) -> usize {
        match self {
            HullVertices::Int(v) => v.len(),
            HullVertices::Double(v) => v.len(),
        }
    }

    /// Returns true if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of vertex `i` as a double vector.
    pub fn position(&self, i: usize) -> DVec3 {
        match self {
            HullVertices::Int(v) => v[i].as_dvec3(),
            HullVertices::Double(v) => v[i],
        }
    }
}

/// A single position in the representation of the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HullPoint3 {
    /// Integer position.
    Int(IVec3),
    /// Double position.
    Double(DVec3),
}

impl HullPoint3 {
    /// Position as a double vector.
    pub fn to_dvec3(self) -> DVec3 {
        match self {
            HullPoint3::Int(v) => v.as_dvec3(),
            HullPoint3::Double(v) => v,
        }
    }
}

/// A 3D convex hull domain.
///
/// Faces are index triples into the vertex array, wound so that their normals
/// point out of the hull. Degenerate hulls contain degenerate faces: a single
/// point is `[0, 0, 0]` and a segment is `[0, 1, 0]`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use woolz_hull::hull_of_points;
///
/// let points = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ];
/// let hull = hull_of_points(&points).unwrap().domain;
/// assert_eq!(hull.vertex_count(), 4);
/// assert_eq!(hull.face_count(), 4);
/// assert!(hull.contains(DVec3::splat(0.1), 1.0e-6));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullDomain {
    vertices: HullVertices,
    faces: Vec<[usize; 3]>,
    centroid: HullPoint3,
}

impl HullDomain {
    pub(crate) fn new(vertices: HullVertices, faces: Vec<[usize; 3]>, centroid: HullPoint3) -> Self {
        Self {
            vertices,
            faces,
            centroid,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the vertex representation, `I3` or `D3`.
    pub fn vertex_type(&self) -> VertexType {
        match self.vertices {
            HullVertices::Int(_) => VertexType::I3,
            HullVertices::Double(_) => VertexType::D3,
        }
    }

    /// Returns the vertex array.
    #[inline]
    pub fn vertices(&self) -> &HullVertices {
        &self.vertices
    }

    /// Returns the face index triples.
    #[inline]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Returns the centroid in the representation of the input.
    #[inline]
    pub fn centroid(&self) -> HullPoint3 {
        self.centroid
    }

    /// Returns the centroid as a double vector.
    pub fn centroid_dvec3(&self) -> DVec3 {
        self.centroid.to_dvec3()
    }

    /// Returns vertex `i` as a double vector.
    #[inline]
    pub fn position(&self, i: usize) -> DVec3 {
        self.vertices.position(i)
    }

    /// Returns all vertices as double vectors.
    pub fn positions(&self) -> Vec<DVec3> {
        (0..self.vertex_count()).map(|i| self.position(i)).collect()
    }

    /// Returns the unit outward normal of face `i`, or `None` for a
    /// degenerate face.
    pub fn face_normal(&self, i: usize) -> Option<DVec3> {
        let [a, b, c] = self.faces[i];
        let p0 = self.position(a);
        let p1 = self.position(b);
        let p2 = self.position(c);
        (p1 - p0).cross(p2 - p1).try_normalize()
    }

    /// Returns true if `point` lies behind (or within `eps` of) every
    /// non-degenerate face.
    pub fn contains(&self, point: DVec3, eps: f64) -> bool {
        (0..self.face_count()).all(|i| match self.face_normal(i) {
            Some(normal) => normal.dot(point - self.position(self.faces[i][0])) < eps,
            None => true,
        })
    }
}
