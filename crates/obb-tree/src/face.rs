//! Triangular faces, the leaf geometry of a bounds tree.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::Frame;

/// A flat triangle in 3D space, defined by three vertices.
///
/// Vertices are stored in body-local coordinates. Degenerate triangles
/// (collinear or coincident vertices) are accepted as input; they have an
/// undefined normal, which [`Face::unit_normal`] reports as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    vertices: [Point3<f32>; 3],
}

impl Face {
    /// Creates a new face from three vertices.
    ///
    /// The winding order determines the normal direction via the
    /// right-hand rule: normal = (q - p) × (r - p).
    pub fn new(p: Point3<f32>, q: Point3<f32>, r: Point3<f32>) -> Self {
        Self {
            vertices: [p, q, r],
        }
    }

    /// Returns the three vertices of the face.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Returns the first vertex.
    #[inline]
    pub fn p(&self) -> Point3<f32> {
        self.vertices[0]
    }

    /// Returns the second vertex.
    #[inline]
    pub fn q(&self) -> Point3<f32> {
        self.vertices[1]
    }

    /// Returns the third vertex.
    #[inline]
    pub fn r(&self) -> Point3<f32> {
        self.vertices[2]
    }

    /// Computes the (unnormalized) normal vector of the face.
    ///
    /// The direction follows the right-hand rule based on vertex winding.
    pub fn normal(&self) -> Vector3<f32> {
        let [p, q, r] = &self.vertices;
        let pq = q - p;
        let pr = r - p;
        pq.cross(&pr)
    }

    /// Computes the unit normal vector of the face.
    ///
    /// Returns `None` if the face is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal();
        let len = n.norm();
        if len > f32::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Computes the centroid (center of mass) of the face.
    pub fn centroid(&self) -> Point3<f32> {
        let [p, q, r] = &self.vertices;
        Point3::from((p.coords + q.coords + r.coords) / 3.0)
    }

    /// Computes the area of the face. Zero for degenerate faces.
    pub fn area(&self) -> f32 {
        0.5 * self.normal().norm()
    }

    /// Returns this face with every vertex mapped through `frame`.
    pub fn transformed(&self, frame: &Frame) -> Self {
        let [p, q, r] = self.vertices;
        Self {
            vertices: [
                frame.transform_point(p),
                frame.transform_point(q),
                frame.transform_point(r),
            ],
        }
    }
}
