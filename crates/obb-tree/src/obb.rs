//! Oriented bounding boxes and the fitting routine used during tree
//! construction.

use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::{Face, Frame};

/// An oriented bounding box: half-extents along three local axes, placed
/// by a [`Frame`].
///
/// When an `Obb` is the payload of a tree node, its frame is expressed
/// directly in body-local coordinates, never relative to the parent
/// node's box. Traversal therefore never composes frames across tree
/// levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    half_extents: Vector3<f32>,
    frame: Frame,
}

impl Obb {
    /// Creates a box from its half-extents and placing frame.
    pub fn new(half_extents: Vector3<f32>, frame: Frame) -> Self {
        Self {
            half_extents,
            frame,
        }
    }

    /// Returns the half-extents along the box's three local axes.
    #[inline]
    pub fn half_extents(&self) -> Vector3<f32> {
        self.half_extents
    }

    /// Returns the frame placing the box.
    #[inline]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns the center of the box.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        self.frame.position()
    }

    /// Returns the box's three axis directions in the frame's reference
    /// space.
    pub fn axes(&self) -> [Vector3<f32>; 3] {
        [
            self.frame.transform_vector(Vector3::x()),
            self.frame.transform_vector(Vector3::y()),
            self.frame.transform_vector(Vector3::z()),
        ]
    }

    /// Returns the eight corners of the box in the frame's reference
    /// space.
    pub fn corners(&self) -> [Point3<f32>; 8] {
        let h = self.half_extents;
        let mut corners = [Point3::origin(); 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            *corner = self
                .frame
                .transform_point(Point3::new(sx * h.x, sy * h.y, sz * h.z));
        }
        corners
    }

    /// Returns this box re-expressed in the space that `frame` maps its
    /// local coordinates into.
    pub fn transformed(&self, frame: &Frame) -> Self {
        Self {
            half_extents: self.half_extents,
            frame: frame.intrinsic(&self.frame),
        }
    }

    /// Fits a near-minimal oriented box around a set of faces.
    ///
    /// The box axes are the eigenvectors of the covariance of the face
    /// vertices about the area-weighted mean of the face centroids; the
    /// extents come from projecting every vertex onto that basis. For
    /// degenerate input (zero total area, collinear vertices) the basis
    /// degrades gracefully and some extents may be zero.
    pub fn fit(faces: &[Face]) -> Self {
        debug_assert!(!faces.is_empty(), "cannot fit a box around zero faces");

        let total_area: f32 = faces.iter().map(Face::area).sum();
        let mean: Vector3<f32> = if total_area > f32::EPSILON {
            faces
                .iter()
                .map(|f| f.centroid().coords * f.area())
                .sum::<Vector3<f32>>()
                / total_area
        } else {
            faces.iter().map(|f| f.centroid().coords).sum::<Vector3<f32>>() / faces.len() as f32
        };

        let mut covariance = Matrix3::zeros();
        for face in faces {
            for vertex in face.vertices() {
                let d = vertex.coords - mean;
                covariance += d * d.transpose();
            }
        }
        covariance /= (3 * faces.len()) as f32;

        let eigen = covariance.symmetric_eigen();
        let mut basis = eigen.eigenvectors;
        if basis.determinant() < 0.0 {
            let flipped = -basis.column(0);
            basis.set_column(0, &flipped);
        }

        let mut min = Vector3::repeat(f32::INFINITY);
        let mut max = Vector3::repeat(f32::NEG_INFINITY);
        for face in faces {
            for vertex in face.vertices() {
                let local = basis.transpose() * (vertex.coords - mean);
                min = min.inf(&local);
                max = max.sup(&local);
            }
        }

        let center = Point3::from(mean + basis * ((min + max) * 0.5));
        let orientation =
            UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(basis));
        Self {
            half_extents: (max - min) * 0.5,
            frame: Frame::from_parts(center, orientation),
        }
    }
}
