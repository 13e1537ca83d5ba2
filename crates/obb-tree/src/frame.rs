//! Rigid transforms placing geometry in a reference space.

use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A rigid transform: a rotation followed by a translation.
///
/// A frame maps points and directions from its own local space into a
/// reference space. Body frames map body-local coordinates to world
/// coordinates; the frame stored in an [`crate::Obb`] maps box-local
/// coordinates to body-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    position: Point3<f32>,
    orientation: UnitQuaternion<f32>,
}

impl Frame {
    /// The identity frame: no rotation, no translation.
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// Creates a frame from a position and an orientation.
    pub fn from_parts(position: Point3<f32>, orientation: UnitQuaternion<f32>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates a pure rotation frame about `axis` by `angle` radians.
    pub fn from_axis_angle(axis: &Unit<Vector3<f32>>, angle: f32) -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::from_axis_angle(axis, angle),
        }
    }

    /// Creates a pure translation frame.
    pub fn from_translation(offset: Vector3<f32>) -> Self {
        Self {
            position: Point3::from(offset),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// Returns the frame's position (the image of the local origin).
    #[inline]
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// Returns the frame's orientation.
    #[inline]
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }

    /// Composes `self` with `local`, interpreting `local` in `self`'s
    /// local axes (intrinsic order).
    ///
    /// The result maps `local`-space coordinates through `local`, then
    /// through `self`. This is the composition used to re-express a
    /// nested frame (such as a box frame) in an outer space.
    pub fn intrinsic(&self, local: &Self) -> Self {
        Self {
            position: self.transform_point(local.position),
            orientation: self.orientation * local.orientation,
        }
    }

    /// Composes `self` with `reference`, interpreting `reference` in the
    /// shared reference axes (extrinsic order).
    ///
    /// Equivalent to `reference.intrinsic(self)`: `self` is applied
    /// first, then `reference`.
    pub fn extrinsic(&self, reference: &Self) -> Self {
        reference.intrinsic(self)
    }

    /// Returns the inverse frame, mapping reference space back to local
    /// space.
    pub fn inverse(&self) -> Self {
        let orientation = self.orientation.inverse();
        Self {
            position: Point3::from(-(orientation * self.position.coords)),
            orientation,
        }
    }

    /// Maps a local-space point into the reference space.
    #[inline]
    pub fn transform_point(&self, point: Point3<f32>) -> Point3<f32> {
        Point3::from(self.orientation * point.coords + self.position.coords)
    }

    /// Maps a local-space direction into the reference space.
    ///
    /// Directions are unaffected by the frame's translation.
    #[inline]
    pub fn transform_vector(&self, vector: Vector3<f32>) -> Vector3<f32> {
        self.orientation * vector
    }

    /// Maps a reference-space point back into local space.
    #[inline]
    pub fn inverse_transform_point(&self, point: Point3<f32>) -> Point3<f32> {
        Point3::from(self.orientation.inverse_transform_vector(&(point - self.position)))
    }

    /// Maps a reference-space direction back into local space.
    #[inline]
    pub fn inverse_transform_vector(&self, vector: Vector3<f32>) -> Vector3<f32> {
        self.orientation.inverse_transform_vector(&vector)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}
