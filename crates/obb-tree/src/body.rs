//! Rigid bodies: a world frame over an immutable bounds tree.

use std::sync::Arc;

use nalgebra::{UnitQuaternion, Vector3};

use crate::bvh::ObbTree;
use crate::{BuildError, Face, Frame};

/// A rigid triangulated body: a world placement plus an OBB tree over
/// its faces.
///
/// Bodies are value types. Moving or rotating one produces a *new*
/// `Body` sharing the same immutable tree; nothing is ever mutated in
/// place, so any number of collision queries may run concurrently
/// against the same bodies without coordination.
#[derive(Debug, Clone)]
pub struct Body {
    frame: Frame,
    tree: Arc<ObbTree>,
}

impl Body {
    /// Creates a body from a frame and an already-built tree.
    pub fn new(frame: Frame, tree: ObbTree) -> Self {
        Self {
            frame,
            tree: Arc::new(tree),
        }
    }

    /// Builds a body's tree from its face list and places it at `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoFaces`] for an empty face list.
    pub fn from_faces(frame: Frame, faces: Vec<Face>) -> Result<Self, BuildError> {
        Ok(Self::new(frame, ObbTree::from_faces(faces)?))
    }

    /// Returns the body's world frame.
    #[inline]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns the body's bounds tree.
    #[inline]
    pub fn tree(&self) -> &ObbTree {
        &self.tree
    }

    /// Returns this body placed at a different frame, sharing the same
    /// tree.
    pub fn with_frame(&self, frame: Frame) -> Self {
        Self {
            frame,
            tree: Arc::clone(&self.tree),
        }
    }

    /// Returns this body translated by `offset` in reference axes.
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        self.with_frame(Frame::from_parts(
            self.frame.position() + offset,
            self.frame.orientation(),
        ))
    }

    /// Returns this body rotated about its own origin, with `rotation`
    /// applied in reference axes.
    pub fn rotated(&self, rotation: &UnitQuaternion<f32>) -> Self {
        self.with_frame(Frame::from_parts(
            self.frame.position(),
            rotation * self.frame.orientation(),
        ))
    }
}
