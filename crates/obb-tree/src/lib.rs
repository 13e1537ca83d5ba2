//! Oriented-bounding-box (OBB) tree collision detection for rigid
//! triangulated bodies.
//!
//! Each body owns a precomputed hierarchy of oriented boxes over its
//! triangular faces; [`collide`] answers whether two bodies' surfaces
//! intersect at their current poses by walking both hierarchies in
//! lock-step and pruning with separating-axis tests.
//!
//! Trees are built once and immutable afterwards, and queries are pure
//! reads, so collision tests for independent body pairs may run on any
//! number of threads without coordination.

mod body;
mod error;
mod face;
mod frame;
mod obb;
mod sat;

pub mod bvh;

pub use body::Body;
pub use bvh::{
    collide, collide_recurse, project_and_split, BoundsTree, CollectingVisitor, CollisionPolicy,
    FnPolicy, FnVisitor, ObbTree, TreeVisitor, SPLIT_EPSILON,
};
pub use error::BuildError;
pub use face::Face;
pub use frame::Frame;
pub use obb::Obb;
pub use sat::{box_face_overlap, boxes_overlap, faces_overlap, COLLISION_EPSILON};
