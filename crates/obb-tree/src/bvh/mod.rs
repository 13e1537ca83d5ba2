//! Bounding-volume-hierarchy construction and collision traversal.
//!
//! This module provides the recursive bounds tree, the builder that
//! partitions a face list into a balanced OBB tree, and the generic
//! lock-step traversal answering intersection queries:
//!
//! - [`BoundsTree`]: the recursive binary tree, generic over the node
//!   and leaf payload types ([`ObbTree`] in production)
//! - [`ObbTree::from_faces`]: projected-median construction
//! - [`collide_recurse`]: the generic traversal, parameterized by a
//!   [`CollisionPolicy`]
//! - [`collide`]: the body-level entry point binding the separating-axis
//!   predicates
//!
//! # Example
//!
//! ```ignore
//! use obb_tree::{collide, Body, Face, Frame};
//!
//! let faces: Vec<Face> = /* triangulated surface */;
//! let a = Body::from_faces(Frame::identity(), faces.clone())?;
//! let b = Body::from_faces(Frame::identity(), faces)?;
//!
//! assert!(collide(&a, &b));
//! ```

mod build;
mod collide;
mod tree;
mod visitor;

pub use build::{project_and_split, SPLIT_EPSILON};
pub use collide::{collide, collide_recurse, CollisionPolicy, FnPolicy};
pub use tree::{BoundsTree, ObbTree};
pub use visitor::{CollectingVisitor, FnVisitor, TreeVisitor};
