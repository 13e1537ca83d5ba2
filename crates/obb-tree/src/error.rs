//! Error types for tree construction.

use thiserror::Error;

/// Errors from building a bounds tree.
///
/// Collision queries themselves are total and never fail; construction
/// from an empty face list is the one contract violation surfaced to
/// callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The face list handed to the builder was empty.
    #[error("cannot build a bounds tree from an empty face list")]
    NoFaces,
}
