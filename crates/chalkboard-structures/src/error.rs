//! Error types for chalkboard-structures.

use thiserror::Error;

use crate::arena::{DetachToken, Shape};

/// Result type for chalkboard-structures operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the editable structures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No detached subtree is pending under this token.
    #[error("no pending subtree for token {0}")]
    TokenNotFound(DetachToken),

    /// The node a subtree or value should hang under does not exist.
    #[error("parent not found: {0}")]
    ParentNotFound(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A binary-only operation was asked of a forest with another shape.
    #[error("operation not supported on {0} forests")]
    ShapeMismatch(Shape),

    /// Blank labels and values are rejected.
    #[error("value must not be blank")]
    EmptyValue,

    #[error("vertex not found: {0}")]
    VertexNotFound(String),
}
