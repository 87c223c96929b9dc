//! Error types for chalkboard-sorting.

use thiserror::Error;

/// Result type for chalkboard-sorting operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring or addressing a sorter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The algorithm name is not one of the five supported sorts.
    #[error("unknown sorting algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The random sequence shape cannot produce any values.
    #[error("invalid sequence config: {0}")]
    InvalidSequenceConfig(String),
}
