//! Error types for the Quarry retrieval engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Two conditions are deliberately NOT errors:
//! - searching a store that was never loaded (or holds zero chunks) returns
//!   an empty result list;
//! - an embedding failure is caught at the orchestration boundary and
//!   surfaces as "no context available", never as a propagated error.

use thiserror::Error;

/// Result type alias for Quarry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Quarry retrieval engine
#[derive(Debug, Error)]
pub enum Error {
    /// Embedding length does not match the corpus dimensionality.
    ///
    /// Raised at load time for malformed chunks and at search time for
    /// malformed query vectors. Mismatched vectors are rejected outright;
    /// truncating to a common length would silently corrupt similarity
    /// scores.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Corpus dimensionality
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },

    /// Embedding collaborator failed (transport error or non-success response)
    ///
    /// A single failed attempt is final for that call; no retry is performed
    /// inside the engine.
    #[error("Embedding request failed: {0}")]
    Embedding(String),

    /// Storage-port failure while reading or writing a corpus
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration or input (zero dims, bad weights, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
