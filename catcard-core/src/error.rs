//! Core error types for `CatCard`.

use thiserror::Error;

/// Core error type for `CatCard` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid data encountered while building a model value.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
