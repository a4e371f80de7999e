//! Store error types.

use thiserror::Error;

/// Error type for persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Cached record written by a newer schema than this build knows.
    #[error("Cache version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found on disk.
        found: u32,
        /// Highest version this build reads.
        supported: u32,
    },
}
