//! Error types for session store operations.

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for session store operations.
///
/// An invalid or missing session is not an error — the store resolves
/// that internally by building a fresh record. Only storage-level
/// failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The persistence gateway failed to retrieve or write a record.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// A record could not be encoded or decoded by a storage backend.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
