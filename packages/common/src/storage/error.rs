use thiserror::Error;

/// Errors that can occur during photo storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested photo was not found.
    #[error("photo not found: {0}")]
    NotFound(String),
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The key is not one this store could have generated.
    #[error("invalid photo key: {0}")]
    InvalidKey(String),
    /// The upload exceeds the configured size limit.
    #[error("photo exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}
