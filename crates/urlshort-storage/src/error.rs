use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("failed to open store: {0}")]
    Open(String),
    #[error("failed to open bucket: {0}")]
    Bucket(String),
    #[error("failed to write to store: {0}")]
    Write(String),
    #[error("failed to read from store: {0}")]
    Read(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}
