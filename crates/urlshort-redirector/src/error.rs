use thiserror::Error;
use urlshort_storage::StorageError;

pub type Result<T> = std::result::Result<T, RedirectorError>;

#[derive(Debug, Error)]
pub enum RedirectorError {
    #[error("storage operation failed: {0}")]
    Storage(
        #[from]
        #[source]
        StorageError,
    ),
    #[error("lookup task failed: {0}")]
    Lookup(String),
}
