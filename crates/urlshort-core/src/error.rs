use thiserror::Error;

use crate::record::RecordFormat;

/// Result type for parsing and mapping operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("failed to parse {format} document: {message}")]
    Parse {
        format: RecordFormat,
        message: String,
    },
}

impl CoreError {
    pub(crate) fn parse(format: RecordFormat, source: impl std::fmt::Display) -> Self {
        Self::Parse {
            format,
            message: source.to_string(),
        }
    }
}
