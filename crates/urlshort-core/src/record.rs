use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A single `path -> url` entry decoded from a mapping document.
///
/// Missing fields decode as empty strings and unknown fields are ignored.
/// Empty values are kept as-is; filtering them is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Absolute request path, e.g. `/docs`.
    pub path: String,
    /// Fully qualified redirect target.
    pub url: String,
}

impl Record {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// The document formats a mapping can be decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordFormat {
    Yaml,
    Json,
}

impl Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFormat::Yaml => write!(f, "yaml"),
            RecordFormat::Json => write!(f, "json"),
        }
    }
}

/// Decodes a top-level list of `{path, url}` objects.
///
/// The format is chosen by `format` alone; the content is never sniffed.
/// An empty JSON array or an empty YAML document yields an empty vector.
/// Any malformed input fails as a whole with [`CoreError::Parse`].
pub fn parse(bytes: &[u8], format: RecordFormat) -> Result<Vec<Record>> {
    match format {
        RecordFormat::Json => {
            serde_json::from_slice(bytes).map_err(|e| CoreError::parse(format, e))
        }
        RecordFormat::Yaml => {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Vec::new());
            }
            // `~` and `null` are valid empty documents as well
            let records: Option<Vec<Record>> =
                serde_yaml::from_slice(bytes).map_err(|e| CoreError::parse(format, e))?;
            Ok(records.unwrap_or_default())
        }
    }
}
