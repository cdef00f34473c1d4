use crate::error::Result;
use crate::record::{parse, Record, RecordFormat};
use std::collections::HashMap;

/// An immutable lookup table from request path to redirect target.
///
/// Built once at startup and shared read-only afterwards. When several
/// records carry the same path, the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: HashMap<String, String>,
}

impl Mapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds records into a mapping, later duplicates overwriting earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        records.into_iter().collect()
    }

    /// Parses a document in the given format and builds a mapping from it.
    pub fn from_document(bytes: &[u8], format: RecordFormat) -> Result<Self> {
        parse(bytes, format).map(Self::from_records)
    }

    /// Returns the target for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(path, url)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<Record> for Mapping {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .map(|record| (record.path, record.url))
            .collect();
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .map(|(path, url)| (path.into(), url.into()))
            .collect();
        Self { entries }
    }
}
