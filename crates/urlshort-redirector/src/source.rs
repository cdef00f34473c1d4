use crate::error::{RedirectorError, Result};
use async_trait::async_trait;
use urlshort_core::Mapping;
use urlshort_storage::UrlStore;

/// A read-only source of redirect targets keyed by request path.
#[async_trait]
pub trait RedirectSource: Send + Sync + 'static {
    /// Short name of the source, used in logs.
    fn name(&self) -> &'static str;

    /// Returns the target for `path`, or `None` if the source has no entry.
    async fn lookup(&self, path: &str) -> Result<Option<String>>;
}

#[async_trait]
impl RedirectSource for Mapping {
    fn name(&self) -> &'static str {
        "mapping"
    }

    async fn lookup(&self, path: &str) -> Result<Option<String>> {
        Ok(self.get(path).map(str::to_owned))
    }
}

#[async_trait]
impl RedirectSource for UrlStore {
    fn name(&self) -> &'static str {
        "store"
    }

    // disk reads run on the blocking pool
    async fn lookup(&self, path: &str) -> Result<Option<String>> {
        let store = self.clone();
        let path = path.to_owned();
        let target = tokio::task::spawn_blocking(move || store.get(&path))
            .await
            .map_err(|e| RedirectorError::Lookup(e.to_string()))??;
        Ok(target)
    }
}
