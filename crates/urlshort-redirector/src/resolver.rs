use crate::handler::{Handler, SharedHandler};
use crate::source::RedirectSource;
use async_trait::async_trait;
use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{debug, trace, warn};
use urlshort_core::{Mapping, RecordFormat};
use urlshort_storage::UrlStore;

/// A redirect handler backed by an in-memory [`Mapping`].
pub type MapResolver = Resolver<Mapping>;

/// A redirect handler backed by the persistent [`UrlStore`].
pub type StoreResolver = Resolver<UrlStore>;

/// A handler that redirects paths found in its source and defers everything
/// else to its fallback.
///
/// Only the path component of the request URI is matched; the query string is
/// neither matched nor forwarded. Lookup failures are logged and treated as
/// misses, so a broken source never turns into an error response.
///
/// Whatever target the source returns is sent verbatim: a [`Mapping`] entry
/// with an empty url answers `301` with an empty `Location`. The [`UrlStore`]
/// never returns empty targets, so there an empty value falls through.
pub struct Resolver<S> {
    source: S,
    fallback: SharedHandler,
}

impl<S: RedirectSource> Resolver<S> {
    /// Creates a resolver over `source` that defers misses to `fallback`.
    pub fn new(source: S, fallback: SharedHandler) -> Self {
        Self { source, fallback }
    }
}

impl Resolver<Mapping> {
    /// Parses a mapping document and builds a resolver over it.
    pub fn from_document(
        bytes: &[u8],
        format: RecordFormat,
        fallback: SharedHandler,
    ) -> urlshort_core::Result<Self> {
        let mapping = Mapping::from_document(bytes, format)?;
        Ok(Self::new(mapping, fallback))
    }

    /// Builds a resolver from a YAML list of `path`/`url` entries.
    ///
    /// ```yaml
    /// - path: /some-path
    ///   url: https://www.some-url.com/demo
    /// ```
    pub fn from_yaml(bytes: &[u8], fallback: SharedHandler) -> urlshort_core::Result<Self> {
        Self::from_document(bytes, RecordFormat::Yaml, fallback)
    }

    /// Builds a resolver from a JSON array of `path`/`url` objects.
    pub fn from_json(bytes: &[u8], fallback: SharedHandler) -> urlshort_core::Result<Self> {
        Self::from_document(bytes, RecordFormat::Json, fallback)
    }
}

impl<S> std::fmt::Debug for Resolver<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: RedirectSource> Handler for Resolver<S> {
    async fn serve(&self, request: Request) -> Response {
        let path = request.uri().path().to_owned();

        match self.source.lookup(&path).await {
            Ok(Some(target)) => match redirect(&target) {
                Some(response) => {
                    debug!(source = self.source.name(), path = %path, target = %target, "redirecting");
                    return response;
                }
                None => {
                    warn!(source = self.source.name(), path = %path, target = %target, "redirect target is not a valid header value, falling through");
                }
            },
            Ok(None) => {
                trace!(source = self.source.name(), path = %path, "no redirect, falling through");
            }
            Err(e) => {
                warn!(source = self.source.name(), path = %path, error = %e, "lookup failed, falling through");
            }
        }

        self.fallback.serve(request).await
    }
}

fn redirect(target: &str) -> Option<Response> {
    let location = HeaderValue::from_str(target).ok()?;
    Some((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RedirectorError, Result};
    use axum::body::{to_bytes, Body};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use urlshort_core::CoreError;
    use urlshort_storage::StorageError;

    /// Records every request it receives and answers `404`.
    #[derive(Default)]
    struct CountingFallback {
        calls: AtomicUsize,
        last_uri: std::sync::Mutex<Option<String>>,
    }

    #[async_trait]
    impl Handler for CountingFallback {
        async fn serve(&self, request: Request) -> Response {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_uri.lock().unwrap() = Some(request.uri().to_string());
            StatusCode::NOT_FOUND.into_response()
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RedirectSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn lookup(&self, _path: &str) -> Result<Option<String>> {
            Err(RedirectorError::Storage(StorageError::Read(
                "disk on fire".to_string(),
            )))
        }
    }

    fn get(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs.iter().copied().collect()
    }

    #[tokio::test]
    async fn hit_redirects_permanently() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver = MapResolver::new(mapping(&[("/a", "https://x/")]), fallback.clone());

        let response = resolver.serve(get("/a")).await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "https://x/");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn miss_delegates_exactly_once() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver = MapResolver::new(mapping(&[("/a", "https://x/")]), fallback.clone());

        let response = resolver.serve(get("/b?x=1")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
        // the request reaches the fallback unchanged
        assert_eq!(fallback.last_uri.lock().unwrap().as_deref(), Some("/b?x=1"));
    }

    #[tokio::test]
    async fn query_string_is_ignored() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver = MapResolver::new(mapping(&[("/a", "https://x/")]), fallback);

        let response = resolver.serve(get("/a?utm=1")).await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "https://x/");
    }

    #[tokio::test]
    async fn method_is_ignored() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver = MapResolver::new(mapping(&[("/a", "https://x/")]), fallback);

        let request = Request::builder()
            .method("POST")
            .uri("/a")
            .body(Body::empty())
            .unwrap();
        let response = resolver.serve(request).await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[tokio::test]
    async fn source_errors_fall_through() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver = Resolver::new(FailingSource, fallback.clone());

        let response = resolver.serve(get("/a")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_target_falls_through() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver = MapResolver::new(
            mapping(&[("/bad", "https://x/\r\nSet-Cookie: a=b")]),
            fallback.clone(),
        );

        let response = resolver.serve(get("/bad")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_mapping_target_redirects_verbatim() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver = MapResolver::new(mapping(&[("/empty", "")]), fallback.clone());

        let response = resolver.serve(get("/empty")).await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "");
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn from_yaml_document() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver = MapResolver::from_yaml(b"- path: /p\n  url: https://u/\n", fallback)
            .unwrap();

        let response = resolver.serve(get("/p")).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "https://u/");
    }

    #[tokio::test]
    async fn from_json_document() {
        let fallback = Arc::new(CountingFallback::default());
        let resolver =
            MapResolver::from_json(br#"[{"path":"/p","url":"https://u/"}]"#, fallback).unwrap();

        let response = resolver.serve(get("/p")).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "https://u/");
    }

    #[test]
    fn malformed_document_is_rejected() {
        let fallback = Arc::new(CountingFallback::default());
        let err = MapResolver::from_json(b"{", fallback).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Parse {
                format: RecordFormat::Json,
                ..
            }
        ));
    }
}
