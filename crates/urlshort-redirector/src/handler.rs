use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;
use std::sync::Arc;

/// Anything that can answer an HTTP request.
///
/// A handler writes exactly one response per request. Resolvers are
/// handlers that may delegate to another handler instead of answering.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn serve(&self, request: Request) -> Response;
}

/// A handler shared by reference, as used for fallbacks.
pub type SharedHandler = Arc<dyn Handler>;

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn serve(&self, request: Request) -> Response {
        (**self).serve(request).await
    }
}
