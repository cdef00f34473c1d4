use crate::handler::Handler;
use async_trait::async_trait;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::trace;

const GREETING: &str = "Hello, world!\n";

/// The terminal handler of a chain, answering every request with a greeting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandler;

#[async_trait]
impl Handler for DefaultHandler {
    async fn serve(&self, request: Request) -> Response {
        trace!(path = %request.uri().path(), "no redirect matched, serving default response");
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            GREETING,
        )
            .into_response()
    }
}
