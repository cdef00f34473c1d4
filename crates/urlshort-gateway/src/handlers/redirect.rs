use crate::state::AppState;
use axum::extract::{Request, State};
use axum::response::Response;
use urlshort_redirector::Handler;

/// Hands every request, whatever its path or method, to the resolver chain.
pub async fn redirect_handler(State(state): State<AppState>, request: Request) -> Response {
    state.root().serve(request).await
}
