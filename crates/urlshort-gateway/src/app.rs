use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::redirect_handler;
use crate::state::AppState;

pub struct App {}

impl App {
    /// A router with a single catch-all route backed by the resolver chain.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .fallback(redirect_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }
}
