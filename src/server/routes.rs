//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::board))
        .route("/refresh", post(handlers::refresh))
        .route("/api/state", get(handlers::api_state))
        .route("/health", get(handlers::health))
        // The page inlines its stylesheet; this is for embedders.
        .route("/static/style.css", get(handlers::serve_css))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
