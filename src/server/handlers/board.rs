//! The board page and its refresh action.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::super::AppState;
use crate::render::render_page;

/// Render the current view. While the event query is pending the page
/// reloads itself.
pub async fn board(State(state): State<AppState>) -> Response {
    let view = state.view.snapshot().await;
    match render_page(&view, &state.page_options) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render board: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response()
        }
    }
}

/// Discard the current view and start a new fetch session.
pub async fn refresh(State(state): State<AppState>) -> Redirect {
    state.start_fetch().await;
    Redirect::to("/")
}
