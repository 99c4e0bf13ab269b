//! API endpoint handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::super::AppState;
use crate::models::ViewState;

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// The view as JSON, with the derived display lines.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub generation: u64,
    #[serde(flatten)]
    pub view: ViewState,
    pub earthquake_lines: Vec<String>,
    pub visible_error: Option<String>,
}

pub async fn api_state(State(state): State<AppState>) -> Json<StateResponse> {
    let generation = state.view.generation().await;
    let view = state.view.snapshot().await;
    let earthquake_lines = view.earthquake_lines();
    let visible_error = view.visible_error().map(str::to_string);
    Json(StateResponse {
        generation,
        view,
        earthquake_lines,
        visible_error,
    })
}
