use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::application::ports::TranscriptionEngine;
use crate::presentation::state::AppState;

pub async fn model_info_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.engine.model_info())
}
