use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_ready: bool,
}

/// Always 200; readiness is reported in the body, never as an error.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.lifecycle.is_ready().await;

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: (if ready { "healthy" } else { "unhealthy" }).to_string(),
            model_ready: ready,
        }),
    )
}
