use axum::Json;
use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Speech-to-text conversion API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "convert": "/convert",
            "model_info": "/model-info",
            "supported_languages": "/supported-languages",
            "health": "/health"
        }
    }))
}
