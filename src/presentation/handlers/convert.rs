use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::ConversionRequest;
use crate::domain::TaskMode;
use crate::presentation::state::AppState;

use super::error::ErrorResponse;

#[tracing::instrument(skip(state, multipart))]
pub async fn convert_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut file: Option<(Vec<u8>, Option<String>)> = None;
    let mut language: Option<String> = None;
    let mut task = TaskMode::default();
    let mut return_segments = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart form");
                return bad_request(format!("Failed to read multipart form: {}", e));
            }
        };

        match field.name().unwrap_or_default() {
            "file" => {
                let declared_type = field.content_type().map(str::to_string);
                let data = match field.bytes().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read uploaded file");
                        return bad_request(format!("Failed to read file: {}", e));
                    }
                };
                tracing::debug!(
                    bytes = data.len(),
                    content_type = declared_type.as_deref().unwrap_or("none"),
                    "Audio upload received"
                );
                file = Some((data.to_vec(), declared_type));
            }
            "language" => match field.text().await {
                Ok(value) if !value.trim().is_empty() => language = Some(value.trim().to_string()),
                Ok(_) => {}
                Err(e) => return bad_request(format!("Failed to read language field: {}", e)),
            },
            "task" => match field.text().await {
                Ok(value) => match value.trim().parse() {
                    Ok(parsed) => task = parsed,
                    Err(e) => return bad_request(e),
                },
                Err(e) => return bad_request(format!("Failed to read task field: {}", e)),
            },
            "return_segments" => match field.text().await {
                Ok(value) => {
                    let value = value.trim();
                    return_segments = value.eq_ignore_ascii_case("true") || value == "1";
                }
                Err(e) => {
                    return bad_request(format!("Failed to read return_segments field: {}", e));
                }
            },
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    let Some((data, declared_type)) = file else {
        tracing::warn!("Conversion request with no file");
        return bad_request("No audio file uploaded");
    };

    let request = ConversionRequest {
        data,
        declared_type,
        language,
        task,
        return_segments,
    };

    match state.conversion_service.convert(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}
