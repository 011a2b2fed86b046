use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{ConversionError, IntakeError};

/// Uniform error body: every failure carries `success: false` and a message.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl IntoResponse for ConversionError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConversionError::Invalid(IntakeError::PayloadTooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ConversionError::Invalid(_) => StatusCode::BAD_REQUEST,
            ConversionError::NotReady | ConversionError::Overloaded => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ConversionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
