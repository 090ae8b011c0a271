use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid or expired API key")]
    InvalidApiKey,

    #[error("region '{0}' not found")]
    UnknownRegion(String),

    #[error("emissions value must be non-negative, got {0}")]
    NegativeEmissions(f64),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, code, msg) = match &self {
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "authentication_error",
                "invalid_api_key",
                "invalid or expired API key".to_string(),
            ),
            AppError::UnknownRegion(name) => (
                StatusCode::NOT_FOUND,
                "not_found_error",
                "unknown_region",
                format!("region '{}' not found", name),
            ),
            AppError::NegativeEmissions(value) => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                "negative_emissions",
                format!("emissions value must be non-negative, got {}", value),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal_server_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "message": msg,
                "type": error_type,
                "code": code,
            }
        }));

        (status, body).into_response()
    }
}
