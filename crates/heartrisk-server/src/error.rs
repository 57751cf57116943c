use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use heartrisk_core::error::{CoreError, FieldError};
use heartrisk_model::error::ModelError;

use crate::assess::AssessError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    Invalid(Vec<FieldError>),
    Unavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            ApiError::Invalid(fields) => (
                StatusCode::BAD_REQUEST,
                format!("{} input(s) outside their allowed range", fields.len()),
                fields,
            ),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, Vec::new()),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    Vec::new(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                fields,
            }),
        )
            .into_response()
    }
}

impl From<AssessError> for ApiError {
    fn from(e: AssessError) -> Self {
        match e {
            AssessError::Input(CoreError::Validation(fields)) => ApiError::Invalid(fields),
            AssessError::Input(other) => ApiError::Internal(other.to_string()),
            AssessError::Model(e @ ModelError::ArtifactNotFound { .. })
            | AssessError::Model(e @ ModelError::ArtifactInvalid { .. })
            | AssessError::Model(e @ ModelError::Io(_)) => ApiError::Unavailable(e.to_string()),
            AssessError::Model(other) => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<heartrisk_export::error::ExportError> for ApiError {
    fn from(e: heartrisk_export::error::ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
