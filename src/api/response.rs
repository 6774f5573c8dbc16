//! Response types for the attendance API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::ValidationErrors;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::InvalidSettings { .. } => (StatusCode::BAD_REQUEST, "INVALID_SETTINGS"),
            EngineError::Rejected { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "REJECTED"),
            EngineError::ActionUnavailable { .. } => (StatusCode::CONFLICT, "ACTION_UNAVAILABLE"),
            EngineError::Submission { .. } => (StatusCode::BAD_GATEWAY, "SUBMISSION_FAILED"),
            EngineError::SubmissionTimeout { .. } => {
                (StatusCode::GATEWAY_TIMEOUT, "SUBMISSION_TIMEOUT")
            }
            EngineError::LocationStale => (StatusCode::CONFLICT, "LOCATION_STALE"),
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}

/// Outcome of a validation endpoint.
///
/// Serialized as `{"valid": true}` on success and as
/// `{"valid": false, "errors": {...}, "message": "..."}` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether every field passed.
    pub valid: bool,
    /// Messages keyed by field.
    #[serde(default, skip_serializing_if = "ValidationErrors::is_empty")]
    pub errors: ValidationErrors,
    /// The first message, for a one-line notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationOutcome {
    /// Builds the outcome and its status code from validation errors.
    pub fn from_errors(errors: ValidationErrors) -> (StatusCode, Self) {
        if errors.is_empty() {
            return (
                StatusCode::OK,
                Self {
                    valid: true,
                    errors,
                    message: None,
                },
            );
        }

        let message = errors.first_message().map(str::to_string);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Self {
                valid: false,
                errors,
                message,
            },
        )
    }
}
