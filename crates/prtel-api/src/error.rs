//! # Application Error
//!
//! Maps core and storage errors to structured HTTP responses with
//! proper status codes and error bodies. Validation responses carry
//! the complete violation list verbatim, so a client can fix every
//! problem in one round trip.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use prtel_core::{TelemetryError, Violations};
use prtel_store::StoreError;

/// Application-level error type that maps to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// The payload declared a schema version with no registered schema.
    #[error("unsupported schema version: {0:?}")]
    UnsupportedSchema(String),

    /// One or more fields violated their declared rules.
    #[error("field validation failed")]
    Validation(Violations),

    /// The payload could not be decoded into any record shape.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// Internal server error (storage and friends).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TelemetryError> for AppError {
    fn from(err: TelemetryError) -> Self {
        match err {
            TelemetryError::UnsupportedSchemaVersion { version } => {
                Self::UnsupportedSchema(version)
            }
            TelemetryError::FieldValidationFailed { violations } => {
                Self::Validation(violations)
            }
            TelemetryError::MalformedPayload { reason } => Self::Malformed(reason),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnsupportedSchema(_) | AppError::Malformed(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut error = serde_json::json!({
            "code": status.as_u16(),
            "message": self.to_string(),
        });
        if let AppError::Validation(violations) = &self {
            error["violations"] = violations
                .violations()
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "field": v.field,
                        "reason": v.reason.to_string(),
                    })
                })
                .collect();
        }

        let body = serde_json::json!({ "error": error });
        (status, axum::Json(body)).into_response()
    }
}
