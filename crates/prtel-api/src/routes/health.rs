//! # Health Probes
//!
//! Liveness and readiness endpoints, unauthenticated.

use axum::http::StatusCode;

/// `GET /health/live`.
pub async fn live() -> StatusCode {
    StatusCode::OK
}

/// `GET /health/ready`.
pub async fn ready() -> StatusCode {
    StatusCode::OK
}
