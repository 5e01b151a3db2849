//! # prtel-api — Axum HTTP Receiver
//!
//! The network boundary of the telemetry stack, built on Axum/Tower/Tokio.
//! Handlers carry no business logic: a request body is decoded to raw
//! JSON, handed to `prtel-records` for dispatch and validation, and the
//! accepted record is passed to the configured [`prtel_store::TelemetryStore`].
//!
//! ## Routes
//!
//! - `POST /api/v1/scripts` — legacy script-invocation records
//! - `POST /api/v2/scripts` — envelope script-invocation records
//! - `POST /api/v2/events`  — host-application event records
//! - `GET  /health/live`, `GET /health/ready` — probes (unauthenticated)
//! - `GET  /metrics` — Prometheus exposition
//!
//! Both script routes run the same dispatch: the envelope in the body,
//! not the path, decides the generation.
//!
//! ## Error Mapping
//!
//! All rejections map to structured JSON responses via [`AppError`]:
//! undecodable or version-unknown payloads are client errors, field
//! validation failures are unprocessable and carry the full violation
//! list verbatim, and storage failures are server errors.

pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
