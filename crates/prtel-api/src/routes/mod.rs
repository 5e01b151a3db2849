//! # Route Modules
//!
//! Each module defines the handlers for one API surface area; the
//! routes are assembled here and wrapped with middleware and state in
//! the crate root.

pub mod events;
pub mod health;
pub mod scripts;

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::AppState;

/// All application routes, before middleware and state are applied.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/scripts", post(scripts::post_script))
        .route("/api/v2/scripts", post(scripts::post_script))
        .route("/api/v2/events", post(events::post_event))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/metrics", get(metrics))
}

/// Prometheus exposition for the installed recorder.
async fn metrics(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> String {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}
