//! # Application State
//!
//! Shared state for the Axum application: the storage backend, the
//! label prefixed to audit summary lines, and the Prometheus handle.
//! Everything here is set once at startup and read-only afterwards.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use prtel_store::TelemetryStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Destination for accepted records.
    pub store: Arc<dyn TelemetryStore>,
    /// Label prefixed to every audit summary line.
    pub summary_label: String,
    /// Renderer for the `/metrics` route; `None` when no recorder is
    /// installed (tests).
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State with the given store and label, without metrics exposition.
    pub fn new(store: Arc<dyn TelemetryStore>, summary_label: impl Into<String>) -> Self {
        Self {
            store,
            summary_label: summary_label.into(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` route.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
