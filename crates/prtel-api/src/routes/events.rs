//! # Event Ingestion
//!
//! Host-application lifecycle events. Unlike scripts, events have no
//! legacy generation: the dispatcher refuses payloads whose envelope
//! does not name a registered version.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use metrics::counter;
use serde_json::Value;

use prtel_records::parse_event;

use crate::{AppError, AppState};

/// `POST /api/v2/events`.
pub async fn post_event(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, AppError> {
    let outcome = ingest(&state, &payload).await;
    match &outcome {
        Ok(()) => counter!("prtel_records_accepted_total", "kind" => "event")
            .increment(1),
        Err(_) => counter!("prtel_records_rejected_total", "kind" => "event")
            .increment(1),
    }
    outcome.map(|()| StatusCode::CREATED)
}

async fn ingest(state: &AppState, payload: &Value) -> Result<(), AppError> {
    let record = parse_event(payload)?;
    record.validate()?;
    if let Some(line) = record.summary(&state.summary_label) {
        tracing::info!("{line}");
    }
    state.store.save_event(&record).await?;
    Ok(())
}
