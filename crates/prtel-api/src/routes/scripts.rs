//! # Script Ingestion
//!
//! One handler serves both versioned script routes: the `meta` envelope
//! in the body, not the request path, decides which generation a
//! payload belongs to, and the dispatcher is the single place that
//! decision is made.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use metrics::counter;
use serde_json::Value;

use prtel_records::parse_script;

use crate::{AppError, AppState};

/// `POST /api/v1/scripts` and `POST /api/v2/scripts`.
pub async fn post_script(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, AppError> {
    let outcome = ingest(&state, &payload).await;
    match &outcome {
        Ok(()) => counter!("prtel_records_accepted_total", "kind" => "script")
            .increment(1),
        Err(_) => counter!("prtel_records_rejected_total", "kind" => "script")
            .increment(1),
    }
    outcome.map(|()| StatusCode::CREATED)
}

async fn ingest(state: &AppState, payload: &Value) -> Result<(), AppError> {
    let record = parse_script(payload)?;
    record.validate()?;
    tracing::info!("{}", record.summary(&state.summary_label));
    state.store.save_script(&record).await?;
    Ok(())
}
