//! # Serve Command
//!
//! Runs the telemetry ingestion server: connects the store, prepares
//! its tables, installs the metrics recorder, and serves the Axum
//! application until the process is stopped. Configuration is read
//! once here and never mutated afterwards.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use metrics_exporter_prometheus::PrometheusBuilder;

use prtel_api::{app, AppState};
use prtel_store::PostgresStore;

/// Arguments for `prtel serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Postgres connection string.
    #[arg(long)]
    pub database_url: String,

    /// Table receiving script-invocation records.
    #[arg(long, default_value = "telemetry_scripts")]
    pub scripts_table: String,

    /// Table receiving host-application event records.
    #[arg(long, default_value = "telemetry_events")]
    pub events_table: String,

    /// Label prefixed to every audit summary line.
    #[arg(long, default_value = "logged")]
    pub summary_label: String,
}

/// Run the ingestion server until interrupted.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install metrics recorder")?;

    let store = PostgresStore::connect(
        &args.database_url,
        &args.scripts_table,
        &args.events_table,
    )
    .await
    .context("failed to connect to the telemetry database")?;
    store
        .ensure_schema()
        .await
        .context("failed to prepare telemetry tables")?;

    let state = AppState::new(Arc::new(store), args.summary_label)
        .with_metrics(metrics_handle);

    let listener = tokio::net::TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    tracing::info!(listen = args.listen.as_str(), "telemetry server ready");

    axum::serve(listener, app(state))
        .await
        .context("server terminated unexpectedly")?;
    Ok(())
}
