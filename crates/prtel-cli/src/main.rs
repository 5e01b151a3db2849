//! # prtel CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// pyRevit telemetry server toolchain.
///
/// Receives script-invocation and host-event telemetry, validates it
/// against the versioned wire schemas, and persists accepted records.
#[derive(Parser, Debug)]
#[command(name = "prtel", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the telemetry ingestion server.
    Serve(prtel_cli::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => prtel_cli::serve::run(args).await,
    }
}
