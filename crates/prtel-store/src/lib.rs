//! # prtel-store — Storage Boundary
//!
//! The persistence seam of the telemetry stack. The receiver hands a
//! validated record to a [`TelemetryStore`] together with its resolved
//! schema version; what lies behind the trait is interchangeable. The
//! core never learns where data lands, and a failed write is fatal to
//! one request, never to the process.
//!
//! ## Backends
//!
//! - [`PostgresStore`] — one JSONB row per record, routed by schema
//!   version into configurable script/event tables.
//! - [`MemoryStore`] — `Vec`-backed double for handler and pipeline
//!   tests; no database required.
//!
//! ## Crate Policy
//!
//! - Records arrive already validated and are persisted untouched.
//! - No retry or backoff here; surfacing the error is the contract.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use prtel_records::{EventTelemetryRecordV2, ScriptRecord};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Error surface of the storage boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected or failed the write.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The record could not be serialized into the persisted form.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store was configured with an unusable value.
    #[error("invalid store configuration: {0}")]
    Configuration(String),
}

/// Destination for validated telemetry records.
///
/// Implementations receive the record value untouched, plus its
/// resolved schema version (via [`ScriptRecord::schema_version`] and
/// [`EventTelemetryRecordV2::schema_version`]) so they can route to
/// version-aware tables or collections.
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Persist one script-invocation record.
    async fn save_script(&self, record: &ScriptRecord) -> Result<(), StoreError>;

    /// Persist one host-application event record.
    async fn save_event(
        &self,
        record: &EventTelemetryRecordV2,
    ) -> Result<(), StoreError>;
}
