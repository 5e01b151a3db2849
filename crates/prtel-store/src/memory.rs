//! # In-Memory Backend
//!
//! `Vec`-backed store used by handler and pipeline tests. Keeps the
//! same version-routing shape as the real backends (records stored
//! alongside their resolved schema version) so tests can assert on
//! routing without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use prtel_core::SchemaVersion;
use prtel_records::{EventTelemetryRecordV2, ScriptRecord};

use crate::{StoreError, TelemetryStore};

/// In-memory telemetry store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scripts: Mutex<Vec<(SchemaVersion, Value)>>,
    events: Mutex<Vec<Value>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored script records with their resolved versions.
    pub fn scripts(&self) -> Vec<(SchemaVersion, Value)> {
        self.scripts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Snapshot of the stored event records.
    pub fn events(&self) -> Vec<Value> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TelemetryStore for MemoryStore {
    async fn save_script(&self, record: &ScriptRecord) -> Result<(), StoreError> {
        let document = serde_json::to_value(record)?;
        self.scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((record.schema_version(), document));
        Ok(())
    }

    async fn save_event(
        &self,
        record: &EventTelemetryRecordV2,
    ) -> Result<(), StoreError> {
        let document = serde_json::to_value(record)?;
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(document);
        Ok(())
    }
}
