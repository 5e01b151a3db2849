//! # Postgres Backend
//!
//! Persists each record as one JSONB row keyed by its schema version,
//! in separate script and event tables. Table names come from
//! configuration and are validated as SQL identifiers before they are
//! ever interpolated into a statement; binding cannot cover
//! identifiers, so the validation is the injection boundary.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::types::Json;

use prtel_records::{EventTelemetryRecordV2, ScriptRecord};

use crate::{StoreError, TelemetryStore};

/// Postgres-backed telemetry store.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    scripts_table: String,
    events_table: String,
}

impl PostgresStore {
    /// Connect to the database and configure the target tables.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if either table name is not
    /// a plain SQL identifier, or `StoreError::Database` if the
    /// connection cannot be established.
    pub async fn connect(
        database_url: &str,
        scripts_table: &str,
        events_table: &str,
    ) -> Result<Self, StoreError> {
        for table in [scripts_table, events_table] {
            if !is_sql_identifier(table) {
                return Err(StoreError::Configuration(format!(
                    "table name {table:?} is not a plain SQL identifier"
                )));
            }
        }

        let pool = PgPool::connect(database_url).await?;
        Ok(Self {
            pool,
            scripts_table: scripts_table.to_string(),
            events_table: events_table.to_string(),
        })
    }

    /// Create the target tables if they do not exist yet.
    ///
    /// Idempotent; called once at startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for table in [&self.scripts_table, &self.events_table] {
            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id BIGSERIAL PRIMARY KEY,
                    schema_version TEXT NOT NULL,
                    received_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                    record JSONB NOT NULL
                )"
            );
            sqlx::query(&ddl).execute(&self.pool).await?;
            tracing::debug!(table = table.as_str(), "telemetry table ready");
        }
        Ok(())
    }

    async fn insert(
        &self,
        table: &str,
        schema_version: &str,
        record: serde_json::Value,
    ) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {table} (schema_version, record) VALUES ($1, $2)"
        );
        sqlx::query(&sql)
            .bind(schema_version)
            .bind(Json(record))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TelemetryStore for PostgresStore {
    async fn save_script(&self, record: &ScriptRecord) -> Result<(), StoreError> {
        let document = serde_json::to_value(record)?;
        self.insert(
            &self.scripts_table,
            record.schema_version().as_str(),
            document,
        )
        .await
    }

    async fn save_event(
        &self,
        record: &EventTelemetryRecordV2,
    ) -> Result<(), StoreError> {
        let document = serde_json::to_value(record)?;
        self.insert(
            &self.events_table,
            record.schema_version().as_str(),
            document,
        )
        .await
    }
}

/// A plain SQL identifier: leading letter or underscore, then letters,
/// digits, or underscores.
fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_accepts_plain_names() {
        assert!(is_sql_identifier("telemetry_scripts"));
        assert!(is_sql_identifier("_staging"));
        assert!(is_sql_identifier("t2"));
    }

    #[test]
    fn test_identifier_rejects_everything_else() {
        assert!(!is_sql_identifier(""));
        assert!(!is_sql_identifier("2fast"));
        assert!(!is_sql_identifier("drop table"));
        assert!(!is_sql_identifier("scripts;--"));
        assert!(!is_sql_identifier("sch.scripts"));
    }
}
