//! # Dispatch — Envelope-Driven Schema Resolution
//!
//! Resolves a raw decoded payload to its record generation and decodes
//! it into the matching versioned shape. The `meta.schema` envelope
//! field is the sole discriminant: an absent envelope marks the legacy
//! script generation, a registered tag selects its schema, and anything
//! else is refused outright. Guessing forward or backward to the
//! nearest known generation is disallowed; silently misreading a future
//! payload shape is worse than rejecting it.
//!
//! The registered-version sets are compiled-in static data, established
//! at build time and never mutated.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use prtel_core::{SchemaVersion, TelemetryError};

use crate::event::EventTelemetryRecordV2;
use crate::script_v1::ScriptTelemetryRecordV1;
use crate::script_v2::ScriptTelemetryRecordV2;

/// Envelope generations with a registered script schema.
static REGISTERED_SCRIPT_VERSIONS: &[SchemaVersion] = &[SchemaVersion::V2];

/// Envelope generations with a registered event schema.
static REGISTERED_EVENT_VERSIONS: &[SchemaVersion] = &[SchemaVersion::V2];

/// A script-invocation record of either generation.
///
/// Modeled as a tagged union rather than a shared base shape: the
/// generations are structurally incompatible, and keeping them distinct
/// stops one generation's invariants leaking onto the other's data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScriptRecord {
    /// Legacy generation, no envelope.
    V1(ScriptTelemetryRecordV1),
    /// Current envelope generation.
    V2(ScriptTelemetryRecordV2),
}

impl ScriptRecord {
    /// The resolved generation, for version-aware storage routing.
    pub fn schema_version(&self) -> SchemaVersion {
        match self {
            Self::V1(record) => record.schema_version(),
            Self::V2(record) => record.schema_version(),
        }
    }

    /// Validate with the generation's own rule table.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        match self {
            Self::V1(record) => record.validate(),
            Self::V2(record) => record.validate(),
        }
    }

    /// Single-line audit summary in the generation's own layout.
    pub fn summary(&self, label: &str) -> String {
        match self {
            Self::V1(record) => record.summary(label),
            Self::V2(record) => record.summary(label),
        }
    }
}

/// Resolve and decode a script-invocation payload.
///
/// # Errors
///
/// - `UnsupportedSchemaVersion` if the payload carries an envelope
///   naming an unregistered tag; no field checks are run.
/// - `MalformedPayload` if the payload cannot be decoded into the
///   resolved shape (wrong types, unparseable structure).
pub fn parse_script(payload: &Value) -> Result<ScriptRecord, TelemetryError> {
    let Some(meta) = payload.get("meta") else {
        // No envelope: the payload predates the meta wrapper.
        return Ok(ScriptRecord::V1(decode(payload)?));
    };

    let tag = meta.get("schema").and_then(Value::as_str).unwrap_or_default();
    if !registered(REGISTERED_SCRIPT_VERSIONS, tag) {
        return Err(TelemetryError::UnsupportedSchemaVersion {
            version: tag.to_string(),
        });
    }

    // 2.0 is the only registered envelope generation for scripts.
    Ok(ScriptRecord::V2(decode(payload)?))
}

/// Resolve and decode a host-application event payload.
///
/// Events have no legacy generation: a payload without an envelope (or
/// with an unregistered tag) is refused, never guessed.
pub fn parse_event(
    payload: &Value,
) -> Result<EventTelemetryRecordV2, TelemetryError> {
    let tag = payload
        .get("meta")
        .and_then(|meta| meta.get("schema"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if !registered(REGISTERED_EVENT_VERSIONS, tag) {
        return Err(TelemetryError::UnsupportedSchemaVersion {
            version: tag.to_string(),
        });
    }

    decode(payload)
}

fn registered(registry: &[SchemaVersion], tag: &str) -> bool {
    registry.iter().any(|version| version.as_str() == tag)
}

fn decode<T: DeserializeOwned>(payload: &Value) -> Result<T, TelemetryError> {
    serde_json::from_value(payload.clone()).map_err(TelemetryError::malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_envelope_resolves_to_v1() {
        let payload = json!({
            "date": "2019-05-01",
            "time": "13:45:12",
            "username": "mdahl",
        });
        let record = parse_script(&payload).unwrap();
        assert!(matches!(record, ScriptRecord::V1(_)));
        assert_eq!(record.schema_version(), SchemaVersion::V1);
    }

    #[test]
    fn test_registered_envelope_resolves_to_v2() {
        let payload = json!({
            "meta": {"schema": "2.0"},
            "username": "mdahl",
        });
        let record = parse_script(&payload).unwrap();
        assert!(matches!(record, ScriptRecord::V2(_)));
        assert_eq!(record.schema_version(), SchemaVersion::V2);
    }

    #[test]
    fn test_unregistered_envelope_refused() {
        let payload = json!({
            "meta": {"schema": "9.9"},
            "username": "mdahl",
        });
        let err = parse_script(&payload).unwrap_err();
        match err {
            TelemetryError::UnsupportedSchemaVersion { version } => {
                assert_eq!(version, "9.9");
            }
            other => panic!("expected UnsupportedSchemaVersion, got: {other}"),
        }
    }

    #[test]
    fn test_pre_envelope_tag_is_not_guessed_into_v1() {
        // "1.0" names the legacy generation, but the legacy generation
        // never carried an envelope; a payload that does is foreign.
        let payload = json!({"meta": {"schema": "1.0"}});
        assert!(matches!(
            parse_script(&payload),
            Err(TelemetryError::UnsupportedSchemaVersion { .. })
        ));
    }

    #[test]
    fn test_envelope_without_tag_refused() {
        let payload = json!({"meta": {}});
        match parse_script(&payload).unwrap_err() {
            TelemetryError::UnsupportedSchemaVersion { version } => {
                assert_eq!(version, "");
            }
            other => panic!("expected UnsupportedSchemaVersion, got: {other}"),
        }
    }

    #[test]
    fn test_type_mismatch_is_malformed_payload() {
        let payload = json!({
            "meta": {"schema": "2.0"},
            "resultcode": "zero",
        });
        assert!(matches!(
            parse_script(&payload),
            Err(TelemetryError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_event_requires_registered_envelope() {
        let payload = json!({
            "meta": {"schema": "2.0"},
            "type": "doc-opened",
        });
        let record = parse_event(&payload).unwrap();
        assert_eq!(record.event_type, "doc-opened");

        let foreign = json!({"meta": {"schema": "3.1"}, "type": "doc-opened"});
        assert!(matches!(
            parse_event(&foreign),
            Err(TelemetryError::UnsupportedSchemaVersion { .. })
        ));

        let bare = json!({"type": "doc-opened"});
        assert!(matches!(
            parse_event(&bare),
            Err(TelemetryError::UnsupportedSchemaVersion { .. })
        ));
    }

    #[test]
    fn test_script_record_serializes_as_inner_shape() {
        let payload = json!({
            "meta": {"schema": "2.0"},
            "username": "mdahl",
        });
        let record = parse_script(&payload).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["username"], "mdahl");
        assert_eq!(value["meta"]["schema"], "2.0");
        // No enum tag leaks into the persisted form.
        assert!(value.get("V2").is_none());
    }
}
