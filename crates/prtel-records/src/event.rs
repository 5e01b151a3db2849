//! # Host-Application Event Records
//!
//! Lifecycle events from the host application (document opens, syncs,
//! prints, ...), distinct from script invocations. Events were
//! introduced with the 2.0 protocol, so this is the only generation:
//! validation and summarization are gated on the envelope naming
//! exactly `"2.0"`, and anything else passes through both unchecked and
//! unsummarized. The dispatcher refuses to construct records for
//! unregistered versions, so in the ingestion pipeline the gate is only
//! ever taken with a `"2.0"` envelope.
//
// TODO: when an event/3.0 generation lands, fold this gate into the
// rule-table lookup so version handling lives in one place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use prtel_core::{SchemaVersion, TelemetryError};

use crate::engine;
use crate::meta::RecordMeta;
use crate::schema::{FieldRule, FieldSpec, RecordRules, ValidatedRecord};

/// One host-application lifecycle event, 2.0 generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTelemetryRecordV2 {
    /// Schema envelope; `meta.schema` is the dispatch discriminant.
    pub meta: RecordMeta,
    /// Event instant, RFC 3339 with offset.
    pub timestamp: String,
    /// Event discriminator (e.g. `doc-synced`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event argument key/value pairs.
    #[serde(rename = "args")]
    pub event_args: BTreeMap<String, Value>,
    /// Acting user.
    #[serde(rename = "username")]
    pub user_name: String,
    /// User the host application is signed in as.
    #[serde(rename = "host_user")]
    pub host_user_name: String,
    /// Host application version; numeric string.
    #[serde(rename = "revit")]
    pub revit_version: String,
    /// Host application build identifier.
    #[serde(rename = "revitbuild")]
    pub revit_build: String,
    /// Whether the event could still be cancelled when observed.
    pub cancellable: bool,
    /// Whether the event was cancelled.
    pub cancelled: bool,
    /// Host-assigned identifier of the target document.
    #[serde(rename = "docid")]
    pub document_id: i64,
    /// Target document type.
    #[serde(rename = "doctype")]
    pub document_type: String,
    /// Template the target document was created from.
    #[serde(rename = "doctemplate")]
    pub document_template: String,
    /// Name of the target document.
    #[serde(rename = "docname")]
    pub document_name: String,
    /// Path of the target document.
    #[serde(rename = "docpath")]
    pub document_path: String,
    /// Project number descriptor.
    #[serde(rename = "projectnum")]
    pub project_number: String,
    /// Project name descriptor.
    #[serde(rename = "projectname")]
    pub project_name: String,
}

/// 2.0 event schema: the instant and host identity fields are gated,
/// everything else explicitly exempt.
static EVENT_V2_RULES: RecordRules = RecordRules {
    name: "event/2.0",
    required_by_default: true,
    fields: &[
        FieldSpec::ruled("meta.schema", FieldRule::OneOf(&["2.0"])),
        FieldSpec::ruled("timestamp", FieldRule::Rfc3339),
        FieldSpec::exempt("type"),
        FieldSpec::exempt("args"),
        FieldSpec::exempt("username"),
        FieldSpec::exempt("host_user"),
        FieldSpec::ruled("revit", FieldRule::Numeric),
        FieldSpec::ruled("revitbuild", FieldRule::BuildString),
        FieldSpec::exempt("cancellable"),
        FieldSpec::exempt("cancelled"),
        FieldSpec::exempt("docid"),
        FieldSpec::exempt("doctype"),
        FieldSpec::exempt("doctemplate"),
        FieldSpec::exempt("docname"),
        FieldSpec::exempt("docpath"),
        FieldSpec::exempt("projectnum"),
        FieldSpec::exempt("projectname"),
    ],
};

impl ValidatedRecord for EventTelemetryRecordV2 {
    fn rules(&self) -> &'static RecordRules {
        &EVENT_V2_RULES
    }

    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "meta.schema" => Some(&self.meta.schema_version),
            "timestamp" => Some(&self.timestamp),
            "type" => Some(&self.event_type),
            "username" => Some(&self.user_name),
            "host_user" => Some(&self.host_user_name),
            "revit" => Some(&self.revit_version),
            "revitbuild" => Some(&self.revit_build),
            "doctype" => Some(&self.document_type),
            "doctemplate" => Some(&self.document_template),
            "docname" => Some(&self.document_name),
            "docpath" => Some(&self.document_path),
            "projectnum" => Some(&self.project_number),
            "projectname" => Some(&self.project_name),
            _ => None,
        }
    }
}

impl EventTelemetryRecordV2 {
    /// The generation this shape conforms to.
    pub fn schema_version(&self) -> SchemaVersion {
        SchemaVersion::V2
    }

    /// Validate against the 2.0 event rule table.
    ///
    /// Only records whose envelope names exactly `"2.0"` are checked;
    /// any other tag passes through untouched. That gate is the
    /// documented current behavior, kept observable here while the
    /// dispatcher rejects unregistered versions upstream.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.meta.schema_version != SchemaVersion::V2.as_str() {
            return Ok(());
        }
        engine::validate(self)
    }

    /// Single-line audit summary, or `None` for an unrecognized
    /// envelope tag: rather than guess a layout for an unknown
    /// generation, formatting is suppressed.
    pub fn summary(&self, label: &str) -> Option<String> {
        if self.meta.schema_version != SchemaVersion::V2.as_str() {
            return None;
        }
        Some(format!(
            "{} {} [{}] {:?} @ {} doc={:?} @ {}",
            label,
            self.timestamp,
            self.event_type,
            self.host_user_name,
            self.revit_build,
            self.document_name,
            self.document_path,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> EventTelemetryRecordV2 {
        EventTelemetryRecordV2 {
            meta: RecordMeta::for_version("2.0"),
            timestamp: "2023-06-01T09:30:00Z".to_string(),
            event_type: "doc-synced".to_string(),
            event_args: BTreeMap::from([
                ("central".to_string(), json!(true)),
            ]),
            user_name: "eirannejad".to_string(),
            host_user_name: "ehsan@corp".to_string(),
            revit_version: "2023".to_string(),
            revit_build: "20220405_1515(x64)".to_string(),
            document_name: "tower.rvt".to_string(),
            document_path: "C:/models/tower.rvt".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_event_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_bad_build_flagged_for_current_generation() {
        let mut record = sample();
        record.revit_build = "2023-01-01".to_string();
        let err = record.validate().unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::FieldValidationFailed { .. }
        ));
    }

    #[test]
    fn test_unrecognized_version_is_not_rejected() {
        // The gate: a foreign envelope tag skips every check, even on an
        // otherwise completely invalid record.
        let record = EventTelemetryRecordV2 {
            meta: RecordMeta::for_version("9.9"),
            ..Default::default()
        };
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_unrecognized_version_produces_no_summary() {
        let mut record = sample();
        record.meta.schema_version = "9.9".to_string();
        assert_eq!(record.summary("logged"), None);
    }

    #[test]
    fn test_summary_layout() {
        let line = sample().summary("logged").unwrap();
        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("[doc-synced]"));
        assert!(line.contains("\"ehsan@corp\""));
        assert!(line.contains("doc=\"tower.rvt\""));
    }

    #[test]
    fn test_summary_is_idempotent() {
        let record = sample();
        assert_eq!(record.summary("logged"), record.summary("logged"));
    }

    #[test]
    fn test_wire_keys_round_trip() {
        let record = sample();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "doc-synced");
        assert_eq!(json["host_user"], "ehsan@corp");
        assert_eq!(json["docid"], 0);
        assert_eq!(json["args"]["central"], true);

        let decoded: EventTelemetryRecordV2 =
            serde_json::from_value(json).unwrap();
        assert_eq!(decoded, record);
    }
}
