//! # Script-Invocation Records, 2.0 Generation
//!
//! The current script-invocation shape: carries the `meta` envelope, a
//! single RFC 3339 timestamp, the target-document descriptors, and a
//! reworked trace wrapper. Unlike the legacy generation, the identity
//! fields are gated by format rules and required by default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use prtel_core::{SchemaVersion, TelemetryError};

use crate::engine;
use crate::meta::RecordMeta;
use crate::schema::{FieldRule, FieldSpec, RecordRules, ValidatedRecord};
use crate::summary::format_value_map;

/// Script-execution runtime description, 2.0 shape.
///
/// Adds the runtime family discriminator and the per-engine
/// configuration map the legacy shape lacked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineInfoV2 {
    /// Runtime family (interpreter kind).
    #[serde(rename = "type")]
    pub engine_type: String,
    /// Runtime version string.
    pub version: String,
    /// Ordered interpreter search paths.
    #[serde(rename = "syspath")]
    pub sys_paths: Vec<String>,
    /// Engine configuration key/value pairs.
    pub configs: BTreeMap<String, Value>,
}

/// Diagnostic wrapper around the engine info, 2.0 shape.
///
/// The legacy pair of raw dump strings collapsed into one free-text
/// message; this is a breaking shape change, not a superset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceInfoV2 {
    /// The runtime that executed the script.
    #[serde(rename = "engine")]
    pub engine_info: EngineInfoV2,
    /// Free-text diagnostic message.
    pub message: String,
}

/// One user-script invocation, 2.0 generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptTelemetryRecordV2 {
    /// Schema envelope; `meta.schema` is the dispatch discriminant.
    pub meta: RecordMeta,
    /// Invocation instant, RFC 3339 with offset.
    pub timestamp: String,
    /// Acting user.
    #[serde(rename = "username")]
    pub user_name: String,
    /// Host application version; numeric string.
    #[serde(rename = "revit")]
    pub revit_version: String,
    /// Host application build identifier.
    #[serde(rename = "revitbuild")]
    pub revit_build: String,
    /// Session identifier; UUIDv4 in this generation.
    #[serde(rename = "sessionid")]
    pub session_id: String,
    /// Runtime version.
    #[serde(rename = "pyrevit")]
    pub pyrevit_version: String,
    /// Lineage marker for duplicated host documents.
    pub clone: String,
    /// Whether the script ran in debug mode.
    #[serde(rename = "debug")]
    pub is_debug_mode: bool,
    /// Whether the script ran in config mode.
    #[serde(rename = "config")]
    pub is_config_mode: bool,
    /// Whether the invocation came from the host GUI.
    #[serde(rename = "from_gui")]
    pub is_exec_from_gui: bool,
    /// Invoked command name.
    #[serde(rename = "commandname")]
    pub command_name: String,
    /// Process-unique command name.
    #[serde(rename = "commanduniquename")]
    pub command_unique_name: String,
    /// Bundle the command belongs to.
    #[serde(rename = "commandbundle")]
    pub bundle_name: String,
    /// Extension the command belongs to.
    #[serde(rename = "commandextension")]
    pub extension_name: String,
    /// Name of the target document.
    #[serde(rename = "docname")]
    pub document_name: String,
    /// Path of the target document.
    #[serde(rename = "docpath")]
    pub document_path: String,
    /// Script exit code.
    #[serde(rename = "resultcode")]
    pub result_code: i32,
    /// Result key/value pairs reported by the script.
    #[serde(rename = "commandresults")]
    pub command_results: BTreeMap<String, Value>,
    /// Path of the invoked script.
    #[serde(rename = "scriptpath")]
    pub script_path: String,
    /// Diagnostic trace wrapper.
    #[serde(rename = "trace")]
    pub trace_info: TraceInfoV2,
}

/// 2.0 script schema: identity fields gated and required by default,
/// everything else explicitly exempt.
static SCRIPT_V2_RULES: RecordRules = RecordRules {
    name: "script/2.0",
    required_by_default: true,
    fields: &[
        FieldSpec::ruled("meta.schema", FieldRule::OneOf(&["2.0"])),
        FieldSpec::ruled("timestamp", FieldRule::Rfc3339),
        FieldSpec::exempt("username"),
        FieldSpec::ruled("revit", FieldRule::Numeric),
        FieldSpec::ruled("revitbuild", FieldRule::BuildString),
        FieldSpec::ruled("sessionid", FieldRule::UuidV4),
        FieldSpec::exempt("pyrevit"),
        FieldSpec::exempt("clone"),
        FieldSpec::exempt("debug"),
        FieldSpec::exempt("config"),
        FieldSpec::exempt("from_gui"),
        FieldSpec::exempt("commandname"),
        FieldSpec::exempt("commanduniquename"),
        FieldSpec::exempt("commandbundle"),
        FieldSpec::exempt("commandextension"),
        FieldSpec::exempt("docname"),
        FieldSpec::exempt("docpath"),
        FieldSpec::exempt("resultcode"),
        FieldSpec::exempt("commandresults"),
        FieldSpec::exempt("scriptpath"),
        FieldSpec::exempt("trace"),
    ],
};

impl ValidatedRecord for ScriptTelemetryRecordV2 {
    fn rules(&self) -> &'static RecordRules {
        &SCRIPT_V2_RULES
    }

    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "meta.schema" => Some(&self.meta.schema_version),
            "timestamp" => Some(&self.timestamp),
            "username" => Some(&self.user_name),
            "revit" => Some(&self.revit_version),
            "revitbuild" => Some(&self.revit_build),
            "sessionid" => Some(&self.session_id),
            "pyrevit" => Some(&self.pyrevit_version),
            "clone" => Some(&self.clone),
            "commandname" => Some(&self.command_name),
            "commanduniquename" => Some(&self.command_unique_name),
            "commandbundle" => Some(&self.bundle_name),
            "commandextension" => Some(&self.extension_name),
            "docname" => Some(&self.document_name),
            "docpath" => Some(&self.document_path),
            "scriptpath" => Some(&self.script_path),
            _ => None,
        }
    }
}

impl ScriptTelemetryRecordV2 {
    /// The generation this shape conforms to.
    pub fn schema_version(&self) -> SchemaVersion {
        SchemaVersion::V2
    }

    /// Validate against the 2.0 rule table, aggregating all violations.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        engine::validate(self)
    }

    /// Single-line audit summary, prefixed with the caller's label.
    ///
    /// Empty optional fields render as empty strings; the line is
    /// byte-identical across repeated calls on the same record.
    pub fn summary(&self, label: &str) -> String {
        format!(
            "{} {} {:?} {}:{} ({}) [{}.{}] code={} info={}",
            label,
            self.timestamp,
            self.user_name,
            self.revit_build,
            self.trace_info.engine_info.version,
            self.trace_info.engine_info.engine_type,
            self.extension_name,
            self.command_name,
            self.result_code,
            format_value_map(&self.command_results),
        )
    }
}
