//! # Legacy Script-Invocation Records
//!
//! The record shape of the generation that predates the `meta` envelope.
//! Timestamps arrive as a split `date`/`time` pair, the trace wrapper
//! carries two raw diagnostic dump strings, and result values are plain
//! strings. None of it is validated: the legacy generation performed no
//! structural validation at all, and that permissiveness is preserved so
//! historical clients and replayed archives keep ingesting cleanly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use prtel_core::{SchemaVersion, TelemetryError};

use crate::engine;
use crate::schema::{FieldSpec, RecordRules, ValidatedRecord};
use crate::summary::format_str_map;

/// Script-execution runtime description, legacy shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineInfoV1 {
    /// Runtime version string.
    pub version: String,
    /// Ordered interpreter search paths.
    #[serde(rename = "syspath")]
    pub sys_paths: Vec<String>,
}

/// Diagnostic wrapper around the engine info, legacy shape.
///
/// Carries two raw dump strings: the interpreter trace and the host
/// runtime trace. The 2.0 generation replaced both with a single
/// free-text message; the shapes are deliberately distinct types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceInfoV1 {
    /// The runtime that executed the script.
    #[serde(rename = "engine")]
    pub engine_info: EngineInfoV1,
    /// Raw interpreter trace dump.
    #[serde(rename = "ipy")]
    pub interpreter_trace: String,
    /// Raw host-runtime trace dump.
    #[serde(rename = "clr")]
    pub runtime_trace: String,
}

/// One user-script invocation, legacy generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptTelemetryRecordV1 {
    /// Invocation date, as the client formatted it.
    pub date: String,
    /// Invocation time, as the client formatted it.
    pub time: String,
    /// Acting user.
    #[serde(rename = "username")]
    pub user_name: String,
    /// Host application version.
    #[serde(rename = "revit")]
    pub revit_version: String,
    /// Host application build identifier.
    #[serde(rename = "revitbuild")]
    pub revit_build: String,
    /// Session identifier; opaque in this generation.
    #[serde(rename = "sessionid")]
    pub session_id: String,
    /// Runtime version.
    #[serde(rename = "pyrevit")]
    pub pyrevit_version: String,
    /// Whether the script ran in debug mode.
    #[serde(rename = "debug")]
    pub is_debug_mode: bool,
    /// Whether the script ran in config mode.
    #[serde(rename = "config")]
    pub is_config_mode: bool,
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
    /// Script exit code.
    #[serde(rename = "resultcode")]
    pub result_code: i32,
    /// Result key/value pairs reported by the script.
    #[serde(rename = "commandresults")]
    pub command_results: BTreeMap<String, String>,
    /// Path of the invoked script.
    #[serde(rename = "scriptpath")]
    pub script_path: String,
    /// Diagnostic trace wrapper.
    #[serde(rename = "trace")]
    pub trace_info: TraceInfoV1,
}

/// Every field of the legacy generation is declared and none is
/// constrained; validation succeeds regardless of content.
static SCRIPT_V1_RULES: RecordRules = RecordRules {
    name: "script/1.0",
    required_by_default: false,
    fields: &[
        FieldSpec::exempt("date"),
        FieldSpec::exempt("time"),
        FieldSpec::exempt("username"),
        FieldSpec::exempt("revit"),
        FieldSpec::exempt("revitbuild"),
        FieldSpec::exempt("sessionid"),
        FieldSpec::exempt("pyrevit"),
        FieldSpec::exempt("debug"),
        FieldSpec::exempt("config"),
        FieldSpec::exempt("commandname"),
        FieldSpec::exempt("commanduniquename"),
        FieldSpec::exempt("commandbundle"),
        FieldSpec::exempt("commandextension"),
        FieldSpec::exempt("resultcode"),
        FieldSpec::exempt("commandresults"),
        FieldSpec::exempt("scriptpath"),
        FieldSpec::exempt("trace"),
    ],
};

impl ValidatedRecord for ScriptTelemetryRecordV1 {
    fn rules(&self) -> &'static RecordRules {
        &SCRIPT_V1_RULES
    }

    // The legacy schema constrains nothing, so no field is ever read back.
    fn text_field(&self, _field: &str) -> Option<&str> {
        None
    }
}

impl ScriptTelemetryRecordV1 {
    /// The generation this shape conforms to.
    pub fn schema_version(&self) -> SchemaVersion {
        SchemaVersion::V1
    }

    /// Validate against the legacy rule table.
    ///
    /// Always succeeds: the table declares every field unconstrained.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        engine::validate(self)
    }

    /// Single-line audit summary, prefixed with the caller's label.
    ///
    /// The split date/time pair renders joined as one `date-time` string.
    pub fn summary(&self, label: &str) -> String {
        format!(
            "{} {}-{} {:?} @ {}:{} [{}.{}] code={} info={}",
            label,
            self.date,
            self.time,
            self.user_name,
            self.revit_build,
            self.trace_info.engine_info.version,
            self.extension_name,
            self.command_name,
            self.result_code,
            format_str_map(&self.command_results),
        )
    }
}
