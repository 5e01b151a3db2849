//! # Record Envelope
//!
//! The small metadata wrapper carried on every 2.0+ record. Its
//! `schema` field is the sole dispatch discriminant: the dispatcher
//! reads it to select the record schema, and its absence marks a
//! payload as the legacy generation.

use serde::{Deserialize, Serialize};

/// Envelope carried on every record from the 2.0 generation onward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordMeta {
    /// Wire tag of the generation this record conforms to, e.g. `"2.0"`.
    #[serde(rename = "schema")]
    pub schema_version: String,
}

impl RecordMeta {
    /// An envelope naming the given generation tag.
    pub fn for_version(tag: &str) -> Self {
        Self {
            schema_version: tag.to_string(),
        }
    }
}
