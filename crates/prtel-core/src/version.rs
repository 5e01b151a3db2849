//! # Schema Version Tags
//!
//! The string tag that identifies which structural/validation generation
//! a telemetry record conforms to. The set of known generations is a
//! closed, compiled-in vocabulary; nothing registers versions at runtime.

use serde::Serialize;

/// Identifies one structural/validation generation of the wire protocol.
///
/// Values are compiled-in constants; the inner tag is the exact string
/// clients put in the `meta.schema` envelope field (for generations that
/// carry an envelope). The legacy script generation predates the envelope
/// and is identified by the envelope's absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaVersion(&'static str);

impl SchemaVersion {
    /// Legacy script generation. No envelope, no field validation.
    pub const V1: SchemaVersion = SchemaVersion("1.0");

    /// Current envelope generation, used by script and event records.
    pub const V2: SchemaVersion = SchemaVersion("2.0");

    /// The exact wire tag for this generation.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tags() {
        assert_eq!(SchemaVersion::V1.as_str(), "1.0");
        assert_eq!(SchemaVersion::V2.as_str(), "2.0");
    }

    #[test]
    fn test_display_matches_wire_tag() {
        assert_eq!(format!("{}", SchemaVersion::V2), "2.0");
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let json = serde_json::to_string(&SchemaVersion::V2).unwrap();
        assert_eq!(json, "\"2.0\"");
    }
}
