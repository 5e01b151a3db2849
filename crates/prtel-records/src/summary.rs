//! Deterministic rendering helpers for audit summary lines.
//!
//! Summaries are diagnostics, never parsed back; the only hard
//! requirement is that repeated calls on the same record produce
//! byte-identical output, which the `BTreeMap`-backed record maps
//! guarantee for free.

use std::collections::BTreeMap;

use serde_json::Value;

/// Render a string-valued result map as a single `{k=v, ...}` token.
pub(crate) fn format_str_map(map: &BTreeMap<String, String>) -> String {
    join_entries(map.iter().map(|(k, v)| (k.as_str(), v.clone())))
}

/// Render a JSON-valued result/argument map as a single `{k=v, ...}` token.
///
/// String values render bare; everything else renders as compact JSON.
pub(crate) fn format_value_map(map: &BTreeMap<String, Value>) -> String {
    join_entries(map.iter().map(|(k, v)| {
        let rendered = match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        (k.as_str(), rendered)
    }))
}

fn join_entries<'a>(entries: impl Iterator<Item = (&'a str, String)>) -> String {
    let joined = entries
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{joined}}}")
}
