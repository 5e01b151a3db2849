//! # Field Validators — Stateless Format Predicates
//!
//! Primitive predicate functions for the atomic formats the record
//! schemas gate fields with. Each validator checks a single string value
//! against one format rule, with no record context and no side effects.
//! The per-generation rule tables in `prtel-records` reference these by
//! name; they are also usable (and tested) on their own.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use uuid::{Uuid, Variant, Version};

/// Host build identifier grammar: 8-digit date, underscore, 4-digit time,
/// parenthesized architecture tag (e.g. `20210309_1515(x64)`).
///
/// Anchored: a build string embedded in surrounding garbage does not pass.
static BUILD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}_\d{4}\(x\d{2}\)$").unwrap());

/// True iff `value` parses as a complete date-time with offset per RFC 3339.
pub fn is_rfc3339(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

/// True iff `value` is a syntactically valid UUID with version nibble 4
/// and RFC 4122 variant bits.
pub fn is_uuid_v4(value: &str) -> bool {
    match Uuid::try_parse(value) {
        Ok(uuid) => {
            uuid.get_version() == Some(Version::Random)
                && uuid.get_variant() == Variant::RFC4122
        }
        Err(_) => false,
    }
}

/// True iff `value` consists solely of decimal digits, optionally with a
/// single leading `+` or `-` sign.
pub fn is_numeric(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// True iff `value` matches the host build identifier grammar.
pub fn is_build_string(value: &str) -> bool {
    BUILD_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- is_rfc3339 ----

    #[test]
    fn test_rfc3339_with_offset_accepted() {
        assert!(is_rfc3339("2023-01-15T12:00:00+00:00"));
        assert!(is_rfc3339("2023-01-15T12:00:00Z"));
        assert!(is_rfc3339("2023-01-15T07:00:00-05:00"));
        assert!(is_rfc3339("2023-01-15T12:00:00.123456Z"));
    }

    #[test]
    fn test_rfc3339_incomplete_rejected() {
        assert!(!is_rfc3339("2023-01-15"));
        assert!(!is_rfc3339("2023-01-15T12:00:00"));
        assert!(!is_rfc3339("12:00:00Z"));
        assert!(!is_rfc3339("not-a-date"));
        assert!(!is_rfc3339(""));
    }

    // ---- is_uuid_v4 ----

    #[test]
    fn test_uuid_v4_accepted() {
        assert!(is_uuid_v4("7f6ff12e-80a3-45a0-9a2f-3f5f7b9a1c2d"));
    }

    #[test]
    fn test_uuid_wrong_version_rejected() {
        // Version nibble 1 (time-based), not 4.
        assert!(!is_uuid_v4("7f6ff12e-80a3-15a0-9a2f-3f5f7b9a1c2d"));
    }

    #[test]
    fn test_uuid_wrong_variant_rejected() {
        // Variant nibble c is Microsoft-reserved, not RFC 4122.
        assert!(!is_uuid_v4("7f6ff12e-80a3-45a0-ca2f-3f5f7b9a1c2d"));
    }

    #[test]
    fn test_uuid_garbage_rejected() {
        assert!(!is_uuid_v4("not-a-uuid"));
        assert!(!is_uuid_v4(""));
    }

    // ---- is_numeric ----

    #[test]
    fn test_numeric_digits_accepted() {
        assert!(is_numeric("2023"));
        assert!(is_numeric("0"));
        assert!(is_numeric("+42"));
        assert!(is_numeric("-42"));
    }

    #[test]
    fn test_numeric_non_digits_rejected() {
        assert!(!is_numeric(""));
        assert!(!is_numeric("+"));
        assert!(!is_numeric("4.2"));
        assert!(!is_numeric("42a"));
        assert!(!is_numeric("2023 "));
        assert!(!is_numeric("--42"));
    }

    // ---- is_build_string ----

    #[test]
    fn test_build_string_accepted() {
        assert!(is_build_string("20210309_1515(x64)"));
        assert!(is_build_string("20230101_1200(x64)"));
        assert!(is_build_string("20190201_0930(x86)"));
    }

    #[test]
    fn test_build_string_rejected() {
        assert!(!is_build_string("2023-01-01"));
        assert!(!is_build_string("20230101_1200"));
        assert!(!is_build_string("20230101_1200(64)"));
        assert!(!is_build_string("20230101_1200(x64) extra"));
        assert!(!is_build_string("v20230101_1200(x64)"));
        assert!(!is_build_string(""));
    }
}
