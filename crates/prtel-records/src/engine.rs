//! # Validation Engine
//!
//! Walks a record's rule table and aggregates every violation into a
//! single outcome. The engine holds no state and never mutates the
//! record; malformed values are reported, never thrown.

use prtel_core::{TelemetryError, Violation, ViolationReason};

use crate::schema::{FieldRule, Presence, ValidatedRecord};

/// Validate a record against its generation's rule table.
///
/// Iterates all declared fields. A ruled field with no explicit presence
/// marker inherits the table's required-by-default policy; a required
/// field with an empty (or absent) value is a violation, and a populated
/// field that fails its rule is a violation. Explicitly optional rows
/// with no rule are unconstrained and never inspected.
///
/// All violations are collected before returning, so the caller can
/// report every problem at once.
///
/// # Errors
///
/// Returns `TelemetryError::FieldValidationFailed` carrying the complete
/// violation list if any declared field is rejected.
pub fn validate(record: &impl ValidatedRecord) -> Result<(), TelemetryError> {
    let rules = record.rules();
    let mut violations = Vec::new();

    for spec in rules.fields {
        let required = match spec.presence {
            Some(Presence::Required) => true,
            Some(Presence::Optional) => false,
            None => rules.required_by_default,
        };

        let value = record.text_field(spec.field).unwrap_or_default();

        if value.is_empty() {
            // Absence and the zero value are indistinguishable on the
            // wire; both count as "no value".
            if required {
                violations.push(Violation {
                    field: spec.field,
                    reason: ViolationReason::MissingRequired,
                });
            }
            continue;
        }

        let Some(rule) = spec.rule else {
            continue;
        };

        if !rule.check(value) {
            let reason = match rule {
                FieldRule::OneOf(allowed) => {
                    ViolationReason::UnknownDiscriminator { allowed }
                }
                other => ViolationReason::FormatMismatch {
                    expected: other.name(),
                },
            };
            violations.push(Violation {
                field: spec.field,
                reason,
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(TelemetryError::FieldValidationFailed {
            violations: violations.into(),
        })
    }
}
