//! # Error Types — Telemetry Request Outcomes
//!
//! Defines the typed outcome surface the core exposes to its callers.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - A payload that names an unregistered schema generation is rejected
//!   before any field is inspected.
//! - A record that fails field validation carries the complete violation
//!   list, so the client can fix every problem in one round trip.
//! - A payload that cannot be decoded at all is a distinct case: no
//!   record instance exists to validate.

use std::fmt;

use thiserror::Error;

/// Top-level error type for telemetry ingestion.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The declared schema version has no registered record schema.
    ///
    /// Field checks are never run for this case; guessing the nearest
    /// known generation is disallowed.
    #[error("unsupported schema version: {version:?}")]
    UnsupportedSchemaVersion {
        /// The version tag the payload declared.
        version: String,
    },

    /// One or more fields violate their declared format or presence rule.
    #[error("field validation failed:\n{violations}")]
    FieldValidationFailed {
        /// The complete list of field-level violations.
        violations: Violations,
    },

    /// The raw payload could not be decoded into the expected shape.
    #[error("malformed payload: {reason}")]
    MalformedPayload {
        /// Decoder diagnostic (wrong type, unparseable structure).
        reason: String,
    },
}

impl TelemetryError {
    /// Construct a `MalformedPayload` from a decoder error.
    pub fn malformed(err: impl fmt::Display) -> Self {
        Self::MalformedPayload {
            reason: err.to_string(),
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    /// The field is required by its schema but carried no value.
    MissingRequired,
    /// The value does not satisfy the field's declared format rule.
    FormatMismatch {
        /// Name of the violated format rule (e.g. `"uuidv4"`).
        expected: &'static str,
    },
    /// The value is not a member of the field's enumerated set.
    UnknownDiscriminator {
        /// The values the field accepts.
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired => write!(f, "non-empty value required"),
            Self::FormatMismatch { expected } => {
                write!(f, "value does not match format {expected}")
            }
            Self::UnknownDiscriminator { allowed } => {
                write!(f, "value is not one of {allowed:?}")
            }
        }
    }
}

/// A single field-level violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field (e.g. `"sessionid"`).
    pub field: &'static str,
    /// Why the field was rejected.
    pub reason: ViolationReason,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.field, self.reason)
    }
}

/// Collection of field-level violations.
///
/// Aggregates every violation found in one validation pass; callers are
/// never forced into a fix-one-resubmit-repeat cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
