//! # Rule Tables — Declarative Per-Generation Field Schemas
//!
//! Each record generation declares a static [`RecordRules`] value: a
//! required-by-default policy plus one [`FieldSpec`] row per declared
//! field. Adding a field to a schema means adding a row, not new control
//! flow. Tables are read-only static data, so concurrent validation of
//! different generations cannot race on shared configuration.
//!
//! The requiredness policy lives in the table itself rather than in a
//! process-wide switch: a row with no explicit presence marker inherits
//! the table's `required_by_default`, and an explicitly `Optional` row
//! with no rule is unconstrained: any value, including empty, is
//! accepted. That permissiveness is an inherited policy choice from the
//! legacy generation, not an oversight.

use prtel_core::validate;

/// A format rule a field can be gated by.
///
/// Names one of the stateless predicates in `prtel_core::validate`, or
/// an enumerated discriminator set checked by membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Complete RFC 3339 date-time with offset.
    Rfc3339,
    /// UUID with version nibble 4 and RFC 4122 variant bits.
    UuidV4,
    /// Decimal digits, optionally one leading sign.
    Numeric,
    /// Host build identifier grammar, e.g. `20210309_1515(x64)`.
    BuildString,
    /// Membership in a closed set of discriminator values.
    OneOf(&'static [&'static str]),
}

impl FieldRule {
    /// Apply the rule to a single field value.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Rfc3339 => validate::is_rfc3339(value),
            Self::UuidV4 => validate::is_uuid_v4(value),
            Self::Numeric => validate::is_numeric(value),
            Self::BuildString => validate::is_build_string(value),
            Self::OneOf(allowed) => allowed.contains(&value),
        }
    }

    /// Diagnostic name of the rule, used in violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rfc3339 => "rfc3339",
            Self::UuidV4 => "uuidv4",
            Self::Numeric => "numeric",
            Self::BuildString => "buildstring",
            Self::OneOf(_) => "oneof",
        }
    }
}

/// Explicit presence marker for a field row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The field must carry a non-empty value.
    Required,
    /// The field may be absent or empty.
    Optional,
}

/// One declared field of a record generation.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name of the field; nested fields use dotted paths
    /// (e.g. `meta.schema`).
    pub field: &'static str,
    /// Format rule gating the field, if any. `None` means unconstrained.
    pub rule: Option<FieldRule>,
    /// Explicit presence marker; `None` inherits the table default.
    pub presence: Option<Presence>,
}

impl FieldSpec {
    /// A field gated by a format rule; presence follows the table default.
    pub const fn ruled(field: &'static str, rule: FieldRule) -> Self {
        Self {
            field,
            rule: Some(rule),
            presence: None,
        }
    }

    /// An explicitly exempt field: any value, including empty, is accepted.
    pub const fn exempt(field: &'static str) -> Self {
        Self {
            field,
            rule: None,
            presence: Some(Presence::Optional),
        }
    }
}

/// The complete declarative schema of one record generation.
#[derive(Debug)]
pub struct RecordRules {
    /// Diagnostic name of the generation (e.g. `"script/2.0"`).
    pub name: &'static str,
    /// Presence policy for rows without an explicit marker.
    pub required_by_default: bool,
    /// One row per declared field.
    pub fields: &'static [FieldSpec],
}

/// A record the validation engine can walk.
///
/// Implementors expose their generation's rule table and read access to
/// the string-valued fields the table's ruled rows name. The engine
/// treats an unknown or non-string field as absent.
pub trait ValidatedRecord {
    /// The rule table for this record's generation.
    fn rules(&self) -> &'static RecordRules;

    /// The current value of a declared string field, by wire name.
    fn text_field(&self, field: &str) -> Option<&str>;
}
