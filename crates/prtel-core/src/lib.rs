//! # prtel-core — Foundational Types for the pyRevit Telemetry Stack
//!
//! This crate is the bedrock of the telemetry stack. It defines the pieces
//! every other crate agrees on: the schema-version vocabulary, the error
//! hierarchy returned to callers, and the stateless field-format validators
//! that the per-generation rule tables reference.
//!
//! ## Key Design Principles
//!
//! 1. **Errors are values.** Malformed input is reported through
//!    [`TelemetryError`], never through a panic. A bad payload is fatal to
//!    one request, not to the process.
//!
//! 2. **Validators are pure predicates.** Each function in [`validate`]
//!    checks one string against one format rule, with no record context and
//!    no side effects. They are reused across schema generations and are
//!    unit-testable in isolation.
//!
//! 3. **Closed version vocabulary.** [`SchemaVersion`] values are
//!    compiled-in constants. Which generations exist is static data
//!    established at build time, never mutated at runtime.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `prtel-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No I/O; pure synchronous transformations only.

pub mod error;
pub mod validate;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use error::{TelemetryError, Violation, ViolationReason, Violations};
pub use version::SchemaVersion;
