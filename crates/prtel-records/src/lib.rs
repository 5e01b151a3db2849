//! # prtel-records — Versioned Telemetry Record Schemas
//!
//! The schema versioning and validation core of the pyRevit telemetry
//! stack. Defines the record shape of every wire-protocol generation,
//! the declarative rule tables that gate their fields, the engine that
//! applies those tables, the audit summary formatter, and the dispatcher
//! that resolves a raw payload to its generation.
//!
//! ## Generations
//!
//! - `script/1.0` — legacy script-invocation records. No `meta` envelope;
//!   its absence is the discriminant. Validation is permissive by design,
//!   preserved for backward compatibility with historical data.
//! - `script/2.0` — script-invocation records with the `meta` envelope,
//!   an RFC 3339 timestamp, and format rules on the identity fields.
//! - `event/2.0` — host-application lifecycle events, introduced with the
//!   2.0 protocol. The only event generation defined so far.
//!
//! V1 and V2 shapes are distinct types, not a superset/subset: the trace
//! sub-structure changed incompatibly between generations, and modeling
//! them as tagged variants keeps each generation's invariants off the
//! other's data.
//!
//! ## Data Flow
//!
//! raw payload → [`dispatch`] resolves the generation → serde decodes the
//! versioned shape → [`engine`] applies the generation's rule table →
//! accepted records are summarized for the audit log and handed, still
//! immutable, to the storage collaborator.
//!
//! ## Crate Policy
//!
//! - Pure synchronous transformations; no I/O, no shared mutable state.
//!   Safe to call concurrently from many request workers with no locking.
//! - Wire keys are normative and identical across the transport and
//!   document encodings; both are driven by the same serde renames.
//! - Malformed input is reported as a value, never as a panic.

pub mod dispatch;
pub mod engine;
pub mod event;
pub mod meta;
pub mod schema;
pub mod script_v1;
pub mod script_v2;

mod summary;

// Re-export primary types for ergonomic imports.
pub use dispatch::{parse_event, parse_script, ScriptRecord};
pub use event::EventTelemetryRecordV2;
pub use meta::RecordMeta;
pub use script_v1::{EngineInfoV1, ScriptTelemetryRecordV1, TraceInfoV1};
pub use script_v2::{EngineInfoV2, ScriptTelemetryRecordV2, TraceInfoV2};
