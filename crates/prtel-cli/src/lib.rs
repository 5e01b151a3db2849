//! # prtel-cli — Command Handlers
//!
//! Argument types and handlers for the `prtel` binary. The binary
//! entry point in `main.rs` parses the command line and dispatches
//! here.

pub mod serve;
