//! Diagnostics for best-effort traversal
//!
//! Failures that do not abort a computation are emitted as structured
//! [`Diagnostic`] events to an injectable [`DiagnosticSink`]. The engine
//! itself never writes to the console.

mod sink;

pub use sink::*;
