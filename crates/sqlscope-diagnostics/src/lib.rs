//! sqlscope diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the
//! sqlscope crates:
//! - structured error codes (`SQS0001`, ...)
//! - advisory [`Diagnostic`]s and the [`DiagnosticSink`] they are reported to
//! - the [`ScopeError`] hard-failure type returned by caller-side precondition checks

mod error;
mod error_code;
mod location;
mod sink;

pub use error::*;
pub use error_code::*;
pub use location::*;
pub use sink::*;

/// Result type for sqlscope operations
pub type Result<T> = std::result::Result<T, ScopeError>;
