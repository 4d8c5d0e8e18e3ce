//! Diagnostic sinks
//!
//! Analysis never aborts on a diagnostic. Whoever drives the analysis decides
//! where diagnostics go by handing in a sink.

use crate::{Diagnostic, Severity};

/// Destination for advisory diagnostics
pub trait DiagnosticSink {
    /// Report one diagnostic
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl LogSink {
    /// Log level used for a severity
    pub const fn level(severity: Severity) -> log::Level {
        match severity {
            Severity::Error => log::Level::Error,
            Severity::Warning => log::Level::Warn,
            Severity::Info => log::Level::Info,
            Severity::Hint => log::Level::Debug,
        }
    }
}

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::log!(target: "sqlscope::diagnostics", Self::level(diagnostic.severity), "{diagnostic}");
    }
}

/// Forwards each diagnostic to two sinks
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for Tee<A, B> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.report(diagnostic.clone());
        self.1.report(diagnostic);
    }
}
