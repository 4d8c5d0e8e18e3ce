//! sqlscope error and diagnostic types

use crate::{ErrorCode, SourceLocation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - part of the statement could not be analyzed at all
    Error,
    /// Warning - a construct was skipped or a reference could not be resolved
    Warning,
    /// Information - a documented limitation was hit
    Info,
    /// Hint - suggestion for improvement
    Hint,
}

impl Severity {
    /// Numeric rank, higher is more severe
    pub const fn rank(self) -> u8 {
        match self {
            Severity::Error => 3,
            Severity::Warning => 2,
            Severity::Info => 1,
            Severity::Hint => 0,
        }
    }

    /// Check whether this severity is at least as severe as `other`
    pub const fn is_at_least(self, other: Severity) -> bool {
        self.rank() >= other.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// A diagnostic message with location and context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Source location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    /// Additional context or help
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with an explicit severity
    pub fn new(severity: Severity, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Create a new informational diagnostic
    pub fn info(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, message)
    }

    /// Set the location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the location if one is known
    pub fn with_location_opt(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set help text from the code's registered help, if any
    pub fn with_code_help(self) -> Self {
        match self.code.info().help {
            Some(help) => self.with_help(help),
            None => self,
        }
    }

    /// Render for a terminal, coloring the severity
    #[cfg(feature = "colored")]
    pub fn render(&self) -> String {
        use colored::Colorize;

        let severity = match self.severity {
            Severity::Error => self.severity.to_string().red().bold(),
            Severity::Warning => self.severity.to_string().yellow().bold(),
            Severity::Info => self.severity.to_string().blue().bold(),
            Severity::Hint => self.severity.to_string().cyan(),
        };
        let mut out = format!("{}[{}]: {}", severity, self.code, self.message);
        if let Some(loc) = &self.location {
            out.push_str(&format!(" {}", format!("at {loc}").dimmed()));
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("\n  {} {}", "help:".green(), help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

/// Hard failures raised before analysis can start
///
/// The analyzer itself never fails; these come from the grammar parser or
/// from the caller's check that the input is a single SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// The grammar parser rejected the input
    #[error("{code}: {message}")]
    Parse {
        code: ErrorCode,
        message: String,
        location: Option<SourceLocation>,
    },

    /// The input parsed but is not something the analyzer accepts
    #[error("{code}: {message}")]
    Precondition { code: ErrorCode, message: String },
}

impl ScopeError {
    /// Create a parse error
    pub fn parse(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Create a parse error with location
    pub fn parse_at(code: ErrorCode, message: impl Into<String>, location: SourceLocation) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            location: Some(location),
        }
    }

    /// Create a precondition failure
    pub fn precondition(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Precondition {
            code,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. } => *code,
            Self::Precondition { code, .. } => *code,
        }
    }

    /// Get the location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Parse { location, .. } => location.as_ref(),
            Self::Precondition { .. } => None,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Parse {
                code,
                message,
                location,
            } => Diagnostic::error(*code, message.clone())
                .with_location_opt(*location)
                .with_code_help(),
            Self::Precondition { code, message } => {
                Diagnostic::error(*code, message.clone()).with_code_help()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SQS0001, SQS0052, SQS0102};

    #[test]
    fn test_parse_error() {
        let err = ScopeError::parse_at(SQS0001, "Expected an expression", SourceLocation::new(1, 10));

        assert!(matches!(err, ScopeError::Parse { .. }));
        assert_eq!(err.code(), SQS0001);
        assert_eq!(err.location(), Some(&SourceLocation::new(1, 10)));
        assert_eq!(err.to_string(), "SQS0001: Expected an expression");
    }

    #[test]
    fn test_precondition_to_diagnostic() {
        let diag = ScopeError::precondition(SQS0052, "found INSERT").to_diagnostic();

        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, SQS0052);
        assert!(diag.help.is_some());
        assert!(diag.location.is_none());
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning(SQS0102, "Alias 'x' not found in table map")
            .with_location(SourceLocation::new(1, 5));

        assert!(diag.to_string().contains("SQS0102"));
        assert!(diag.to_string().contains("1:5"));
        assert!(diag.to_string().starts_with("warning"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error.is_at_least(Severity::Warning));
        assert!(Severity::Warning.is_at_least(Severity::Warning));
        assert!(!Severity::Info.is_at_least(Severity::Warning));
    }
}
