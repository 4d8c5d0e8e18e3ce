//! sqlscope error codes following a structured numbering system
//!
//! Error code ranges:
//! - SQS0001-SQS0049: Parse errors (reported by the grammar parser)
//! - SQS0050-SQS0099: Caller preconditions (statement shape)
//! - SQS0100-SQS0199: Analysis diagnostics (non-fatal)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a parse error (0001-0049)
    pub const fn is_parse_error(&self) -> bool {
        self.0 >= 1 && self.0 < 50
    }

    /// Check if this is a precondition failure (0050-0099)
    pub const fn is_precondition_error(&self) -> bool {
        self.0 >= 50 && self.0 < 100
    }

    /// Check if this is an analysis diagnostic (0100-0199)
    pub const fn is_analysis_diagnostic(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// All codes that have registered information, in numeric order
    pub fn all() -> impl Iterator<Item = (ErrorCode, &'static ErrorInfo)> {
        ERROR_INFO.iter().map(|(code, info)| (ErrorCode(*code), info))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQS{:04}", self.0)
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value
            .strip_prefix("SQS")
            .and_then(|digits| digits.parse::<u16>().ok())
            .map(ErrorCode)
            .ok_or_else(|| format!("invalid error code '{value}'"))
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<BTreeMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();

    // Parse errors (0001-0049)
    map.insert(1, ErrorInfo::new("SQL syntax error"));
    map.insert(2, ErrorInfo::new("SQL tokenizer error"));
    map.insert(3, ErrorInfo::new("Parser recursion limit exceeded")
        .with_help("The statement nests deeper than the parser allows; raise the recursion limit"));

    // Preconditions (0050-0099)
    map.insert(50, ErrorInfo::new("No statement found"));
    map.insert(51, ErrorInfo::new("More than one statement")
        .with_help("Analyze one statement at a time"));
    map.insert(52, ErrorInfo::new("Statement is not a SELECT")
        .with_help("Only plain SELECT statements can be analyzed"));

    // Analysis diagnostics (0100-0199)
    map.insert(100, ErrorInfo::new("Unsupported expression shape"));
    map.insert(101, ErrorInfo::new("Unsupported table reference"));
    map.insert(102, ErrorInfo::new("Unresolved table qualifier")
        .with_help("The qualifier is not bound by any FROM clause visible to this expression"));
    map.insert(103, ErrorInfo::new("Unqualified column")
        .with_help("Qualify the column with its table alias so it can be attributed to a table"));
    map.insert(104, ErrorInfo::new("Unsupported function argument"));
    map.insert(105, ErrorInfo::new("Nesting limit exceeded")
        .with_help("The subtree was skipped; raise max_depth to analyze it"));
    map.insert(106, ErrorInfo::new("Unsupported subquery body"));

    map
});

// Parse errors
pub const SQS0001: ErrorCode = ErrorCode::new(1);
pub const SQS0002: ErrorCode = ErrorCode::new(2);
pub const SQS0003: ErrorCode = ErrorCode::new(3);

// Preconditions
pub const SQS0050: ErrorCode = ErrorCode::new(50);
pub const SQS0051: ErrorCode = ErrorCode::new(51);
pub const SQS0052: ErrorCode = ErrorCode::new(52);

// Analysis diagnostics
pub const SQS0100: ErrorCode = ErrorCode::new(100);
pub const SQS0101: ErrorCode = ErrorCode::new(101);
pub const SQS0102: ErrorCode = ErrorCode::new(102);
pub const SQS0103: ErrorCode = ErrorCode::new(103);
pub const SQS0104: ErrorCode = ErrorCode::new(104);
pub const SQS0105: ErrorCode = ErrorCode::new(105);
pub const SQS0106: ErrorCode = ErrorCode::new(106);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(SQS0001.to_string(), "SQS0001");
        assert_eq!(SQS0102.to_string(), "SQS0102");
    }

    #[test]
    fn test_error_categories() {
        assert!(SQS0001.is_parse_error());
        assert!(!SQS0001.is_precondition_error());

        assert!(SQS0052.is_precondition_error());
        assert!(!SQS0052.is_parse_error());

        assert!(SQS0105.is_analysis_diagnostic());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(SQS0102.info().description, "Unresolved table qualifier");
        assert!(SQS0102.info().help.is_some());
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }

    #[test]
    fn test_all_codes_ordered() {
        let codes: Vec<u16> = ErrorCode::all().map(|(code, _)| code.code()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
        assert!(codes.contains(&105));
    }

    #[test]
    fn test_string_round_trip() {
        assert_eq!(ErrorCode::try_from("SQS0103".to_string()), Ok(SQS0103));
        assert!(ErrorCode::try_from("ERR0103".to_string()).is_err());
    }
}
