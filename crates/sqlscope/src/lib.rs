//! Table and column resolution for SQL SELECT statements
//!
//! This crate ties the sqlscope pieces together:
//! - Parsing one SELECT with a chosen dialect ([`parser`])
//! - Binding FROM-clause aliases and resolving WHERE-clause columns ([`analyzer`])
//! - Structured diagnostics and error codes ([`diagnostics`])
//!
//! # Example
//!
//! ```
//! let analysis = sqlscope::analyze(
//!     "SELECT u.id FROM users u JOIN orders o ON u.id = o.user_id \
//!      WHERE u.age > 30 AND o.amount > 100",
//! )?;
//!
//! assert_eq!(analysis.aliases.get("u"), Some("users"));
//! assert_eq!(analysis.columns.get("amount"), Some("orders"));
//! # Ok::<(), sqlscope::ScopeError>(())
//! ```

// Re-export all public APIs from internal crates
pub use sqlscope_analyzer as analyzer;
pub use sqlscope_diagnostics as diagnostics;
pub use sqlscope_parser as parser;

// Convenience re-exports
pub use sqlscope_analyzer::{
    AliasMap, Analysis, Analyzer, AnalyzerOptions, ColumnBinding, ColumnTableMap,
};
pub use sqlscope_diagnostics::{Diagnostic, Result, ScopeError, Severity};
pub use sqlscope_parser::{ParseOptions, SqlDialect};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;

/// Parse and analyze one SELECT with default options
pub fn analyze(sql: &str) -> Result<Analysis> {
    analyze_with(sql, &ParseOptions::default(), &AnalyzerOptions::default())
}

/// Parse and analyze one SELECT
///
/// Fails only when the text does not parse or is not a single plain
/// SELECT. Everything found during analysis is reported in
/// [`Analysis::diagnostics`].
pub fn analyze_with(
    sql: &str,
    parse: &ParseOptions,
    options: &AnalyzerOptions,
) -> Result<Analysis> {
    let select = sqlscope_parser::parse_select(sql, parse)?;
    log::debug!("analyzing SELECT with {} FROM item(s)", select.from.len());
    Ok(Analyzer::new(*options).analyze(&select))
}
