//! SELECT statement parsing for sqlscope
//!
//! Tokenizing and parsing SQL text is delegated to `sqlparser`. This crate
//! adds what the caller of the analyzer is responsible for: picking a dialect
//! and checking that the input is exactly one plain `SELECT`. Every failure
//! here is a hard [`ScopeError`](sqlscope_diagnostics::ScopeError).

mod dialect;
mod select;

pub use dialect::SqlDialect;
pub use select::{parse_select, parse_statements, select_from_statement};

use serde::{Deserialize, Serialize};

/// Default recursion limit handed to the grammar parser
pub const DEFAULT_RECURSION_LIMIT: usize = 50;

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// SQL dialect
    pub dialect: SqlDialect,
    /// Maximum nesting depth the grammar parser accepts
    pub recursion_limit: usize,
}

impl ParseOptions {
    /// Create options for a dialect with the default recursion limit
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Set the recursion limit
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(SqlDialect::default())
    }
}
