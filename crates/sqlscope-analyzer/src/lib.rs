//! Table binding and column resolution for parsed SELECT statements
//!
//! Given a SELECT parsed by `sqlparser`, this crate works out which base
//! table each column referenced in the WHERE clause belongs to:
//!
//! - the [`TableBinder`] walks the FROM clause, including nested joins, and
//!   produces an [`AliasMap`] from alias (or bare table name) to canonical
//!   table name;
//! - the [`PredicateResolver`] walks the WHERE clause and produces a
//!   [`ColumnTableMap`] from column name to canonical table name, binding
//!   and resolving nested SELECTs into the same maps.
//!
//! Nothing here fails. Constructs outside the modeled set, unknown aliases
//! and unqualified columns are reported to a
//! [`DiagnosticSink`](sqlscope_diagnostics::DiagnosticSink) and skipped.
//!
//! # Example
//!
//! ```
//! use sqlscope_analyzer::Analyzer;
//! use sqlscope_parser::{ParseOptions, parse_select};
//!
//! let sql = "SELECT u.id FROM users u JOIN orders o ON u.id = o.user_id \
//!            WHERE u.age > 30 AND o.amount > 100";
//! let select = parse_select(sql, &ParseOptions::default()).unwrap();
//! let analysis = Analyzer::default().analyze(&select);
//!
//! assert_eq!(analysis.aliases.get("o"), Some("orders"));
//! assert_eq!(analysis.columns.get("age"), Some("users"));
//! ```

mod analyzer;
mod binder;
mod maps;
pub mod node;
mod options;
mod resolver;

pub use analyzer::{Analysis, Analyzer, Resolution};
pub use binder::TableBinder;
pub use maps::{AliasMap, ColumnBinding, ColumnTableMap};
pub use options::{AnalyzerOptions, DEFAULT_MAX_DEPTH};
pub use resolver::PredicateResolver;

use sqlparser::ast::{Expr, TableWithJoins};
use sqlscope_diagnostics::DiagnosticSink;

/// Bind a FROM clause with default options
pub fn bind_tables(from: &[TableWithJoins], sink: &mut dyn DiagnosticSink) -> AliasMap {
    TableBinder::new(&AnalyzerOptions::default()).bind(from, sink)
}

/// Resolve a WHERE clause against `aliases` with default options
pub fn resolve_predicate(
    filter: Option<&Expr>,
    aliases: &mut AliasMap,
    sink: &mut dyn DiagnosticSink,
) -> ColumnTableMap {
    PredicateResolver::new(&AnalyzerOptions::default()).resolve(filter, aliases, sink)
}
