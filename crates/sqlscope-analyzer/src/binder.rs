//! Table binding
//!
//! Walks a FROM clause and binds each table's effective alias (the written
//! alias, or the table name when there is none) to its canonical name.
//!
//! A `TableWithJoins` is a left-deep join tree: its leading relation is the
//! left subtree and every `JOIN` extends it to the right. Walking the
//! relation first and then each join in order, descending into parenthesized
//! joins as they come, is a depth-first left-to-right traversal. Colliding
//! aliases are overwritten, so the rightmost occurrence wins.

use sqlparser::ast::{TableFactor, TableWithJoins};
use sqlscope_diagnostics::{Diagnostic, DiagnosticSink, SQS0101, SQS0105, SourceLocation};

use crate::maps::AliasMap;
use crate::node::{TableNode, location_of};
use crate::options::AnalyzerOptions;

/// Builds an [`AliasMap`] from FROM clauses
#[derive(Debug, Clone, Copy)]
pub struct TableBinder {
    max_depth: usize,
}

impl TableBinder {
    pub fn new(options: &AnalyzerOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    /// Bind every table reference of a FROM clause into a fresh map
    pub fn bind(&self, from: &[TableWithJoins], sink: &mut dyn DiagnosticSink) -> AliasMap {
        let mut aliases = AliasMap::new();
        self.bind_into(from, &mut aliases, sink, 0);
        aliases
    }

    /// Bind a FROM clause into an existing map, as done for nested SELECTs
    pub fn bind_into(
        &self,
        from: &[TableWithJoins],
        aliases: &mut AliasMap,
        sink: &mut dyn DiagnosticSink,
        depth: usize,
    ) {
        for table in from {
            self.bind_joined(table, aliases, sink, depth);
        }
    }

    fn bind_joined(
        &self,
        table: &TableWithJoins,
        aliases: &mut AliasMap,
        sink: &mut dyn DiagnosticSink,
        depth: usize,
    ) {
        self.bind_factor(&table.relation, aliases, sink, depth);
        for join in &table.joins {
            self.bind_factor(&join.relation, aliases, sink, depth);
        }
    }

    fn bind_factor(
        &self,
        factor: &TableFactor,
        aliases: &mut AliasMap,
        sink: &mut dyn DiagnosticSink,
        depth: usize,
    ) {
        match TableNode::classify(factor) {
            TableNode::Aliased { table, alias } => {
                let name = table.value.as_str();
                let effective = alias
                    .map(|a| a.value.as_str())
                    .filter(|a| !a.is_empty())
                    .unwrap_or(name);

                if let Some(previous) = aliases.insert(effective, name) {
                    log::debug!("alias {effective} rebound from {previous} to {name}");
                } else {
                    log::debug!("bound table alias={effective} name={name}");
                }
            }
            TableNode::Nested(inner) => {
                let depth = depth + 1;
                if depth > self.max_depth {
                    sink.report(nesting_limit("Join", self.max_depth, location_of(factor)));
                    return;
                }
                self.bind_joined(inner, aliases, sink, depth);
            }
            TableNode::Unsupported { shape } => {
                sink.report(
                    Diagnostic::warning(
                        SQS0101,
                        format!("Unsupported table reference ({shape}): {factor}"),
                    )
                    .with_location_opt(location_of(factor)),
                );
            }
        }
    }
}

/// Error reported when a subtree would open level `max_depth + 1`
pub fn nesting_limit(what: &str, max_depth: usize, location: Option<SourceLocation>) -> Diagnostic {
    Diagnostic::error(
        SQS0105,
        format!("{what} nesting deeper than {max_depth} levels was skipped"),
    )
    .with_location_opt(location)
    .with_code_help()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlscope_parser::{ParseOptions, parse_select};

    fn bind(sql: &str) -> (AliasMap, Vec<Diagnostic>) {
        let select = parse_select(sql, &ParseOptions::default()).unwrap();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let aliases = TableBinder::new(&AnalyzerOptions::default()).bind(&select.from, &mut diagnostics);
        (aliases, diagnostics)
    }

    #[test]
    fn test_alias_falls_back_to_table_name() {
        let (aliases, diagnostics) = bind("SELECT 1 FROM users, orders o");
        assert_eq!(aliases.get("users"), Some("users"));
        assert_eq!(aliases.get("o"), Some("orders"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_schema_qualified_table_keeps_name_only() {
        let (aliases, _) = bind("SELECT 1 FROM shop.orders");
        assert_eq!(aliases.get("orders"), Some("orders"));
        assert!(!aliases.contains("shop"));
    }

    #[test]
    fn test_nesting_limit() {
        let select = parse_select(
            "SELECT 1 FROM ((a JOIN b ON a.id = b.id) JOIN c ON b.id = c.id)",
            &ParseOptions::default(),
        )
        .unwrap();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let binder = TableBinder::new(&AnalyzerOptions::default().with_max_depth(1));
        let aliases = binder.bind(&select.from, &mut diagnostics);

        assert!(aliases.contains("c"));
        assert!(!aliases.contains("a"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, SQS0105);
    }

    #[test]
    fn test_nesting_limit_allows_exactly_max_depth_levels() {
        let select = parse_select("SELECT 1 FROM ((a JOIN b ON a.id = b.id))", &ParseOptions::default()).unwrap();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        let aliases = TableBinder::new(&AnalyzerOptions::default().with_max_depth(2))
            .bind(&select.from, &mut diagnostics);
        assert!(aliases.contains("a") && aliases.contains("b"));
        assert!(diagnostics.is_empty());

        let aliases = TableBinder::new(&AnalyzerOptions::default().with_max_depth(1))
            .bind(&select.from, &mut diagnostics);
        assert!(aliases.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("deeper than 1 levels"));
    }
}
