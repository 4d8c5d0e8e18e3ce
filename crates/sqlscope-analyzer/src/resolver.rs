//! Predicate resolution
//!
//! Walks a WHERE clause and attributes every qualified column reference to
//! the canonical table behind its qualifier.
//!
//! Nested SELECTs (scalar subqueries, `EXISTS` and `IN (SELECT ...)`) are
//! bound and resolved into the same alias and column maps as the enclosing
//! statement. Outer and inner scopes therefore see each other's bindings,
//! which is what makes a correlated filter such as `r.user_id = u.id`
//! resolvable inside the subquery.

use sqlparser::ast::{Expr, Function, FunctionArg, FunctionArgExpr, FunctionArguments, Query};
use sqlscope_diagnostics::{
    Diagnostic, DiagnosticSink, SQS0100, SQS0102, SQS0103, SQS0104, SQS0106,
};

use crate::binder::{TableBinder, nesting_limit};
use crate::maps::{AliasMap, ColumnTableMap};
use crate::node::{ColumnRef, FilterNode, Operand, location_of, select_body};
use crate::options::AnalyzerOptions;

/// Builds a [`ColumnTableMap`] from filter expressions
#[derive(Debug, Clone, Copy)]
pub struct PredicateResolver {
    binder: TableBinder,
    max_depth: usize,
}

/// Maps and sink threaded through one walk
struct Scope<'a> {
    aliases: &'a mut AliasMap,
    columns: &'a mut ColumnTableMap,
    sink: &'a mut dyn DiagnosticSink,
}

impl PredicateResolver {
    pub fn new(options: &AnalyzerOptions) -> Self {
        Self {
            binder: TableBinder::new(options),
            max_depth: options.max_depth,
        }
    }

    /// Resolve `filter` into a fresh column map
    ///
    /// `aliases` grows with the bindings of any nested SELECT. An absent
    /// filter yields an empty map without touching `aliases`.
    pub fn resolve(
        &self,
        filter: Option<&Expr>,
        aliases: &mut AliasMap,
        sink: &mut dyn DiagnosticSink,
    ) -> ColumnTableMap {
        let mut columns = ColumnTableMap::new();
        if let Some(filter) = filter {
            self.resolve_into(filter, aliases, &mut columns, sink);
        }
        columns
    }

    /// Resolve `filter` into existing maps
    pub fn resolve_into(
        &self,
        filter: &Expr,
        aliases: &mut AliasMap,
        columns: &mut ColumnTableMap,
        sink: &mut dyn DiagnosticSink,
    ) {
        let mut scope = Scope {
            aliases,
            columns,
            sink,
        };
        self.walk(filter, &mut scope, 0);
    }

    /// Bind a nested SELECT's FROM clause and resolve its WHERE clause into
    /// existing maps
    pub fn resolve_subquery(
        &self,
        query: &Query,
        aliases: &mut AliasMap,
        columns: &mut ColumnTableMap,
        sink: &mut dyn DiagnosticSink,
    ) {
        let mut scope = Scope {
            aliases,
            columns,
            sink,
        };
        self.subquery(query, &mut scope, 1);
    }

    /// Walk one filter node at `depth` levels of grouping
    ///
    /// Only parentheses, `NOT`, function calls and subqueries open a new
    /// level. Connective chains and comparison operands stay at the level of
    /// the node that holds them, so clause length is never mistaken for
    /// nesting.
    fn walk(&self, expr: &Expr, scope: &mut Scope<'_>, depth: usize) {
        if depth > self.max_depth {
            scope
                .sink
                .report(nesting_limit("Expression", self.max_depth, location_of(expr)));
            return;
        }

        match FilterNode::classify(expr) {
            FilterNode::And(..) | FilterNode::Or(..) => self.connectives(expr, scope, depth),
            FilterNode::Comparison { left, right } => {
                self.walk(left, scope, depth);
                match right {
                    Operand::Expr(right) => self.walk(right, scope, depth),
                    Operand::List(items) => {
                        for item in items {
                            self.walk(item, scope, depth);
                        }
                    }
                    Operand::Subquery(query) => self.subquery(query, scope, depth + 1),
                }
            }
            FilterNode::Range { expr, low, high } => {
                self.walk(expr, scope, depth);
                self.walk(low, scope, depth);
                self.walk(high, scope, depth);
            }
            FilterNode::Is(inner) => self.walk(inner, scope, depth),
            FilterNode::Not(inner) | FilterNode::Parenthesized(inner) => {
                self.walk(inner, scope, depth + 1);
            }
            FilterNode::Column(column) => self.column(column, expr, scope),
            FilterNode::Literal(value) => log::trace!("literal {value} skipped"),
            FilterNode::Subquery(query) => self.subquery(query, scope, depth + 1),
            FilterNode::Exists { subquery, negated } => {
                log::trace!("entering {}EXISTS subquery", if negated { "NOT " } else { "" });
                self.subquery(subquery, scope, depth + 1);
            }
            FilterNode::Function(function) => self.function(function, expr, scope, depth),
            FilterNode::Unsupported { shape } => scope.sink.report(
                Diagnostic::warning(SQS0100, format!("Unsupported expression ({shape}): {expr}"))
                    .with_location_opt(location_of(expr)),
            ),
        }
    }

    /// Walk an unparenthesized run of `AND`/`OR` operands left to right
    fn connectives(&self, expr: &Expr, scope: &mut Scope<'_>, depth: usize) {
        let mut pending = vec![expr];
        while let Some(next) = pending.pop() {
            match FilterNode::classify(next) {
                FilterNode::And(left, right) | FilterNode::Or(left, right) => {
                    pending.push(right);
                    pending.push(left);
                }
                _ => self.walk(next, scope, depth),
            }
        }
    }

    fn column(&self, column: ColumnRef<'_>, expr: &Expr, scope: &mut Scope<'_>) {
        let name = column.name.value.as_str();
        let Some(qualifier) = column.qualifier_text() else {
            scope.sink.report(
                Diagnostic::info(
                    SQS0103,
                    format!("Unqualified column {name} was not attributed to a table"),
                )
                .with_location_opt(location_of(expr))
                .with_code_help(),
            );
            return;
        };

        let Some(table) = scope.aliases.get(qualifier) else {
            scope.sink.report(
                Diagnostic::warning(
                    SQS0102,
                    format!("Unknown table alias {qualifier} in {expr}"),
                )
                .with_location_opt(location_of(expr))
                .with_code_help(),
            );
            return;
        };

        let table = table.to_owned();
        log::debug!("resolved column {name} -> {table}");
        match scope.columns.insert(name, table.as_str()) {
            Some(previous) if previous != table => {
                log::debug!("column {name} reattributed from {previous} to {table}");
            }
            _ => {}
        }
    }

    fn function(&self, function: &Function, expr: &Expr, scope: &mut Scope<'_>, depth: usize) {
        let list = match &function.args {
            FunctionArguments::None => return,
            FunctionArguments::Subquery(_) => {
                scope.sink.report(
                    Diagnostic::warning(
                        SQS0104,
                        format!("Unsupported subquery argument to {}", function.name),
                    )
                    .with_location_opt(location_of(expr)),
                );
                return;
            }
            FunctionArguments::List(list) => list,
        };

        for arg in &list.args {
            match arg {
                FunctionArg::Unnamed(FunctionArgExpr::Expr(arg)) => {
                    self.walk(arg, scope, depth + 1);
                }
                other => scope.sink.report(
                    Diagnostic::warning(
                        SQS0104,
                        format!("Unsupported argument {other} to {}", function.name),
                    )
                    .with_location_opt(location_of(expr)),
                ),
            }
        }
    }

    fn subquery(&self, query: &Query, scope: &mut Scope<'_>, depth: usize) {
        if depth > self.max_depth {
            scope
                .sink
                .report(nesting_limit("Subquery", self.max_depth, location_of(query)));
            return;
        }

        let select = match select_body(query) {
            Ok(select) => select,
            Err(shape) => {
                scope.sink.report(
                    Diagnostic::warning(
                        SQS0106,
                        format!("Unsupported subquery body ({shape}): {query}"),
                    )
                    .with_location_opt(location_of(query))
                    .with_code_help(),
                );
                return;
            }
        };

        self.binder
            .bind_into(&select.from, scope.aliases, scope.sink, depth);
        if let Some(selection) = &select.selection {
            self.walk(selection, scope, depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlscope_diagnostics::Severity;
    use sqlscope_parser::{ParseOptions, parse_select};

    fn resolve(sql: &str, options: AnalyzerOptions) -> (AliasMap, ColumnTableMap, Vec<Diagnostic>) {
        let select = parse_select(sql, &ParseOptions::default()).unwrap();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut aliases = TableBinder::new(&options).bind(&select.from, &mut diagnostics);
        let columns = PredicateResolver::new(&options).resolve(
            select.selection.as_ref(),
            &mut aliases,
            &mut diagnostics,
        );
        (aliases, columns, diagnostics)
    }

    #[test]
    fn test_absent_filter_is_empty() {
        let (aliases, columns, diagnostics) = resolve("SELECT 1 FROM users u", AnalyzerOptions::default());
        assert!(columns.is_empty());
        assert_eq!(aliases.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unqualified_column_reports_info() {
        let (_, columns, diagnostics) =
            resolve("SELECT 1 FROM orders WHERE amount > 100", AnalyzerOptions::default());
        assert!(!columns.contains("amount"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, SQS0103);
        assert_eq!(diagnostics[0].severity, Severity::Info);
    }

    #[test]
    fn test_long_conjunction_is_not_nesting() {
        let filter = (0..200)
            .map(|i| format!("t.c{i} = {i}"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let (_, columns, diagnostics) = resolve(
            &format!("SELECT 1 FROM things t WHERE {filter}"),
            AnalyzerOptions::default().with_max_depth(1),
        );
        assert_eq!(columns.len(), 200);
        assert_eq!(columns.iter().next(), Some(("c0", "things")));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_expression_depth_limit() {
        let options = AnalyzerOptions::default().with_max_depth(2);
        let (_, columns, diagnostics) = resolve(
            "SELECT 1 FROM t WHERE t.a = 1 AND (((t.b = 2)))",
            options,
        );
        assert_eq!(columns.get("a"), Some("t"));
        assert!(!columns.contains("b"));
        assert!(diagnostics.iter().any(|d| d.code == sqlscope_diagnostics::SQS0105));
    }

    #[test]
    fn test_resolve_subquery_merges_bindings() {
        let select = parse_select(
            "SELECT 1 FROM users u WHERE EXISTS (SELECT 1 FROM reviews r WHERE r.rating > 4)",
            &ParseOptions::default(),
        )
        .unwrap();
        let Some(Expr::Exists { subquery, .. }) = &select.selection else {
            panic!("expected EXISTS");
        };

        let mut aliases: AliasMap = [("u", "users")].into_iter().collect();
        let mut columns = ColumnTableMap::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        PredicateResolver::new(&AnalyzerOptions::default()).resolve_subquery(
            subquery,
            &mut aliases,
            &mut columns,
            &mut diagnostics,
        );

        assert_eq!(aliases.get("r"), Some("reviews"));
        assert_eq!(aliases.get("u"), Some("users"));
        assert_eq!(columns.get("rating"), Some("reviews"));
    }
}
