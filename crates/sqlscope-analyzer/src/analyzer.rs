//! One-statement analysis driver

use serde::{Deserialize, Serialize};
use sqlparser::ast::{Expr, Select, SelectItem};
use sqlscope_diagnostics::{Diagnostic, DiagnosticSink, Severity};

use crate::binder::TableBinder;
use crate::maps::{AliasMap, ColumnTableMap};
use crate::options::AnalyzerOptions;
use crate::resolver::PredicateResolver;

/// Maps built for one SELECT
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub aliases: AliasMap,
    pub columns: ColumnTableMap,
}

/// Maps and diagnostics of one analyzed SELECT
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub aliases: AliasMap,
    pub columns: ColumnTableMap,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// Check whether any diagnostic is at least as severe as `severity`
    pub fn has_diagnostics_at(&self, severity: Severity) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity.is_at_least(severity))
    }
}

/// Binds the FROM clause and resolves the WHERE clause of a SELECT
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    options: AnalyzerOptions,
    binder: TableBinder,
    resolver: PredicateResolver,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            options,
            binder: TableBinder::new(&options),
            resolver: PredicateResolver::new(&options),
        }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Build fresh maps for `select`, reporting diagnostics to `sink`
    pub fn resolve_select(&self, select: &Select, sink: &mut dyn DiagnosticSink) -> Resolution {
        let mut aliases = self.binder.bind(&select.from, sink);
        let mut columns = self
            .resolver
            .resolve(select.selection.as_ref(), &mut aliases, sink);

        if self.options.scan_projection_subqueries {
            for item in &select.projection {
                let expr = match item {
                    SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => expr,
                    _ => continue,
                };
                if let Expr::Subquery(query) = expr {
                    self.resolver
                        .resolve_subquery(query, &mut aliases, &mut columns, sink);
                }
            }
        }

        Resolution { aliases, columns }
    }

    /// Analyze `select`, collecting its diagnostics
    pub fn analyze(&self, select: &Select) -> Analysis {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let Resolution { aliases, columns } = self.resolve_select(select, &mut diagnostics);
        Analysis {
            aliases,
            columns,
            diagnostics,
        }
    }
}
