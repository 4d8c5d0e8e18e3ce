//! Closed views over the grammar parser's AST
//!
//! `sqlparser` models far more SQL than the analyzer understands. Each node
//! is classified here exactly once into [`TableNode`] or [`FilterNode`], so
//! the binder and resolver can match exhaustively and every construct they
//! do not model arrives as an explicit `Unsupported` case.

use sqlparser::ast::{
    BinaryOperator, Expr, Function, Ident, ObjectName, ObjectNamePart, Query, Select, SetExpr,
    Spanned, TableFactor, TableWithJoins, UnaryOperator,
};
use sqlparser::tokenizer::Span;
use sqlscope_diagnostics::SourceLocation;

/// A table reference in a FROM clause
#[derive(Debug, Clone, Copy)]
pub enum TableNode<'a> {
    /// A named table with an optional alias
    Aliased {
        table: &'a Ident,
        alias: Option<&'a Ident>,
    },
    /// A parenthesized join tree
    Nested(&'a TableWithJoins),
    /// Anything else (derived table, table function, UNNEST, ...)
    Unsupported { shape: &'static str },
}

impl<'a> TableNode<'a> {
    pub fn classify(factor: &'a TableFactor) -> Self {
        match factor {
            TableFactor::Table { name, alias, .. } => match last_identifier(name) {
                Some(table) => TableNode::Aliased {
                    table,
                    alias: alias.as_ref().map(|a| &a.name),
                },
                None => TableNode::Unsupported {
                    shape: "computed table name",
                },
            },
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => TableNode::Nested(table_with_joins),
            TableFactor::Derived { .. } => TableNode::Unsupported {
                shape: "derived table",
            },
            TableFactor::TableFunction { .. } | TableFactor::Function { .. } => {
                TableNode::Unsupported {
                    shape: "table function",
                }
            }
            TableFactor::UNNEST { .. } => TableNode::Unsupported { shape: "UNNEST" },
            TableFactor::Pivot { .. } => TableNode::Unsupported { shape: "PIVOT" },
            TableFactor::Unpivot { .. } => TableNode::Unsupported { shape: "UNPIVOT" },
            _ => TableNode::Unsupported {
                shape: "table factor",
            },
        }
    }
}

/// Table part of a possibly schema-qualified object name
fn last_identifier(name: &ObjectName) -> Option<&Ident> {
    match name.0.last()? {
        ObjectNamePart::Identifier(ident) => Some(ident),
        _ => None,
    }
}

/// A column reference, `qualifier.name` or bare `name`
#[derive(Debug, Clone, Copy)]
pub struct ColumnRef<'a> {
    /// Table alias as written; `None` for an unqualified column
    pub qualifier: Option<&'a Ident>,
    pub name: &'a Ident,
}

impl ColumnRef<'_> {
    /// Qualifier text, treating an empty qualifier as absent
    pub fn qualifier_text(&self) -> Option<&str> {
        self.qualifier
            .map(|q| q.value.as_str())
            .filter(|q| !q.is_empty())
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Expr(&'a Expr),
    /// `IN (a, b, ...)`
    List(&'a [Expr]),
    /// `IN (SELECT ...)`
    Subquery(&'a Query),
}

/// A node of a boolean filter expression
#[derive(Debug, Clone, Copy)]
pub enum FilterNode<'a> {
    And(&'a Expr, &'a Expr),
    Or(&'a Expr, &'a Expr),
    Comparison {
        left: &'a Expr,
        right: Operand<'a>,
    },
    /// `expr BETWEEN low AND high`
    Range {
        expr: &'a Expr,
        low: &'a Expr,
        high: &'a Expr,
    },
    /// `IS [NOT] NULL`, `IS [NOT] TRUE`, ...
    Is(&'a Expr),
    Not(&'a Expr),
    Parenthesized(&'a Expr),
    Column(ColumnRef<'a>),
    Literal(&'a Expr),
    /// Scalar subquery
    Subquery(&'a Query),
    Exists {
        subquery: &'a Query,
        negated: bool,
    },
    Function(&'a Function),
    Unsupported { shape: &'static str },
}

impl<'a> FilterNode<'a> {
    pub fn classify(expr: &'a Expr) -> Self {
        match expr {
            Expr::BinaryOp { left, op, right } => match op {
                BinaryOperator::And => FilterNode::And(left, right),
                BinaryOperator::Or => FilterNode::Or(left, right),
                op if is_comparison(op) => FilterNode::Comparison {
                    left,
                    right: Operand::Expr(right),
                },
                op => FilterNode::Unsupported {
                    shape: binary_shape(op),
                },
            },
            Expr::Like { expr, pattern, .. }
            | Expr::ILike { expr, pattern, .. }
            | Expr::SimilarTo { expr, pattern, .. }
            | Expr::RLike { expr, pattern, .. } => FilterNode::Comparison {
                left: expr,
                right: Operand::Expr(pattern),
            },
            Expr::IsDistinctFrom(left, right) | Expr::IsNotDistinctFrom(left, right) => {
                FilterNode::Comparison {
                    left,
                    right: Operand::Expr(right),
                }
            }
            Expr::InList { expr, list, .. } => FilterNode::Comparison {
                left: expr,
                right: Operand::List(list),
            },
            Expr::InSubquery { expr, subquery, .. } => FilterNode::Comparison {
                left: expr,
                right: Operand::Subquery(subquery),
            },
            Expr::Between {
                expr, low, high, ..
            } => FilterNode::Range { expr, low, high },
            Expr::IsNull(inner)
            | Expr::IsNotNull(inner)
            | Expr::IsTrue(inner)
            | Expr::IsNotTrue(inner)
            | Expr::IsFalse(inner)
            | Expr::IsNotFalse(inner)
            | Expr::IsUnknown(inner)
            | Expr::IsNotUnknown(inner) => FilterNode::Is(inner),
            Expr::UnaryOp {
                op: UnaryOperator::Not,
                expr,
            } => FilterNode::Not(expr),
            Expr::Nested(inner) => FilterNode::Parenthesized(inner),
            Expr::Identifier(name) => FilterNode::Column(ColumnRef {
                qualifier: None,
                name,
            }),
            Expr::CompoundIdentifier(parts) => match parts.as_slice() {
                [table, name] | [_, table, name] => FilterNode::Column(ColumnRef {
                    qualifier: Some(table),
                    name,
                }),
                _ => FilterNode::Unsupported {
                    shape: "multi-part identifier",
                },
            },
            Expr::Value(_) => FilterNode::Literal(expr),
            Expr::Subquery(query) => FilterNode::Subquery(query),
            Expr::Exists { subquery, negated } => FilterNode::Exists {
                subquery,
                negated: *negated,
            },
            Expr::Function(function) => FilterNode::Function(function),
            other => FilterNode::Unsupported {
                shape: expr_shape(other),
            },
        }
    }
}

fn is_comparison(op: &BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::LtEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq
            | BinaryOperator::Spaceship
    )
}

fn binary_shape(op: &BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Plus
        | BinaryOperator::Minus
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Modulo => "arithmetic expression",
        BinaryOperator::StringConcat => "string concatenation",
        BinaryOperator::Xor => "XOR expression",
        _ => "binary operator",
    }
}

fn expr_shape(expr: &Expr) -> &'static str {
    match expr {
        Expr::UnaryOp { .. } => "unary operator",
        Expr::Case { .. } => "CASE expression",
        Expr::Cast { .. } => "CAST expression",
        Expr::Extract { .. } => "EXTRACT expression",
        Expr::Interval { .. } => "INTERVAL literal",
        Expr::Tuple { .. } => "tuple",
        Expr::Array { .. } => "array",
        Expr::TypedString { .. } => "typed string literal",
        Expr::AnyOp { .. } | Expr::AllOp { .. } => "ANY/ALL comparison",
        Expr::InUnnest { .. } => "IN UNNEST",
        Expr::CompoundFieldAccess { .. } => "field access",
        Expr::Collate { .. } => "COLLATE expression",
        Expr::Wildcard { .. } | Expr::QualifiedWildcard { .. } => "wildcard",
        _ => "expression",
    }
}

/// Body of a subquery, if it is a plain SELECT
///
/// Parenthesized bodies are unwrapped; set operations and `VALUES` are not
/// SELECTs.
pub fn select_body(query: &Query) -> Result<&Select, &'static str> {
    let mut body = query.body.as_ref();
    loop {
        match body {
            SetExpr::Select(select) => return Ok(select),
            SetExpr::Query(inner) => body = inner.body.as_ref(),
            SetExpr::SetOperation { .. } => return Err("set operation"),
            SetExpr::Values(_) => return Err("VALUES"),
            _ => return Err("non-SELECT query body"),
        }
    }
}

/// Source location of an AST node, when the grammar parser recorded one
pub fn location_of(node: &impl Spanned) -> Option<SourceLocation> {
    location_of_span(node.span())
}

pub fn location_of_span(span: Span) -> Option<SourceLocation> {
    SourceLocation::known(span.start.line, span.start.column)
}
