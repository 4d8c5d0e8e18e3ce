//! SELECT extraction and precondition checks

use crate::ParseOptions;
use regex::Regex;
use sqlparser::ast::{Select, SetExpr, Statement};
use sqlparser::parser::{Parser, ParserError};
use sqlscope_diagnostics::{
    ErrorCode, Result, SQS0001, SQS0002, SQS0003, SQS0050, SQS0051, SQS0052, ScopeError,
    SourceLocation,
};
use std::sync::LazyLock;

/// Matches the location suffix the grammar parser appends to its messages
static LOCATION_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*at Line: (\d+), Column: (\d+)\s*$").ok());

/// Parse SQL text into statements, mapping grammar failures to [`ScopeError::Parse`]
pub fn parse_statements(sql: &str, options: &ParseOptions) -> Result<Vec<Statement>> {
    let dialect = options.dialect.to_dialect();
    log::debug!("parsing {} bytes as {}", sql.len(), options.dialect);

    Parser::new(&*dialect)
        .with_recursion_limit(options.recursion_limit)
        .try_with_sql(sql)
        .and_then(|mut parser| parser.parse_statements())
        .map_err(parse_error)
}

/// Parse SQL text that must contain exactly one plain `SELECT`
///
/// Trailing semicolons are allowed; a second statement is not.
pub fn parse_select(sql: &str, options: &ParseOptions) -> Result<Select> {
    let mut statements = parse_statements(sql, options)?;
    match statements.len() {
        0 => Err(ScopeError::precondition(SQS0050, "Input contains no SQL statement")),
        1 => select_from_statement(statements.remove(0)),
        n => Err(ScopeError::precondition(
            SQS0051,
            format!("Expected a single statement, found {n}"),
        )),
    }
}

/// Take the `SELECT` out of a parsed statement
///
/// Parenthesized queries are unwrapped. Set operations, `VALUES` and every
/// non-query statement fail the precondition.
pub fn select_from_statement(statement: Statement) -> Result<Select> {
    let query = match statement {
        Statement::Query(query) => query,
        other => return Err(not_a_select(statement_kind(&other))),
    };

    select_from_body(*query.body)
}

fn select_from_body(body: SetExpr) -> Result<Select> {
    match body {
        SetExpr::Select(select) => Ok(*select),
        SetExpr::Query(inner) => select_from_body(*inner.body),
        SetExpr::SetOperation { op, .. } => Err(not_a_select(op.to_string())),
        SetExpr::Values(_) => Err(not_a_select("VALUES".to_string())),
        other => Err(not_a_select(leading_keyword(&other.to_string()))),
    }
}

fn not_a_select(found: String) -> ScopeError {
    ScopeError::precondition(SQS0052, format!("Not a SELECT statement (found {found})"))
}

/// Leading keyword of a statement, used to name what was found instead of a SELECT
fn statement_kind(statement: &Statement) -> String {
    leading_keyword(&statement.to_string())
}

fn leading_keyword(text: &str) -> String {
    text.split_whitespace()
        .next()
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| "empty statement".to_string())
}

fn parse_error(err: ParserError) -> ScopeError {
    match err {
        ParserError::RecursionLimitExceeded => {
            ScopeError::parse(SQS0003, "Statement nests deeper than the parser recursion limit")
        }
        ParserError::TokenizerError(message) => located(SQS0002, &message),
        ParserError::ParserError(message) => located(SQS0001, &message),
    }
}

fn located(code: ErrorCode, message: &str) -> ScopeError {
    let Some(regex) = LOCATION_SUFFIX.as_ref() else {
        return ScopeError::parse(code, message);
    };
    let Some(captures) = regex.captures(message) else {
        return ScopeError::parse(code, message);
    };

    let line = captures[1].parse::<u64>().unwrap_or(0);
    let column = captures[2].parse::<u64>().unwrap_or(0);
    let text = message[..captures.get(0).map_or(message.len(), |m| m.start())].to_string();
    match SourceLocation::known(line, column) {
        Some(location) => ScopeError::parse_at(code, text, location),
        None => ScopeError::parse(code, text),
    }
}
