//! Tests for FROM clause binding
//!
//! Covers:
//! - Aliased and bare tables
//! - Join trees and their traversal order
//! - Alias collisions
//! - Unsupported table references

use pretty_assertions::assert_eq;
use rstest::rstest;
use sqlscope_analyzer::{AliasMap, AnalyzerOptions, TableBinder};
use sqlscope_diagnostics::{Diagnostic, SQS0101, Severity};
use sqlscope_parser::{ParseOptions, parse_select};

fn bind(sql: &str) -> (AliasMap, Vec<Diagnostic>) {
    let select = parse_select(sql, &ParseOptions::default()).expect("query should parse");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let aliases = TableBinder::new(&AnalyzerOptions::default()).bind(&select.from, &mut diagnostics);
    (aliases, diagnostics)
}

fn entries(aliases: &AliasMap) -> Vec<(&str, &str)> {
    aliases.iter().collect()
}

// === Plain Tables ===

#[test]
fn test_join_binds_both_sides() {
    let (aliases, diagnostics) =
        bind("SELECT u.id FROM users u JOIN orders o ON u.id = o.user_id");

    assert_eq!(entries(&aliases), vec![("u", "users"), ("o", "orders")]);
    assert!(diagnostics.is_empty());
}

#[rstest]
#[case("SELECT 1 FROM a", 1)]
#[case("SELECT 1 FROM a x, b y", 2)]
#[case("SELECT 1 FROM a, b, c", 3)]
#[case("SELECT 1 FROM a AS p, b AS q, c AS r, d AS s", 4)]
fn test_one_entry_per_table(#[case] sql: &str, #[case] expected: usize) {
    let (aliases, _) = bind(sql);
    assert_eq!(aliases.len(), expected);
}

#[test]
fn test_unaliased_tables_bind_to_themselves() {
    let (aliases, _) = bind("SELECT 1 FROM users, orders");
    assert_eq!(entries(&aliases), vec![("users", "users"), ("orders", "orders")]);
}

#[test]
fn test_no_from_clause() {
    let (aliases, diagnostics) = bind("SELECT 1");
    assert!(aliases.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_quoted_names_keep_case() {
    let (aliases, _) = bind("SELECT 1 FROM `Users` AS `U`");
    assert_eq!(aliases.get("U"), Some("Users"));
    assert_eq!(aliases.get("u"), None);
}

// === Join Trees ===

#[test]
fn test_nested_join_order_is_depth_first() {
    let (aliases, _) = bind(
        "SELECT 1 FROM (a JOIN (b JOIN c ON b.id = c.id) ON a.id = b.id) JOIN d ON d.id = a.id",
    );
    assert_eq!(
        entries(&aliases),
        vec![("a", "a"), ("b", "b"), ("c", "c"), ("d", "d")]
    );
}

#[test]
fn test_colliding_alias_rightmost_wins() {
    let (aliases, _) = bind("SELECT 1 FROM a x JOIN b x ON x.id = x.id");
    assert_eq!(entries(&aliases), vec![("x", "b")]);
}

#[test]
fn test_colliding_alias_in_nested_join() {
    let (aliases, _) = bind("SELECT 1 FROM (a x JOIN b y ON x.id = y.id) JOIN c x ON x.id = y.id");
    assert_eq!(entries(&aliases), vec![("x", "c"), ("y", "b")]);
}

#[test]
fn test_comma_and_join_mix() {
    let (aliases, _) = bind("SELECT 1 FROM a, b LEFT JOIN c ON b.id = c.id, d");
    assert_eq!(
        entries(&aliases),
        vec![("a", "a"), ("b", "b"), ("c", "c"), ("d", "d")]
    );
}

// === Unsupported References ===

#[test]
fn test_derived_table_reports_and_continues() {
    let (aliases, diagnostics) =
        bind("SELECT 1 FROM (SELECT id FROM users) d JOIN orders o ON d.id = o.user_id");

    assert_eq!(entries(&aliases), vec![("o", "orders")]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, SQS0101);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(diagnostics[0].message.contains("derived table"));
}
