//! Alias and column maps produced by the analyzer
//!
//! Both maps keep insertion order so output is stable across runs. Neither
//! ever removes an entry: inserting an existing key overwrites its value in
//! place, so the last writer wins while the key keeps its first position.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Alias (or bare table name) to canonical table name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap(IndexMap<String, String>);

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `alias` to `table`, returning the table it was bound to before
    pub fn insert(&mut self, alias: impl Into<String>, table: impl Into<String>) -> Option<String> {
        self.0.insert(alias.into(), table.into())
    }

    /// Canonical table name bound to `alias`
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.0.get(alias).map(String::as_str)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.0.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in binding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether `table` is the canonical name behind any alias
    pub fn binds_table(&self, table: &str) -> bool {
        self.0.values().any(|t| t == table)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Column name to canonical table name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTableMap(IndexMap<String, String>);

impl ColumnTableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute `column` to `table`, returning the previous attribution
    pub fn insert(&mut self, column: impl Into<String>, table: impl Into<String>) -> Option<String> {
        self.0.insert(column.into(), table.into())
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in resolution order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The map as an ordered list of `{column, table}` pairs
    pub fn bindings(&self) -> Vec<ColumnBinding> {
        self.0
            .iter()
            .map(|(column, table)| ColumnBinding {
                column: column.clone(),
                table: table.clone(),
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColumnTableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One resolved column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnBinding {
    pub column: String,
    pub table: String,
}
