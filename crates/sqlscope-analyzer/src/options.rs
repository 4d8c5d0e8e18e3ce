//! Analyzer configuration

use serde::{Deserialize, Serialize};

/// Default nesting limit for joins and expressions
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling one analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Deepest join or expression nesting that is walked; deeper subtrees
    /// are skipped with an error diagnostic
    pub max_depth: usize,
    /// Also bind and resolve scalar subqueries that appear directly in the
    /// SELECT list
    pub scan_projection_subqueries: bool,
}

impl AnalyzerOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable scanning of projection subqueries
    pub fn with_projection_subqueries(mut self, enabled: bool) -> Self {
        self.scan_projection_subqueries = enabled;
        self
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            scan_projection_subqueries: false,
        }
    }
}
