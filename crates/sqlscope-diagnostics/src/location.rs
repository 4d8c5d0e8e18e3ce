//! Source location tracking for diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location with line and column information
///
/// Both coordinates are 1-based, matching what the grammar parser reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Create a location from raw coordinates, where a zero line means
    /// "no location known"
    pub fn known(line: u64, column: u64) -> Option<Self> {
        if line == 0 {
            return None;
        }
        Some(Self::new(
            usize::try_from(line).ok()?,
            usize::try_from(column.max(1)).ok()?,
        ))
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
