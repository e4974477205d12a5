//! Source locations for diagnostics.

use serde::Serialize;

/// Position of a node in the original DSL source.
///
/// Locations are diagnostic payload only: they are carried by every AST node
/// but never participate in structural equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// 1-based line, or -1 when unknown.
    pub line: i32,
    /// 1-based column, or -1 when unknown.
    pub column: i32,
}

impl SourceLocation {
    /// Location of a node with no source correspondence (synthesized IR).
    pub const UNKNOWN: Self = Self { line: -1, column: -1 };

    pub fn new(line: i32, column: i32) -> Self {
        Self { line, column }
    }

    pub fn is_known(&self) -> bool {
        self.line >= 0 && self.column >= 0
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_known() { write!(f, "{}:{}", self.line, self.column) } else { write!(f, "<unknown>") }
    }
}
