//! Source location tracking.
//!
//! A [`SourceLocation`] is a point (not a range): a 1-based line, a
//! 0-based column, and the name of the source the byte came from. It is
//! carried by every token and every AST node so that lexical, syntactic,
//! and runtime errors can all report `path:line:column`.

use std::fmt;
use std::rc::Rc;

/// A single point in a named source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column; resets to 0 at the start of each line.
    pub column: u32,
    /// Name of the source (typically the path passed on the CLI).
    pub source_name: Rc<str>,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32, source_name: Rc<str>) -> Self {
        Self {
            line,
            column,
            source_name,
        }
    }

    /// A location at the start of a source, useful for synthetic nodes
    /// that have no corresponding input byte (e.g. an empty program).
    pub fn start_of(source_name: Rc<str>) -> Self {
        Self::new(1, 0, source_name)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source_name, self.line, self.column)
    }
}

/// Ordering by `(line, column)` only, ignoring `source_name`. Used by the
/// lexer's monotonicity property: token locations never decrease.
impl PartialOrd for SourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some((self.line, self.column).cmp(&(other.line, other.column)))
    }
}

impl Ord for SourceLocation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.line, self.column).cmp(&(other.line, other.column))
    }
}
