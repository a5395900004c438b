//! Source locations.

use std::fmt;
use std::ops::Range;

use tree_sitter::Node;

/// A 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    fn from_point(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte range of a node in its unit's source, with the positions of both
/// ends. The end is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn from_node(node: Node) -> Self {
        Self::covering(node, node)
    }

    /// From the start of `first` to the end of `last`.
    pub fn covering(first: Node, last: Node) -> Self {
        Self {
            start_byte: first.start_byte(),
            end_byte: last.end_byte(),
            start: Position::from_point(first.start_position()),
            end: Position::from_point(last.end_position()),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }

    /// Number of source lines touched.
    pub fn line_count(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }

    pub fn contains(&self, other: Span) -> bool {
        self.start_byte <= other.start_byte && other.end_byte <= self.end_byte
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: (usize, usize), end: (usize, usize), bytes: Range<usize>) -> Span {
        Span {
            start_byte: bytes.start,
            end_byte: bytes.end,
            start: Position {
                line: start.0,
                column: start.1,
            },
            end: Position {
                line: end.0,
                column: end.1,
            },
        }
    }

    #[test]
    fn test_line_count_and_display() {
        let s = span((3, 5), (5, 2), 40..90);
        assert_eq!(s.line_count(), 3);
        assert_eq!(s.to_string(), "3:5");
        assert_eq!(span((1, 1), (1, 9), 0..8).line_count(), 1);
    }

    #[test]
    fn test_contains() {
        let outer = span((1, 1), (4, 2), 0..60);
        let inner = span((2, 5), (2, 9), 20..24);
        assert!(outer.contains(inner));
        assert!(!inner.contains(outer));
    }
}
