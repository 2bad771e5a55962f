//! Source location tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// A span represents a range in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// 1-based line of `start`
    pub line: usize,
    /// 1-based column of `start`, counted in characters
    pub column: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self { start, end, line, column }
    }

    /// Create a dummy span (for testing and hand-built trees)
    pub fn dummy() -> Self {
        Self { start: 0, end: 0, line: 1, column: 1 }
    }

    /// Locate the byte range `start..end` inside `source`.
    pub fn locate(source: &str, start: usize, end: usize) -> Self {
        let before = &source[..start];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = source[line_start..start].chars().count() + 1;
        Self { start, end, line, column }
    }

    /// Zero-width span sitting right after this one.
    ///
    /// `text` is the source text this span covers.
    pub fn after(&self, text: &str) -> Span {
        let (line, column) = match text.rfind('\n') {
            Some(i) => (
                self.line + text.matches('\n').count(),
                text[i + 1..].chars().count() + 1,
            ),
            None => (self.line, self.column + text.chars().count()),
        };
        Span { start: self.end, end: self.end, line, column }
    }

    /// Zero-width span at the start of this one.
    pub fn point(&self) -> Span {
        Span { end: self.start, ..*self }
    }

    /// Merge two spans
    pub fn merge(&self, other: &Span) -> Span {
        let (first, _) = if self.start <= other.start { (self, other) } else { (other, self) };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_multiline() {
        let source = "para x\nno y";
        let span = Span::locate(source, 10, 11);
        assert_eq!(span.line, 2);
        assert_eq!(span.column, 4);
    }

    #[test]
    fn test_merge_keeps_earliest_position() {
        let a = Span::new(4, 6, 1, 5);
        let b = Span::new(0, 2, 1, 1);
        let merged = a.merge(&b);
        assert_eq!(merged, Span::new(0, 6, 1, 1));
        assert_eq!(merged.len(), 6);
    }

    #[test]
    fn test_after_is_zero_width() {
        let span = Span::new(3, 7, 1, 4).after("para");
        assert!(span.is_empty());
        assert_eq!(span.start, 7);
        assert_eq!(span.column, 8);
    }

    #[test]
    fn test_after_counts_characters() {
        let source = "escreva 'olá'";
        let span = Span::locate(source, 8, source.len()).after(&source[8..]);
        assert_eq!(span.column, 14);
    }

    #[test]
    fn test_after_crosses_newlines() {
        let source = "escreva 'a\nbc'";
        let span = Span::locate(source, 8, source.len()).after(&source[8..]);
        assert_eq!((span.line, span.column), (2, 4));
    }
}
