//! Core types used throughout the project.

use std::fmt;

/// A half-open byte range `[start, end)` into a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteSpan {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl ByteSpan {
    /// Creates the span `[start, end)`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Byte range covered by a syntax node.
    #[must_use]
    pub fn from_node(node: &tree_sitter::Node<'_>) -> Self {
        Self { start: node.start_byte(), end: node.end_byte() }
    }

    /// Moves the span by `offset` bytes, e.g. from script-relative to document-absolute.
    #[must_use]
    pub const fn shifted(self, offset: usize) -> Self {
        Self { start: self.start + offset, end: self.end + offset }
    }

    /// Returns the covered text, or `None` if the span is out of bounds or
    /// splits a UTF-8 sequence.
    #[must_use]
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(self.start..self.end)
    }
}

impl fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A position in source text. `line` is 1-indexed, `column` counts
/// characters from the line start (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Line number, starting at 1.
    pub line: usize,
    /// Characters before the position on its line.
    pub column: usize,
}

impl SourcePosition {
    /// Computes the position of byte `offset` in `text`.
    ///
    /// Offsets past the end are clamped to the end of the text.
    #[must_use]
    pub fn at_offset(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let before = text.get(..end).unwrap_or_default();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before.matches('\n').count() + 1;
        let column = before.get(line_start..).map_or(0, |s| s.chars().count());
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range in source text, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    /// Where the range begins.
    pub start: SourcePosition,
    /// Where the range ends.
    pub end: SourcePosition,
}

impl SourceRange {
    /// Converts a byte span of `text` into line and column positions.
    #[must_use]
    pub fn from_span(text: &str, span: ByteSpan) -> Self {
        Self {
            start: SourcePosition::at_offset(text, span.start),
            end: SourcePosition::at_offset(text, span.end),
        }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const fn span(start: usize, end: usize) -> ByteSpan {
        ByteSpan::new(start, end)
    }

    #[rstest]
    fn test_shifted_moves_both_ends() {
        assert_that!(span(3, 9).shifted(100), eq(span(103, 109)));
    }

    #[rstest]
    #[case::in_bounds(span(0, 5), Some("hello"))]
    #[case::past_end(span(6, 99), None)]
    #[case::inside_multibyte(span(0, 7), None)]
    fn test_slice(#[case] s: ByteSpan, #[case] expected: Option<&str>) {
        assert_that!(s.slice("hello ü!"), eq(expected));
    }

    #[rstest]
    #[case::start(0, 1, 0)]
    #[case::first_line(4, 1, 4)]
    #[case::after_newline(6, 2, 0)]
    #[case::second_line(8, 2, 2)]
    #[case::after_multibyte(14, 3, 1)]
    #[case::inside_multibyte(13, 3, 0)]
    #[case::clamped(999, 3, 2)]
    fn test_at_offset(#[case] offset: usize, #[case] line: usize, #[case] column: usize) {
        let text = "hello\nworld\nä!";
        assert_that!(SourcePosition::at_offset(text, offset), eq(SourcePosition { line, column }));
    }

    #[rstest]
    fn test_range_display() {
        let range = SourceRange::from_span("ab\ncd", span(1, 4));
        assert_that!(range.to_string(), eq("1:1 to 2:1"));
    }
}
