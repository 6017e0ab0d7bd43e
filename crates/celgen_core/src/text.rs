//! Byte positions in Go source text.
//!
//! Offsets count UTF-8 bytes, the unit both the scanner and `miette`
//! labels use.

use std::fmt;

/// A byte offset into a source file.
pub type TextPos = u32;

/// `start` plus `length`, the shape diagnostics carry.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self::new(start, end - start)
    }

    /// A zero-width span at `pos`.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self::new(pos, 0)
    }

    /// Exclusive end offset.
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// `pos..end` of a syntax node, end exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextRange {
    pub pos: TextPos,
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

/// A 0-based line and byte column.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for LineAndColumn {
    /// 1-based `line:column`, as `go vet` and `gofmt` print positions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// Offsets of every line start in a file.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let newlines = memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| (i + 1) as TextPos);
        Self {
            line_starts: std::iter::once(0).chain(newlines).collect(),
        }
    }

    /// 0-based line holding `pos`. A newline belongs to the line it ends.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        self.line_starts.partition_point(|&start| start <= pos).saturating_sub(1) as u32
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        LineAndColumn::new(line, pos - self.line_starts[line as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_bounds() {
        let span = TextSpan::from_bounds(5, 15);
        assert_eq!(span, TextSpan::new(5, 10));
        assert_eq!(span.end(), 15);
        assert_eq!(TextRange::new(3, 7).to_span(), TextSpan::new(3, 4));
        assert_eq!(format!("{:?}", TextSpan::empty(4)), "4..4");
    }

    #[test]
    fn test_line_map() {
        let text = "package x\n\nfunc f() {}\n";
        let map = LineMap::new(text);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(9), 0);
        assert_eq!(map.line_of(10), 1);
        assert_eq!(map.line_of(11), 2);
        assert_eq!(map.line_of(23), 3);

        let lc = map.line_and_column_of(16);
        assert_eq!(lc, LineAndColumn::new(2, 5));
        assert_eq!(lc.to_string(), "3:6");
    }
}
