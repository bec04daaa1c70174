//! Source location tracking

/// A span represents a range in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// 1-based line of the first character
    pub line: usize,
    /// 1-based column of the first character
    pub column: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self { start, end, line, column }
    }

    /// Create a dummy span (for testing and synthesized nodes)
    pub fn dummy() -> Self {
        Self { start: 0, end: 0, line: 1, column: 1 }
    }

    /// Merge two spans, keeping the position of the earlier one
    pub fn merge(&self, other: &Span) -> Span {
        let first = if self.start <= other.start { self } else { other };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

/// 1-based column of `offset`, found by walking back to the previous line break.
pub fn column_at(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    source[line_start..offset].chars().count() + 1
}
