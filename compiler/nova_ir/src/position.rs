//! Line/column positions for human-facing diagnostics.

use std::fmt;

/// A 1-based line/column position in the source.
///
/// The scanner owns one mutable position and advances it as it consumes
/// bytes; each emitted token stores a copy taken at lexeme start. Later
/// advancement never changes an already-recorded position.
///
/// Both fields start at 1. A newline increments `line` and resets `column`
/// to 1; this convention is applied uniformly.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    /// Position of the first byte of any source: line 1, column 1.
    pub const START: SourcePosition = SourcePosition { line: 1, column: 1 };

    /// Create a position at the given line and column.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        SourcePosition { line, column }
    }

    /// Advance the column by `n` characters on the current line.
    #[inline]
    pub fn advance(&mut self, n: u32) {
        self.column += n;
    }

    /// Move to the start of the next line.
    #[inline]
    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Debug for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_one() {
        let pos = SourcePosition::START;
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(SourcePosition::default(), pos);
    }

    #[test]
    fn advance_moves_column_only() {
        let mut pos = SourcePosition::START;
        pos.advance(3);
        assert_eq!(pos, SourcePosition::new(1, 4));
        pos.advance(1);
        assert_eq!(pos, SourcePosition::new(1, 5));
    }

    #[test]
    fn newline_resets_column_to_one() {
        let mut pos = SourcePosition::new(1, 17);
        pos.newline();
        assert_eq!(pos, SourcePosition::new(2, 1));
        pos.newline();
        assert_eq!(pos, SourcePosition::new(3, 1));
    }

    #[test]
    fn snapshot_is_independent_of_tracker() {
        let mut tracker = SourcePosition::START;
        tracker.advance(4);
        let snapshot = tracker;
        tracker.newline();
        tracker.advance(10);
        // the copy taken earlier is unaffected
        assert_eq!(snapshot, SourcePosition::new(1, 5));
    }

    #[test]
    fn displays_as_line_colon_column() {
        let pos = SourcePosition::new(12, 3);
        assert_eq!(format!("{pos}"), "12:3");
        assert_eq!(format!("{pos:?}"), "12:3");
    }
}
