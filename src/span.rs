//! Document positions and spans
//!
//! Columns are counted in chars of the line text.

use std::fmt;

/// A (line, column) position in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line index (0-indexed)
    pub line: usize,
    /// Column in chars
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col)
    }
}

/// A half-open range of text `[from, to)` on a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub from: Position,
    pub to: Position,
}

impl Span {
    /// Create a span covering `[start, end)` on `line`
    pub fn on_line(line: usize, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            from: Position::new(line, start),
            to: Position::new(line, end),
        }
    }

    /// Line the span lives on
    pub fn line(&self) -> usize {
        self.from.line
    }

    /// Width of the span in columns
    pub fn len(&self) -> usize {
        self.to.col.saturating_sub(self.from.col)
    }

    pub fn is_empty(&self) -> bool {
        self.from.col >= self.to.col
    }

    /// Check whether a position touches the span, both boundaries included.
    ///
    /// This is the test used to keep spans under the cursor undecorated.
    pub fn touches(&self, pos: Position) -> bool {
        pos.line == self.from.line && pos.col >= self.from.col && pos.col <= self.to.col
    }

    /// Check whether a position lies inside the span.
    ///
    /// Boundaries count only when the matching inclusive flag is set.
    pub fn contains(&self, pos: Position, inclusive_left: bool, inclusive_right: bool) -> bool {
        if pos.line != self.from.line {
            return false;
        }
        let after_start = if inclusive_left {
            pos.col >= self.from.col
        } else {
            pos.col > self.from.col
        };
        let before_end = if inclusive_right {
            pos.col <= self.to.col
        } else {
            pos.col < self.to.col
        };
        after_start && before_end
    }

    /// Check whether two spans overlap.
    ///
    /// Non-empty spans overlap when they share at least one column. An empty
    /// span overlaps any span that strictly contains its point, or starts at it.
    pub fn overlaps(&self, other: &Span) -> bool {
        if self.line() != other.line() {
            return false;
        }
        if self.is_empty() {
            return other.from.col <= self.from.col && self.from.col < other.to.col;
        }
        if other.is_empty() {
            return other.overlaps(self);
        }
        self.from.col < other.to.col && other.from.col < self.to.col
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to.col)
    }
}

/// A point on the terminal screen (0-indexed cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    /// Column
    pub x: u16,
    /// Row
    pub y: u16,
}

impl ScreenPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}
