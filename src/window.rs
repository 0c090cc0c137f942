//! Window representation - a viewport into a document

use std::ops::Range;

/// A window displaying a portion of a document
#[derive(Debug)]
pub struct Window {
    /// First visible line in the window
    top_line: usize,
    /// Cursor line position (0-indexed)
    cursor_line: usize,
    /// Cursor column position (chars)
    cursor_col: usize,
    /// Row on screen where window starts
    top_row: u16,
    /// Number of text rows in window (excluding mode line)
    height: usize,
    /// Goal column for vertical movement
    goal_col: usize,
}

impl Window {
    /// Create a new window
    pub fn new(top_row: u16, height: usize) -> Self {
        Self {
            top_line: 0,
            cursor_line: 0,
            cursor_col: 0,
            top_row,
            height: height.max(1),
            goal_col: 0,
        }
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Set the top visible line
    pub fn set_top_line(&mut self, line: usize) {
        self.top_line = line;
    }

    /// Get cursor line
    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Get cursor column
    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    /// Set cursor position
    pub fn set_cursor(&mut self, line: usize, col: usize) {
        self.cursor_line = line;
        self.cursor_col = col;
    }

    /// Get the goal column for vertical movement
    pub fn goal_col(&self) -> usize {
        self.goal_col
    }

    /// Set the goal column
    pub fn set_goal_col(&mut self, col: usize) {
        self.goal_col = col;
    }

    /// Get top row on screen
    pub fn top_row(&self) -> u16 {
        self.top_row
    }

    /// Get window height in rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set window height
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
    }

    /// Visible lines of a document with `line_count` lines
    pub fn viewport(&self, line_count: usize) -> Range<usize> {
        let start = self.top_line.min(line_count);
        let end = self.top_line.saturating_add(self.height).min(line_count);
        start..end
    }

    /// Check if a line is visible in the window
    pub fn is_line_visible(&self, line: usize) -> bool {
        line >= self.top_line && line - self.top_line < self.height
    }

    /// Ensure cursor is visible with `margin` lines of context where possible
    pub fn ensure_cursor_visible(&mut self, margin: usize) {
        let height = self.height;
        let margin = margin.min(height.saturating_sub(1) / 2);
        if self.cursor_line < self.top_line + margin {
            self.top_line = self.cursor_line.saturating_sub(margin);
        } else if self.cursor_line + margin >= self.top_line + height {
            self.top_line = self.cursor_line + margin + 1 - height;
        }
    }

    /// Get the screen row for a document line (None if not visible)
    pub fn line_to_screen_row(&self, line: usize) -> Option<u16> {
        if !self.is_line_visible(line) {
            return None;
        }
        let offset = u16::try_from(line - self.top_line).ok()?;
        self.top_row.checked_add(offset)
    }

    /// Get the document line shown on a screen row (None outside the window)
    pub fn screen_row_to_line(&self, row: u16) -> Option<usize> {
        let offset = row.checked_sub(self.top_row)? as usize;
        if offset >= self.height {
            return None;
        }
        Some(self.top_line + offset)
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: usize, line_count: usize) {
        let new_top = self.top_line.saturating_add(n);
        self.top_line = new_top.min(line_count.saturating_sub(1));
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: usize) {
        self.top_line = self.top_line.saturating_sub(n);
    }
}
