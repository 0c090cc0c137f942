//! The reference host: a document shown in a window, with its decorations

use std::ops::Range;
use std::path::Path;

use crate::buffer::{Document, Edit};
use crate::decoration::{Decoration, DecorationId, MarkOptions};
use crate::error::{EditorError, Result};
use crate::host::Host;
use crate::span::{Position, ScreenPoint, Span};
use crate::tracker::SpanTracker;
use crate::widget::Widget;
use crate::window::Window;

/// Cursor movements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
}

/// A document, its window and its live decorations
pub struct DocumentView {
    pub document: Document,
    pub window: Window,
    pub tracker: SpanTracker,
    /// Whether keyboard input goes to the document
    focused: bool,
    /// Lines kept visible around the cursor
    scroll_margin: usize,
}

impl DocumentView {
    pub fn new(document: Document, window: Window) -> Self {
        Self {
            document,
            window,
            tracker: SpanTracker::new(),
            focused: true,
            scroll_margin: 0,
        }
    }

    /// Open a file in a window of `height` rows starting at the top of the screen
    pub fn open(path: &Path, height: usize) -> Result<Self> {
        Ok(Self::new(Document::from_file(path)?, Window::new(0, height)))
    }

    /// Builder: set the scroll margin
    pub fn with_scroll_margin(mut self, margin: usize) -> Self {
        self.scroll_margin = margin;
        self
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give focus away (e.g. to a prompt)
    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn decoration(&self, id: DecorationId) -> Option<&Decoration> {
        self.tracker.get(id)
    }

    /// Park the cursor below the last line so no span is under it
    pub fn park_cursor(&mut self) {
        self.window.set_cursor(self.document.line_count(), 0);
    }

    fn line_len(&self, line: usize) -> usize {
        self.document.line(line).map(|l| l.char_len()).unwrap_or(0)
    }

    /// Clamp a position to the document
    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.document.line_count().saturating_sub(1));
        Position::new(line, pos.col.min(self.line_len(line)))
    }

    /// Move the cursor
    pub fn move_cursor(&mut self, motion: Motion) {
        let cur = self.cursor();
        let page = self.window.height().saturating_sub(1).max(1);
        let last = self.document.line_count().saturating_sub(1);

        let (target, keep_goal) = match motion {
            Motion::Left if cur.col > 0 => (Position::new(cur.line, cur.col - 1), false),
            Motion::Left if cur.line > 0 => {
                (Position::new(cur.line - 1, self.line_len(cur.line - 1)), false)
            }
            Motion::Left => (cur, false),
            Motion::Right if cur.col < self.line_len(cur.line) => {
                (Position::new(cur.line, cur.col + 1), false)
            }
            Motion::Right if cur.line < last => (Position::new(cur.line + 1, 0), false),
            Motion::Right => (cur, false),
            Motion::Up => (
                Position::new(cur.line.saturating_sub(1), self.window.goal_col()),
                true,
            ),
            Motion::Down => (Position::new(cur.line + 1, self.window.goal_col()), true),
            Motion::PageUp => (
                Position::new(cur.line.saturating_sub(page), self.window.goal_col()),
                true,
            ),
            Motion::PageDown => (Position::new(cur.line + page, self.window.goal_col()), true),
            Motion::LineStart => (Position::new(cur.line, 0), false),
            Motion::LineEnd => (Position::new(cur.line, self.line_len(cur.line)), false),
            Motion::DocumentStart => (Position::new(0, 0), false),
            Motion::DocumentEnd => (Position::new(last, self.line_len(last)), false),
        };

        let goal = self.window.goal_col();
        self.set_cursor(target);
        if keep_goal {
            self.window.set_goal_col(goal);
        }
    }

    /// Scroll the window without moving the cursor
    pub fn scroll(&mut self, lines: isize) {
        if lines >= 0 {
            self.window
                .scroll_down(lines as usize, self.document.line_count());
        } else {
            self.window.scroll_up(lines.unsigned_abs());
        }
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, ch: char) {
        let cur = self.cursor();
        if let Some(edit) = self.document.insert_char(cur.line, cur.col, ch) {
            self.after_edit(edit, Position::new(cur.line, cur.col + 1));
        }
    }

    /// Split the line at the cursor
    pub fn insert_newline(&mut self) {
        let cur = self.cursor();
        if let Some(edit) = self.document.insert_newline(cur.line, cur.col) {
            self.after_edit(edit, Position::new(cur.line + 1, 0));
        }
    }

    /// Delete the char before the cursor
    pub fn delete_backward(&mut self) {
        let cur = self.cursor();
        if let Some(edit) = self.document.delete_backward(cur.line, cur.col) {
            let target = match edit {
                Edit::Join { join_col, .. } => Position::new(cur.line - 1, join_col),
                _ => Position::new(cur.line, cur.col - 1),
            };
            self.after_edit(edit, target);
        }
    }

    fn after_edit(&mut self, edit: Edit, cursor: Position) {
        let cleared = self.tracker.on_edit(edit);
        if !cleared.is_empty() {
            tracing::trace!(?edit, cleared = cleared.len(), "edit invalidated decorations");
        }
        self.set_cursor(cursor);
    }
}

impl Host for DocumentView {
    fn viewport(&self) -> Range<usize> {
        self.window.viewport(self.document.line_count())
    }

    fn line_mode(&self, line: usize) -> Result<&str> {
        self.document.mode(line)
    }

    fn line_text(&self, line: usize) -> Result<&str> {
        Ok(self.document.try_line(line)?.text())
    }

    fn cursor(&self) -> Position {
        Position::new(self.window.cursor_line(), self.window.cursor_col())
    }

    fn find_overlapping(&self, span: &Span) -> Vec<DecorationId> {
        self.tracker.find_overlapping(span)
    }

    fn create_decoration(
        &mut self,
        span: Span,
        widget: Widget,
        options: MarkOptions,
    ) -> Result<DecorationId> {
        let line = self.document.try_line(span.line())?;
        if span.to.col > line.char_len() {
            return Err(EditorError::Message(format!(
                "span {span} runs past the end of the line"
            )));
        }
        Ok(self.tracker.create(span, widget, options))
    }

    fn clear_decoration(&mut self, id: DecorationId) -> bool {
        self.tracker.clear(id)
    }

    fn position_at(&self, point: ScreenPoint) -> Result<Position> {
        let out_of_view = || EditorError::OutOfView {
            x: point.x,
            y: point.y,
        };
        let line = self
            .window
            .screen_row_to_line(point.y)
            .ok_or_else(out_of_view)?;
        let text = self.document.line(line).ok_or_else(out_of_view)?;
        Ok(Position::new(line, text.width_to_col(point.x as usize)))
    }

    fn set_cursor(&mut self, pos: Position) {
        let pos = self.clamp(pos);
        self.window.set_cursor(pos.line, pos.col);
        self.window.set_goal_col(pos.col);
        self.window.ensure_cursor_visible(self.scroll_margin);
        self.tracker.on_cursor_moved(pos);
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}
