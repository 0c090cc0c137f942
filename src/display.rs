//! Display rendering
//!
//! Each visible line is laid out into styled runs with its decorations
//! swapped for their widgets. The layout remembers where every widget was
//! drawn so clicks can be routed back to the decoration.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use crate::buffer::Document;
use crate::decoration::{Decoration, DecorationId};
use crate::engine::DecorationEngine;
use crate::error::Result;
use crate::host::Host;
use crate::line::Line;
use crate::span::ScreenPoint;
use crate::style::Style;
use crate::terminal::{content_style, Terminal};
use crate::view::DocumentView;
use crate::widget::WidgetBody;
use crate::window::Window;

/// A run of text drawn in one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: Style,
}

/// Screen cells covered by a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetHit {
    pub decoration: DecorationId,
    pub x: Range<usize>,
}

/// A line ready to be drawn
#[derive(Debug, Clone, Default)]
pub struct LineLayout {
    pub runs: Vec<Run>,
    pub hits: Vec<WidgetHit>,
    /// Screen x of every column, plus one past the end
    col_x: Vec<usize>,
}

impl LineLayout {
    /// Screen x of a column. Columns hidden under a widget map to its left edge.
    pub fn x_for_col(&self, col: usize) -> usize {
        self.col_x
            .get(col)
            .or_else(|| self.col_x.last())
            .copied()
            .unwrap_or(0)
    }

    /// Decoration whose widget covers screen column `x`
    pub fn hit(&self, x: usize) -> Option<DecorationId> {
        self.hits
            .iter()
            .find(|h| h.x.contains(&x))
            .map(|h| h.decoration)
    }

    /// Text of all runs, unstyled
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Append text, truncating at `max_cols`; `x` advances regardless
    fn push(&mut self, x: &mut usize, text: &str, style: Style, max_cols: usize) {
        for ch in text.chars() {
            let width = ch.width().unwrap_or(1);
            if *x + width <= max_cols {
                match self.runs.last_mut() {
                    Some(run) if run.style == style => run.text.push(ch),
                    _ => self.runs.push(Run {
                        text: ch.to_string(),
                        style,
                    }),
                }
            }
            *x += width;
        }
    }

    fn push_raw(&mut self, x: &mut usize, chars: &[char], max_cols: usize) {
        for &ch in chars {
            self.col_x.push(*x);
            let mut buf = [0u8; 4];
            self.push(x, ch.encode_utf8(&mut buf), Style::default(), max_cols);
        }
    }
}

/// Lay out one line with its decorations
///
/// `decorations` must be ordered by start column; any that overlap an
/// earlier one or run past the line are drawn as raw text.
pub fn layout_line(line: &Line, decorations: &[&Decoration], max_cols: usize) -> LineLayout {
    let chars: Vec<char> = line.text().chars().collect();
    let mut layout = LineLayout {
        col_x: Vec::with_capacity(chars.len() + 1),
        ..LineLayout::default()
    };
    let mut col = 0;
    let mut x = 0;

    for d in decorations {
        let (from, to) = (d.span.from.col, d.span.to.col);
        if from < col || to > chars.len() {
            continue;
        }

        layout.push_raw(&mut x, &chars[col..from], max_cols);

        let start_x = x;
        layout.col_x.extend(std::iter::repeat(start_x).take(to - from));
        match &d.widget.body {
            WidgetBody::Text(segments) => {
                for segment in segments {
                    let style = segment.style();
                    let padding = " ".repeat(segment.padding_left);
                    layout.push(&mut x, &padding, style, max_cols);
                    layout.push(&mut x, &segment.text, style, max_cols);
                }
            }
            WidgetBody::HorizontalRule => {
                let width = max_cols.saturating_sub(x).max(1);
                let rule = "─".repeat(width);
                layout.push(&mut x, &rule, Style::for_class(d.widget.class()), max_cols);
            }
        }
        layout.hits.push(WidgetHit {
            decoration: d.id,
            x: start_x..x,
        });
        col = to;
    }

    layout.push_raw(&mut x, &chars[col..], max_cols);
    layout.col_x.push(x);
    layout
}

/// Render every visible line of a view to a string, one line per row
pub fn render_to_string(view: &DocumentView, max_cols: usize, ansi: bool) -> String {
    let mut out = String::new();
    for line_idx in view.viewport() {
        let Some(line) = view.document.line(line_idx) else {
            break;
        };
        let layout = layout_line(line, &view.tracker.on_line(line_idx), max_cols);
        for run in &layout.runs {
            if ansi && !run.style.is_default() {
                let styled = crossterm::style::StyledContent::new(content_style(&run.style), &run.text);
                out.push_str(&styled.to_string());
            } else {
                out.push_str(&run.text);
            }
        }
        out.push('\n');
    }
    out
}

/// Decorate a whole document once and render every line of it
pub fn render_document(
    document: Document,
    engine: &DecorationEngine,
    max_cols: usize,
    ansi: bool,
) -> Result<String> {
    let line_count = document.line_count();
    let mut view = DocumentView::new(document, Window::new(0, line_count));
    view.park_cursor();

    let report = engine.render_all(&mut view)?;
    tracing::debug!(
        lines = line_count,
        created = report.created,
        "decorated document"
    );

    Ok(render_to_string(&view, max_cols, ansi))
}

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show in minibuffer (bottom line)
    message: Option<String>,
    /// Widget hits of the last frame, by screen row
    hits: Vec<(u16, WidgetHit)>,
}

impl Display {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            message: None,
            hits: Vec::new(),
        }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Decoration drawn at a screen point in the last frame
    pub fn widget_at(&self, point: ScreenPoint) -> Option<DecorationId> {
        self.hits
            .iter()
            .find(|(row, hit)| *row == point.y && hit.x.contains(&(point.x as usize)))
            .map(|(_, hit)| hit.decoration)
    }

    /// Render the editor display
    pub fn render(&mut self, terminal: &mut Terminal, view: &DocumentView) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();

        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        terminal.set_cursor_visible(false)?;
        self.hits.clear();

        let window = &view.window;
        let top_row = window.top_row();
        let mut cursor_x = 0;

        // Text rows that fit above the mode line and minibuffer
        let text_rows = window
            .height()
            .min(usize::from(rows.saturating_sub(top_row).saturating_sub(2)));

        for row_offset in 0..text_rows {
            let screen_row = top_row + row_offset as u16;
            let line_idx = window.top_line() + row_offset;

            terminal.move_cursor(screen_row, 0)?;

            if let Some(line) = view.document.line(line_idx) {
                let layout = layout_line(line, &view.tracker.on_line(line_idx), cols);
                for run in &layout.runs {
                    terminal.write_styled(&run.text, &run.style)?;
                }
                if line_idx == window.cursor_line() {
                    cursor_x = layout.x_for_col(window.cursor_col());
                }
                self.hits
                    .extend(layout.hits.into_iter().map(|hit| (screen_row, hit)));
            } else {
                // Empty line indicator (like vim's ~)
                terminal.set_dim(true)?;
                terminal.write_char('~')?;
                terminal.set_dim(false)?;
            }

            terminal.clear_to_eol()?;
        }

        let mode_line_row = top_row + text_rows as u16;
        self.render_mode_line(terminal, view, mode_line_row, cols)?;
        self.render_minibuffer(terminal, rows.saturating_sub(1), cols)?;

        // Position cursor in the window
        if let Some(screen_row) = window.line_to_screen_row(window.cursor_line()) {
            let screen_col = cursor_x.min(cols.saturating_sub(1)) as u16;
            terminal.move_cursor(screen_row, screen_col)?;
            terminal.set_cursor_visible(true)?;
        }

        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// Render the mode line
    fn render_mode_line(
        &self,
        terminal: &mut Terminal,
        view: &DocumentView,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.set_reverse(true)?;

        let document = &view.document;
        let modified = if document.is_modified() { "**" } else { "--" };
        let filename = document
            .filename()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let cursor = view.cursor();

        let mode_line = format!(
            "{}- markdeco: {} ({}) L{} C{} [{} decorated] ",
            modified,
            document.name(),
            if filename.is_empty() { "no file" } else { filename.as_str() },
            cursor.line + 1,
            cursor.col,
            view.tracker.len(),
        );

        // Pad or truncate to fill width
        let padded = if mode_line.len() < cols {
            format!("{}{}", mode_line, "-".repeat(cols - mode_line.len()))
        } else {
            truncate_to_width(&mode_line, cols)
        };

        terminal.write_str(&padded)?;
        terminal.set_reverse(false)?;

        Ok(())
    }

    /// Render the minibuffer (message area)
    fn render_minibuffer(&self, terminal: &mut Terminal, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;

        if let Some(ref msg) = self.message {
            let truncated = truncate_to_width(msg, cols);
            terminal.write_str(&truncated)?;
        }

        terminal.clear_to_eol()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;
    use pretty_assertions::assert_eq;

    fn decorated(text: &str, height: usize) -> DocumentView {
        let mut view = DocumentView::new(Document::from_text("t.md", text), Window::new(0, height));
        view.park_cursor();
        DecorationEngine::default().render_all(&mut view).unwrap();
        view
    }

    #[test]
    fn test_raw_line_layout() {
        let line = Line::from("plain text");
        let layout = layout_line(&line, &[], 80);
        assert_eq!(layout.plain_text(), "plain text");
        assert_eq!(layout.x_for_col(6), 6);
        assert_eq!(layout.x_for_col(10), 10);
        assert!(layout.hits.is_empty());
    }

    #[test]
    fn test_widget_replaces_span() {
        let view = decorated("    * pick up the key", 5);
        let line = view.document.line(0).unwrap();
        let layout = layout_line(line, &view.tracker.on_line(0), 80);

        assert_eq!(layout.plain_text(), "    ● pick up the key");
        assert_eq!(layout.hits.len(), 1);
        assert_eq!(layout.hits[0].x, 0..21);
        assert_eq!(layout.hit(3), Some(layout.hits[0].decoration));
        assert_eq!(layout.hit(21), None);
        assert_eq!(layout.x_for_col(0), 0);
        assert_eq!(layout.x_for_col(21), 21);
    }

    #[test]
    fn test_attribution_layout_pads_content() {
        let view = decorated("@alice said hello", 5);
        let layout = layout_line(view.document.line(0).unwrap(), &view.tracker.on_line(0), 80);
        assert_eq!(layout.plain_text(), "@alice said hello");
        assert_eq!(layout.runs.len(), 2);
        assert_eq!(layout.runs[0].style, Style::for_class("at-tag"));
        assert_eq!(layout.runs[1].text, " said hello");
    }

    #[test]
    fn test_rule_fills_width() {
        let view = decorated("----", 5);
        let layout = layout_line(view.document.line(0).unwrap(), &view.tracker.on_line(0), 12);
        assert_eq!(layout.plain_text(), "─".repeat(12));
        assert_eq!(layout.hits[0].x, 0..12);
    }

    #[test]
    fn test_truncates_to_width() {
        let line = Line::from("你好世界");
        let layout = layout_line(&line, &[], 5);
        assert_eq!(layout.plain_text(), "你好");
        assert_eq!(layout.x_for_col(3), 6);
    }

    #[test]
    fn test_render_to_string_plain() {
        let mut view = decorated("@me thinking\n> Go to chapter two\n----\nnarration", 10);
        let out = render_to_string(&view, 6, false);
        assert_eq!(out, "@me th\n➜ Go t\n──────\nnarrat\n");

        // Raw text comes back once a decoration is cleared
        view.set_cursor(Position::new(1, 3));
        let out = render_to_string(&view, 40, false);
        assert!(out.contains("> Go to chapter two"));
    }

    #[test]
    fn test_render_to_string_ansi_styles_widgets_only() {
        let view = decorated("* item\nplain", 10);
        let out = render_to_string(&view, 40, true);
        assert!(out.contains('\u{1b}'));
        assert!(out.ends_with("plain\n"));
    }

    #[test]
    fn test_render_document_covers_every_line() {
        let n = 70_000;
        let text = (0..n)
            .map(|i| match i % 10_000 {
                0 => format!("* item {i}"),
                9_999 => "----".to_string(),
                _ => format!("line {i}"),
            })
            .collect::<Vec<_>>()
            .join("\n");
        let document = Document::from_text("long.md", &text);

        let out = render_document(document, &DecorationEngine::default(), 10, false).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), n);
        assert_eq!(lines[0], "● item 0");
        assert_eq!(lines[60_000], "● item 600");
        assert_eq!(lines[65_536], "line 65536");
        assert_eq!(lines[n - 1], "─".repeat(10));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("你好", 3), "你");
    }
}
