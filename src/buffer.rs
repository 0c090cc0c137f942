//! Document representation - a collection of lines with their mode tags

use std::path::{Path, PathBuf};

use crate::error::{EditorError, Result};
use crate::line::Line;
use crate::mode;

/// A change to the document, as seen by span tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Columns `[start, end)` of `line` were replaced by `inserted` chars
    Replace {
        line: usize,
        start: usize,
        end: usize,
        inserted: usize,
    },
    /// `line` was split at `col`; everything after moved to a new line below
    Split { line: usize, col: usize },
    /// `line` was appended to the line above, which was `join_col` chars long
    Join { line: usize, join_col: usize },
}

/// A document containing text and metadata
#[derive(Debug)]
pub struct Document {
    /// Lines of text
    lines: Vec<Line>,
    /// Mode tag per line
    modes: Vec<String>,
    /// Document name (file name or "*scratch*")
    name: String,
    /// Associated file path (None for unnamed documents)
    filename: Option<PathBuf>,
    /// Whether the document has unsaved changes
    modified: bool,
}

impl Document {
    /// Create a new empty document with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_lines(name, vec![Line::new()])
    }

    /// Create a document from text
    pub fn from_text(name: impl Into<String>, content: &str) -> Self {
        let lines: Vec<Line> = content.lines().map(Line::from).collect();
        Self::from_lines(name, lines)
    }

    /// Create a document from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut doc = Self::from_text(name, &content);
        doc.filename = Some(path.to_path_buf());
        Ok(doc)
    }

    fn from_lines(name: impl Into<String>, mut lines: Vec<Line>) -> Self {
        // Always have at least one line
        if lines.is_empty() {
            lines.push(Line::new());
        }
        let mut doc = Self {
            lines,
            modes: Vec::new(),
            name: name.into(),
            filename: None,
            modified: false,
        };
        doc.refresh_modes();
        doc
    }

    /// Get document name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Check if the document is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Get a line or fail with `NoSuchLine`
    pub fn try_line(&self, idx: usize) -> Result<&Line> {
        self.lines.get(idx).ok_or(EditorError::NoSuchLine(idx))
    }

    /// Mode tag of a line
    pub fn mode(&self, idx: usize) -> Result<&str> {
        self.modes
            .get(idx)
            .map(String::as_str)
            .ok_or(EditorError::NoSuchLine(idx))
    }

    /// Recompute mode tags after a change
    fn refresh_modes(&mut self) {
        self.modes = mode::line_modes(self.lines.iter().map(Line::text));
    }

    /// Insert a character at position
    pub fn insert_char(&mut self, line_idx: usize, col: usize, ch: char) -> Option<Edit> {
        let line = self.lines.get_mut(line_idx)?;
        let col = col.min(line.char_len());
        line.insert_char(col, ch);
        self.modified = true;
        self.refresh_modes();
        Some(Edit::Replace {
            line: line_idx,
            start: col,
            end: col,
            inserted: 1,
        })
    }

    /// Insert a newline, splitting the current line
    pub fn insert_newline(&mut self, line_idx: usize, col: usize) -> Option<Edit> {
        let line = self.lines.get_mut(line_idx)?;
        let col = col.min(line.char_len());
        let new_line = line.split_off(col);
        self.lines.insert(line_idx + 1, new_line);
        self.modified = true;
        self.refresh_modes();
        Some(Edit::Split {
            line: line_idx,
            col,
        })
    }

    /// Delete backward (backspace).
    ///
    /// At the start of a line this joins it with the previous one.
    pub fn delete_backward(&mut self, line_idx: usize, col: usize) -> Option<Edit> {
        if col > 0 {
            let line = self.lines.get_mut(line_idx)?;
            let col = col.min(line.char_len());
            line.delete_before(col)?;
            self.modified = true;
            self.refresh_modes();
            return Some(Edit::Replace {
                line: line_idx,
                start: col - 1,
                end: col,
                inserted: 0,
            });
        }

        if line_idx == 0 || line_idx >= self.lines.len() {
            return None;
        }
        let current = self.lines.remove(line_idx);
        let prev = &mut self.lines[line_idx - 1];
        let join_col = prev.char_len();
        prev.append(current);
        self.modified = true;
        self.refresh_modes();
        Some(Edit::Join {
            line: line_idx,
            join_col,
        })
    }

    /// Whole document text, lines joined with newlines
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("*scratch*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let doc = Document::from_text("dialogue.md", "@alice hi\n```\n* x\n```\n");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.mode(0).unwrap(), "markdown");
        assert_eq!(doc.mode(2).unwrap(), "code");
        assert!(doc.mode(9).is_err());
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_empty_document_has_one_line() {
        let doc = Document::from_text("empty", "");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line(0).unwrap().text(), "");
    }

    #[test]
    fn test_edits_report_ranges() {
        let mut doc = Document::from_text("t", "ab\ncd");

        assert_eq!(
            doc.insert_char(0, 1, 'X'),
            Some(Edit::Replace { line: 0, start: 1, end: 1, inserted: 1 })
        );
        assert_eq!(doc.line(0).unwrap().text(), "aXb");

        assert_eq!(
            doc.delete_backward(0, 2),
            Some(Edit::Replace { line: 0, start: 1, end: 2, inserted: 0 })
        );
        assert_eq!(doc.line(0).unwrap().text(), "ab");

        assert_eq!(doc.insert_newline(0, 1), Some(Edit::Split { line: 0, col: 1 }));
        assert_eq!(doc.text(), "a\nb\ncd");

        assert_eq!(doc.delete_backward(2, 0), Some(Edit::Join { line: 2, join_col: 1 }));
        assert_eq!(doc.text(), "a\nbcd");
        assert!(doc.is_modified());

        assert_eq!(doc.delete_backward(0, 0), None);
    }

    #[test]
    fn test_modes_follow_edits() {
        let mut doc = Document::from_text("t", "``\n* item");
        assert_eq!(doc.mode(1).unwrap(), "markdown");
        doc.insert_char(0, 2, '`');
        assert_eq!(doc.mode(1).unwrap(), "code");
    }
}
