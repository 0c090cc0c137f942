//! Line representation and text operations
//!
//! Columns are char indices; screen widths come from `unicode-width`.

use unicode_width::UnicodeWidthChar;

/// A single line of text in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Create a line from a string
    pub fn from_string(s: String) -> Self {
        Self { text: s }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in chars
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of a char column, clamped to the end of the line
    pub fn col_to_byte(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map(|(pos, _)| pos)
            .unwrap_or(self.text.len())
    }

    /// Char column under a display cell.
    ///
    /// Cells past the end of the line map to the end of the line.
    pub fn width_to_col(&self, width: usize) -> usize {
        let mut current = 0;
        for (col, ch) in self.text.chars().enumerate() {
            let ch_width = ch.width().unwrap_or(1);
            if current + ch_width > width {
                return col;
            }
            current += ch_width;
        }
        self.char_len()
    }

    /// Insert a character at a char column
    pub fn insert_char(&mut self, col: usize, ch: char) {
        let byte = self.col_to_byte(col);
        self.text.insert(byte, ch);
    }

    /// Delete the char before a column, returning it
    pub fn delete_before(&mut self, col: usize) -> Option<char> {
        if col == 0 {
            return None;
        }
        let start = self.col_to_byte(col - 1);
        let ch = self.text[start..].chars().next()?;
        self.text.replace_range(start..start + ch.len_utf8(), "");
        Some(ch)
    }

    /// Split the line at a char column, returning the remainder
    pub fn split_off(&mut self, col: usize) -> Line {
        let byte = self.col_to_byte(col);
        Line::from_string(self.text.split_off(byte))
    }

    /// Append another line's content to this line
    pub fn append(&mut self, other: Line) {
        self.text.push_str(other.text());
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line_operations() {
        let mut line = Line::from("Hello");
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.char_len(), 5);
        assert!(!line.is_empty());

        line.insert_char(5, '!');
        assert_eq!(line.text(), "Hello!");
    }

    #[test]
    fn test_columns_are_chars() {
        let mut line = Line::from("● café");
        assert_eq!(line.char_len(), 6);
        assert_eq!(line.col_to_byte(2), 4);
        assert_eq!(line.col_to_byte(99), line.text().len());

        line.insert_char(6, '!');
        assert_eq!(line.text(), "● café!");
        assert_eq!(line.delete_before(6), Some('é'));
        assert_eq!(line.text(), "● caf!");
        assert_eq!(line.delete_before(0), None);
    }

    #[test]
    fn test_width_mapping() {
        let line = Line::from("你好 ok");
        assert_eq!(line.width_to_col(0), 0);
        assert_eq!(line.width_to_col(1), 0);
        assert_eq!(line.width_to_col(2), 1);
        assert_eq!(line.width_to_col(5), 3);
        assert_eq!(line.width_to_col(50), 5);
    }

    #[test]
    fn test_split_and_append() {
        let mut line = Line::from("Hello World");
        let remainder = line.split_off(6);
        assert_eq!(line.text(), "Hello ");
        assert_eq!(remainder.text(), "World");

        line.append(remainder);
        assert_eq!(line.text(), "Hello World");
    }
}
