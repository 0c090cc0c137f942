//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Attribute, ContentStyle, Print, PrintStyledContent, SetAttribute, StyledContent},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::style::{Color, Style};

/// Map a palette color onto crossterm's
fn term_color(color: Color) -> Option<crossterm::style::Color> {
    use crossterm::style::Color as C;
    Some(match color {
        Color::Default => return None,
        Color::Black => C::Black,
        Color::Red => C::DarkRed,
        Color::Green => C::DarkGreen,
        Color::Yellow => C::DarkYellow,
        Color::Blue => C::DarkBlue,
        Color::Magenta => C::DarkMagenta,
        Color::Cyan => C::DarkCyan,
        Color::White => C::Grey,
        Color::BrightBlack => C::DarkGrey,
        Color::BrightRed => C::Red,
        Color::BrightGreen => C::Green,
        Color::BrightYellow => C::Yellow,
        Color::BrightBlue => C::Blue,
        Color::BrightMagenta => C::Magenta,
        Color::BrightCyan => C::Cyan,
        Color::BrightWhite => C::White,
    })
}

/// Convert a widget style into a crossterm content style
pub fn content_style(style: &Style) -> ContentStyle {
    let mut out = ContentStyle::new();
    out.foreground_color = term_color(style.fg);
    out.background_color = term_color(style.bg);
    if style.bold {
        out.attributes.set(Attribute::Bold);
    }
    if style.italic {
        out.attributes.set(Attribute::Italic);
    }
    if style.underline {
        out.attributes.set(Attribute::Underlined);
    }
    if style.dim {
        out.attributes.set(Attribute::Dim);
    }
    out
}

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance, enter raw mode and capture the mouse
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        Ok(Self { cols, rows })
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Get terminal height
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Update terminal size (call after resize event)
    pub fn update_size(&mut self) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        Ok(())
    }

    /// Clear the entire screen
    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Write a string in a style; the style does not leak past it
    pub fn write_styled(&mut self, s: &str, style: &Style) -> Result<()> {
        if style.is_default() {
            return self.write_str(s);
        }
        queue!(
            io::stdout(),
            PrintStyledContent(StyledContent::new(content_style(style), s))
        )?;
        Ok(())
    }

    /// Write a single character
    pub fn write_char(&mut self, ch: char) -> Result<()> {
        queue!(io::stdout(), Print(ch))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    /// Set cursor visibility
    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Read the next event (blocking), tracking resizes
    pub fn read_event(&mut self) -> Result<Event> {
        let event = event::read()?;
        if let Event::Resize(cols, rows) = event {
            self.cols = cols;
            self.rows = rows;
        }
        Ok(event)
    }

    /// Set reverse video mode
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        let attr = if enabled {
            Attribute::Reverse
        } else {
            Attribute::NoReverse
        };
        queue!(io::stdout(), SetAttribute(attr))?;
        Ok(())
    }

    /// Set dim/faint mode
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        let attr = if enabled {
            Attribute::Dim
        } else {
            Attribute::NormalIntensity
        };
        queue!(io::stdout(), SetAttribute(attr))?;
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = self.reset_attributes();
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color as C;

    #[test]
    fn test_content_style_mapping() {
        let style = content_style(&Style::for_class("at-tag me-tag"));
        assert!(style.attributes.has(Attribute::Bold));

        let plain = content_style(&Style::default());
        assert_eq!(plain.foreground_color, None);
        assert!(plain.attributes.is_empty());

        let dim = content_style(&Style::fg(Color::BrightBlack).with_dim());
        assert_eq!(dim.foreground_color, Some(C::DarkGrey));
        assert!(dim.attributes.has(Attribute::Dim));
    }
}
