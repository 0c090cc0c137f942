//! Style types for widget rendering
//!
//! Widgets carry abstract class names; this module maps them onto terminal
//! colors and attributes.

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Dim/faint text
    pub dim: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set dim
    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Resolve a space-separated widget class list to a style.
    ///
    /// Later classes refine earlier ones, so `"at-tag me-tag"` ends up with
    /// the self-attribution colors.
    pub fn for_class(class: &str) -> Self {
        class
            .split_whitespace()
            .fold(Style::default(), |style, name| match name {
                "at-tag" => Style::fg(Color::BrightBlue).with_bold(),
                "me-tag" => Style::fg(Color::BrightMagenta).with_bold(),
                "cm-person" => Style {
                    fg: Color::White,
                    bg: Color::BrightBlack,
                    ..style
                },
                "cm-comment" => style.with_italic(),
                "dialogue-tag" => Style::fg(Color::Cyan),
                "dialogue-heading-tag" => Style::fg(Color::Yellow),
                "dialogue-command-tag" => Style::fg(Color::Green),
                "dialogue-call-tag" => Style::fg(Color::Magenta),
                "hr" => Style::fg(Color::BrightBlack).with_dim(),
                _ => style,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert_eq!(style.bg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_bg(Color::Blue);
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Blue);
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_class_styles() {
        assert_eq!(Style::for_class("at-tag").fg, Color::BrightBlue);
        assert_eq!(Style::for_class("at-tag me-tag").fg, Color::BrightMagenta);
        let person = Style::for_class("cm-comment cm-person");
        assert_eq!(person.bg, Color::BrightBlack);
        assert!(person.italic);
        assert!(Style::for_class("unknown").is_default());
    }
}
