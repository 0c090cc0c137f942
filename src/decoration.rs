//! Live decorations and the action that reverts them

use std::fmt;

use crate::error::Result;
use crate::host::Host;
use crate::span::{ScreenPoint, Span};
use crate::widget::Widget;

/// Handle to a decoration registered with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationId(pub u64);

impl fmt::Display for DecorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the host tracks a decorated span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOptions {
    /// Clear when the cursor enters the span
    pub clear_on_enter: bool,
    /// Text typed at the start boundary joins the span
    pub inclusive_left: bool,
    /// Text typed at the end boundary joins the span
    pub inclusive_right: bool,
}

impl MarkOptions {
    /// Options every engine decoration is created with
    pub fn replaced() -> Self {
        Self {
            clear_on_enter: true,
            inclusive_left: false,
            inclusive_right: false,
        }
    }
}

impl Default for MarkOptions {
    fn default() -> Self {
        Self::replaced()
    }
}

/// A span currently shown as a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub id: DecorationId,
    pub span: Span,
    pub widget: Widget,
    pub options: MarkOptions,
}

impl Decoration {
    /// The action bound to this decoration's widget
    pub fn revert_action(&self) -> RevertAction {
        RevertAction::new(self.id)
    }
}

/// Turns a decorated span back into editable text when its widget is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertAction {
    pub decoration: DecorationId,
}

impl RevertAction {
    pub fn new(decoration: DecorationId) -> Self {
        Self { decoration }
    }

    /// Clear the decoration and put the cursor where the user clicked.
    ///
    /// The decoration is cleared before the click is mapped so the point
    /// resolves against the raw text layout.
    pub fn activate<H: Host + ?Sized>(&self, host: &mut H, point: ScreenPoint) -> Result<()> {
        host.clear_decoration(self.decoration);
        let pos = host.position_at(point)?;
        host.set_cursor(pos);
        host.focus();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaced_options() {
        let options = MarkOptions::replaced();
        assert!(options.clear_on_enter);
        assert!(!options.inclusive_left);
        assert!(!options.inclusive_right);
        assert_eq!(MarkOptions::default(), options);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(DecorationId(12).to_string(), "#12");
    }
}
