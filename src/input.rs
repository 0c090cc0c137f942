//! Input handling - event reading and translation

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::span::ScreenPoint;
use crate::view::Motion;

/// Lines moved per mouse wheel notch
const WHEEL_LINES: isize = 3;

/// What an input event asks the editor to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Motion),
    Insert(char),
    Newline,
    Backspace,
    /// Left click at a screen cell
    Click(ScreenPoint),
    /// Scroll the window, positive is down
    Scroll(isize),
    Resize,
    Redraw,
    Quit,
}

/// Input state for handling ESC-prefixed meta keys
#[derive(Debug, Default)]
pub struct InputState {
    /// Waiting for Meta continuation (after ESC)
    meta_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if waiting for Meta/ESC continuation
    pub fn is_meta_pending(&self) -> bool {
        self.meta_pending
    }

    /// Translate a crossterm event. Returns None for events with no binding.
    pub fn translate(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.translate_key(key),
            Event::Mouse(mouse) => translate_mouse(mouse),
            Event::Resize(..) => Some(Action::Resize),
            _ => None,
        }
    }

    fn translate_key(&mut self, event: KeyEvent) -> Option<Action> {
        let KeyEvent {
            code, modifiers, kind, ..
        } = event;

        // Only process key press events, ignore release and repeat
        if kind != KeyEventKind::Press {
            return None;
        }

        if self.meta_pending {
            self.meta_pending = false;
            return translate_meta(code);
        }

        if code == KeyCode::Esc {
            self.meta_pending = true;
            return None;
        }

        if modifiers.contains(KeyModifiers::ALT) {
            return translate_meta(code);
        }
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char(ch) => translate_ctrl(ch),
                KeyCode::Home => Some(Action::Move(Motion::DocumentStart)),
                KeyCode::End => Some(Action::Move(Motion::DocumentEnd)),
                _ => None,
            };
        }

        let action = match code {
            KeyCode::Char(ch) => Action::Insert(ch),
            KeyCode::Enter => Action::Newline,
            KeyCode::Tab => Action::Insert('\t'),
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Home => Action::Move(Motion::LineStart),
            KeyCode::End => Action::Move(Motion::LineEnd),
            KeyCode::PageUp => Action::Move(Motion::PageUp),
            KeyCode::PageDown => Action::Move(Motion::PageDown),
            KeyCode::Up => Action::Move(Motion::Up),
            KeyCode::Down => Action::Move(Motion::Down),
            KeyCode::Left => Action::Move(Motion::Left),
            KeyCode::Right => Action::Move(Motion::Right),
            _ => return None,
        };
        Some(action)
    }
}

fn translate_ctrl(ch: char) -> Option<Action> {
    let action = match ch.to_ascii_lowercase() {
        'f' => Action::Move(Motion::Right),
        'b' => Action::Move(Motion::Left),
        'n' => Action::Move(Motion::Down),
        'p' => Action::Move(Motion::Up),
        'a' => Action::Move(Motion::LineStart),
        'e' => Action::Move(Motion::LineEnd),
        'v' => Action::Move(Motion::PageDown),
        'h' => Action::Backspace,
        'm' | 'j' => Action::Newline,
        'l' => Action::Redraw,
        'q' => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn translate_meta(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('v') => Some(Action::Move(Motion::PageUp)),
        KeyCode::Char('<') => Some(Action::Move(Motion::DocumentStart)),
        KeyCode::Char('>') => Some(Action::Move(Motion::DocumentEnd)),
        _ => None,
    }
}

fn translate_mouse(event: MouseEvent) -> Option<Action> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            Some(Action::Click(ScreenPoint::new(event.column, event.row)))
        }
        MouseEventKind::ScrollDown => Some(Action::Scroll(WHEEL_LINES)),
        MouseEventKind::ScrollUp => Some(Action::Scroll(-WHEEL_LINES)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_plain_keys() {
        let mut input = InputState::new();
        assert_eq!(
            input.translate(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Action::Insert('x'))
        );
        assert_eq!(
            input.translate(key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Action::Insert('X'))
        );
        assert_eq!(
            input.translate(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Newline)
        );
        assert_eq!(
            input.translate(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(Action::Move(Motion::PageDown))
        );
    }

    #[test]
    fn test_control_keys() {
        let mut input = InputState::new();
        assert_eq!(
            input.translate(key(KeyCode::Char('f'), KeyModifiers::CONTROL)),
            Some(Action::Move(Motion::Right))
        );
        assert_eq!(
            input.translate(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(input.translate(key(KeyCode::Char('z'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_escape_prefix() {
        let mut input = InputState::new();
        assert_eq!(input.translate(key(KeyCode::Esc, KeyModifiers::NONE)), None);
        assert!(input.is_meta_pending());
        assert_eq!(
            input.translate(key(KeyCode::Char('<'), KeyModifiers::NONE)),
            Some(Action::Move(Motion::DocumentStart))
        );
        assert!(!input.is_meta_pending());

        assert_eq!(
            input.translate(key(KeyCode::Char('v'), KeyModifiers::ALT)),
            Some(Action::Move(Motion::PageUp))
        );
    }

    #[test]
    fn test_release_ignored() {
        let mut input = InputState::new();
        let mut event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(input.translate(Event::Key(event)), None);
    }

    #[test]
    fn test_mouse() {
        let mut input = InputState::new();
        assert_eq!(
            input.translate(mouse(MouseEventKind::Down(MouseButton::Left), 4, 2)),
            Some(Action::Click(ScreenPoint::new(4, 2)))
        );
        assert_eq!(
            input.translate(mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(Action::Scroll(-3))
        );
        assert_eq!(input.translate(mouse(MouseEventKind::Moved, 1, 1)), None);
        assert_eq!(input.translate(Event::Resize(80, 24)), Some(Action::Resize));
    }
}
