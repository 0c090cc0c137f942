//! Editor state and main loop

use crate::command;
use crate::display::Display;
use crate::engine::DecorationEngine;
use crate::error::Result;
use crate::host::Host;
use crate::input::{Action, InputState};
use crate::span::ScreenPoint;
use crate::terminal::Terminal;
use crate::view::DocumentView;

/// Rows below the window: mode line and minibuffer
const RESERVED_ROWS: u16 = 2;

/// Window height for a terminal of `rows` rows
pub fn window_height(rows: u16) -> usize {
    usize::from(rows.saturating_sub(RESERVED_ROWS).max(1))
}

/// Main editor state
pub struct EditorState {
    /// The open document
    pub view: DocumentView,
    /// Decoration engine, run before every frame
    pub engine: DecorationEngine,
    /// Terminal interface
    pub terminal: Terminal,
    /// Display state
    pub display: Display,
    /// Input state
    pub input: InputState,
    /// Whether editor is running
    pub running: bool,
}

impl EditorState {
    pub fn new(terminal: Terminal, view: DocumentView, engine: DecorationEngine) -> Self {
        Self {
            view,
            engine,
            terminal,
            display: Display::new(),
            input: InputState::new(),
            running: true,
        }
    }

    /// Main editor loop
    pub fn run(&mut self) -> Result<()> {
        self.handle_resize()?;
        self.display.force_redraw();

        while self.running {
            self.decorate();
            self.display.render(&mut self.terminal, &self.view)?;

            let event = self.terminal.read_event()?;
            if let Some(action) = self.input.translate(event) {
                self.display.clear_message();
                self.handle_action(action)?;
            } else if self.input.is_meta_pending() {
                self.display.set_message("ESC -");
            }
        }

        Ok(())
    }

    /// Decorate whatever is in view
    fn decorate(&mut self) {
        match command::execute("render-all-tags", &self.engine, &mut self.view) {
            Ok(report) if report.created > 0 => {
                tracing::debug!(
                    created = report.created,
                    live = self.view.tracker.len(),
                    "decorated viewport"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "decoration pass aborted");
                self.display.set_message(format!("Decoration failed: {e}"));
            }
        }
    }

    /// Handle one translated input action
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Move(motion) => self.view.move_cursor(motion),
            Action::Insert(ch) => self.view.insert_char(ch),
            Action::Newline => self.view.insert_newline(),
            Action::Backspace => self.view.delete_backward(),
            Action::Click(point) => self.handle_click(point),
            Action::Scroll(lines) => self.view.scroll(lines),
            Action::Resize => self.handle_resize()?,
            Action::Redraw => self.display.force_redraw(),
            Action::Quit => self.running = false,
        }
        Ok(())
    }

    /// A click on a widget reverts it; anywhere else moves the cursor
    fn handle_click(&mut self, point: ScreenPoint) {
        let revert = self
            .display
            .widget_at(point)
            .and_then(|id| self.view.decoration(id))
            .map(|d| d.revert_action());

        let result = match revert {
            Some(action) => {
                tracing::debug!(decoration = %action.decoration, x = point.x, y = point.y, "widget clicked");
                action.activate(&mut self.view, point)
            }
            None => self
                .view
                .position_at(point)
                .map(|pos| self.view.set_cursor(pos)),
        };

        if let Err(e) = result {
            tracing::trace!(error = %e, "click ignored");
        }
    }

    /// Fit the window to the terminal
    fn handle_resize(&mut self) -> Result<()> {
        self.terminal.update_size()?;
        self.view
            .window
            .set_height(window_height(self.terminal.rows()));
        self.view.window.ensure_cursor_visible(self.engine.config().scroll_margin);
        self.display.force_redraw();
        Ok(())
    }
}
