//! Capabilities the decoration engine needs from its host editor
//!
//! The engine never stores decorations itself. Buffer storage, viewport
//! tracking, coordinate mapping and the decoration registry all live behind
//! this trait; [`crate::view::DocumentView`] is the implementation used by
//! the `markdeco` binary.

use std::ops::Range;

use crate::decoration::{DecorationId, MarkOptions};
use crate::error::Result;
use crate::span::{Position, ScreenPoint, Span};
use crate::widget::Widget;

pub trait Host {
    /// Visible lines, exclusive upper bound
    fn viewport(&self) -> Range<usize>;

    /// Mode tag at the start of a line (e.g. `"markdown"`)
    fn line_mode(&self, line: usize) -> Result<&str>;

    /// Raw text of a line
    fn line_text(&self, line: usize) -> Result<&str>;

    /// Primary cursor position
    fn cursor(&self) -> Position;

    /// Live decorations overlapping `span`
    fn find_overlapping(&self, span: &Span) -> Vec<DecorationId>;

    /// Register a decoration replacing `span` with `widget`
    fn create_decoration(
        &mut self,
        span: Span,
        widget: Widget,
        options: MarkOptions,
    ) -> Result<DecorationId>;

    /// Remove a decoration. Returns false if it was already gone.
    fn clear_decoration(&mut self, id: DecorationId) -> bool;

    /// Map a screen cell to a document position
    fn position_at(&self, point: ScreenPoint) -> Result<Position>;

    fn set_cursor(&mut self, pos: Position);

    /// Return keyboard focus to the document
    fn focus(&mut self);
}
