//! markdeco - inline decoration of dialogue markup
//!
//! Lines in view that match one of the markup families (`@name`
//! attributions, `*` items, `>`/`$`/`~` sub-tags and `----` rules) are
//! replaced on screen by styled widgets. A widget goes away when the
//! cursor enters it or when it is clicked, leaving the raw text to edit.

pub mod buffer;
pub mod classify;
pub mod command;
pub mod config;
pub mod decoration;
pub mod display;
pub mod editor;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod line;
pub mod mode;
pub mod scan;
pub mod span;
pub mod style;
pub mod terminal;
pub mod tracker;
pub mod view;
pub mod widget;
pub mod window;

pub use classify::{Classifiers, DecorationKind, Family, MatchResult};
pub use config::Config;
pub use decoration::{Decoration, DecorationId, MarkOptions, RevertAction};
pub use engine::DecorationEngine;
pub use error::{EditorError, Result};
pub use host::Host;
pub use scan::ScanReport;
pub use span::{Position, ScreenPoint, Span};
pub use view::DocumentView;
pub use widget::{Segment, Widget, WidgetBody};
