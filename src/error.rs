//! Error types for markdeco

use thiserror::Error;

/// Result type alias for markdeco operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("No such line: {0}")]
    NoSuchLine(usize),

    #[error("Screen position ({x}, {y}) is outside the text area")]
    OutOfView { x: u16, y: u16 },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0}")]
    Message(String),
}
