//! Validation and config loading errors

use std::path::PathBuf;

use thiserror::Error;

/// Configuration rejected by eager validation.
///
/// Raised by `Typewriter::new` / `Typewriter::initialize` before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypewriterError {
    #[error("blinkAfter must be greater than zero, got {blink_after}")]
    BlinkAfter { blink_after: i64 },

    #[error("action {index} has delay {delay}, delays must be greater than zero")]
    Delay { index: usize, delay: i64 },

    #[error("repeat must be greater than zero, got {repeat}")]
    Repeat { repeat: i64 },

    #[error("repeatDelay must not be negative, got {repeat_delay}")]
    RepeatDelay { repeat_delay: i64 },

    #[error("action {index} targets cursor {cursor} which does not exist")]
    ActionUnknownCursor { index: usize, cursor: usize },

    #[error("cursor {cursor} position {position} is outside the text (length {length})")]
    CursorOutOfBounds {
        cursor: usize,
        position: i64,
        length: usize,
    },

    #[error("cursor {cursor} position {position} is not on an edge of its selection {start}..{end}")]
    CursorNotAtSelectionEdge {
        cursor: usize,
        position: i64,
        start: i64,
        end: i64,
    },

    #[error("cursor {cursor} selection {start}..{end} is outside the text (length {length})")]
    CursorSelectionOutOfBounds {
        cursor: usize,
        start: i64,
        end: i64,
        length: usize,
    },

    #[error("cursor {cursor} selection {start}..{end} is empty or reversed")]
    CursorSelectionInvalidRange { cursor: usize, start: i64, end: i64 },
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("toml config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("json config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] TypewriterError),
}
