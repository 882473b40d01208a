//! Queued keyboard and mouse actions
//!
//! Actions serialize with a `type` tag:
//!
//! ```toml
//! [[actions]]
//! type = "keyboard"
//! key = "h"
//! delay = 100
//! cursor = 0
//!
//! [[actions]]
//! type = "mouse"
//! position = 0
//! delay = 300
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cursor::Selection;

/// A keyboard key: either literal text or one of the editing sentinels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    /// Literal text inserted at the cursor, one or more code points.
    Text(String),
    Backspace,
    ClearAll,
    Left,
    Right,
    SelectLeft,
    SelectRight,
}

impl Key {
    pub fn text(text: impl Into<String>) -> Self {
        Key::Text(text.into())
    }

    /// Parse a key name; anything that is not a sentinel is literal text.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Backspace" => Key::Backspace,
            "ClearAll" => Key::ClearAll,
            "Left" => Key::Left,
            "Right" => Key::Right,
            "SelectLeft" => Key::SelectLeft,
            "SelectRight" => Key::SelectRight,
            text => Key::Text(text.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Key::Text(text) => text,
            Key::Backspace => "Backspace",
            Key::ClearAll => "ClearAll",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::SelectLeft => "SelectLeft",
            Key::SelectRight => "SelectRight",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Key::Text(_))
    }
}

impl From<String> for Key {
    fn from(raw: String) -> Self {
        match Key::parse(&raw) {
            Key::Text(_) => Key::Text(raw),
            sentinel => sentinel,
        }
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Key::parse(raw)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Text(text) => text,
            sentinel => sentinel.as_str().to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an action does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionKind {
    Keyboard {
        key: Key,
    },
    /// A click at `position`, or a drag-select when `selection` is given.
    Mouse {
        position: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selection: Option<Selection>,
    },
}

/// One step of the replay queue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    pub kind: ActionKind,
    /// Milliseconds to wait before the action is performed.
    pub delay: i64,
    /// Index of the cursor performing the action.
    #[serde(default)]
    pub cursor: usize,
}

impl Action {
    pub fn keyboard(key: impl Into<Key>, delay: i64, cursor: usize) -> Self {
        Self {
            kind: ActionKind::Keyboard { key: key.into() },
            delay,
            cursor,
        }
    }

    pub fn mouse(position: usize, delay: i64, cursor: usize) -> Self {
        Self {
            kind: ActionKind::Mouse {
                position,
                selection: None,
            },
            delay,
            cursor,
        }
    }

    pub fn drag(position: usize, selection: Selection, delay: i64, cursor: usize) -> Self {
        Self {
            kind: ActionKind::Mouse {
                position,
                selection: Some(selection),
            },
            delay,
            cursor,
        }
    }

    /// Validated delay in milliseconds.
    pub fn delay_ms(&self) -> u64 {
        self.delay.max(0) as u64
    }
}
