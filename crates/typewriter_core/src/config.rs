//! Typewriter configuration
//!
//! The configuration is plain data, loadable from TOML or JSON, and validated
//! eagerly into a [`ValidatedConfig`] before an engine is built from it.
//!
//! ```toml
//! text = ""
//! blinkAfter = 250
//! repeat = 3
//! repeatDelay = 1000
//!
//! [[cursors]]
//! position = 0
//! name = "alice"
//!
//! [[actions]]
//! type = "keyboard"
//! key = "h"
//! delay = 100
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::cursor::{Cursor, Selection};
use crate::document::Document;
use crate::error::{ConfigError, TypewriterError};

/// How many passes over the action queue to play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RepeatValue", into = "RepeatValue")]
pub enum Repeat {
    /// One pass.
    #[default]
    Never,
    /// Loop until stopped.
    Forever,
    /// Play this many passes in total.
    Times(i64),
}

impl Repeat {
    /// Whether another pass follows after `completed` passes.
    pub fn allows_another(&self, completed: u64) -> bool {
        match *self {
            Repeat::Never => false,
            Repeat::Forever => true,
            Repeat::Times(times) => completed < times.max(0) as u64,
        }
    }
}

/// Wire shape of [`Repeat`]: `false`, `true` or a pass count.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RepeatValue {
    Flag(bool),
    Count(i64),
}

impl From<RepeatValue> for Repeat {
    fn from(value: RepeatValue) -> Self {
        match value {
            RepeatValue::Flag(false) => Repeat::Never,
            RepeatValue::Flag(true) => Repeat::Forever,
            RepeatValue::Count(times) => Repeat::Times(times),
        }
    }
}

impl From<Repeat> for RepeatValue {
    fn from(repeat: Repeat) -> Self {
        match repeat {
            Repeat::Never => RepeatValue::Flag(false),
            Repeat::Forever => RepeatValue::Flag(true),
            Repeat::Times(times) => RepeatValue::Count(times),
        }
    }
}

/// Raw selection as written in a config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub start: i64,
    pub end: i64,
}

/// Raw cursor as written in a config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorConfig {
    pub position: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionConfig>,
}

impl CursorConfig {
    pub fn new(position: i64, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            selection: None,
        }
    }

    pub fn with_selection(mut self, start: i64, end: i64) -> Self {
        self.selection = Some(SelectionConfig { start, end });
        self
    }

    fn validate(&self, index: usize, length: usize) -> Result<Cursor, TypewriterError> {
        let position = self.position;
        if position < 0 || position > length as i64 {
            return Err(TypewriterError::CursorOutOfBounds {
                cursor: index,
                position,
                length,
            });
        }

        let mut cursor = Cursor::new(position as usize, self.name.clone());
        if let Some(SelectionConfig { start, end }) = self.selection {
            if start < 0 || end > length as i64 {
                return Err(TypewriterError::CursorSelectionOutOfBounds {
                    cursor: index,
                    start,
                    end,
                    length,
                });
            }
            if start >= end {
                return Err(TypewriterError::CursorSelectionInvalidRange {
                    cursor: index,
                    start,
                    end,
                });
            }
            if position != start && position != end {
                return Err(TypewriterError::CursorNotAtSelectionEdge {
                    cursor: index,
                    position,
                    start,
                    end,
                });
            }
            cursor.selection = Some(Selection {
                start: start as usize,
                end: end as usize,
            });
        }
        Ok(cursor)
    }
}

fn default_blink_after() -> i64 {
    250
}

fn default_true() -> bool {
    true
}

/// Everything needed to build a typewriter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypewriterConfig {
    #[serde(default)]
    pub text: String,
    /// Empty means one unnamed cursor at the end of `text`.
    #[serde(default)]
    pub cursors: Vec<CursorConfig>,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Milliseconds of inactivity after which a cursor starts blinking.
    #[serde(default = "default_blink_after")]
    pub blink_after: i64,
    #[serde(default)]
    pub repeat: Repeat,
    /// Milliseconds between the end of one pass and the start of the next.
    #[serde(default)]
    pub repeat_delay: i64,
    /// Number of events kept in history; zero keeps none.
    #[serde(default)]
    pub keep_history_for: usize,
    #[serde(default = "default_true")]
    pub auto_play: bool,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursors: Vec::new(),
            actions: Vec::new(),
            blink_after: default_blink_after(),
            repeat: Repeat::Never,
            repeat_delay: 0,
            keep_history_for: 0,
            auto_play: true,
        }
    }
}

impl TypewriterConfig {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_cursor(mut self, cursor: CursorConfig) -> Self {
        self.cursors.push(cursor);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn with_blink_after(mut self, blink_after: i64) -> Self {
        self.blink_after = blink_after;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_repeat_delay(mut self, repeat_delay: i64) -> Self {
        self.repeat_delay = repeat_delay;
        self
    }

    pub fn with_history(mut self, keep_history_for: usize) -> Self {
        self.keep_history_for = keep_history_for;
        self
    }

    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Parse a TOML config without validating it.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Parse a JSON config without validating it.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a config file: `.json` files as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every constraint and convert into engine-ready values.
    ///
    /// Checks run in a fixed order and the first failure is reported.
    pub fn validate(&self) -> Result<ValidatedConfig, TypewriterError> {
        if self.blink_after <= 0 {
            return Err(TypewriterError::BlinkAfter {
                blink_after: self.blink_after,
            });
        }

        if let Some((index, action)) = self
            .actions
            .iter()
            .enumerate()
            .find(|(_, action)| action.delay <= 0)
        {
            return Err(TypewriterError::Delay {
                index,
                delay: action.delay,
            });
        }

        if let Repeat::Times(repeat) = self.repeat {
            if repeat <= 0 {
                return Err(TypewriterError::Repeat { repeat });
            }
        }

        if self.repeat_delay < 0 {
            return Err(TypewriterError::RepeatDelay {
                repeat_delay: self.repeat_delay,
            });
        }

        let cursor_count = self.cursors.len().max(1);
        if let Some((index, action)) = self
            .actions
            .iter()
            .enumerate()
            .find(|(_, action)| action.cursor >= cursor_count)
        {
            return Err(TypewriterError::ActionUnknownCursor {
                index,
                cursor: action.cursor,
            });
        }

        let length = self.text.chars().count();
        let cursors = if self.cursors.is_empty() {
            vec![Cursor::new(length, "")]
        } else {
            self.cursors
                .iter()
                .enumerate()
                .map(|(index, cursor)| cursor.validate(index, length))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(ValidatedConfig {
            document: Document::new(self.text.clone(), cursors),
            actions: self.actions.clone(),
            blink_after: self.blink_after as u64,
            repeat: self.repeat,
            repeat_delay: self.repeat_delay as u64,
            keep_history_for: self.keep_history_for,
            auto_play: self.auto_play,
        })
    }
}

/// A configuration that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub document: Document,
    pub actions: Vec<Action>,
    pub blink_after: u64,
    pub repeat: Repeat,
    pub repeat_delay: u64,
    pub keep_history_for: usize,
    pub auto_play: bool,
}
