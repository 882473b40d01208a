//! Typewriter Core
//!
//! This crate provides the model layer of the typewriter animation engine:
//!
//! - **Text/Cursor Model**: a code-point indexed buffer shared by any number of cursors
//! - **Coordinate Remap**: keeps every cursor and selection consistent under edits
//! - **Action Interpreter**: turns one queued keyboard/mouse action into a new model
//! - **Playback State Machine**: typed play/pause/stop/finish transitions
//! - **Events & History**: subscriber dispatch and a bounded event log
//!
//! Timing lives in `typewriter_animation`; everything here is pure and synchronous.
//!
//! # Example
//!
//! ```rust
//! use typewriter_core::{interpret, Action, Document, Interpretation, Key};
//!
//! let document = Document::with_cursor("ab", 0);
//! let action = Action::keyboard(Key::text("x"), 100, 0);
//!
//! match interpret(&document, &action) {
//!     Interpretation::Changed(next) => assert_eq!(next.text(), "xab"),
//!     Interpretation::Ignored => unreachable!(),
//! }
//! ```

pub mod action;
pub mod config;
pub mod cursor;
pub mod document;
pub mod edit;
pub mod error;
pub mod events;
pub mod fsm;
pub mod history;
pub mod interpreter;
pub mod iter;

pub use action::{Action, ActionKind, Key};
pub use config::{CursorConfig, Repeat, SelectionConfig, TypewriterConfig, ValidatedConfig};
pub use cursor::{Cursor, Selection};
pub use document::Document;
pub use edit::Edit;
pub use error::{ConfigError, TypewriterError};
pub use events::{EventDispatcher, EventKind, SubscriberId, TypewriterEvent};
pub use fsm::{PlaybackCommand, PlaybackMachine, PlaybackState, Transition};
pub use history::{History, HistoryEntry};
pub use interpreter::{interpret, Interpretation};
pub use iter::{PositionView, Positions};
