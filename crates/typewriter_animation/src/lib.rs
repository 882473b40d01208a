//! Typewriter Animation Engine
//!
//! Timed playback of a keyboard/mouse action queue over a shared text buffer.
//!
//! # Features
//!
//! - **Virtual Time**: one-shot timers on a deterministic, host-driven clock
//! - **Generation Tokens**: timers armed before a reset never fire
//! - **Blink Debounce**: cursors go solid on change and blink once idle
//! - **Playback Control**: play, pause (keeps remaining time), stop, repeat
//!
//! # Example
//!
//! ```rust
//! use typewriter_animation::Typewriter;
//! use typewriter_core::{Action, TypewriterConfig};
//!
//! let config = TypewriterConfig::default()
//!     .with_actions([Action::keyboard("h", 100, 0), Action::keyboard("i", 100, 0)]);
//! let mut typewriter = Typewriter::new(config).unwrap();
//!
//! typewriter.advance(200);
//! assert_eq!(typewriter.text(), "hi");
//! assert!(typewriter.is_finished());
//! ```

pub mod clock;
pub mod scheduler;
pub mod typewriter;

pub use clock::FrameClock;
pub use scheduler::{TimerId, TimerKind, TimerScheduler};
pub use typewriter::Typewriter;
