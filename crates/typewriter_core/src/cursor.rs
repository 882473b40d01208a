//! Cursors and selections
//!
//! Positions are code-point offsets in `0..=length`. A cursor with a
//! selection always sits on one edge of it; the other edge is the anchor.

use serde::{Deserialize, Serialize};

/// A half-open code-point range `start..end` with `start < end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection between two offsets in either order.
    ///
    /// Returns `None` when both offsets are equal.
    pub fn between(a: usize, b: usize) -> Option<Self> {
        if a == b {
            None
        } else {
            Some(Self {
                start: a.min(b),
                end: a.max(b),
            })
        }
    }

    /// The edge that stays put while `position` moves.
    pub fn anchor(&self, position: usize) -> usize {
        if position == self.start {
            self.end
        } else {
            self.start
        }
    }

    /// Whether `position` falls inside the selected range.
    pub fn covers(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }

    /// Whether `position` is the start or the end of the selection.
    pub fn has_edge(&self, position: usize) -> bool {
        position == self.start || position == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// One caret in the shared buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub position: usize,
    pub name: String,
    pub selection: Option<Selection>,
    /// Idle cursors blink; a cursor that just acted is solid until `blinkAfter` elapses.
    pub is_blinking: bool,
}

impl Cursor {
    pub fn new(position: usize, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            selection: None,
            is_blinking: true,
        }
    }

    /// Attach a selection; the caller keeps `position` on one of its edges.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Check the cursor invariants against a buffer of `length` code points.
    pub fn is_valid_for(&self, length: usize) -> bool {
        if self.position > length {
            return false;
        }
        match self.selection {
            Some(selection) => {
                selection.start < selection.end
                    && selection.end <= length
                    && selection.has_edge(self.position)
            }
            None => true,
        }
    }
}
