//! The text buffer and the cursors that share it.

use crate::cursor::Cursor;
use crate::edit::Edit;
use crate::iter::Positions;

/// Text plus cursors, indexed by Unicode code point.
///
/// A multi-byte glyph such as an emoji occupies exactly one position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    cursors: Vec<Cursor>,
}

impl Document {
    /// Build a document from already validated parts.
    pub fn new(text: impl Into<String>, cursors: Vec<Cursor>) -> Self {
        Self {
            text: text.into(),
            cursors,
        }
    }

    /// Document with a single unnamed cursor at `position`.
    pub fn with_cursor(text: impl Into<String>, position: usize) -> Self {
        Self::new(text, vec![Cursor::new(position, "")])
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in code points.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    pub fn cursor(&self, index: usize) -> Option<&Cursor> {
        self.cursors.get(index)
    }

    pub(crate) fn cursor_mut(&mut self, index: usize) -> Option<&mut Cursor> {
        self.cursors.get_mut(index)
    }

    /// Mutable access to every cursor, used for bulk visual state updates.
    pub fn cursors_mut(&mut self) -> impl Iterator<Item = &mut Cursor> {
        self.cursors.iter_mut()
    }

    /// Set the blink state of one cursor. Returns false for an unknown index.
    pub fn set_blinking(&mut self, index: usize, is_blinking: bool) -> bool {
        match self.cursors.get_mut(index) {
            Some(cursor) => {
                cursor.is_blinking = is_blinking;
                true
            }
            None => false,
        }
    }

    /// Lazy per-position view over the text and cursors.
    pub fn positions(&self) -> Positions<'_> {
        Positions::new(&self.text, &self.cursors)
    }

    /// Replace `edit.start..edit.end` with `insert` and carry every cursor
    /// except `acting` through the edit.
    ///
    /// The acting cursor is left untouched; the interpreter positions it.
    pub(crate) fn apply_edit(&mut self, edit: Edit, insert: &str, acting: usize) {
        let from = byte_offset(&self.text, edit.start);
        let to = byte_offset(&self.text, edit.end);
        self.text.replace_range(from..to, insert);

        for (index, cursor) in self.cursors.iter_mut().enumerate() {
            if index != acting {
                edit.remap_cursor(cursor);
            }
        }
    }
}

/// Byte offset of the code point at `index`, or the end of the string.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}
