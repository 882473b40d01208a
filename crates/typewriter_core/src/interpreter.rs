//! Action interpreter
//!
//! Applies the action at the head of the queue to a [`Document`] and classifies
//! the outcome. An action either produces a new document (a real change) or is
//! ignored; it never fails. Ignored actions still complete for sequencing.

use crate::action::{Action, ActionKind, Key};
use crate::cursor::Selection;
use crate::document::Document;
use crate::edit::Edit;

/// Result of interpreting one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interpretation {
    /// The action mutated text or cursor state.
    Changed(Document),
    /// The action had nothing to do (e.g. Backspace at position 0).
    Ignored,
}

impl Interpretation {
    pub fn is_change(&self) -> bool {
        matches!(self, Interpretation::Changed(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Interpret `action` against `document`.
pub fn interpret(document: &Document, action: &Action) -> Interpretation {
    let index = action.cursor;
    if document.cursor(index).is_none() {
        tracing::warn!(cursor = index, "action targets a missing cursor, ignoring");
        return Interpretation::Ignored;
    }

    let outcome = match &action.kind {
        ActionKind::Keyboard { key } => match key {
            Key::Text(text) => Some(insert_text(document, index, text)),
            Key::Backspace => backspace(document, index),
            Key::ClearAll => clear_all(document),
            Key::Left => step(document, index, Direction::Left),
            Key::Right => step(document, index, Direction::Right),
            Key::SelectLeft => extend_selection(document, index, Direction::Left),
            Key::SelectRight => extend_selection(document, index, Direction::Right),
        },
        ActionKind::Mouse {
            position,
            selection: None,
        } => click(document, index, *position),
        ActionKind::Mouse {
            position,
            selection: Some(selection),
        } => Some(drag_select(document, index, *position, *selection)),
    };

    outcome.map_or(Interpretation::Ignored, Interpretation::Changed)
}

/// Remove the acting cursor's selection from the text and park the cursor at its start.
fn delete_selection(document: &mut Document, index: usize, selection: Selection) {
    document.apply_edit(Edit::delete(selection.start, selection.end), "", index);
    if let Some(cursor) = document.cursor_mut(index) {
        cursor.position = selection.start;
        cursor.selection = None;
    }
}

fn insert_text(document: &Document, index: usize, text: &str) -> Document {
    let mut next = document.clone();
    if let Some(selection) = next.cursor(index).and_then(|cursor| cursor.selection) {
        delete_selection(&mut next, index, selection);
    }

    let Some(position) = next.cursor(index).map(|cursor| cursor.position) else {
        return next;
    };
    let inserted = text.chars().count();
    next.apply_edit(Edit::insert(position, inserted), text, index);
    if let Some(cursor) = next.cursor_mut(index) {
        cursor.position = position + inserted;
    }
    next
}

fn backspace(document: &Document, index: usize) -> Option<Document> {
    let cursor = document.cursor(index)?;
    let mut next = document.clone();

    if let Some(selection) = cursor.selection {
        delete_selection(&mut next, index, selection);
        return Some(next);
    }

    if cursor.position == 0 {
        return None;
    }

    let position = cursor.position - 1;
    next.apply_edit(Edit::delete(position, cursor.position), "", index);
    if let Some(cursor) = next.cursor_mut(index) {
        cursor.position = position;
    }
    Some(next)
}

fn clear_all(document: &Document) -> Option<Document> {
    if document.is_empty() {
        return None;
    }

    let mut next = Document::new(String::new(), document.cursors().to_vec());
    for cursor in next.cursors_mut() {
        cursor.position = 0;
        cursor.selection = None;
    }
    Some(next)
}

fn step(document: &Document, index: usize, direction: Direction) -> Option<Document> {
    let cursor = document.cursor(index)?;
    let target = match (cursor.selection, direction) {
        (Some(selection), Direction::Left) => selection.start,
        (Some(selection), Direction::Right) => selection.end,
        (None, Direction::Left) => cursor.position.checked_sub(1)?,
        (None, Direction::Right) if cursor.position < document.len() => cursor.position + 1,
        (None, Direction::Right) => return None,
    };

    let mut next = document.clone();
    if let Some(cursor) = next.cursor_mut(index) {
        cursor.position = target;
        cursor.selection = None;
    }
    Some(next)
}

/// Move the selection's moving edge one code point, opening a width-1
/// selection when there is none.
///
/// Landing on the anchor drops the selection; the next step in the same
/// direction opens one on the far side of the anchor.
fn extend_selection(document: &Document, index: usize, direction: Direction) -> Option<Document> {
    let cursor = document.cursor(index)?;
    let position = cursor.position;
    let anchor = cursor
        .selection
        .map_or(position, |selection| selection.anchor(position));

    let moved = match direction {
        Direction::Left => position.checked_sub(1)?,
        Direction::Right if position < document.len() => position + 1,
        Direction::Right => return None,
    };

    let mut next = document.clone();
    if let Some(cursor) = next.cursor_mut(index) {
        cursor.position = moved;
        cursor.selection = Selection::between(anchor, moved);
    }
    Some(next)
}

fn click(document: &Document, index: usize, position: usize) -> Option<Document> {
    let cursor = document.cursor(index)?;
    let target = position.min(document.len());
    if target == cursor.position && cursor.selection.is_none() {
        return None;
    }

    let mut next = document.clone();
    if let Some(cursor) = next.cursor_mut(index) {
        cursor.position = target;
        cursor.selection = None;
    }
    Some(next)
}

/// Drag-select: take the given position and selection as-is, clamped to the buffer.
fn drag_select(
    document: &Document,
    index: usize,
    position: usize,
    selection: Selection,
) -> Document {
    let length = document.len();
    let selection = Selection::between(selection.start.min(length), selection.end.min(length));
    let position = match selection {
        Some(selection) if !selection.has_edge(position) => selection.end,
        _ => position.min(length),
    };

    let mut next = document.clone();
    if let Some(cursor) = next.cursor_mut(index) {
        cursor.position = position;
        cursor.selection = selection;
    }
    next
}
