//! Per-position view over text and cursors
//!
//! Yields one [`PositionView`] for every offset `0..=length`; the final
//! offset has no character and represents the end of the text.

use std::str::Chars;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cursor::Cursor;

/// What sits at one code-point offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionView<'a> {
    pub position: usize,
    /// `None` at the end of the text.
    pub character: Option<char>,
    /// Cursors whose position is exactly here.
    pub cursors: SmallVec<[&'a Cursor; 2]>,
    /// Cursors whose selection covers this offset.
    pub selected: SmallVec<[&'a Cursor; 2]>,
}

/// Lazy, finite iterator produced by `Document::positions`.
pub struct Positions<'a> {
    chars: Chars<'a>,
    cursors: &'a [Cursor],
    by_position: FxHashMap<usize, SmallVec<[usize; 2]>>,
    position: usize,
    done: bool,
}

impl<'a> Positions<'a> {
    pub fn new(text: &'a str, cursors: &'a [Cursor]) -> Self {
        let mut by_position: FxHashMap<usize, SmallVec<[usize; 2]>> = FxHashMap::default();
        for (index, cursor) in cursors.iter().enumerate() {
            by_position.entry(cursor.position).or_default().push(index);
        }

        Self {
            chars: text.chars(),
            cursors,
            by_position,
            position: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Positions<'a> {
    type Item = PositionView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let all: &'a [Cursor] = self.cursors;
        let position = self.position;
        let character = self.chars.next();
        if character.is_none() {
            self.done = true;
        }
        self.position += 1;

        let cursors: SmallVec<[&'a Cursor; 2]> = self
            .by_position
            .get(&position)
            .map(|indices| indices.iter().map(|&index| &all[index]).collect())
            .unwrap_or_default();
        let selected: SmallVec<[&'a Cursor; 2]> = all
            .iter()
            .filter(|cursor| {
                cursor
                    .selection
                    .is_some_and(|selection| selection.covers(position))
            })
            .collect();

        Some(PositionView {
            position,
            character,
            cursors,
            selected,
        })
    }
}
