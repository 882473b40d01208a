//! Coordinate remapping
//!
//! Every mutation of the buffer is described as "replace the half-open range
//! `start..end` with `inserted` code points". Pure insertions have
//! `start == end`; pure deletions have `inserted == 0`. Coordinates that are
//! not owned by the acting cursor are carried through the edit with [`Edit::remap`].

use crate::cursor::{Cursor, Selection};

/// A single replace operation in code-point coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub inserted: usize,
}

impl Edit {
    pub fn insert(at: usize, inserted: usize) -> Self {
        Self {
            start: at,
            end: at,
            inserted,
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            inserted: 0,
        }
    }

    /// Number of code points removed by this edit.
    pub fn removed(&self) -> usize {
        self.end - self.start
    }

    /// Map a coordinate from before the edit to after it.
    ///
    /// Offsets at the start of the edit never move, so a pure insertion leaves
    /// coordinates equal to the insertion point in place.
    pub fn remap(&self, x: usize) -> usize {
        if x <= self.start {
            x
        } else if x < self.end {
            self.start + self.inserted
        } else {
            x - self.removed() + self.inserted
        }
    }

    /// Carry a bystander cursor through the edit.
    ///
    /// A selection whose edges meet after remapping is dropped.
    pub fn remap_cursor(&self, cursor: &mut Cursor) {
        cursor.position = self.remap(cursor.position);
        cursor.selection = cursor
            .selection
            .and_then(|selection| self.remap_selection(selection));
    }

    pub fn remap_selection(&self, selection: Selection) -> Option<Selection> {
        let start = self.remap(selection.start);
        let end = self.remap(selection.end);
        if start >= end {
            None
        } else {
            Some(Selection { start, end })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_coordinates_at_insertion_point() {
        let edit = Edit::insert(2, 3);
        assert_eq!(edit.remap(0), 0);
        assert_eq!(edit.remap(2), 2);
        assert_eq!(edit.remap(3), 6);
    }

    #[test]
    fn test_delete_collapses_interior_coordinates() {
        let edit = Edit::delete(2, 5);
        assert_eq!(edit.remap(1), 1);
        assert_eq!(edit.remap(2), 2);
        assert_eq!(edit.remap(4), 2);
        assert_eq!(edit.remap(5), 2);
        assert_eq!(edit.remap(7), 4);
    }

    #[test]
    fn test_replace_maps_interior_to_end_of_insertion() {
        let edit = Edit {
            start: 1,
            end: 4,
            inserted: 2,
        };
        assert_eq!(edit.remap(2), 3);
        assert_eq!(edit.remap(4), 3);
        assert_eq!(edit.remap(6), 5);
    }

    #[test]
    fn test_selection_swallowed_by_delete_is_dropped() {
        let edit = Edit::delete(0, 6);
        let mut cursor = Cursor::new(4, "other").with_selection(Selection { start: 2, end: 4 });
        edit.remap_cursor(&mut cursor);
        assert_eq!(cursor.position, 0);
        assert_eq!(cursor.selection, None);
    }

    #[test]
    fn test_partially_deleted_selection_shrinks() {
        let edit = Edit::delete(2, 4);
        let mut cursor = Cursor::new(3, "other").with_selection(Selection { start: 1, end: 3 });
        edit.remap_cursor(&mut cursor);
        assert_eq!(cursor.position, 2);
        assert_eq!(cursor.selection, Some(Selection { start: 1, end: 2 }));
    }
}
