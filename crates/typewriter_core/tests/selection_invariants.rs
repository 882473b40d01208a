//! Property-based invariant tests for the text/cursor model.
//!
//! Verifies, for arbitrary documents and action sequences:
//! 1. Every cursor position stays within `0..=len`
//! 2. Every selection stays non-empty, in bounds, with the cursor on an edge
//! 3. Literal inserts and drag-selects are never ignored
//! 4. Inserting text grows the buffer by exactly its code point count
//! 5. Bystander cursors never move across one another

use proptest::prelude::*;
use typewriter_core::{interpret, Action, ActionKind, Cursor, Document, Interpretation, Key, Selection};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_glyph() -> impl Strategy<Value = char> {
    prop_oneof![
        Just('a'),
        Just('b'),
        Just(' '),
        Just('é'),
        Just('😀'),
        Just('中'),
    ]
}

fn arb_text(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_glyph(), 0..=max).prop_map(|chars| chars.into_iter().collect())
}

fn arb_cursor(length: usize) -> impl Strategy<Value = Cursor> {
    (0..=length, 0..=length, any::<bool>()).prop_map(move |(a, b, use_a_as_position)| {
        match Selection::between(a, b) {
            Some(selection) => {
                let position = if use_a_as_position { a } else { b };
                Cursor::new(position, "").with_selection(selection)
            }
            None => Cursor::new(a, ""),
        }
    })
}

fn arb_document() -> impl Strategy<Value = Document> {
    arb_text(12).prop_flat_map(|text| {
        let length = text.chars().count();
        prop::collection::vec(arb_cursor(length), 1..=3)
            .prop_map(move |cursors| Document::new(text.clone(), cursors))
    })
}

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        arb_text(3).prop_map(Key::Text),
        Just(Key::Backspace),
        Just(Key::ClearAll),
        Just(Key::Left),
        Just(Key::Right),
        Just(Key::SelectLeft),
        Just(Key::SelectRight),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (arb_key(), 0usize..3).prop_map(|(key, cursor)| Action::keyboard(key, 10, cursor)),
        1 => (0usize..20, 0usize..3).prop_map(|(position, cursor)| Action::mouse(position, 10, cursor)),
        1 => (0usize..20, 0usize..20, 0usize..20, 0usize..3).prop_map(|(position, a, b, cursor)| {
            match Selection::between(a, b) {
                Some(selection) => Action::drag(position, selection, 10, cursor),
                None => Action::mouse(position, 10, cursor),
            }
        }),
    ]
}

fn apply(document: &Document, action: &Action) -> Document {
    match interpret(document, action) {
        Interpretation::Changed(next) => next,
        Interpretation::Ignored => document.clone(),
    }
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn cursors_stay_valid_under_any_action_sequence(
        document in arb_document(),
        actions in prop::collection::vec(arb_action(), 0..24),
    ) {
        let mut document = document;
        for action in &actions {
            document = apply(&document, action);
            let length = document.len();
            for cursor in document.cursors() {
                prop_assert!(
                    cursor.is_valid_for(length),
                    "cursor {:?} invalid for length {} after {:?}",
                    cursor,
                    length,
                    action
                );
            }
        }
    }

    #[test]
    fn inserts_and_drags_are_never_ignored(
        document in arb_document(),
        action in arb_action(),
    ) {
        let always_changes = match &action.kind {
            ActionKind::Keyboard { key } => key.is_text(),
            ActionKind::Mouse { selection, .. } => selection.is_some(),
        };
        if always_changes && action.cursor < document.cursors().len() {
            prop_assert!(interpret(&document, &action).is_change());
        }
    }

    #[test]
    fn insert_grows_buffer_by_inserted_code_points(
        text in arb_text(8),
        position_seed in any::<usize>(),
        inserted in arb_text(4).prop_filter("non-empty insert", |text| !text.is_empty()),
    ) {
        let length = text.chars().count();
        let position = position_seed % (length + 1);
        let document = Document::with_cursor(text, position);

        let next = apply(&document, &Action::keyboard(Key::Text(inserted.clone()), 10, 0));
        prop_assert_eq!(next.len(), length + inserted.chars().count());
        prop_assert_eq!(next.cursors()[0].position, position + inserted.chars().count());
    }

    #[test]
    fn bystander_cursor_order_is_preserved(
        text in arb_text(10),
        seeds in (any::<usize>(), any::<usize>(), any::<usize>()),
        action in arb_action().prop_map(|mut action| { action.cursor = 0; action }),
    ) {
        let length = text.chars().count();
        let (acting, low, high) = (seeds.0 % (length + 1), seeds.1 % (length + 1), seeds.2 % (length + 1));
        let (low, high) = (low.min(high), low.max(high));
        let document = Document::new(
            text,
            vec![Cursor::new(acting, "acting"), Cursor::new(low, "low"), Cursor::new(high, "high")],
        );

        let next = apply(&document, &action);
        prop_assert!(next.cursors()[1].position <= next.cursors()[2].position);
    }
}
