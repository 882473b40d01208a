//! Bounded event history

use std::collections::VecDeque;

use crate::events::TypewriterEvent;

/// An emitted event and the engine time (ms) at which it was emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub time: u64,
    pub event: TypewriterEvent,
}

/// Ring buffer of the most recent events.
///
/// Once over capacity the oldest entry is dropped. A capacity of zero keeps nothing.
#[derive(Clone, Debug, Default)]
pub struct History {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, time: u64, event: TypewriterEvent) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry { time, event });
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn events(&self) -> impl Iterator<Item = &TypewriterEvent> {
        self.entries.iter().map(|entry| &entry.event)
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = History::new(0);
        history.push(0, TypewriterEvent::Playing);
        assert!(history.is_empty());
    }

    #[test]
    fn test_drops_oldest_over_capacity() {
        let mut history = History::new(2);
        history.push(0, TypewriterEvent::Initialized);
        history.push(5, TypewriterEvent::Playing);
        history.push(9, TypewriterEvent::Paused);

        let kinds: Vec<_> = history.events().map(TypewriterEvent::kind).collect();
        assert_eq!(kinds, vec![EventKind::Playing, EventKind::Paused]);
        assert_eq!(history.last().map(|entry| entry.time), Some(9));
    }
}
