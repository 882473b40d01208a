//! Event dispatch
//!
//! Events are delivered synchronously, in emission order, to every subscriber.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::action::Action;
use crate::cursor::Cursor;

/// Something observable happened to a typewriter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypewriterEvent {
    /// The typewriter was (re)initialized.
    Initialized,
    /// An action changed the text or a cursor; `cursor` is its state afterwards.
    Changed { action: Action, cursor: Cursor },
    /// The final pass ended with `action`.
    ///
    /// Blink timers still pending at this point keep running, so a trailing
    /// `Blinking` for the acting cursor follows `blinkAfter` ms later.
    Finished { action: Action, cursor: Cursor },
    /// A pass ended and the queue restarted from the beginning.
    Repeating { cursor: Cursor },
    Playing,
    Paused,
    Stopped,
    /// The cursor at this index went idle and started blinking.
    Blinking { cursor: usize },
}

impl TypewriterEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TypewriterEvent::Initialized => EventKind::Initialized,
            TypewriterEvent::Changed { .. } => EventKind::Changed,
            TypewriterEvent::Finished { .. } => EventKind::Finished,
            TypewriterEvent::Repeating { .. } => EventKind::Repeating,
            TypewriterEvent::Playing => EventKind::Playing,
            TypewriterEvent::Paused => EventKind::Paused,
            TypewriterEvent::Stopped => EventKind::Stopped,
            TypewriterEvent::Blinking { .. } => EventKind::Blinking,
        }
    }
}

/// Payload-free discriminant of [`TypewriterEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Initialized,
    Changed,
    Finished,
    Repeating,
    Playing,
    Paused,
    Stopped,
    Blinking,
}

impl EventKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::Initialized => "INITIALIZED",
            EventKind::Changed => "CHANGED",
            EventKind::Finished => "FINISHED",
            EventKind::Repeating => "REPEATING",
            EventKind::Playing => "PLAYING",
            EventKind::Paused => "PAUSED",
            EventKind::Stopped => "STOPPED",
            EventKind::Blinking => "BLINKING",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

new_key_type! {
    /// Handle returned by [`EventDispatcher::subscribe`]
    pub struct SubscriberId;
}

/// A subscriber receives each event together with a read-only view of its source.
pub type Subscriber<T> = Box<dyn Fn(&TypewriterEvent, &T) + Send>;

/// Dispatches events from a source `T` to registered subscribers
pub struct EventDispatcher<T> {
    subscribers: SlotMap<SubscriberId, Subscriber<T>>,
}

impl<T> EventDispatcher<T> {
    pub fn new() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
        }
    }

    /// Register a subscriber; keep the id to unsubscribe later.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriberId
    where
        F: Fn(&TypewriterEvent, &T) + Send + 'static,
    {
        self.subscribers.insert(Box::new(subscriber))
    }

    /// Remove a subscriber. Returns false when the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    /// Deliver an event to every subscriber
    pub fn dispatch(&self, event: &TypewriterEvent, source: &T) {
        for (_, subscriber) in self.subscribers.iter() {
            subscriber(event, source);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T> Default for EventDispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_reaches_every_subscriber() {
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            dispatcher.subscribe(move |event, source: &u32| {
                seen.lock().unwrap().push((tag, event.kind(), *source));
            });
        }

        dispatcher.dispatch(&TypewriterEvent::Playing, &7);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("first", EventKind::Playing, 7),
                ("second", EventKind::Playing, 7)
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut dispatcher: EventDispatcher<()> = EventDispatcher::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        let id = dispatcher.subscribe(move |_, _| *count_clone.lock().unwrap() += 1);

        dispatcher.dispatch(&TypewriterEvent::Paused, &());
        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        dispatcher.dispatch(&TypewriterEvent::Paused, &());

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(TypewriterEvent::Blinking { cursor: 0 }.kind().as_str(), "BLINKING");
        assert_eq!(EventKind::Repeating.to_string(), "REPEATING");
    }
}
