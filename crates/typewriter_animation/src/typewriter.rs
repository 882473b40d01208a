//! The typewriter engine.
//!
//! Replays a fixed queue of actions over a shared [`Document`], one timer at
//! a time. The engine owns a virtual clock: nothing happens until the host
//! calls [`Typewriter::advance`] (or [`Typewriter::run_to_completion`]),
//! and every timer that comes due runs to completion before the next one.

use std::time::Duration;

use typewriter_core::{
    interpret, Action, Cursor, Document, EventDispatcher, History, Interpretation,
    PlaybackCommand, PlaybackMachine, PlaybackState, Positions, Repeat, SubscriberId,
    TypewriterConfig, TypewriterError, TypewriterEvent, ValidatedConfig,
};

use crate::scheduler::{TimerId, TimerKind, TimerScheduler};

/// Animated typing over a shared buffer.
pub struct Typewriter {
    /// Live text and cursors.
    document: Document,
    /// Snapshot restored when playing again after finishing.
    initial: Document,
    /// Snapshot restored at the start of every pass.
    pass_start: Document,
    actions: Vec<Action>,
    blink_after: u64,
    repeat: Repeat,
    repeat_delay: u64,
    /// Index of the next action to perform.
    action_index: usize,
    /// Completed passes over the queue.
    passes: u64,
    playback: PlaybackMachine,
    has_been_stopped_before: bool,
    last_performed_action: Option<Action>,
    scheduler: TimerScheduler,
    /// The single armed action or repeat timer, if any.
    queue_timer: Option<TimerId>,
    blink_timers: Vec<Option<TimerId>>,
    history: History,
    dispatcher: EventDispatcher<Typewriter>,
}

impl Typewriter {
    /// Validate `config` and build a typewriter from it.
    ///
    /// Starts playing right away unless `autoPlay` is false or there are no actions.
    pub fn new(config: TypewriterConfig) -> Result<Self, TypewriterError> {
        let validated = config.validate()?;
        let mut typewriter = Self {
            document: Document::default(),
            initial: Document::default(),
            pass_start: Document::default(),
            actions: Vec::new(),
            blink_after: 0,
            repeat: Repeat::Never,
            repeat_delay: 0,
            action_index: 0,
            passes: 0,
            playback: PlaybackMachine::new(),
            has_been_stopped_before: false,
            last_performed_action: None,
            scheduler: TimerScheduler::new(),
            queue_timer: None,
            blink_timers: Vec::new(),
            history: History::new(0),
            dispatcher: EventDispatcher::new(),
        };
        typewriter.load(validated);
        Ok(typewriter)
    }

    /// Replace everything (text, cursors, actions, history, timers) with `config`.
    ///
    /// Subscribers are kept. On a validation error nothing changes.
    pub fn initialize(&mut self, config: TypewriterConfig) -> Result<(), TypewriterError> {
        let validated = config.validate()?;
        self.load(validated);
        Ok(())
    }

    fn load(&mut self, config: ValidatedConfig) {
        self.scheduler.reset();
        self.playback.send(PlaybackCommand::Reset);

        self.initial = config.document.clone();
        self.pass_start = config.document.clone();
        self.blink_timers = vec![None; config.document.cursors().len()];
        self.document = config.document;
        self.actions = config.actions;
        self.blink_after = config.blink_after;
        self.repeat = config.repeat;
        self.repeat_delay = config.repeat_delay;
        self.action_index = 0;
        self.passes = 0;
        self.has_been_stopped_before = false;
        self.last_performed_action = None;
        self.queue_timer = None;
        self.history = History::new(config.keep_history_for);

        tracing::debug!(
            actions = self.actions.len(),
            cursors = self.document.cursors().len(),
            generation = self.scheduler.generation(),
            "typewriter initialized"
        );
        self.emit(TypewriterEvent::Initialized);

        if config.auto_play {
            self.play();
        }
    }

    // =========================================================================
    // Playback control
    // =========================================================================

    /// Start or resume playback.
    ///
    /// Resuming from pause keeps each timer's remaining time. Playing after
    /// `stop()` restarts the current pass; playing after the final pass
    /// starts over from the initial text and cursors.
    pub fn play(&mut self) {
        if self.actions.is_empty() {
            return;
        }
        let Some(transition) = self.playback.send(PlaybackCommand::Play) else {
            return;
        };

        match transition.from {
            PlaybackState::Idle => self.arm_next_action(),
            PlaybackState::Paused => self.scheduler.thaw(),
            PlaybackState::Stopped => self.restart_pass(),
            PlaybackState::Finished => {
                self.scheduler.reset();
                self.pass_start = self.initial.clone();
                self.passes = 0;
                self.has_been_stopped_before = false;
                self.last_performed_action = None;
                self.restart_pass();
            }
            PlaybackState::Playing => {}
        }

        self.emit(TypewriterEvent::Playing);
    }

    /// Freeze all timers. Cursor blink states are left as they are.
    pub fn pause(&mut self) {
        if self.playback.send(PlaybackCommand::Pause).is_none() {
            return;
        }
        self.scheduler.freeze();
        self.emit(TypewriterEvent::Paused);
    }

    /// Cancel all timers and show every cursor blinking.
    ///
    /// A later `play()` restarts the current pass from its beginning.
    pub fn stop(&mut self) {
        if self.playback.send(PlaybackCommand::Stop).is_none() {
            return;
        }
        self.scheduler.reset();
        self.queue_timer = None;
        self.blink_timers.fill(None);
        for cursor in self.document.cursors_mut() {
            cursor.is_blinking = true;
        }
        self.has_been_stopped_before = true;
        self.emit(TypewriterEvent::Stopped);
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Advance virtual time by `ms`, firing every timer that comes due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now().saturating_add(ms);
        self.advance_to(until);
    }

    pub fn advance_by(&mut self, elapsed: Duration) {
        self.advance(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
    }

    fn advance_to(&mut self, until: u64) {
        while let Some((id, timer)) = self.scheduler.pop_due(until) {
            if self.scheduler.is_stale(&timer) {
                tracing::trace!(kind = ?timer.kind, generation = timer.generation, "skip stale timer");
                continue;
            }
            self.fire(id, timer.kind);
        }
        self.scheduler.advance_to(until);
    }

    /// Advance timer by timer while playing, for at most `limit_ms`.
    ///
    /// Returns the virtual time that elapsed. With `repeat = true` this only
    /// returns once the limit is reached.
    pub fn run_to_completion(&mut self, limit_ms: u64) -> u64 {
        let start = self.scheduler.now();
        let limit = start.saturating_add(limit_ms);

        while self.is_playing() {
            match self.scheduler.next_deadline() {
                Some(deadline) if deadline <= limit => self.advance_to(deadline),
                _ => {
                    self.advance_to(limit);
                    break;
                }
            }
        }

        self.scheduler.now() - start
    }

    // =========================================================================
    // Timer callbacks
    // =========================================================================

    fn fire(&mut self, id: TimerId, kind: TimerKind) {
        match kind {
            TimerKind::Action => {
                self.release_queue_timer(id);
                self.perform_next_action();
            }
            TimerKind::Repeat => {
                self.release_queue_timer(id);
                self.start_next_pass();
            }
            TimerKind::Blink { cursor } => self.start_blinking(cursor, id),
        }
    }

    fn release_queue_timer(&mut self, id: TimerId) {
        if self.queue_timer == Some(id) {
            self.queue_timer = None;
        }
    }

    fn arm_next_action(&mut self) {
        if let Some(action) = self.actions.get(self.action_index) {
            let delay = action.delay_ms();
            self.queue_timer = Some(self.scheduler.arm(TimerKind::Action, delay));
        }
    }

    fn perform_next_action(&mut self) {
        let Some(action) = self.actions.get(self.action_index).cloned() else {
            return;
        };

        let changed = match interpret(&self.document, &action) {
            Interpretation::Changed(document) => {
                self.document = document;
                self.last_performed_action = Some(action.clone());
                self.hold_cursor(action.cursor);
                true
            }
            Interpretation::Ignored => {
                tracing::trace!(index = self.action_index, "action ignored");
                false
            }
        };
        self.action_index += 1;

        if self.action_index < self.actions.len() {
            if changed {
                self.emit_changed(action);
            }
            self.arm_next_action();
            return;
        }

        self.passes += 1;
        if self.repeat.allows_another(self.passes) {
            if changed {
                self.emit_changed(action);
            }
            self.queue_timer = Some(self.scheduler.arm(TimerKind::Repeat, self.repeat_delay));
        } else {
            self.playback.send(PlaybackCommand::Finish);
            tracing::debug!(passes = self.passes, "typewriter finished");
            let cursor = self.cursor_state(action.cursor);
            self.emit(TypewriterEvent::Finished { action, cursor });
        }
    }

    fn start_next_pass(&mut self) {
        self.scheduler.bump_generation();
        self.blink_timers.fill(None);
        self.document = self.pass_start.clone();
        self.action_index = 0;

        let cursor_index = self.actions.last().map_or(0, |action| action.cursor);
        let cursor = self.cursor_state(cursor_index);
        tracing::debug!(passes = self.passes, "typewriter repeating");
        self.emit(TypewriterEvent::Repeating { cursor });

        self.arm_next_action();
    }

    fn restart_pass(&mut self) {
        self.document = self.pass_start.clone();
        self.action_index = 0;
        self.blink_timers.fill(None);
        self.arm_next_action();
    }

    /// Make the acting cursor solid and restart its blink debounce.
    fn hold_cursor(&mut self, index: usize) {
        self.document.set_blinking(index, false);

        let Some(slot) = self.blink_timers.get_mut(index) else {
            return;
        };
        if let Some(previous) = slot.take() {
            self.scheduler.cancel(previous);
        }
        *slot = Some(
            self.scheduler
                .arm(TimerKind::Blink { cursor: index }, self.blink_after),
        );
    }

    fn start_blinking(&mut self, index: usize, id: TimerId) {
        if let Some(slot) = self.blink_timers.get_mut(index) {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        if self.document.set_blinking(index, true) {
            self.emit(TypewriterEvent::Blinking { cursor: index });
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a subscriber for every future event.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriberId
    where
        F: Fn(&TypewriterEvent, &Typewriter) + Send + 'static,
    {
        self.dispatcher.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    fn emit_changed(&mut self, action: Action) {
        let cursor = self.cursor_state(action.cursor);
        self.emit(TypewriterEvent::Changed { action, cursor });
    }

    fn emit(&mut self, event: TypewriterEvent) {
        let time = self.scheduler.now();
        tracing::debug!(kind = %event.kind(), time, "typewriter event");
        self.dispatcher.dispatch(&event, &*self);
        self.history.push(time, event);
    }

    fn cursor_state(&self, index: usize) -> Cursor {
        self.document
            .cursor(index)
            .cloned()
            .unwrap_or_else(|| Cursor::new(0, ""))
    }

    // =========================================================================
    // Read-only surface
    // =========================================================================

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn cursors(&self) -> &[Cursor] {
        self.document.cursors()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Lazy per-position view over the current text and cursors.
    pub fn positions(&self) -> Positions<'_> {
        self.document.positions()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_in(PlaybackState::Playing)
    }

    pub fn is_finished(&self) -> bool {
        self.playback.is_in(PlaybackState::Finished)
    }

    pub fn has_been_stopped_before(&self) -> bool {
        self.has_been_stopped_before
    }

    /// The most recent action that changed text or cursors.
    pub fn last_performed_action(&self) -> Option<&Action> {
        self.last_performed_action.as_ref()
    }

    pub fn blink_after(&self) -> u64 {
        self.blink_after
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn repeat_delay(&self) -> u64 {
        self.repeat_delay
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn keep_history_for(&self) -> usize {
        self.history.capacity()
    }

    /// Completed passes over the action queue.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }
}
