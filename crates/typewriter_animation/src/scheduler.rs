//! Timer scheduler
//!
//! A virtual-time scheduler for one-shot timers. Time only moves when the
//! owner advances it, so playback is deterministic and testable.
//!
//! Every timer captures the scheduler's generation when it is armed. Bumping
//! the generation at a reset point turns every older timer into a no-op:
//! it still comes due, but [`TimerScheduler::is_stale`] reports it and the
//! owner skips it.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimerId;
}

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Perform the action at the head of the queue.
    Action,
    /// Start the next pass after the repeat delay.
    Repeat,
    /// Mark a cursor as idle.
    Blink { cursor: usize },
}

/// A one-shot timer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    /// Virtual time (ms) at which the timer comes due.
    pub deadline: u64,
    /// Scheduler generation captured when armed.
    pub generation: u64,
    sequence: u64,
    /// Time left when the scheduler was frozen.
    remaining: Option<u64>,
}

/// The timer scheduler for a single typewriter
#[derive(Debug, Default)]
pub struct TimerScheduler {
    timers: SlotMap<TimerId, Timer>,
    now: u64,
    generation: u64,
    sequence: u64,
    frozen: bool,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Number of armed timers, stale ones included.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.get(id)
    }

    /// Arm a timer that fires `delay` ms from now.
    pub fn arm(&mut self, kind: TimerKind, delay: u64) -> TimerId {
        self.sequence += 1;
        let timer = Timer {
            kind,
            deadline: self.now.saturating_add(delay),
            generation: self.generation,
            sequence: self.sequence,
            remaining: self.frozen.then_some(delay),
        };
        tracing::trace!(?kind, delay, generation = self.generation, "arm timer");
        self.timers.insert(timer)
    }

    /// Cancel a timer. Returns false when it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Invalidate every timer armed so far.
    pub fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Cancel everything, bump the generation and unfreeze.
    pub fn reset(&mut self) {
        self.cancel_all();
        self.bump_generation();
        self.frozen = false;
    }

    /// Whether the timer was armed before the latest generation bump.
    pub fn is_stale(&self, timer: &Timer) -> bool {
        timer.generation != self.generation
    }

    /// Stop the clock for armed timers, remembering how long each has left.
    pub fn freeze(&mut self) {
        if self.frozen {
            return;
        }
        let now = self.now;
        for (_, timer) in self.timers.iter_mut() {
            timer.remaining = Some(timer.deadline.saturating_sub(now));
        }
        self.frozen = true;
    }

    /// Re-arm frozen timers with the time they had left.
    pub fn thaw(&mut self) {
        if !self.frozen {
            return;
        }
        let now = self.now;
        for (_, timer) in self.timers.iter_mut() {
            let remaining = timer.remaining.take().unwrap_or(0);
            timer.deadline = now.saturating_add(remaining);
        }
        self.frozen = false;
    }

    /// Deadline of the earliest timer, or `None` when frozen or idle.
    pub fn next_deadline(&self) -> Option<u64> {
        if self.frozen {
            return None;
        }
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `until`.
    ///
    /// Ties fire in arming order. The clock moves to the timer's deadline.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, Timer)> {
        if self.frozen {
            return None;
        }

        let (id, _) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= until)
            .min_by_key(|(_, timer)| (timer.deadline, timer.sequence))?;
        let timer = self.timers.remove(id)?;
        self.now = self.now.max(timer.deadline);
        Some((id, timer))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut TimerScheduler, until: u64) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        while let Some((_, timer)) = scheduler.pop_due(until) {
            if !scheduler.is_stale(&timer) {
                fired.push(timer.kind);
            }
        }
        scheduler.advance_to(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_then_arming_order() {
        let mut scheduler = TimerScheduler::new();
        scheduler.arm(TimerKind::Blink { cursor: 1 }, 20);
        scheduler.arm(TimerKind::Action, 10);
        scheduler.arm(TimerKind::Blink { cursor: 0 }, 20);

        assert_eq!(
            drain(&mut scheduler, 100),
            vec![
                TimerKind::Action,
                TimerKind::Blink { cursor: 1 },
                TimerKind::Blink { cursor: 0 }
            ]
        );
        assert_eq!(scheduler.now(), 100);
    }

    #[test]
    fn test_stale_timer_is_skipped_after_generation_bump() {
        let mut scheduler = TimerScheduler::new();
        scheduler.arm(TimerKind::Blink { cursor: 0 }, 50);
        scheduler.bump_generation();
        scheduler.arm(TimerKind::Action, 50);

        assert_eq!(drain(&mut scheduler, 50), vec![TimerKind::Action]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_nothing_fires_before_deadline() {
        let mut scheduler = TimerScheduler::new();
        scheduler.arm(TimerKind::Action, 100);
        assert!(drain(&mut scheduler, 99).is_empty());
        assert_eq!(drain(&mut scheduler, 100), vec![TimerKind::Action]);
    }

    #[test]
    fn test_freeze_keeps_remaining_time() {
        let mut scheduler = TimerScheduler::new();
        scheduler.arm(TimerKind::Action, 100);
        drain(&mut scheduler, 40);

        scheduler.freeze();
        assert_eq!(scheduler.next_deadline(), None);
        assert!(drain(&mut scheduler, 500).is_empty());

        scheduler.thaw();
        assert_eq!(scheduler.next_deadline(), Some(560));
        assert!(drain(&mut scheduler, 559).is_empty());
        assert_eq!(drain(&mut scheduler, 560), vec![TimerKind::Action]);
    }

    #[test]
    fn test_timer_armed_while_frozen_waits_for_thaw() {
        let mut scheduler = TimerScheduler::new();
        scheduler.freeze();
        scheduler.arm(TimerKind::Repeat, 10);
        assert!(drain(&mut scheduler, 100).is_empty());

        scheduler.thaw();
        assert_eq!(drain(&mut scheduler, 110), vec![TimerKind::Repeat]);
    }

    #[test]
    fn test_reset_cancels_and_invalidates() {
        let mut scheduler = TimerScheduler::new();
        let id = scheduler.arm(TimerKind::Action, 10);
        let before = scheduler.generation();

        scheduler.reset();
        assert!(!scheduler.cancel(id));
        assert_eq!(scheduler.generation(), before + 1);
        assert!(!scheduler.is_frozen());
    }
}
