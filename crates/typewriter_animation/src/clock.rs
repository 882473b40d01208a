//! Frame clock for real-time playback.
//!
//! The engine runs on virtual milliseconds. Hosts that want wall-clock
//! playback tick a `FrameClock` every frame and feed the returned delta to
//! `Typewriter::advance`. Sub-millisecond remainders carry over between
//! ticks so nothing is lost to rounding.

use std::time::{Duration, Instant};

/// Converts elapsed real time into whole virtual milliseconds.
#[derive(Debug)]
pub struct FrameClock {
    /// Whether the clock is running.
    running: bool,
    /// Playback speed multiplier (1.0 = normal, 2.0 = 2x speed).
    speed: f64,
    /// Real-time instant of the last tick.
    last_update: Option<Instant>,
    /// Scaled microseconds not yet handed out as a whole millisecond.
    carry_micros: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            running: false,
            speed: 1.0,
            last_update: None,
            carry_micros: 0,
        }
    }

    /// Check if the clock is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the current playback speed.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the playback speed.
    ///
    /// A speed of 1.0 is normal, 2.0 is twice as fast, 0.5 is half speed.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.1, 10.0);
    }

    /// Start or resume the clock.
    pub fn play(&mut self) {
        if !self.running {
            self.running = true;
            self.last_update = Some(Instant::now());
        }
    }

    /// Pause the clock. Time spent paused is never handed out.
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            self.last_update = None;
        }
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Milliseconds of scaled time elapsed since the previous tick.
    ///
    /// Call this every frame.
    pub fn tick(&mut self) -> u64 {
        if !self.running {
            return 0;
        }
        let now = Instant::now();
        let elapsed = self
            .last_update
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_update = Some(now);
        self.consume(elapsed)
    }

    /// Scale a real duration and return the whole milliseconds it yields.
    pub fn consume(&mut self, elapsed: Duration) -> u64 {
        let scaled_micros = (elapsed.as_secs_f64() * self.speed * 1_000_000.0).round() as u64;
        let micros = scaled_micros.saturating_add(self.carry_micros);
        self.carry_micros = micros % 1_000;
        micros / 1_000
    }

    /// Stop and forget any carried remainder.
    pub fn reset(&mut self) {
        self.running = false;
        self.last_update = None;
        self.carry_micros = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
