//! Second-granularity countdown.
//!
//! The clock has no thread of its own: the caller invokes [`Clock::tick`]
//! once per elapsed second. It knows nothing about session types; reaching
//! zero only stops it and reports a [`Completion`].

use serde::{Deserialize, Serialize};

/// Emitted by [`Clock::tick`] when the countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    remaining_secs: u64,
    running: bool,
}

impl Clock {
    /// A paused clock loaded with `secs`.
    pub fn new(secs: u64) -> Self {
        Self {
            remaining_secs: secs,
            running: false,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns `false` when the call changed nothing.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_secs == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Returns `false` when already paused.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Stop and reload with `secs`.
    pub fn load(&mut self, secs: u64) {
        self.running = false;
        self.remaining_secs = secs;
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return Some(Completion);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_clock_ignores_ticks() {
        let mut clock = Clock::new(10);
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.remaining_secs(), 10);
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let mut clock = Clock::new(10);
        assert!(clock.start());
        assert!(!clock.start());
        assert!(clock.pause());
        assert!(!clock.pause());
    }

    #[test]
    fn cannot_start_at_zero() {
        let mut clock = Clock::new(0);
        assert!(!clock.start());
        assert!(!clock.is_running());
    }

    #[test]
    fn completes_exactly_at_zero() {
        let mut clock = Clock::new(3);
        clock.start();
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.tick(), Some(Completion));
        assert_eq!(clock.remaining_secs(), 0);
        assert!(!clock.is_running());
        // Stopped clocks never go below zero.
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn load_stops_the_clock() {
        let mut clock = Clock::new(5);
        clock.start();
        clock.load(300);
        assert!(!clock.is_running());
        assert_eq!(clock.remaining_secs(), 300);
    }
}
