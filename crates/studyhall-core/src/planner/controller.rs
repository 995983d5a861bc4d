//! Study-session controller.
//!
//! Composes a [`Clock`] with the session-type policy into the timer the
//! user sees. Like the clock, it has no thread: the view calls `tick()` once
//! per second from whatever periodic source it owns.
//!
//! ## State Transitions
//!
//! ```text
//! (type, Paused) --start--> (type, Running) --pause--> (type, Paused)
//! (type, Running) --tick at zero--> (next_session(type), Paused)
//! (type, Paused) --switch_type(t)--> (t, Paused)
//! ```
//!
//! Invalid commands (switching while running, starting a running timer,
//! ticking a paused one) are silent no-ops and return `None`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::session_type::{next_session, SessionType};
use crate::events::Event;

/// Observable timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub session_type: SessionType,
    pub remaining_secs: u64,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub completed_focus_count: u32,
}

impl SessionStats {
    /// Focus minutes banked so far, counted at the canonical focus length.
    pub fn focus_minutes(&self) -> u64 {
        u64::from(self.completed_focus_count) * SessionType::Focus.duration_secs() / 60
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionController {
    session_type: SessionType,
    clock: Clock,
    stats: SessionStats,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    /// Paused focus session at full length, nothing completed.
    pub fn new() -> Self {
        Self {
            session_type: SessionType::Focus,
            clock: Clock::new(SessionType::Focus.duration_secs()),
            stats: SessionStats::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        TimerState {
            session_type: self.session_type,
            remaining_secs: self.clock.remaining_secs(),
            running: self.clock.is_running(),
        }
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn remaining_secs(&self) -> u64 {
        self.clock.remaining_secs()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn total_secs(&self) -> u64 {
        self.session_type.duration_secs()
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs() as f64 / total as f64)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            running: self.is_running(),
            completed_focus_count: self.stats.completed_focus_count,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if !self.clock.start() {
            return None;
        }
        tracing::debug!(session = %self.session_type, remaining = self.remaining_secs(), "timer started");
        Some(Event::TimerStarted {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.clock.pause() {
            return None;
        }
        tracing::debug!(session = %self.session_type, remaining = self.remaining_secs(), "timer paused");
        Some(Event::TimerPaused {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Stop and rewind the current session. Type and stats are untouched.
    /// Never a no-op, so it always reports an event.
    pub fn reset(&mut self) -> Event {
        self.clock.load(self.session_type.duration_secs());
        Event::TimerReset {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        }
    }

    /// Only honoured while paused.
    pub fn switch_type(&mut self, session_type: SessionType) -> Option<Event> {
        if self.clock.is_running() {
            tracing::debug!(requested = %session_type, "switch ignored while running");
            return None;
        }
        let from = self.session_type;
        self.session_type = session_type;
        self.clock.load(session_type.duration_secs());
        Some(Event::SessionSwitched {
            from,
            to: session_type,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Call once per elapsed second. Returns `Some(Event::SessionCompleted)`
    /// when the session runs out; the next session is loaded but not started.
    pub fn tick(&mut self) -> Option<Event> {
        self.clock.tick()?;

        let finished = self.session_type;
        if finished == SessionType::Focus {
            self.stats.completed_focus_count += 1;
        }
        let (next, duration) = next_session(finished, self.stats.completed_focus_count);
        self.session_type = next;
        self.clock.load(duration);

        tracing::info!(
            finished = %finished,
            next = %next,
            completed_focus = self.stats.completed_focus_count,
            "session completed"
        );
        Some(Event::SessionCompleted {
            finished,
            next,
            next_duration_secs: duration,
            completed_focus_count: self.stats.completed_focus_count,
            at: Utc::now(),
        })
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_out(controller: &mut SessionController) -> Option<Event> {
        controller.start();
        let mut last = None;
        for _ in 0..controller.remaining_secs() {
            last = controller.tick();
        }
        last
    }

    #[test]
    fn initial_state() {
        let controller = SessionController::new();
        assert_eq!(
            controller.state(),
            TimerState {
                session_type: SessionType::Focus,
                remaining_secs: 1500,
                running: false,
            }
        );
        assert_eq!(controller.stats().completed_focus_count, 0);
    }

    #[test]
    fn start_pause_start() {
        let mut controller = SessionController::new();
        assert!(controller.start().is_some());
        assert!(controller.start().is_none());
        assert!(controller.is_running());

        assert!(controller.pause().is_some());
        assert!(controller.pause().is_none());
        assert!(!controller.is_running());
    }

    #[test]
    fn ticking_while_paused_does_nothing() {
        let mut controller = SessionController::new();
        assert!(controller.tick().is_none());
        assert_eq!(controller.remaining_secs(), 1500);
    }

    #[test]
    fn full_focus_session_moves_to_short_break() {
        let mut controller = SessionController::new();
        let event = run_out(&mut controller);
        assert!(matches!(
            event,
            Some(Event::SessionCompleted {
                finished: SessionType::Focus,
                next: SessionType::ShortBreak,
                next_duration_secs: 300,
                completed_focus_count: 1,
                ..
            })
        ));
        assert_eq!(
            controller.state(),
            TimerState {
                session_type: SessionType::ShortBreak,
                remaining_secs: 300,
                running: false,
            }
        );
        assert_eq!(controller.stats().completed_focus_count, 1);
    }

    #[test]
    fn break_completion_does_not_count() {
        let mut controller = SessionController::new();
        controller.switch_type(SessionType::LongBreak);
        run_out(&mut controller);
        assert_eq!(controller.session_type(), SessionType::Focus);
        assert_eq!(controller.remaining_secs(), 1500);
        assert_eq!(controller.stats().completed_focus_count, 0);
    }

    #[test]
    fn switch_is_ignored_while_running() {
        let mut controller = SessionController::new();
        controller.start();
        controller.tick();
        let before = controller.state();
        assert!(controller.switch_type(SessionType::LongBreak).is_none());
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn switch_then_start_and_tick() {
        let mut controller = SessionController::new();
        controller.switch_type(SessionType::ShortBreak);
        assert_eq!(
            controller.state(),
            TimerState {
                session_type: SessionType::ShortBreak,
                remaining_secs: 300,
                running: false,
            }
        );
        controller.start();
        controller.tick();
        assert_eq!(
            controller.state(),
            TimerState {
                session_type: SessionType::ShortBreak,
                remaining_secs: 299,
                running: true,
            }
        );
    }

    #[test]
    fn reset_keeps_type_and_stats() {
        let mut controller = SessionController::new();
        run_out(&mut controller);
        controller.start();
        for _ in 0..42 {
            controller.tick();
        }
        assert!(matches!(
            controller.reset(),
            Event::TimerReset {
                session_type: SessionType::ShortBreak,
                remaining_secs: 300,
                ..
            }
        ));
        assert_eq!(controller.session_type(), SessionType::ShortBreak);
        assert_eq!(controller.remaining_secs(), 300);
        assert!(!controller.is_running());
        assert_eq!(controller.stats().completed_focus_count, 1);
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let mut controller = SessionController::new();
        assert_eq!(controller.progress(), 0.0);
        controller.start();
        for _ in 0..750 {
            controller.tick();
        }
        assert!((controller.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn focus_minutes_follow_counter() {
        let stats = SessionStats {
            completed_focus_count: 3,
        };
        assert_eq!(stats.focus_minutes(), 75);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(299), "04:59");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(6000), "100:00");
    }
}
