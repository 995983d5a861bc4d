use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::planner::{GoalId, SessionType};

/// Every observable change in the planner produces an Event.
/// The view renders them; the CLI also logs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        session_type: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        session_type: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        session_type: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// User picked a different session type while paused.
    SessionSwitched {
        from: SessionType,
        to: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A session ran down to zero and the next one has been loaded (paused).
    SessionCompleted {
        finished: SessionType,
        next: SessionType,
        next_duration_secs: u64,
        completed_focus_count: u32,
        at: DateTime<Utc>,
    },
    GoalAdded {
        id: GoalId,
        text: String,
        at: DateTime<Utc>,
    },
    GoalToggled {
        id: GoalId,
        completed: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        session_type: SessionType,
        remaining_secs: u64,
        total_secs: u64,
        running: bool,
        completed_focus_count: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at, .. }
            | Event::SessionSwitched { at, .. }
            | Event::SessionCompleted { at, .. }
            | Event::GoalAdded { at, .. }
            | Event::GoalToggled { at, .. }
            | Event::StateSnapshot { at, .. } => *at,
        }
    }
}
