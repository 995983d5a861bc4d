mod clock;
mod controller;
mod goals;
mod session_type;

pub use clock::{Clock, Completion};
pub use controller::{format_clock, SessionController, SessionStats, TimerState};
pub use goals::{Goal, GoalId, GoalTracklist};
pub use session_type::{next_session, SessionType, UnknownSessionType, LONG_BREAK_INTERVAL};
