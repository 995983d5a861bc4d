use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of focus completions between long breaks.
pub const LONG_BREAK_INTERVAL: u32 = 4;

const FOCUS_SECS: u64 = 25 * 60;
const SHORT_BREAK_SECS: u64 = 5 * 60;
const LONG_BREAK_SECS: u64 = 15 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Focus,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [
        SessionType::Focus,
        SessionType::ShortBreak,
        SessionType::LongBreak,
    ];

    /// Canonical length of a session of this type, in seconds.
    pub fn duration_secs(self) -> u64 {
        match self {
            SessionType::Focus => FOCUS_SECS,
            SessionType::ShortBreak => SHORT_BREAK_SECS,
            SessionType::LongBreak => LONG_BREAK_SECS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionType::Focus => "Focus",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, SessionType::Focus)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSessionType(pub String);

impl fmt::Display for UnknownSessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown session type '{}' (expected focus, short-break or long-break)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSessionType {}

impl FromStr for SessionType {
    type Err = UnknownSessionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" | "pomodoro" => Ok(SessionType::Focus),
            "short-break" | "short_break" | "short" => Ok(SessionType::ShortBreak),
            "long-break" | "long_break" | "long" => Ok(SessionType::LongBreak),
            _ => Err(UnknownSessionType(s.to_string())),
        }
    }
}

/// Pick the session that follows a completed one.
///
/// `completed_focus` is the focus counter *after* the finished session has
/// been counted, so it is only consulted when `current` is `Focus`.
pub fn next_session(current: SessionType, completed_focus: u32) -> (SessionType, u64) {
    let next = match current {
        SessionType::Focus => {
            if completed_focus > 0 && completed_focus % LONG_BREAK_INTERVAL == 0 {
                SessionType::LongBreak
            } else {
                SessionType::ShortBreak
            }
        }
        SessionType::ShortBreak | SessionType::LongBreak => SessionType::Focus,
    };
    (next, next.duration_secs())
}
