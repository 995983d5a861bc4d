//! # Studyhall Core Library
//!
//! Business logic for the Studyhall study assistant. The terminal front-end
//! in `studyhall-cli` is a thin view over this crate.
//!
//! ## Architecture
//!
//! - **Planner**: the Pomodoro-style study-session scheduler and the goal
//!   tracklist. Purely in-memory and synchronous; the caller invokes
//!   `tick()` once per second while the timer runs
//! - **API**: async client for the external study backend (documents,
//!   questions, quizzes, flashcards, accounts)
//! - **Storage**: TOML configuration and the remembered signed-in user
//!
//! ## Key Components
//!
//! - [`SessionController`]: timer state machine
//! - [`GoalTracklist`]: study goals checklist
//! - [`StudyClient`]: backend HTTP client
//! - [`Config`]: application configuration management

pub mod api;
pub mod error;
pub mod events;
pub mod planner;
pub mod storage;

pub use api::StudyClient;
pub use error::{ApiError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use planner::{format_clock, Goal, GoalId, GoalTracklist, SessionController, SessionType, TimerState};
pub use storage::{Config, UserSession};
