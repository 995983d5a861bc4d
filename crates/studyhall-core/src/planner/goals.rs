//! Study goal tracklist: an append-only, insertion-ordered checklist.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(Uuid);

impl GoalId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalTracklist {
    goals: Vec<Goal>,
}

impl GoalTracklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// 1-based position lookup, as goals are numbered on screen.
    pub fn nth(&self, position: usize) -> Option<&Goal> {
        position.checked_sub(1).and_then(|i| self.goals.get(i))
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }

    /// Append a goal. Blank or whitespace-only text is ignored.
    ///
    /// The text is stored as submitted; only the blank check trims it.
    pub fn add_goal(&mut self, text: &str) -> Option<Event> {
        if text.trim().is_empty() {
            return None;
        }
        let goal = Goal {
            id: GoalId::new(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        let event = Event::GoalAdded {
            id: goal.id,
            text: goal.text.clone(),
            at: goal.created_at,
        };
        self.goals.push(goal);
        Some(event)
    }

    /// Flip the completed flag. Unknown ids are ignored.
    pub fn toggle_goal(&mut self, id: GoalId) -> Option<Event> {
        let goal = self.goals.iter_mut().find(|g| g.id == id)?;
        goal.completed = !goal.completed;
        Some(Event::GoalToggled {
            id,
            completed: goal.completed,
            at: Utc::now(),
        })
    }
}
