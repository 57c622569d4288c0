//! The task record.
//!
//! A task is persisted wholesale as one YAML document. Optional fields that
//! are `None` are omitted from the document, so an absent `notes` and an
//! empty `notes: ''` stay distinguishable after a round trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::slug::validate_id;
use crate::state::State;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub state: State,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Task {
    /// A new task with `created == updated == now`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        state: State,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            state,
            parent: None,
            notes: None,
            created: now,
            updated: now,
        }
    }

    pub fn set_state(&mut self, state: State, now: DateTime<Utc>) {
        self.state = state;
        self.updated = now;
    }

    pub fn set_title(&mut self, title: &str, now: DateTime<Utc>) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::invalid("title", title));
        }
        self.title = title.to_string();
        self.updated = now;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>, now: DateTime<Utc>) {
        self.notes = notes;
        self.updated = now;
    }

    /// Set or clear the parent. The reference is not checked against the store.
    pub fn set_parent(&mut self, parent: Option<String>, now: DateTime<Utc>) {
        self.parent = parent;
        self.updated = now;
    }

    /// Field-level checks applied before a record is written.
    pub fn validate(&self) -> Result<()> {
        validate_id(&self.id)?;
        if self.title.trim().is_empty() {
            return Err(Error::invalid("title", &self.title));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse a record. Any failure is reported as `Corrupt` against `id`.
    pub fn from_yaml(id: &str, content: &str) -> Result<Self> {
        let task: Task = serde_yaml::from_str(content).map_err(|err| Error::corrupt(id, err))?;
        if task.id != id {
            return Err(Error::corrupt(
                id,
                format!("record id '{}' does not match file name", task.id),
            ));
        }
        if task.title.trim().is_empty() {
            return Err(Error::corrupt(id, "title is empty"));
        }
        Ok(task)
    }
}

/// Default listing order: state rank, then id.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        left.state
            .rank()
            .cmp(&right.state.rank())
            .then_with(|| left.id.cmp(&right.id))
    });
}

/// Which tasks a listing shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    /// Only this state. Takes precedence over `include_done`.
    pub state: Option<State>,
    pub include_done: bool,
}

impl ListFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self.state {
            Some(state) => task.state == state,
            None => self.include_done || task.state != State::Done,
        }
    }

    pub fn apply(&self, tasks: &mut Vec<Task>) {
        tasks.retain(|task| self.matches(task));
    }
}

/// Per-state totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub focus: usize,
    pub active: usize,
    pub later: usize,
    pub done: usize,
    pub total: usize,
}

impl StateCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut counts = StateCounts::default();
        for task in tasks {
            match task.state {
                State::Focus => counts.focus += 1,
                State::Active => counts.active += 1,
                State::Later => counts.later += 1,
                State::Done => counts.done += 1,
            }
            counts.total += 1;
        }
        counts
    }

    pub fn get(&self, state: State) -> usize {
        match state {
            State::Focus => self.focus,
            State::Active => self.active,
            State::Later => self.later,
            State::Done => self.done,
        }
    }
}
