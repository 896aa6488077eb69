use crate::*;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

/// Longest task text accepted, counted in characters after trimming
pub const MAX_TASK_CHARS: usize = 500;

/// Row of the `todos` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub task: String,
    #[serde(serialize_with = "as_flag")]
    pub is_done: bool,
    pub priority: Priority,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields echoed back after a task is added
#[derive(Debug, Serialize)]
pub struct NewTask {
    pub id: TaskId,
    pub task: String,
    pub priority: Priority,
    #[serde(serialize_with = "as_flag")]
    pub is_done: bool,
    pub created_at: NaiveDateTime,
}

impl From<Task> for NewTask {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            task: task.task,
            priority: task.priority,
            is_done: task.is_done,
            created_at: task.created_at,
        }
    }
}

// clients read completion as 0/1
fn as_flag<S: Serializer>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// Store-assigned identity of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Accepts only positive base-10 integers
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        raw.and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(TaskId)
            .ok_or(Error::InvalidId)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task importance: 0 low, 1 normal, 2 high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, sqlx::Type, Serialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const LOW: Priority = Priority(0);
    pub const NORMAL: Priority = Priority(1);
    pub const HIGH: Priority = Priority(2);

    pub fn clamped(value: i64) -> Self {
        Priority(value.clamp(0, 2) as u8)
    }

    /// Reads a form value, never fails
    pub fn parse(raw: &str) -> Self {
        Self::clamped(lenient_int(raw))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::NORMAL
    }
}

/// Trimmed, non-empty task text of at most [`MAX_TASK_CHARS`] characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskText(String);

impl TaskText {
    pub fn parse(raw: &str) -> Result<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(Error::EmptyTask);
        }
        if text.chars().count() > MAX_TASK_CHARS {
            return Err(Error::TaskTooLong);
        }
        Ok(TaskText(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Single field family changed by one update call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Done(bool),
    Text(TaskText),
    Priority(Priority),
}

impl Change {
    /// Picks the first present field in the order done, task, priority; the rest are ignored
    pub fn pick(done: Option<&str>, task: Option<&str>, priority: Option<&str>) -> Result<Self> {
        if let Some(done) = done {
            Ok(Change::Done(lenient_flag(done)))
        } else if let Some(task) = task {
            Ok(Change::Text(TaskText::parse(task)?))
        } else if let Some(priority) = priority {
            Ok(Change::Priority(Priority::parse(priority)))
        } else {
            Err(Error::NoUpdateData)
        }
    }
}
