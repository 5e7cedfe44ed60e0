use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline: Option<NaiveDate>,
    pub priority_id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// The mutable part of a task, already validated. Used for both create
/// and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline: Option<NaiveDate>,
    pub priority_id: Uuid,
}

impl Task {
    pub fn apply(&mut self, fields: TaskFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.completed = fields.completed;
        self.deadline = fields.deadline;
        self.priority_id = fields.priority_id;
    }
}
