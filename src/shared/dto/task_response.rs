use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{priority::Priority, task::Task};

/// A task joined with the priority it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline: Option<NaiveDate>,
    pub priority: Priority,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TaskResponse {
    pub fn new(task: Task, priority: Priority) -> Self {
        TaskResponse {
            id: task.id,
            name: task.name,
            description: task.description,
            completed: task.completed,
            deadline: task.deadline,
            priority,
            owner_id: task.owner_id,
            created_at: task.created_at,
        }
    }
}
