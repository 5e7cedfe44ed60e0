use serde::Deserialize;
use uuid::Uuid;

use crate::{
    shared::validation::{self, ValidationErrors},
    task::TaskFields,
};

/// Full replace of a task's mutable fields. Omitted optional fields are
/// cleared, not kept.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline: Option<String>,
    pub priority: Uuid,
}

impl UpdateTaskRequest {
    pub fn validate(self) -> Result<(Uuid, TaskFields), ValidationErrors> {
        let fields = validation::task_fields(
            self.name,
            self.description,
            self.completed,
            self.deadline.as_deref(),
            self.priority,
        )?;
        Ok((self.id, fields))
    }
}
