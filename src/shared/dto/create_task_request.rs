use serde::Deserialize;
use uuid::Uuid;

use crate::{
    shared::validation::{self, ValidationErrors},
    task::TaskFields,
};

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline: Option<String>,
    pub priority: Uuid,
}

impl CreateTaskRequest {
    pub fn validate(self) -> Result<TaskFields, ValidationErrors> {
        validation::task_fields(
            self.name,
            self.description,
            self.completed,
            self.deadline.as_deref(),
            self.priority,
        )
    }
}
