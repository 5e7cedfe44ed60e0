use serde::Deserialize;

use crate::{
    priority::NewPriority,
    shared::validation::{self, ValidationErrors},
};

#[derive(Debug, Deserialize)]
pub struct CreatePriorityRequest {
    pub name: String,
    pub value: i64,
}

impl CreatePriorityRequest {
    pub fn validate(self) -> Result<NewPriority, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        validation::check_name(&mut errors, &self.name);
        errors.into_result(NewPriority {
            name: self.name,
            value: self.value,
        })
    }
}
