use serde::Deserialize;

use crate::shared::validation::{self, ValidationErrors};

#[derive(Debug, Deserialize)]
pub struct UserRegisterRequest {
    pub username: String,
    pub password: String,
}

impl UserRegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        validation::check_username(&mut errors, &self.username);
        validation::check_password(&mut errors, &self.password);
        errors.into_result(())
    }
}
