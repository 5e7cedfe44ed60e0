use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user_get_response::UserGetResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password: &str) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            id: Uuid::new_v4(),
            username,
            password_hash: User::hash_password(password.as_bytes())?,
            created_at: Utc::now(),
        })
    }

    pub fn to_get_dto(&self) -> UserGetResponse {
        UserGetResponse {
            id: self.id,
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }

    fn hash_password(password_bytes: &[u8]) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password_bytes, &salt)?
            .to_string())
    }
}
