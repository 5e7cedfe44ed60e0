//! Input-shape checks run by the controllers before anything reaches the
//! stores. Failures are collected per field so a form can show all of them.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::task::TaskFields;

pub const NAME_MAX_CHARS: usize = 512;
pub const DESCRIPTION_MAX_CHARS: usize = 8192;
pub const USERNAME_MAX_CHARS: usize = 64;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Cow<'static, str>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", join_fields(.fields))]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<Cow<'static, str>>, message: impl Into<String>) {
        self.fields.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    too_long: &str,
) {
    let len = value.chars().count();
    if len < min {
        let message = if min == 1 {
            "Must not be empty".to_string()
        } else {
            format!("Must be at least {min} characters")
        };
        errors.push(field, message);
    } else if len > max {
        errors.push(field, too_long);
    }
}

pub fn check_name(errors: &mut ValidationErrors, name: &str) {
    check_length(errors, "name", name, 1, NAME_MAX_CHARS, "Name is too long");
}

pub fn check_description(errors: &mut ValidationErrors, description: Option<&str>) {
    if let Some(description) = description {
        check_length(
            errors,
            "description",
            description,
            0,
            DESCRIPTION_MAX_CHARS,
            "Description is too long",
        );
    }
}

pub fn check_username(errors: &mut ValidationErrors, username: &str) {
    check_length(
        errors,
        "username",
        username,
        1,
        USERNAME_MAX_CHARS,
        "Username is too long",
    );
}

pub fn check_password(errors: &mut ValidationErrors, password: &str) {
    check_length(
        errors,
        "password",
        password,
        PASSWORD_MIN_CHARS,
        PASSWORD_MAX_CHARS,
        "Password is too long",
    );
}

/// Parse an optional deadline. Empty means "no deadline". Accepts a plain
/// ISO date or an RFC 3339 timestamp, whose UTC calendar date is kept.
pub fn parse_deadline(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| Some(ts.naive_utc().date()))
        .map_err(|_| format!("Invalid date: {raw}"))
}

/// Validate everything a task create or update carries.
pub fn task_fields(
    name: String,
    description: Option<String>,
    completed: bool,
    deadline: Option<&str>,
    priority_id: Uuid,
) -> Result<TaskFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_name(&mut errors, &name);
    check_description(&mut errors, description.as_deref());
    let deadline = match parse_deadline(deadline) {
        Ok(deadline) => deadline,
        Err(message) => {
            errors.push("deadline", message);
            None
        }
    };

    errors.into_result(TaskFields {
        name,
        description,
        completed,
        deadline,
        priority_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_bounds() {
        let mut errors = ValidationErrors::default();
        check_name(&mut errors, "");
        assert_eq!(errors.fields[0].message, "Must not be empty");

        let mut errors = ValidationErrors::default();
        check_name(&mut errors, &"x".repeat(NAME_MAX_CHARS));
        assert!(errors.is_empty());

        let mut errors = ValidationErrors::default();
        check_name(&mut errors, &"x".repeat(NAME_MAX_CHARS + 1));
        assert_eq!(errors.fields[0].message, "Name is too long");
    }

    #[test]
    fn name_length_counts_chars_not_bytes() {
        let mut errors = ValidationErrors::default();
        check_name(&mut errors, &"é".repeat(NAME_MAX_CHARS));
        assert!(errors.is_empty());
    }

    #[test]
    fn description_is_optional_but_bounded() {
        let mut errors = ValidationErrors::default();
        check_description(&mut errors, None);
        check_description(&mut errors, Some(""));
        assert!(errors.is_empty());

        check_description(&mut errors, Some(&"d".repeat(DESCRIPTION_MAX_CHARS + 1)));
        assert_eq!(errors.fields.len(), 1);
        assert_eq!(errors.fields[0].field, "description");
        assert_eq!(errors.fields[0].message, "Description is too long");
    }

    #[test]
    fn deadline_parsing() {
        assert_eq!(parse_deadline(None), Ok(None));
        assert_eq!(parse_deadline(Some("")), Ok(None));
        assert_eq!(
            parse_deadline(Some("2025-03-01")),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 1))
        );
        assert_eq!(
            parse_deadline(Some("2025-03-01T23:30:00-02:00")),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 2))
        );
        assert!(parse_deadline(Some("next tuesday")).is_err());
        assert!(parse_deadline(Some("2025-02-30")).is_err());
    }

    #[test]
    fn task_fields_collects_every_failure() {
        let errors = task_fields(
            String::new(),
            Some("d".repeat(DESCRIPTION_MAX_CHARS + 1)),
            false,
            Some("soon"),
            Uuid::nil(),
        )
        .unwrap_err();

        assert!(errors.has("name"));
        assert!(errors.has("description"));
        assert!(errors.has("deadline"));
        assert_eq!(errors.fields.len(), 3);
    }

    #[test]
    fn task_fields_passes_valid_input_through() {
        let priority_id = Uuid::new_v4();
        let fields = task_fields(
            "Ship report".into(),
            None,
            true,
            Some("2025-03-01"),
            priority_id,
        )
        .unwrap();

        assert_eq!(fields.name, "Ship report");
        assert!(fields.completed);
        assert_eq!(fields.deadline, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(fields.priority_id, priority_id);
    }

    #[test]
    fn display_joins_every_field() {
        let mut errors = ValidationErrors::default();
        errors.push("name", "Must not be empty");
        errors.push("deadline", "Invalid date: soon");
        assert_eq!(
            errors.to_string(),
            "name: Must not be empty; deadline: Invalid date: soon"
        );
    }

    #[test]
    fn password_minimum() {
        let mut errors = ValidationErrors::default();
        check_password(&mut errors, "short");
        assert!(errors.has("password"));
    }
}
