use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    shared::validation::{FieldError, ValidationErrors},
    StoreError,
};

/// The JSON error body every procedure returns on failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub fields: Vec<FieldError>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(error = %message, "internal error");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred")
    }

    pub fn code(&self) -> &'static str {
        match self.status {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::CONFLICT => "CONFLICT",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.message)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: errors.to_string(),
            fields: errors.fields,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        let status = match &error {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::DuplicatePriorityValue { .. }
            | StoreError::PriorityInUse { .. }
            | StoreError::InvalidPriorityReference => StatusCode::BAD_REQUEST,
            StoreError::DuplicateUsername => StatusCode::CONFLICT,
            StoreError::Redb(_) | StoreError::Decode(_) | StoreError::Encode(_) => {
                return ApiError::internal(error.to_string());
            }
        };
        ApiError::new(status, error.to_string())
    }
}

/// Pull the offending field out of a serde message, e.g.
/// "missing field `value` at line 1 column 17" or
/// "...target type: value: invalid type: floating point `1.5`, expected i64".
fn rejected_field(message: &str) -> Option<String> {
    for marker in ["missing field `", "unknown field `"] {
        if let Some((_, rest)) = message.split_once(marker) {
            return rest.split_once('`').map(|(field, _)| field.to_string());
        }
    }
    let (_, detail) = message.split_once(": ")?;
    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(' ')).then(|| path.to_string())
}

fn bad_input(message: String) -> ApiError {
    let mut error = ApiError::new(StatusCode::BAD_REQUEST, message);
    if let Some(field) = rejected_field(&error.message) {
        let message = error.message.clone();
        error.fields.push(FieldError {
            field: field.into(),
            message,
        });
    }
    error
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        bad_input(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        bad_input(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.message,
            fields: self.fields,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let cases = [
            (StoreError::task_not_found(), StatusCode::NOT_FOUND, "Task not found"),
            (
                StoreError::DuplicatePriorityValue { value: 1 },
                StatusCode::BAD_REQUEST,
                "Priority with the same value already exists",
            ),
            (
                StoreError::PriorityInUse { references: 2 },
                StatusCode::BAD_REQUEST,
                "This priority is used for one or more tasks",
            ),
            (
                StoreError::InvalidPriorityReference,
                StatusCode::BAD_REQUEST,
                "Priority does not exist",
            ),
            (
                StoreError::DuplicateUsername,
                StatusCode::CONFLICT,
                "Username is already taken",
            ),
            (
                StoreError::Redb("disk on fire".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred",
            ),
        ];

        for (error, status, message) in cases {
            let api = ApiError::from(error);
            assert_eq!(api.status, status);
            assert_eq!(api.message, message);
        }
    }

    #[test]
    fn validation_errors_keep_fields() {
        let mut errors = ValidationErrors::default();
        errors.push("name", "Name is too long");
        let api = ApiError::from(errors);
        assert_eq!(api.code(), "BAD_REQUEST");
        assert_eq!(api.fields.len(), 1);
        assert_eq!(api.fields[0].field, "name");
    }

    #[test]
    fn serde_messages_name_the_field() {
        assert_eq!(
            rejected_field(
                "Failed to deserialize the JSON body into the target type: missing field `value` at line 1 column 17"
            )
            .as_deref(),
            Some("value")
        );
        assert_eq!(
            rejected_field(
                "Failed to deserialize the JSON body into the target type: value: invalid type: floating point `1.5`, expected i64 at line 1 column 30"
            )
            .as_deref(),
            Some("value")
        );
        assert_eq!(
            rejected_field("Failed to deserialize query string: missing field `id`").as_deref(),
            Some("id")
        );
        assert_eq!(
            rejected_field("Failed to deserialize query string: UUID parsing failed: invalid character"),
            None
        );
    }
}
