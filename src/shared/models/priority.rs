use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named severity level. Its `value` is unique within one owner and
/// orders the owner's priority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub id: Uuid,
    pub name: String,
    pub value: i64,
    pub owner_id: Uuid,
}

/// Validated input for a new priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPriority {
    pub name: String,
    pub value: i64,
}
