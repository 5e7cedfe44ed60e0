use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redb: {0}")]
    Redb(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("encode: {0}")]
    Encode(String),
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("Priority with the same value already exists")]
    DuplicatePriorityValue { value: i64 },
    #[error("This priority is used for one or more tasks")]
    PriorityInUse { references: usize },
    #[error("Priority does not exist")]
    InvalidPriorityReference,
    #[error("Username is already taken")]
    DuplicateUsername,
}

impl StoreError {
    pub(crate) fn task_not_found() -> Self {
        StoreError::NotFound { entity: "Task" }
    }

    pub(crate) fn priority_not_found() -> Self {
        StoreError::NotFound { entity: "Priority" }
    }
}

// redb 2.x has many error types. Blanket them all into StoreError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);
