//! redb-backed storage for users, priorities and tasks.
//!
//! Every operation runs inside exactly one redb transaction. redb allows a
//! single write transaction at a time, so checks made inside `write` are
//! atomic with the writes that follow them. The index tables below are the
//! storage-level constraints: uniqueness of a priority value per owner, and
//! the task → priority references that guard priority deletion.

use std::{path::Path, sync::Arc};

use redb::{Database, ReadTransaction, ReadableTable, TableDefinition, WriteTransaction};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    data_access::{priority_store::PriorityStore, store_error::StoreError, task_store::TaskStore},
    user::User,
};

pub(crate) const USERS_TABLE: TableDefinition<u128, &[u8]> = TableDefinition::new("users");
pub(crate) const USERNAME_INDEX: TableDefinition<&str, u128> = TableDefinition::new("username_index");
pub(crate) const PRIORITIES_TABLE: TableDefinition<u128, &[u8]> = TableDefinition::new("priorities");
/// (owner, value) → priority id. One entry per priority; doubles as the
/// owner's priority list in value order.
pub(crate) const PRIORITY_VALUE_INDEX: TableDefinition<(u128, i64), u128> =
    TableDefinition::new("priority_value_index");
pub(crate) const TASKS_TABLE: TableDefinition<u128, &[u8]> = TableDefinition::new("tasks");
/// (owner, task id) → (). The owner's task list.
pub(crate) const TASKS_BY_OWNER: TableDefinition<(u128, u128), ()> =
    TableDefinition::new("tasks_by_owner");
/// (priority id, task id) → (). Which tasks reference which priority.
pub(crate) const TASK_PRIORITY_REFS: TableDefinition<(u128, u128), ()> =
    TableDefinition::new("task_priority_refs");

#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    /// Open (or create) the database file and make sure every table exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(USERNAME_INDEX)?;
            let _ = write_txn.open_table(PRIORITIES_TABLE)?;
            let _ = write_txn.open_table(PRIORITY_VALUE_INDEX)?;
            let _ = write_txn.open_table(TASKS_TABLE)?;
            let _ = write_txn.open_table(TASKS_BY_OWNER)?;
            let _ = write_txn.open_table(TASK_PRIORITY_REFS)?;
        }
        write_txn.commit()?;
        Ok(DataContext { db: Arc::new(db) })
    }

    pub fn priorities(&self) -> PriorityStore<'_> {
        PriorityStore::new(self)
    }

    pub fn tasks(&self) -> TaskStore<'_> {
        TaskStore::new(self)
    }

    pub(crate) fn read<T>(
        &self,
        f: impl FnOnce(&ReadTransaction) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let read_txn = self.db.begin_read()?;
        f(&read_txn)
    }

    /// Run `f` in a write transaction. Commits on `Ok`, aborts on `Err`.
    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&WriteTransaction) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let write_txn = self.db.begin_write()?;
        match f(&write_txn) {
            Ok(value) => {
                write_txn.commit()?;
                Ok(value)
            }
            Err(e) => {
                write_txn.abort()?;
                Err(e)
            }
        }
    }

    // USERS
    pub fn create_user(&self, user: &User) -> Result<(), StoreError> {
        self.write(|txn| {
            let mut users_table = txn.open_table(USERS_TABLE)?;
            let mut username_index = txn.open_table(USERNAME_INDEX)?;
            if username_index.get(user.username.as_str())?.is_some() {
                return Err(StoreError::DuplicateUsername);
            }
            let user_bytes = encode(user)?;
            users_table.insert(user.id.as_u128(), user_bytes.as_slice())?;
            username_index.insert(user.username.as_str(), user.id.as_u128())?;
            Ok(())
        })?;
        tracing::info!(user_id = %user.id, username = %user.username, "user created");
        Ok(())
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.read(|txn| {
            let users_table = txn.open_table(USERS_TABLE)?;
            let user = users_table.get(id.as_u128())?;
            user.map(|data| decode(data.value())).transpose()
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.read(|txn| {
            let username_index = txn.open_table(USERNAME_INDEX)?;
            let Some(id) = username_index.get(username)?.map(|id| id.value()) else {
                return Ok(None);
            };
            let users_table = txn.open_table(USERS_TABLE)?;
            let user = users_table.get(id)?;
            user.map(|data| decode(data.value())).transpose()
        })
    }

    pub fn count_users(&self) -> Result<usize, StoreError> {
        self.read(|txn| {
            let users_table = txn.open_table(USERS_TABLE)?;
            let mut count = 0;
            for entry in users_table.iter()? {
                entry?;
                count += 1;
            }
            Ok(count)
        })
    }

    /// Seed an account from the configured credentials when no user exists.
    /// Returns true if one was created.
    pub fn ensure_default_user(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        if self.count_users()? > 0 {
            return Ok(false);
        }
        let user = User::new(username.to_string(), password)
            .map_err(|e| StoreError::Encode(format!("password hash: {e}")))?;
        self.create_user(&user)?;
        Ok(true)
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    postcard::to_allocvec(value).map_err(|e| StoreError::Encode(e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    postcard::from_bytes(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}
