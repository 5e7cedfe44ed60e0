use redb::ReadableTable;
use uuid::Uuid;

use crate::{
    data_access::{
        data_context::{
            decode, encode, DataContext, PRIORITIES_TABLE, PRIORITY_VALUE_INDEX, TASK_PRIORITY_REFS,
        },
        store_error::StoreError,
    },
    owner::Owner,
    priority::{NewPriority, Priority},
};

/// Priority operations. Every call is scoped to an explicit owner.
pub struct PriorityStore<'a> {
    ctx: &'a DataContext,
}

impl<'a> PriorityStore<'a> {
    pub(crate) fn new(ctx: &'a DataContext) -> Self {
        PriorityStore { ctx }
    }

    /// The owner's priorities, ascending by value.
    pub fn list(&self, owner: Owner) -> Result<Vec<Priority>, StoreError> {
        self.ctx.read(|txn| {
            let index = txn.open_table(PRIORITY_VALUE_INDEX)?;
            let priorities = txn.open_table(PRIORITIES_TABLE)?;

            let mut result = Vec::new();
            for entry in index.range((owner.key(), i64::MIN)..=(owner.key(), i64::MAX))? {
                let (_, id) = entry?;
                if let Some(data) = priorities.get(id.value())? {
                    result.push(decode::<Priority>(data.value())?);
                }
            }
            Ok(result)
        })
    }

    /// Fetch one priority if it exists and belongs to `owner`.
    pub fn get(&self, owner: Owner, id: Uuid) -> Result<Option<Priority>, StoreError> {
        self.ctx.read(|txn| {
            let priorities = txn.open_table(PRIORITIES_TABLE)?;
            let priority = priorities.get(id.as_u128())?;
            let priority = priority.map(|data| decode::<Priority>(data.value())).transpose()?;
            Ok(priority.filter(|p| p.owner_id == owner.id()))
        })
    }

    pub fn value_taken(&self, owner: Owner, value: i64) -> Result<bool, StoreError> {
        self.ctx.read(|txn| {
            let index = txn.open_table(PRIORITY_VALUE_INDEX)?;
            let taken = index.get((owner.key(), value))?.is_some();
            Ok(taken)
        })
    }

    /// Insert a new priority. Fails with `DuplicatePriorityValue` when the
    /// owner already has one with the same value.
    pub fn create(&self, owner: Owner, input: NewPriority) -> Result<Priority, StoreError> {
        // Fast path for the common case; the index check below is the one
        // that holds under concurrent writers.
        if self.value_taken(owner, input.value)? {
            return Err(StoreError::DuplicatePriorityValue { value: input.value });
        }

        let priority = Priority {
            id: Uuid::new_v4(),
            name: input.name,
            value: input.value,
            owner_id: owner.id(),
        };

        self.ctx.write(|txn| {
            let mut index = txn.open_table(PRIORITY_VALUE_INDEX)?;
            let mut priorities = txn.open_table(PRIORITIES_TABLE)?;

            if index.get((owner.key(), priority.value))?.is_some() {
                return Err(StoreError::DuplicatePriorityValue {
                    value: priority.value,
                });
            }
            let bytes = encode(&priority)?;
            priorities.insert(priority.id.as_u128(), bytes.as_slice())?;
            index.insert((owner.key(), priority.value), priority.id.as_u128())?;
            Ok(())
        })?;

        tracing::debug!(%owner, priority_id = %priority.id, value = priority.value, "priority created");
        Ok(priority)
    }

    /// Delete a priority scoped to `(id, owner)` and return it.
    ///
    /// A missing id and another owner's id both yield `NotFound`. A
    /// priority still referenced by any task yields `PriorityInUse`.
    pub fn delete(&self, owner: Owner, id: Uuid) -> Result<Priority, StoreError> {
        let priority = self.ctx.write(|txn| {
            let mut priorities = txn.open_table(PRIORITIES_TABLE)?;
            let mut index = txn.open_table(PRIORITY_VALUE_INDEX)?;
            let refs = txn.open_table(TASK_PRIORITY_REFS)?;

            let existing = priorities.get(id.as_u128())?;
            let priority = match existing.map(|data| decode::<Priority>(data.value())).transpose()? {
                Some(p) if p.owner_id == owner.id() => p,
                _ => return Err(StoreError::priority_not_found()),
            };

            let references = refs
                .range((id.as_u128(), u128::MIN)..=(id.as_u128(), u128::MAX))?
                .count();
            if references > 0 {
                return Err(StoreError::PriorityInUse { references });
            }

            priorities.remove(id.as_u128())?;
            index.remove((owner.key(), priority.value))?;
            Ok(priority)
        })?;

        tracing::debug!(%owner, priority_id = %id, "priority deleted");
        Ok(priority)
    }
}
