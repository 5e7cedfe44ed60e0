use chrono::Utc;
use redb::{ReadableTable, Table};
use uuid::Uuid;

use crate::{
    data_access::{
        data_context::{
            decode, encode, DataContext, PRIORITIES_TABLE, TASKS_BY_OWNER, TASKS_TABLE,
            TASK_PRIORITY_REFS,
        },
        store_error::StoreError,
    },
    owner::Owner,
    priority::Priority,
    task::{Task, TaskFields},
    task_response::TaskResponse,
};

/// Task operations. Every call is scoped to an explicit owner; a task id
/// that belongs to someone else behaves exactly like one that doesn't exist.
pub struct TaskStore<'a> {
    ctx: &'a DataContext,
}

/// Resolve `priority_id` to a priority of `owner`, or fail with
/// `InvalidPriorityReference`.
fn owned_priority<T: ReadableTable<u128, &'static [u8]>>(
    priorities: &T,
    owner: Owner,
    priority_id: Uuid,
) -> Result<Priority, StoreError> {
    let data = priorities.get(priority_id.as_u128())?;
    match data.map(|d| decode::<Priority>(d.value())).transpose()? {
        Some(p) if p.owner_id == owner.id() => Ok(p),
        _ => Err(StoreError::InvalidPriorityReference),
    }
}

/// Load a task scoped to `(id, owner)`.
fn owned_task<T: ReadableTable<u128, &'static [u8]>>(
    tasks: &T,
    owner: Owner,
    id: Uuid,
) -> Result<Task, StoreError> {
    let data = tasks.get(id.as_u128())?;
    match data.map(|d| decode::<Task>(d.value())).transpose()? {
        Some(t) if t.owner_id == owner.id() => Ok(t),
        _ => Err(StoreError::task_not_found()),
    }
}

fn put_task(tasks: &mut Table<'_, u128, &'static [u8]>, task: &Task) -> Result<(), StoreError> {
    let bytes = encode(task)?;
    tasks.insert(task.id.as_u128(), bytes.as_slice())?;
    Ok(())
}

impl<'a> TaskStore<'a> {
    pub(crate) fn new(ctx: &'a DataContext) -> Self {
        TaskStore { ctx }
    }

    /// The owner's tasks joined with their priorities, newest first.
    pub fn list(&self, owner: Owner) -> Result<Vec<TaskResponse>, StoreError> {
        let mut result = self.ctx.read(|txn| {
            let by_owner = txn.open_table(TASKS_BY_OWNER)?;
            let tasks = txn.open_table(TASKS_TABLE)?;
            let priorities = txn.open_table(PRIORITIES_TABLE)?;

            let mut result = Vec::new();
            for entry in by_owner.range((owner.key(), u128::MIN)..=(owner.key(), u128::MAX))? {
                let (key, _) = entry?;
                let (_, task_id) = key.value();
                let task = owned_task(&tasks, owner, Uuid::from_u128(task_id))?;
                let priority = owned_priority(&priorities, owner, task.priority_id)?;
                result.push(TaskResponse::new(task, priority));
            }
            Ok(result)
        })?;

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(result)
    }

    /// Insert a task linked to `owner` and to one of the owner's priorities.
    pub fn create(&self, owner: Owner, fields: TaskFields) -> Result<TaskResponse, StoreError> {
        let task = Task {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            completed: fields.completed,
            deadline: fields.deadline,
            priority_id: fields.priority_id,
            owner_id: owner.id(),
            created_at: Utc::now(),
        };

        let response = self.ctx.write(|txn| {
            let mut tasks = txn.open_table(TASKS_TABLE)?;
            let mut by_owner = txn.open_table(TASKS_BY_OWNER)?;
            let mut refs = txn.open_table(TASK_PRIORITY_REFS)?;
            let priorities = txn.open_table(PRIORITIES_TABLE)?;

            let priority = owned_priority(&priorities, owner, task.priority_id)?;
            put_task(&mut tasks, &task)?;
            by_owner.insert((owner.key(), task.id.as_u128()), ())?;
            refs.insert((task.priority_id.as_u128(), task.id.as_u128()), ())?;
            Ok(TaskResponse::new(task, priority))
        })?;

        tracing::debug!(%owner, task_id = %response.id, "task created");
        Ok(response)
    }

    /// Replace every mutable field of the task scoped to `(id, owner)`.
    pub fn update(&self, owner: Owner, id: Uuid, fields: TaskFields) -> Result<TaskResponse, StoreError> {
        let response = self.ctx.write(|txn| {
            let mut tasks = txn.open_table(TASKS_TABLE)?;
            let mut refs = txn.open_table(TASK_PRIORITY_REFS)?;
            let priorities = txn.open_table(PRIORITIES_TABLE)?;

            let mut task = owned_task(&tasks, owner, id)?;
            let priority = owned_priority(&priorities, owner, fields.priority_id)?;

            if task.priority_id != fields.priority_id {
                refs.remove((task.priority_id.as_u128(), id.as_u128()))?;
                refs.insert((fields.priority_id.as_u128(), id.as_u128()), ())?;
            }
            task.apply(fields);
            put_task(&mut tasks, &task)?;
            Ok(TaskResponse::new(task, priority))
        })?;

        tracing::debug!(%owner, task_id = %id, "task updated");
        Ok(response)
    }

    pub fn mark_as_completed(&self, owner: Owner, id: Uuid) -> Result<TaskResponse, StoreError> {
        self.set_completed(owner, id, true)
    }

    pub fn mark_as_not_completed(&self, owner: Owner, id: Uuid) -> Result<TaskResponse, StoreError> {
        self.set_completed(owner, id, false)
    }

    fn set_completed(&self, owner: Owner, id: Uuid, completed: bool) -> Result<TaskResponse, StoreError> {
        let response = self.ctx.write(|txn| {
            let mut tasks = txn.open_table(TASKS_TABLE)?;
            let priorities = txn.open_table(PRIORITIES_TABLE)?;

            let mut task = owned_task(&tasks, owner, id)?;
            let priority = owned_priority(&priorities, owner, task.priority_id)?;
            if task.completed != completed {
                task.completed = completed;
                put_task(&mut tasks, &task)?;
            }
            Ok(TaskResponse::new(task, priority))
        })?;

        tracing::debug!(%owner, task_id = %id, completed, "task completion set");
        Ok(response)
    }

    /// Remove the task scoped to `(id, owner)` and return it.
    pub fn delete(&self, owner: Owner, id: Uuid) -> Result<TaskResponse, StoreError> {
        let response = self.ctx.write(|txn| {
            let mut tasks = txn.open_table(TASKS_TABLE)?;
            let mut by_owner = txn.open_table(TASKS_BY_OWNER)?;
            let mut refs = txn.open_table(TASK_PRIORITY_REFS)?;
            let priorities = txn.open_table(PRIORITIES_TABLE)?;

            let task = owned_task(&tasks, owner, id)?;
            let priority = owned_priority(&priorities, owner, task.priority_id)?;
            tasks.remove(id.as_u128())?;
            by_owner.remove((owner.key(), id.as_u128()))?;
            refs.remove((task.priority_id.as_u128(), id.as_u128()))?;
            Ok(TaskResponse::new(task, priority))
        })?;

        tracing::debug!(%owner, task_id = %id, "task deleted");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data_access::data_context::tests::temp_context, priority::NewPriority};
    use chrono::NaiveDate;
    use std::{thread, time::Duration};

    fn alice() -> Owner {
        Owner(Uuid::from_u128(1))
    }

    fn bob() -> Owner {
        Owner(Uuid::from_u128(2))
    }

    fn priority(ctx: &DataContext, owner: Owner, value: i64) -> Priority {
        ctx.priorities()
            .create(
                owner,
                NewPriority {
                    name: format!("P{value}"),
                    value,
                },
            )
            .unwrap()
    }

    fn fields(name: &str, priority_id: Uuid) -> TaskFields {
        TaskFields {
            name: name.into(),
            description: None,
            completed: false,
            deadline: None,
            priority_id,
        }
    }

    #[test]
    fn create_embeds_priority_and_defaults() {
        let (ctx, _dir) = temp_context();
        let p = priority(&ctx, alice(), 1);
        let task = ctx.tasks().create(alice(), fields("Ship report", p.id)).unwrap();

        assert_eq!(task.name, "Ship report");
        assert!(!task.completed);
        assert_eq!(task.priority, p);
        assert_eq!(task.owner_id, alice().id());
    }

    #[test]
    fn create_rejects_missing_or_foreign_priority() {
        let (ctx, _dir) = temp_context();
        let bobs = priority(&ctx, bob(), 1);

        let err = ctx.tasks().create(alice(), fields("x", Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPriorityReference));

        let err = ctx.tasks().create(alice(), fields("x", bobs.id)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPriorityReference));

        assert!(ctx.tasks().list(alice()).unwrap().is_empty());
    }

    #[test]
    fn list_is_newest_first_and_scoped() {
        let (ctx, _dir) = temp_context();
        let p = priority(&ctx, alice(), 1);
        let q = priority(&ctx, bob(), 1);

        ctx.tasks().create(alice(), fields("first", p.id)).unwrap();
        thread::sleep(Duration::from_millis(5));
        ctx.tasks().create(alice(), fields("second", p.id)).unwrap();
        ctx.tasks().create(bob(), fields("bob's", q.id)).unwrap();

        let names: Vec<String> = ctx.tasks().list(alice()).unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["second", "first"]);
        assert_eq!(ctx.tasks().list(bob()).unwrap().len(), 1);
    }

    #[test]
    fn update_replaces_fields_and_moves_priority_reference() {
        let (ctx, _dir) = temp_context();
        let low = priority(&ctx, alice(), 1);
        let high = priority(&ctx, alice(), 2);
        let mut initial = fields("draft", low.id);
        initial.description = Some("notes".into());
        initial.deadline = NaiveDate::from_ymd_opt(2025, 3, 1);
        let task = ctx.tasks().create(alice(), initial).unwrap();

        let updated = ctx
            .tasks()
            .update(
                alice(),
                task.id,
                TaskFields {
                    name: "final".into(),
                    description: None,
                    completed: true,
                    deadline: None,
                    priority_id: high.id,
                },
            )
            .unwrap();

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.name, "final");
        assert_eq!(updated.description, None);
        assert_eq!(updated.deadline, None);
        assert!(updated.completed);
        assert_eq!(updated.priority.id, high.id);
        assert_eq!(updated.created_at, task.created_at);

        // The old priority is no longer referenced; the new one is.
        ctx.priorities().delete(alice(), low.id).unwrap();
        assert!(matches!(
            ctx.priorities().delete(alice(), high.id).unwrap_err(),
            StoreError::PriorityInUse { .. }
        ));
    }

    #[test]
    fn update_with_bad_priority_leaves_task_untouched() {
        let (ctx, _dir) = temp_context();
        let p = priority(&ctx, alice(), 1);
        let task = ctx.tasks().create(alice(), fields("keep", p.id)).unwrap();

        let err = ctx
            .tasks()
            .update(alice(), task.id, fields("changed", Uuid::new_v4()))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidPriorityReference));
        assert_eq!(ctx.tasks().list(alice()).unwrap()[0].name, "keep");
    }

    #[test]
    fn other_owner_cannot_touch_task() {
        let (ctx, _dir) = temp_context();
        let p = priority(&ctx, alice(), 1);
        let q = priority(&ctx, bob(), 1);
        let task = ctx.tasks().create(alice(), fields("mine", p.id)).unwrap();

        let tasks = ctx.tasks();
        assert!(matches!(tasks.update(bob(), task.id, fields("x", q.id)), Err(StoreError::NotFound { .. })));
        assert!(matches!(tasks.mark_as_completed(bob(), task.id), Err(StoreError::NotFound { .. })));
        assert!(matches!(tasks.mark_as_not_completed(bob(), task.id), Err(StoreError::NotFound { .. })));
        assert!(matches!(tasks.delete(bob(), task.id), Err(StoreError::NotFound { .. })));

        let still = tasks.list(alice()).unwrap();
        assert_eq!(still.len(), 1);
        assert_eq!(still[0].name, "mine");
        assert!(!still[0].completed);
    }

    #[test]
    fn completion_toggles_are_idempotent() {
        let (ctx, _dir) = temp_context();
        let p = priority(&ctx, alice(), 1);
        let task = ctx.tasks().create(alice(), fields("toggle", p.id)).unwrap();
        let tasks = ctx.tasks();

        assert!(tasks.mark_as_completed(alice(), task.id).unwrap().completed);
        assert!(tasks.mark_as_completed(alice(), task.id).unwrap().completed);
        assert!(!tasks.mark_as_not_completed(alice(), task.id).unwrap().completed);
        assert!(!tasks.mark_as_not_completed(alice(), task.id).unwrap().completed);
        assert!(tasks.mark_as_completed(alice(), task.id).unwrap().completed);
        assert!(tasks.list(alice()).unwrap()[0].completed);
    }

    #[test]
    fn delete_removes_task_and_missing_id_is_not_found() {
        let (ctx, _dir) = temp_context();
        let p = priority(&ctx, alice(), 1);
        let task = ctx.tasks().create(alice(), fields("gone", p.id)).unwrap();

        let deleted = ctx.tasks().delete(alice(), task.id).unwrap();
        assert_eq!(deleted.id, task.id);
        assert!(ctx.tasks().list(alice()).unwrap().is_empty());
        assert!(matches!(
            ctx.tasks().delete(alice(), task.id).unwrap_err(),
            StoreError::NotFound { entity: "Task" }
        ));
    }
}
