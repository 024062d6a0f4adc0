//! Task operations for the Agenda.

use super::{resolve_entries, Agenda};
use crate::{
    calendar::{CalendarEntry, ProjectionFilter},
    db::Database,
    display::TaskDetails,
    error::{AgendaError, Result},
    lifecycle,
    models::Task,
    params::{Id, NewTask, Reschedule, ScheduleCallback},
    period::DateRange,
    store::{Directory, TaskStore},
};

/// Rejects references to clients or orders that do not exist.
fn check_references(db: &Database, task: &NewTask) -> Result<()> {
    if let Some(id) = task.client_id {
        if db.resolve_client_name(id)?.is_none() {
            return Err(AgendaError::ClientNotFound { id });
        }
    }
    if let Some(id) = task.order_id {
        if db.resolve_order_label(id)?.is_none() {
            return Err(AgendaError::OrderNotFound { id });
        }
    }
    Ok(())
}

impl Agenda {
    /// Tasks whose days intersect `range`, ordered by start then id.
    pub async fn list_tasks_in_range(&self, range: &DateRange) -> Result<Vec<Task>> {
        let range = *range;
        self.with_db(move |db| db.query(range)).await
    }

    /// Tasks in `range` with their client names, after filtering.
    pub async fn list_entries_in_range(
        &self,
        range: &DateRange,
        filter: &ProjectionFilter,
    ) -> Result<Vec<CalendarEntry>> {
        let range = *range;
        let filter = filter.clone();
        self.with_db(move |db| {
            let tasks = db.query(range)?;
            let entries = resolve_entries(&*db, tasks)?;
            Ok(entries.into_iter().filter(|e| filter.matches(e)).collect())
        })
        .await
    }

    /// Retrieves a single task by its ID.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let id = params.id;
        self.with_db(move |db| db.get(id)).await
    }

    /// Retrieves a task with its client name and order label.
    pub async fn show_task(&self, params: &Id) -> Result<Option<TaskDetails>> {
        let id = params.id;
        self.with_db(move |db| {
            let Some(task) = db.get(id)? else {
                return Ok(None);
            };
            let order_label = match task.order_id {
                Some(order_id) => db.resolve_order_label(order_id)?,
                None => None,
            };
            let client_name = db.display_name(task.client_id)?;
            Ok(Some(TaskDetails {
                entry: CalendarEntry::new(task, client_name),
                order_label,
            }))
        })
        .await
    }

    /// Validates and stores a new task.
    pub async fn add_task(&self, params: &NewTask) -> Result<Task> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| {
            check_references(db, &params)?;
            lifecycle::add_task(db, &params)
        })
        .await
    }

    /// Marks a task done.
    pub async fn complete_task(&self, params: &Id) -> Result<Task> {
        let id = params.id;
        self.with_db(move |db| lifecycle::complete_task(db, id)).await
    }

    /// Moves a task to a new extent; the task becomes pending again.
    pub async fn reschedule_task(&self, params: &Reschedule) -> Result<Task> {
        let params = params.clone();
        self.with_db(move |db| lifecycle::reschedule_task(db, &params))
            .await
    }

    /// Deletes a task and returns it.
    pub async fn cancel_task(&self, params: &Id) -> Result<Task> {
        let id = params.id;
        self.with_db(move |db| lifecycle::cancel_task(db, id)).await
    }

    /// Creates a callback reminder for a client.
    pub async fn schedule_callback(&self, params: &ScheduleCallback) -> Result<Task> {
        let params = params.clone();
        self.with_db(move |db| {
            let name = db
                .resolve_client_name(params.client_id)?
                .ok_or(AgendaError::ClientNotFound {
                    id: params.client_id,
                })?;
            lifecycle::schedule_callback(db, &params, &name)
        })
        .await
    }
}
