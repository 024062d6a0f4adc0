//! Task lifecycle transitions over any [`TaskStore`].
//!
//! ```text
//!            add_task / schedule_callback
//!                       │
//!                       ▼
//!   reschedule ──▶  Pending  ──complete──▶  Done
//!        ▲                                   │
//!        └───────────── reschedule ──────────┘
//!
//!   cancel (any status) ──▶ deleted
//! ```
//!
//! Every transition validates before it writes, so a rejected call leaves the
//! store untouched. Operations on an unknown id fail with
//! [`AgendaError::TaskNotFound`] and change nothing.

use log::{debug, info};

use crate::{
    error::{AgendaError, Result},
    models::{Task, TaskKind},
    params::{NewTask, Reschedule, ScheduleCallback},
    store::TaskStore,
};

fn load<S: TaskStore>(store: &S, id: u64) -> Result<Task> {
    store.get(id)?.ok_or(AgendaError::TaskNotFound { id })
}

/// Validates and stores a new pending task.
pub fn add_task<S: TaskStore>(store: &mut S, task: &NewTask) -> Result<Task> {
    task.validate()?;
    let task = store.insert(task)?;
    info!("Added task {} ({}) at {}", task.id, task.kind, task.start_at);
    Ok(task)
}

/// Marks a task done. Completing a done task is a no-op.
pub fn complete_task<S: TaskStore>(store: &mut S, id: u64) -> Result<Task> {
    let mut task = load(store, id)?;
    if task.complete() {
        store.save(&task)?;
        info!("Completed task {id}");
    } else {
        debug!("Task {id} already done");
    }
    Ok(task)
}

/// Moves a task to a new extent and re-opens it.
pub fn reschedule_task<S: TaskStore>(store: &mut S, params: &Reschedule) -> Result<Task> {
    let mut task = load(store, params.id)?;
    task.reschedule(params.start_at, params.end_at)?;
    store.save(&task)?;
    info!("Rescheduled task {} to {}", task.id, task.start_at);
    Ok(task)
}

/// Deletes a task and returns it as it was.
pub fn cancel_task<S: TaskStore>(store: &mut S, id: u64) -> Result<Task> {
    let task = load(store, id)?;
    if !store.delete(id)? {
        return Err(AgendaError::TaskNotFound { id });
    }
    info!("Cancelled task {id}");
    Ok(task)
}

/// Creates a callback reminder for a client the caller has already resolved.
pub fn schedule_callback<S: TaskStore>(
    store: &mut S,
    params: &ScheduleCallback,
    client_name: &str,
) -> Result<Task> {
    let mut task = NewTask::new(
        format!("Call back {client_name}"),
        TaskKind::CallbackReminder,
        params.at,
    )
    .for_client(params.client_id);
    task.description = params.note.clone();
    add_task(store, &task)
}
