//! Collaborator interfaces consumed by the scheduling engine.
//!
//! The engine never talks to storage directly. Lifecycle operations are
//! generic over [`TaskStore`], and display names come from a [`Directory`].
//! [`crate::db::Database`] implements both on SQLite.
//!
//! Access is assumed to be serialized per operation. There is no optimistic
//! concurrency token: when two writers save the same task, the last one wins.

use crate::{
    calendar::PROCESS_LABEL,
    error::Result,
    models::Task,
    params::NewTask,
    period::DateRange,
};

/// Persistent storage of tasks.
pub trait TaskStore {
    /// Tasks whose days intersect `range`, ordered by start then id.
    ///
    /// Records that cannot be decoded are logged and left out.
    fn query(&self, range: DateRange) -> Result<Vec<Task>>;

    fn get(&self, id: u64) -> Result<Option<Task>>;

    /// Stores a new task and returns it with its assigned id.
    fn insert(&mut self, task: &NewTask) -> Result<Task>;

    /// Overwrites a stored task. Fails with `TaskNotFound` for an unknown id.
    fn save(&mut self, task: &Task) -> Result<()>;

    /// Removes a task. Returns whether a record was deleted.
    fn delete(&mut self, id: u64) -> Result<bool>;
}

/// Lookup of client and order display names.
pub trait Directory {
    fn resolve_client_name(&self, client_id: u64) -> Result<Option<String>>;

    fn resolve_order_label(&self, order_id: u64) -> Result<Option<String>>;

    /// Name shown next to a task: the client's name, or the process label
    /// for internal work. A dangling reference is shown by id.
    fn display_name(&self, client_id: Option<u64>) -> Result<String> {
        match client_id {
            None => Ok(PROCESS_LABEL.to_string()),
            Some(id) => Ok(self
                .resolve_client_name(id)?
                .unwrap_or_else(|| format!("Client #{id}"))),
        }
    }
}
