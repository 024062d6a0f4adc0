//! High-level agenda API.
//!
//! [`Agenda`] is the in-process interface used by the CLI. Each operation
//! opens the database on a blocking thread, runs the synchronous engine there
//! and returns owned results.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Agenda      │    │     Engine      │    │    Database     │
//! │ (task_ops,      │───▶│ (lifecycle,     │───▶│ (TaskStore +    │
//! │  view_ops, ...) │    │  calendar, kpi) │    │  Directory)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Operations that depend on the current day take the reference instant as an
//! argument. The caller reads the clock once and passes the same value
//! through.
//!
//! # Usage
//!
//! ```rust
//! use agenda_core::{models::TaskKind, params::NewTask, AgendaBuilder};
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let agenda = AgendaBuilder::new()
//!     .with_database_path(Some("agenda.db"))
//!     .build()
//!     .await?;
//!
//! let start = date(2024, 6, 10).at(9, 0, 0, 0);
//! let task = agenda
//!     .add_task(&NewTask::new("Weekly review", TaskKind::Generic, start))
//!     .await?;
//! let grid = agenda.project_month(2024, 6, &Default::default()).await?;
//! assert_eq!(grid.tasks_on(start.date()).count(), 1);
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, path::PathBuf};

use tokio::task;

use crate::{
    calendar::{CalendarEntry, HourBand},
    db::Database,
    error::{join_error, Result},
    models::Task,
    store::Directory,
};

pub mod builder;
pub mod directory_ops;
pub mod task_ops;
pub mod view_ops;


pub use builder::AgendaBuilder;

/// Main interface to the scheduling engine.
#[derive(Debug, Clone)]
pub struct Agenda {
    pub(crate) db_path: PathBuf,
    pub(crate) hour_band: HourBand,
}

impl Agenda {
    pub(crate) fn new(db_path: PathBuf, hour_band: HourBand) -> Self {
        Self { db_path, hour_band }
    }

    /// The hour band used by the week view when none is given.
    pub fn hour_band(&self) -> HourBand {
        self.hour_band
    }

    /// Runs `f` against a freshly opened database on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(join_error)?
    }
}

/// Pairs each task with its client's display name, looking each client up
/// once.
pub(crate) fn resolve_entries<D: Directory>(
    directory: &D,
    tasks: Vec<Task>,
) -> Result<Vec<CalendarEntry>> {
    let mut names: HashMap<Option<u64>, String> = HashMap::new();
    tasks
        .into_iter()
        .map(|task| {
            let name = match names.get(&task.client_id) {
                Some(name) => name.clone(),
                None => {
                    let name = directory.display_name(task.client_id)?;
                    names.insert(task.client_id, name.clone());
                    name
                }
            };
            Ok(CalendarEntry::new(task, name))
        })
        .collect()
}
