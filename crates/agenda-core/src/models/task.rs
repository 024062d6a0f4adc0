//! Task model definition and lifecycle transitions.

use jiff::{
    civil::{DateTime, Time},
    SignedDuration,
};
use serde::{Deserialize, Serialize};

use super::{TaskKind, TaskStatus};
use crate::{
    error::{AgendaError, Result},
    period::DateRange,
};

/// A schedulable unit of work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier, assigned by the store on creation
    pub id: u64,

    /// Client the task is for; `None` for internal work
    pub client_id: Option<u64>,

    /// Order (mission) the task belongs to
    pub order_id: Option<u64>,

    pub kind: TaskKind,

    /// Short label, never empty
    pub title: String,

    pub description: Option<String>,

    /// When the task begins
    pub start_at: DateTime,

    /// When the task ends; `None` for point events
    pub end_at: Option<DateTime>,

    pub status: TaskStatus,

    /// True for internal work not tied to a client
    pub is_process: bool,

    /// Service label shown for process tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Explicitly recorded time spent, overriding the extent in KPIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<SignedDuration>,
}

/// Rejects extents where `end_at <= start_at`.
pub fn validate_extent(start_at: DateTime, end_at: Option<DateTime>) -> Result<()> {
    match end_at {
        Some(end) if end <= start_at => Err(AgendaError::invalid_input("end_at")
            .with_reason(format!("end {end} must be after start {start_at}"))),
        _ => Ok(()),
    }
}

/// Rejects blank titles.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AgendaError::invalid_input("title").with_reason("Title cannot be empty"));
    }
    Ok(())
}

/// Rejects a client reference on a process task.
pub fn validate_client(client_id: Option<u64>, is_process: bool) -> Result<()> {
    if client_id.is_some() && is_process {
        return Err(AgendaError::invalid_input("is_process")
            .with_reason("A task linked to a client cannot be a process task"));
    }
    Ok(())
}

impl Task {
    /// Checks every invariant a stored task must satisfy.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_extent(self.start_at, self.end_at)?;
        validate_client(self.client_id, self.is_process)
    }

    pub fn has_valid_extent(&self) -> bool {
        validate_extent(self.start_at, self.end_at).is_ok()
    }

    /// Length of the extent, if the task has an end.
    pub fn duration(&self) -> Option<SignedDuration> {
        self.end_at.map(|end| end.duration_since(self.start_at))
    }

    /// Time spent as used by KPIs: the explicit figure, else the extent,
    /// else zero.
    pub fn time_spent_or_extent(&self) -> SignedDuration {
        self.time_spent
            .or_else(|| self.duration())
            .filter(|d| !d.is_negative())
            .unwrap_or(SignedDuration::ZERO)
    }

    /// Calendar days the task touches.
    ///
    /// The end is exclusive: a task ending exactly at midnight does not touch
    /// the day that midnight starts.
    pub fn days(&self) -> DateRange {
        let first = self.start_at.date();
        let last = match self.end_at {
            Some(end) if end.date() > first && end.time() == Time::midnight() => {
                end.date().yesterday().unwrap_or(first)
            }
            Some(end) => end.date(),
            None => first,
        };
        DateRange {
            start: first,
            end: last.max(first),
        }
    }

    /// Marks the task done. Returns whether the status changed.
    pub fn complete(&mut self) -> bool {
        let changed = self.status != TaskStatus::Done;
        self.status = TaskStatus::Done;
        changed
    }

    /// Rewrites the extent and resets the status to pending, even when the
    /// task was already done.
    pub fn reschedule(&mut self, start_at: DateTime, end_at: Option<DateTime>) -> Result<()> {
        validate_extent(start_at, end_at)?;
        self.start_at = start_at;
        self.end_at = end_at;
        self.status = TaskStatus::Pending;
        Ok(())
    }
}
