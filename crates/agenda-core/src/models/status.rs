//! Task status enumeration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Lifecycle status of a task.
///
/// Cancellation is not a status: a cancelled task is deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Initial status, and the status after any reschedule
    #[default]
    Pending,

    /// Work has been completed
    Done,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "todo" | "à faire" => Ok(TaskStatus::Pending),
            "done" | "terminé" => Ok(TaskStatus::Done),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
        }
    }

    /// Status with an icon, for list display.
    ///
    /// ```rust
    /// use agenda_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Done => "✓ Done",
            TaskStatus::Pending => "○ Pending",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
