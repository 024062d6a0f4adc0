//! Task kinds.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kind of work a task represents.
///
/// The set of known kinds is closed in code, but stored data may carry labels
/// written by older or newer configurations. Those decode to
/// [`TaskKind::Legacy`] and round-trip unchanged instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// Generic work item; outbound calls are logged with this kind
    Generic,
    /// First meeting with a prospect
    FirstMeeting,
    Maintenance,
    Upsell,
    /// Reminder to call a prospect back
    CallbackReminder,
    /// A stored label this build does not recognise
    Legacy(String),
}

impl TaskKind {
    /// Every known kind, in display order.
    pub const KNOWN: [TaskKind; 5] = [
        TaskKind::Generic,
        TaskKind::FirstMeeting,
        TaskKind::Maintenance,
        TaskKind::Upsell,
        TaskKind::CallbackReminder,
    ];

    /// Kinds listed in the day's appointment summary.
    pub const APPOINTMENTS: [TaskKind; 4] = [
        TaskKind::FirstMeeting,
        TaskKind::CallbackReminder,
        TaskKind::Upsell,
        TaskKind::Maintenance,
    ];

    /// Storage label.
    pub fn as_str(&self) -> &str {
        match self {
            TaskKind::Generic => "generic",
            TaskKind::FirstMeeting => "first-meeting",
            TaskKind::Maintenance => "maintenance",
            TaskKind::Upsell => "upsell",
            TaskKind::CallbackReminder => "callback-reminder",
            TaskKind::Legacy(label) => label,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &str {
        match self {
            TaskKind::Generic => "Task",
            TaskKind::FirstMeeting => "First meeting",
            TaskKind::Maintenance => "Maintenance",
            TaskKind::Upsell => "Upsell",
            TaskKind::CallbackReminder => "Call back",
            TaskKind::Legacy(label) => label,
        }
    }

    /// Whether tasks of this kind count as calls in KPIs.
    pub fn is_call(&self) -> bool {
        matches!(self, TaskKind::Generic)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, TaskKind::Legacy(_))
    }
}

impl TaskKind {
    /// Decodes a stored or typed label, accepting the historical aliases.
    pub fn from_label(s: &str) -> Self {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "generic" | "task" | "tache" | "tâche" => TaskKind::Generic,
            "first-meeting" | "r1" => TaskKind::FirstMeeting,
            "maintenance" => TaskKind::Maintenance,
            "upsell" => TaskKind::Upsell,
            "callback-reminder" | "callback" | "à-rappeller" | "a-rappeller" => {
                TaskKind::CallbackReminder
            }
            _ => TaskKind::Legacy(s.trim().to_string()),
        }
    }
}

impl FromStr for TaskKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}
