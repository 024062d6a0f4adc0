//! Projection of tasks onto calendar grids.
//!
//! Two views are produced from the same input:
//!
//! - [`MonthGrid`]: Monday-first weeks of day cells. Days from adjacent
//!   months are placeholders and never hold tasks.
//! - [`WeekGrid`]: seven days by the hourly rows of an [`HourBand`].
//!
//! Both are recomputed from scratch on each call. Input is filtered, then
//! sorted by start and id, then placed, so every cell lists its tasks by
//! `start_at` with ties broken by `id` and identical input always yields the
//! identical grid.
//!
//! A task whose extent is corrupt (`end_at <= start_at`) is a data error: it
//! is logged and left out, and the rest of the projection proceeds.

use std::{fmt, str::FromStr};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AgendaError, Result},
    models::{Task, TaskKind},
};

pub mod month;
pub mod week;

pub use month::{month_window, project_month, DayCell, MonthGrid};
pub use week::{project_week, week_window, WeekGrid};

/// Label shown for tasks with no client.
pub const PROCESS_LABEL: &str = "Process";

/// A task together with the display name of its client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub task: Task,
    pub client_name: String,
}

impl CalendarEntry {
    pub fn new(task: Task, client_name: impl Into<String>) -> Self {
        Self {
            task,
            client_name: client_name.into(),
        }
    }

    /// An entry for a task with no client.
    pub fn process(task: Task) -> Self {
        Self::new(task, PROCESS_LABEL)
    }
}

/// Filters applied before placement. Tasks that fail are left out of every
/// cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionFilter {
    /// Case-insensitive substring matched against client name, title and kind
    pub text: Option<String>,
    pub kind: Option<TaskKind>,
}

impl ProjectionFilter {
    pub fn matches(&self, entry: &CalendarEntry) -> bool {
        if self.kind.as_ref().is_some_and(|kind| *kind != entry.task.kind) {
            return false;
        }
        let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let needle = text.to_lowercase();
        [
            entry.client_name.as_str(),
            entry.task.title.as_str(),
            entry.task.kind.as_str(),
            entry.task.kind.label(),
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

/// A band of whole hours, `[start, end)`, shown as rows of the week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHourBand")]
pub struct HourBand {
    start: i8,
    end: i8,
}

/// Unchecked wire form of [`HourBand`].
#[derive(Deserialize)]
struct RawHourBand {
    start: i8,
    end: i8,
}

impl TryFrom<RawHourBand> for HourBand {
    type Error = AgendaError;

    fn try_from(raw: RawHourBand) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl HourBand {
    /// Midnight to midnight.
    pub const FULL_DAY: HourBand = HourBand { start: 0, end: 24 };

    /// 08:00 to 19:00.
    pub const WORKING: HourBand = HourBand { start: 8, end: 19 };

    /// Creates a band; requires `0 <= start < end <= 24`.
    pub fn new(start: i8, end: i8) -> Result<Self> {
        if !(0..24).contains(&start) || !(1..=24).contains(&end) || start >= end {
            return Err(AgendaError::invalid_input("hours").with_reason(format!(
                "hour band {start}-{end} must satisfy 0 <= start < end <= 24"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i8 {
        self.start
    }

    pub fn end(&self) -> i8 {
        self.end
    }

    pub fn contains(&self, hour: i8) -> bool {
        self.start <= hour && hour < self.end
    }

    /// The hour of each row, in order.
    pub fn hours(&self) -> impl Iterator<Item = i8> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl Default for HourBand {
    fn default() -> Self {
        Self::WORKING
    }
}

impl FromStr for HourBand {
    type Err = AgendaError;

    /// Parses `"8-19"` or `"08:00-19:00"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            AgendaError::invalid_input("hours")
                .with_reason(format!("expected START-END such as 8-19, got '{s}'"))
        };
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let parse = |part: &str| -> Result<i8> {
            let hour = part.trim().split(':').next().unwrap_or_default();
            hour.parse::<i8>().map_err(|_| invalid())
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

impl fmt::Display for HourBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start, self.end)
    }
}

/// Drops filtered-out and corrupt entries, then sorts by start and id.
fn prepare<I>(entries: I, filter: &ProjectionFilter) -> Vec<CalendarEntry>
where
    I: IntoIterator<Item = CalendarEntry>,
{
    let mut kept: Vec<CalendarEntry> = entries
        .into_iter()
        .filter(|entry| {
            if entry.task.has_valid_extent() {
                return true;
            }
            warn!(
                "Skipping task {}: end {:?} is not after start {}",
                entry.task.id, entry.task.end_at, entry.task.start_at
            );
            false
        })
        .filter(|entry| filter.matches(entry))
        .collect();
    kept.sort_by(|a, b| {
        a.task
            .start_at
            .cmp(&b.task.start_at)
            .then(a.task.id.cmp(&b.task.id))
    });
    kept
}
