//! Month view.

use jiff::civil::Date;
use serde::Serialize;

use super::{prepare, CalendarEntry, ProjectionFilter};
use crate::{
    error::{AgendaError, Result},
    period::DateRange,
};

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DayCell {
    /// A leading or trailing day from an adjacent month
    Placeholder,
    /// A day of the target month, with indexes into the grid's entries
    Day { date: Date, entries: Vec<usize> },
}

impl DayCell {
    pub fn date(&self) -> Option<Date> {
        match self {
            DayCell::Placeholder => None,
            DayCell::Day { date, .. } => Some(*date),
        }
    }
}

/// Tasks placed on the days of one month, Monday-first.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    year: i16,
    month: i8,
    entries: Vec<CalendarEntry>,
    weeks: Vec<Vec<DayCell>>,
}

impl MonthGrid {
    pub fn year(&self) -> i16 {
        self.year
    }

    pub fn month(&self) -> i8 {
        self.month
    }

    /// Rows of exactly seven cells, Monday through Sunday.
    pub fn weeks(&self) -> &[Vec<DayCell>] {
        &self.weeks
    }

    /// Every entry placed on at least one day, ordered by start then id.
    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    fn cell(&self, date: Date) -> Option<&DayCell> {
        self.weeks
            .iter()
            .flatten()
            .find(|cell| cell.date() == Some(date))
    }

    /// Entries placed on `date`, in cell order. Empty outside the month.
    pub fn tasks_on(&self, date: Date) -> impl Iterator<Item = &CalendarEntry> + '_ {
        let indexes: &[usize] = match self.cell(date) {
            Some(DayCell::Day { entries, .. }) => entries.as_slice(),
            _ => &[],
        };
        indexes.iter().map(move |&i| &self.entries[i])
    }

    /// Days on which the task with `task_id` was placed.
    pub fn placements(&self, task_id: u64) -> Vec<Date> {
        let Some(index) = self.entries.iter().position(|e| e.task.id == task_id) else {
            return Vec::new();
        };
        self.weeks
            .iter()
            .flatten()
            .filter_map(|cell| match cell {
                DayCell::Day { date, entries } if entries.contains(&index) => Some(*date),
                _ => None,
            })
            .collect()
    }
}

/// First to last day of a month.
pub fn month_window(year: i16, month: i8) -> Result<DateRange> {
    let first = Date::new(year, month, 1).map_err(|e| {
        AgendaError::invalid_input("month").with_reason(format!("{year}-{month:02}: {e}"))
    })?;
    Ok(DateRange {
        start: first,
        end: first.last_of_month(),
    })
}

/// Places every entry on every day of `year`-`month` its extent touches.
pub fn project_month<I>(
    year: i16,
    month: i8,
    entries: I,
    filter: &ProjectionFilter,
) -> Result<MonthGrid>
where
    I: IntoIterator<Item = CalendarEntry>,
{
    let window = month_window(year, month)?;
    let leading = window.start.weekday().to_monday_zero_offset() as usize;

    let mut cells: Vec<DayCell> = std::iter::repeat_with(|| DayCell::Placeholder)
        .take(leading)
        .chain(window.days().map(|date| DayCell::Day {
            date,
            entries: Vec::new(),
        }))
        .collect();
    while cells.len() % 7 != 0 {
        cells.push(DayCell::Placeholder);
    }

    let mut placed = Vec::new();
    for entry in prepare(entries, filter) {
        let Some(span) = entry.task.days().intersect(&window) else {
            continue;
        };
        let index = placed.len();
        for date in span.days() {
            let slot = leading + (date.day() as usize - 1);
            if let Some(DayCell::Day { entries, .. }) = cells.get_mut(slot) {
                entries.push(index);
            }
        }
        placed.push(entry);
    }

    let weeks = cells.chunks(7).map(<[DayCell]>::to_vec).collect();
    Ok(MonthGrid {
        year,
        month,
        entries: placed,
        weeks,
    })
}
