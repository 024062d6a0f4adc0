//! Week view.

use jiff::{
    civil::{Date, DateTime},
    ToSpan,
};
use serde::Serialize;

use super::{prepare, CalendarEntry, HourBand, ProjectionFilter};
use crate::{
    models::Task,
    period::{monday_of, DateRange},
};

/// Tasks placed on day-by-hour cells of one Monday-first week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekGrid {
    week_start: Date,
    band: HourBand,
    entries: Vec<CalendarEntry>,
    /// `cells[day][row]` holds indexes into `entries`
    cells: Vec<Vec<Vec<usize>>>,
}

impl WeekGrid {
    /// The Monday of the projected week.
    pub fn week_start(&self) -> Date {
        self.week_start
    }

    pub fn band(&self) -> HourBand {
        self.band
    }

    /// The seven days of the week, Monday first.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        week_window(self.week_start).days()
    }

    /// The hour of each row.
    pub fn hours(&self) -> impl Iterator<Item = i8> {
        self.band.hours()
    }

    /// Every entry occupying at least one cell, ordered by start then id.
    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    fn slot(&self, date: Date, hour: i8) -> Option<&Vec<usize>> {
        if !self.band.contains(hour) || !week_window(self.week_start).contains(date) {
            return None;
        }
        let day = date.weekday().to_monday_zero_offset() as usize;
        let row = (hour - self.band.start()) as usize;
        self.cells.get(day).and_then(|rows| rows.get(row))
    }

    /// Entries occupying the `hour` row of `date`, in cell order.
    pub fn cell(&self, date: Date, hour: i8) -> impl Iterator<Item = &CalendarEntry> + '_ {
        self.slot(date, hour)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.entries[i])
    }

    /// Every `(date, hour)` cell occupied by the task with `task_id`.
    pub fn occupied_cells(&self, task_id: u64) -> Vec<(Date, i8)> {
        let Some(index) = self.entries.iter().position(|e| e.task.id == task_id) else {
            return Vec::new();
        };
        let mut occupied = Vec::new();
        for (date, rows) in self.days().zip(&self.cells) {
            for (hour, slot) in self.band.hours().zip(rows) {
                if slot.contains(&index) {
                    occupied.push((date, hour));
                }
            }
        }
        occupied
    }
}

/// The Monday-to-Sunday week containing `day`.
pub fn week_window(day: Date) -> DateRange {
    let start = monday_of(day);
    DateRange {
        start,
        end: start.saturating_add(6.days()),
    }
}

/// Hour rows of `day` the task occupies.
///
/// Rows are sliced end-exclusively: a slot `[h, h+1)` is occupied when it
/// overlaps `[start_at, end_at)`. A task with no end occupies only the row of
/// its start hour.
fn occupied_hours(task: &Task, day: Date, band: HourBand) -> Vec<i8> {
    let Some(end_at) = task.end_at else {
        let hour = task.start_at.hour();
        return if task.start_at.date() == day && band.contains(hour) {
            vec![hour]
        } else {
            Vec::new()
        };
    };
    band.hours()
        .filter(|&hour| {
            let slot_start = day.at(hour, 0, 0, 0);
            let slot_end = slot_start
                .checked_add(1.hour())
                .unwrap_or(DateTime::MAX);
            slot_start < end_at && slot_end > task.start_at
        })
        .collect()
}

/// Places every entry on each `(day, hour)` cell of the week its extent
/// covers, clamped to `band`.
///
/// `week_start` may be any day; the grid starts on the Monday of its week.
pub fn project_week<I>(
    week_start: Date,
    entries: I,
    filter: &ProjectionFilter,
    band: HourBand,
) -> WeekGrid
where
    I: IntoIterator<Item = CalendarEntry>,
{
    let window = week_window(week_start);
    let mut cells = vec![vec![Vec::new(); band.len()]; 7];
    let mut placed = Vec::new();

    for entry in prepare(entries, filter) {
        let Some(span) = entry.task.days().intersect(&window) else {
            continue;
        };
        let index = placed.len();
        let mut occupied_any = false;
        for day in span.days() {
            let column = day.weekday().to_monday_zero_offset() as usize;
            for hour in occupied_hours(&entry.task, day, band) {
                cells[column][(hour - band.start()) as usize].push(index);
                occupied_any = true;
            }
        }
        if occupied_any {
            placed.push(entry);
        }
    }

    WeekGrid {
        week_start: window.start,
        band,
        entries: placed,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{calendar::tests::entry, models::TaskKind};

    fn project(entries: Vec<CalendarEntry>, band: HourBand) -> WeekGrid {
        project_week(date(2024, 6, 10), entries, &ProjectionFilter::default(), band)
    }

    #[test]
    fn test_end_exclusive_hour_slicing() {
        let day = date(2024, 6, 10);
        let grid = project(
            vec![entry(
                1,
                TaskKind::FirstMeeting,
                day.at(9, 0, 0, 0),
                Some(day.at(11, 0, 0, 0)),
            )],
            HourBand::WORKING,
        );
        assert_eq!(grid.occupied_cells(1), vec![(day, 9), (day, 10)]);
        assert_eq!(grid.cell(day, 11).count(), 0);
    }

    #[test]
    fn test_point_task_occupies_start_hour_only() {
        let day = date(2024, 6, 12);
        let grid = project(
            vec![entry(1, TaskKind::Generic, day.at(9, 30, 0, 0), None)],
            HourBand::WORKING,
        );
        assert_eq!(grid.occupied_cells(1), vec![(day, 9)]);
    }

    #[test]
    fn test_partial_hours_touch_both_rows() {
        let day = date(2024, 6, 12);
        let grid = project(
            vec![entry(
                1,
                TaskKind::Generic,
                day.at(9, 30, 0, 0),
                Some(day.at(10, 15, 0, 0)),
            )],
            HourBand::WORKING,
        );
        assert_eq!(grid.occupied_cells(1), vec![(day, 9), (day, 10)]);
    }

    #[test]
    fn test_task_outside_band_occupies_nothing() {
        let day = date(2024, 6, 12);
        let early = entry(
            1,
            TaskKind::Generic,
            day.at(5, 0, 0, 0),
            Some(day.at(7, 0, 0, 0)),
        );
        let grid = project(vec![early.clone()], HourBand::WORKING);
        assert!(grid.occupied_cells(1).is_empty());
        assert!(grid.entries().is_empty());

        let full = project(vec![early], HourBand::FULL_DAY);
        assert_eq!(full.occupied_cells(1), vec![(day, 5), (day, 6)]);
    }

    #[test]
    fn test_overnight_task_clamped_per_day() {
        let grid = project(
            vec![entry(
                1,
                TaskKind::Maintenance,
                date(2024, 6, 10).at(17, 0, 0, 0),
                Some(date(2024, 6, 11).at(9, 0, 0, 0)),
            )],
            HourBand::WORKING,
        );
        assert_eq!(
            grid.occupied_cells(1),
            vec![
                (date(2024, 6, 10), 17),
                (date(2024, 6, 10), 18),
                (date(2024, 6, 11), 8),
            ]
        );
    }

    #[test]
    fn test_cells_within_extent_and_band() {
        let start = date(2024, 6, 13).at(7, 45, 0, 0);
        let end = date(2024, 6, 14).at(20, 0, 0, 0);
        let band = HourBand::new(6, 22).unwrap();
        let grid = project(vec![entry(1, TaskKind::Upsell, start, Some(end))], band);

        let cells = grid.occupied_cells(1);
        assert!(!cells.is_empty());
        for (day, hour) in cells {
            assert!(band.contains(hour));
            let slot = day.at(hour, 0, 0, 0);
            assert!(slot < end);
            assert!(slot.checked_add(1.hour()).unwrap() > start);
        }
    }

    #[test]
    fn test_week_start_normalised_and_out_of_week_excluded() {
        let grid = project_week(
            date(2024, 6, 13),
            vec![
                entry(1, TaskKind::Generic, date(2024, 6, 9).at(10, 0, 0, 0), None),
                entry(2, TaskKind::Generic, date(2024, 6, 16).at(10, 0, 0, 0), None),
                entry(3, TaskKind::Generic, date(2024, 6, 17).at(10, 0, 0, 0), None),
            ],
            &ProjectionFilter::default(),
            HourBand::WORKING,
        );
        assert_eq!(grid.week_start(), date(2024, 6, 10));
        let ids: Vec<u64> = grid.entries().iter().map(|e| e.task.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(grid.days().count(), 7);
    }

    #[test]
    fn test_cell_order_is_deterministic() {
        let day = date(2024, 6, 11);
        let build = || {
            vec![
                entry(7, TaskKind::Generic, day.at(9, 15, 0, 0), None),
                entry(3, TaskKind::Generic, day.at(9, 0, 0, 0), Some(day.at(10, 0, 0, 0))),
                entry(5, TaskKind::Generic, day.at(9, 0, 0, 0), None),
            ]
        };
        let first = project(build(), HourBand::WORKING);
        let mut reversed = build();
        reversed.reverse();
        let second = project(reversed, HourBand::WORKING);

        let ids = |grid: &WeekGrid| grid.cell(day, 9).map(|e| e.task.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), vec![3, 5, 7]);
        assert_eq!(ids(&first), ids(&second));
    }
}
