//! Markdown tables for the month and week grids.

use std::fmt;

use super::{
    collections::cell,
    datetime::{month_name, short_day},
};
use crate::calendar::{CalendarEntry, DayCell, MonthGrid, WeekGrid};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn entry_label(entry: &CalendarEntry) -> String {
    format!(
        "{} {} ({})",
        entry.task.start_at.strftime("%H:%M"),
        cell(&entry.task.title),
        cell(&entry.client_name)
    )
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} {}", month_name(self.month()), self.year())?;
        writeln!(f)?;
        writeln!(f, "| {} |", WEEKDAYS.join(" | "))?;
        writeln!(f, "|{}", "---|".repeat(7))?;
        for week in self.weeks() {
            let cells: Vec<String> = week
                .iter()
                .map(|day| match day {
                    DayCell::Placeholder => String::new(),
                    DayCell::Day { date, .. } => {
                        let mut text = format!("**{}**", date.day());
                        for entry in self.tasks_on(*date) {
                            text.push_str(" · ");
                            text.push_str(&entry_label(entry));
                        }
                        text
                    }
                })
                .collect();
            writeln!(f, "| {} |", cells.join(" | "))?;
        }
        Ok(())
    }
}

impl fmt::Display for WeekGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Week of {} ({})", self.week_start(), self.band())?;
        writeln!(f)?;
        let days: Vec<_> = self.days().collect();
        let header: Vec<String> = days.iter().map(|d| short_day(*d)).collect();
        writeln!(f, "| | {} |", header.join(" | "))?;
        writeln!(f, "|---:|{}", "---|".repeat(days.len()))?;
        for hour in self.hours() {
            let cells: Vec<String> = days
                .iter()
                .map(|day| {
                    self.cell(*day, hour)
                        .map(|e| format!("{}. {}", e.task.id, cell(&e.task.title)))
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .collect();
            writeln!(f, "| {hour:02}:00 | {} |", cells.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::{
        calendar::{project_month, project_week, CalendarEntry, HourBand, ProjectionFilter},
        models::{Task, TaskKind, TaskStatus},
    };

    fn meeting() -> CalendarEntry {
        let day = date(2024, 6, 12);
        CalendarEntry::new(
            Task {
                id: 4,
                client_id: Some(1),
                order_id: None,
                kind: TaskKind::FirstMeeting,
                title: "Kick-off".to_string(),
                description: None,
                start_at: day.at(9, 0, 0, 0),
                end_at: Some(day.at(11, 0, 0, 0)),
                status: TaskStatus::Pending,
                is_process: false,
                service: None,
                time_spent: None,
            },
            "Acme",
        )
    }

    #[test]
    fn test_month_table() {
        let grid = project_month(2024, 6, vec![meeting()], &ProjectionFilter::default()).unwrap();
        let output = grid.to_string();
        assert!(output.starts_with("# June 2024\n"));
        assert!(output.contains("| Mon | Tue | Wed | Thu | Fri | Sat | Sun |"));
        assert!(output.contains("**12** · 09:00 Kick-off (Acme)"));
        // six week rows plus the two header lines
        assert_eq!(output.lines().filter(|l| l.starts_with('|')).count(), 8);
    }

    #[test]
    fn test_week_table() {
        let band = HourBand::new(8, 12).unwrap();
        let grid = project_week(date(2024, 6, 12), vec![meeting()], &ProjectionFilter::default(), band);
        let output = grid.to_string();
        assert!(output.starts_with("# Week of 2024-06-10 (08:00-12:00)"));
        assert!(output.contains("| | Mon 10 | Tue 11 | Wed 12 |"));
        assert!(output.contains("| 08:00 |  |  |  |"));
        assert!(output.contains("| 09:00 |  |  | 4. Kick-off |"));
        assert!(output.contains("| 10:00 |  |  | 4. Kick-off |"));
        assert!(!output.contains("| 11:00 |  |  | 4. Kick-off |"));
    }
}
