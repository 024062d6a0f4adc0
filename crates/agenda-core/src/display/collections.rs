//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use super::datetime::short_day;
use crate::{
    calendar::CalendarEntry,
    deadline::{DeadlineEntry, DeadlineStatus, OrderOverview},
    models::Client,
};

/// Escapes a value for use inside a markdown table cell.
pub(crate) fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Agenda entries grouped under one heading per start day.
///
/// ```rust
/// use agenda_core::{calendar::CalendarEntry, display::TaskList};
///
/// let output = TaskList(Vec::<CalendarEntry>::new()).to_string();
/// assert_eq!(output, "No tasks found.\n");
/// ```
pub struct TaskList(pub Vec<CalendarEntry>);

impl TaskList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        let mut current = None;
        for entry in &self.0 {
            let day = entry.task.start_at.date();
            if current != Some(day) {
                if current.is_some() {
                    writeln!(f)?;
                }
                writeln!(f, "## {} {}", short_day(day), day)?;
                writeln!(f)?;
                current = Some(day);
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

pub struct Clients(pub Vec<Client>);

impl fmt::Display for Clients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No clients found.");
        }
        for client in &self.0 {
            write!(f, "{client}")?;
        }
        Ok(())
    }
}

/// Orders as a table with their deadline status.
pub struct Orders(pub Vec<OrderOverview>);

impl fmt::Display for Orders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No orders found.");
        }
        writeln!(f, "| ID | Client | Service | Price | Due | Status |")?;
        writeln!(f, "|---:|---|---|---:|---|---|")?;
        for overview in &self.0 {
            let order = &overview.order;
            let due = order
                .end_date
                .map_or_else(|| "unknown".to_string(), |d| d.to_string());
            let status = match (overview.assessment.status, overview.assessment.days_remaining) {
                (DeadlineStatus::OnTime, Some(days)) => format!("On time ({days}d)"),
                (status, _) => status.to_string(),
            };
            writeln!(
                f,
                "| {} | {} | {} | {:.2} | {} | {} |",
                order.id,
                cell(&overview.client_name),
                cell(&order.service),
                order.price,
                due,
                status
            )?;
        }
        Ok(())
    }
}

/// Human description of a signed day offset to a due date.
pub fn due_in(days: i64) -> String {
    match days {
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        d if d > 1 => format!("due in {d} days"),
        -1 => "late by 1 day".to_string(),
        d => format!("late by {} days", -d),
    }
}

/// The deadline worklist.
pub struct Deadlines(pub Vec<DeadlineEntry>);

impl fmt::Display for Deadlines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No deadlines in sight.");
        }
        writeln!(f, "| Due | Order | Client | Service | |")?;
        writeln!(f, "|---|---:|---|---|---|")?;
        for item in &self.0 {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} |",
                item.due,
                item.order.id,
                cell(&item.client_name),
                cell(&item.order.service),
                due_in(item.days_until_due)
            )?;
        }
        Ok(())
    }
}
