//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it through its terminal
//! skin or print it plain.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::datetime::{Extent, Hours};
use crate::{
    calendar::CalendarEntry,
    deadline::{DeadlineStatus, OrderOverview},
    kpi::format_hours,
    models::{Client, Order, Task},
};

impl Task {
    fn fmt_task(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Kind: {}", self.kind.label())?;
        writeln!(f, "- When: {}", Extent(self))?;
        if let Some(service) = &self.service {
            writeln!(f, "- Service: {service}")?;
        }
        if let Some(spent) = self.time_spent {
            writeln!(f, "- Time spent: {}", format_hours(spent))?;
        }
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_task(f)
    }
}

/// One line of an agenda list.
impl fmt::Display for CalendarEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}** {}. {} ({}, {}) {}",
            Hours(&self.task),
            self.task.id,
            self.task.title,
            self.client_name,
            self.task.kind.label(),
            self.task.status.with_icon()
        )
    }
}

/// A task with the names of what it links to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDetails {
    pub entry: CalendarEntry,
    pub order_label: Option<String>,
}

impl fmt::Display for TaskDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = &self.entry.task;
        writeln!(f, "# {}. {}", task.id, task.title)?;
        writeln!(f)?;
        writeln!(f, "- Client: {}", self.entry.client_name)?;
        if let Some(order) = &self.order_label {
            writeln!(f, "- Order: {order}")?;
        }
        writeln!(f, "- Kind: {}", task.kind.label())?;
        writeln!(f, "- Status: {}", task.status.with_icon())?;
        writeln!(f, "- When: {}", Extent(task))?;
        if let Some(service) = &task.service {
            writeln!(f, "- Service: {service}")?;
        }
        writeln!(
            f,
            "- Time spent: {}",
            format_hours(task.time_spent_or_extent())
        )?;
        if let Some(desc) = &task.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}. **{}**", self.id, self.name)?;
        if let Some(phone) = &self.phone {
            write!(f, " {phone}")?;
        }
        if let Some(day) = self.converted_on {
            write!(f, " (signed {day})")?;
        }
        writeln!(f)
    }
}

fn optional_date(date: Option<jiff::civil::Date>) -> String {
    date.map_or_else(|| "unknown".to_string(), |d| d.to_string())
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Order {}: {}", self.id, self.service)?;
        writeln!(f)?;
        writeln!(f, "- Client: {}", self.client_id)?;
        writeln!(f, "- Price: {:.2}", self.price)?;
        writeln!(f, "- Start: {}", optional_date(self.start_date))?;
        writeln!(f, "- Due: {}", optional_date(self.end_date))?;
        writeln!(f, "- Delivery: {}", self.delivery)
    }
}

impl fmt::Display for OrderOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = &self.order;
        writeln!(f, "## Order {}: {}", order.id, order.service)?;
        writeln!(f)?;
        writeln!(f, "- Client: {}", self.client_name)?;
        writeln!(f, "- Price: {:.2}", order.price)?;
        writeln!(f, "- Due: {}", optional_date(order.end_date))?;
        write!(f, "- Status: {}", self.assessment.status)?;
        match (self.assessment.status, self.assessment.days_remaining) {
            (DeadlineStatus::OnTime, Some(days)) => writeln!(f, " ({days} days left)"),
            _ => writeln!(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{Delivery, TaskKind, TaskStatus};

    fn task() -> Task {
        Task {
            id: 7,
            client_id: Some(2),
            order_id: Some(3),
            kind: TaskKind::FirstMeeting,
            title: "Kick-off".to_string(),
            description: Some("Bring the mockups".to_string()),
            start_at: date(2024, 6, 10).at(9, 0, 0, 0),
            end_at: Some(date(2024, 6, 10).at(10, 30, 0, 0)),
            status: TaskStatus::Done,
            is_process: false,
            service: None,
            time_spent: None,
        }
    }

    #[test]
    fn test_task_display() {
        let output = task().to_string();
        assert!(output.contains("### 7. Kick-off (✓ Done)"));
        assert!(output.contains("- Kind: First meeting"));
        assert!(output.contains("- When: 2024-06-10 09:00 - 10:30"));
        assert!(output.contains("Bring the mockups"));
    }

    #[test]
    fn test_task_details_display() {
        let details = TaskDetails {
            entry: CalendarEntry::new(task(), "Boulangerie Martin"),
            order_label: Some("Website (#3)".to_string()),
        };
        let output = details.to_string();
        assert!(output.starts_with("# 7. Kick-off"));
        assert!(output.contains("- Client: Boulangerie Martin"));
        assert!(output.contains("- Order: Website (#3)"));
        assert!(output.contains("- Time spent: 1.5h"));
    }

    #[test]
    fn test_entry_line() {
        let entry = CalendarEntry::new(task(), "Boulangerie Martin");
        assert_eq!(
            entry.to_string(),
            "- **09:00-10:30** 7. Kick-off (Boulangerie Martin, First meeting) ✓ Done\n"
        );
    }

    #[test]
    fn test_order_overview_display() {
        let order = Order {
            id: 3,
            client_id: 2,
            service: "Website".to_string(),
            price: 1200.0,
            start_date: Some(date(2024, 6, 1)),
            end_date: Some(date(2024, 6, 20)),
            delivery: Delivery::Unset,
        };
        let overview = OrderOverview::new(order, "Boulangerie Martin", date(2024, 6, 17));
        let output = overview.to_string();
        assert!(output.contains("## Order 3: Website"));
        assert!(output.contains("- Status: On time (3 days left)"));
        assert!(output.contains("- Price: 1200.00"));
    }
}
