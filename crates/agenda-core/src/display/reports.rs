//! KPI and dashboard reports.

use std::fmt;

use super::collections::Deadlines;
use crate::kpi::{format_hours, Dashboard, KpiReport};

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Key figures")?;
        writeln!(f)?;
        writeln!(
            f,
            "| Period | Calls | Meetings | Meeting rate | Signed | Conversion | Completed | Hours |"
        )?;
        writeln!(f, "|---|---:|---:|---:|---:|---:|---:|---:|")?;
        for row in &self.rows {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} | {} | {} |",
                row.period.name,
                row.calls,
                row.meetings,
                row.meeting_rate(),
                row.signed_clients,
                row.conversion_rate(),
                row.completed,
                format_hours(row.hours_worked)
            )?;
        }

        if let Some(wow) = &self.week_over_week {
            writeln!(f)?;
            writeln!(f, "## Week over week")?;
            writeln!(f)?;
            writeln!(f, "- Calls: {}", wow.calls)?;
            writeln!(f, "- Meetings: {}", wow.meetings)?;
            writeln!(f, "- Signed: {}", wow.signed_clients)?;
            writeln!(f, "- Completed: {}", wow.completed)?;
            writeln!(f, "- Hours: {}", wow.hours_worked)?;
        }
        Ok(())
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Today, {}", self.day)?;
        writeln!(f)?;
        let counters = &self.counters;
        writeln!(f, "- Completed tasks: {}", counters.completed)?;
        writeln!(
            f,
            "- Hours on completed tasks: {}",
            format_hours(counters.hours_completed)
        )?;
        writeln!(
            f,
            "- First meetings held: {}",
            counters.first_meetings_completed
        )?;
        writeln!(f, "- Orders delivered: {}", counters.orders_delivered)?;

        writeln!(f)?;
        writeln!(f, "## Appointments")?;
        writeln!(f)?;
        for (kind, count) in &self.appointments {
            writeln!(f, "- {}: {count}", kind.label())?;
        }

        writeln!(f)?;
        writeln!(f, "## Agenda")?;
        writeln!(f)?;
        if self.agenda.is_empty() {
            writeln!(f, "Nothing scheduled.")?;
        } else {
            for entry in &self.agenda {
                write!(f, "{entry}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "## Call pipeline")?;
        writeln!(f)?;
        if self.pipeline.is_empty() {
            writeln!(f, "No calls in the last four weeks.")?;
        } else {
            for (week, calls) in &self.pipeline {
                writeln!(f, "- {week}: {calls}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "## Deadlines")?;
        writeln!(f)?;
        write!(f, "{}", Deadlines(self.deadlines.clone()))
    }
}
