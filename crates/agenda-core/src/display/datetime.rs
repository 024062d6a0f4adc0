//! Civil date and time display helpers.

use std::fmt;

use jiff::civil::{Date, DateTime};

use crate::models::Task;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats a civil date-time as `YYYY-MM-DD HH:MM`.
pub struct CivilDateTime<'a>(pub &'a DateTime);

impl fmt::Display for CivilDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y-%m-%d %H:%M"))
    }
}

/// Formats the extent of a task, omitting the end date when it matches the
/// start date: `2024-06-10 09:00 - 11:00`.
pub struct Extent<'a>(pub &'a Task);

impl fmt::Display for Extent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CivilDateTime(&self.0.start_at))?;
        match self.0.end_at {
            Some(end) if end.date() == self.0.start_at.date() => {
                write!(f, " - {}", end.strftime("%H:%M"))
            }
            Some(end) => write!(f, " - {}", CivilDateTime(&end)),
            None => Ok(()),
        }
    }
}

/// Hours of a task within one day: `09:00-11:00`, or `09:00` for a point
/// event.
pub struct Hours<'a>(pub &'a Task);

impl fmt::Display for Hours<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.start_at.strftime("%H:%M"))?;
        if let Some(end) = self.0.end_at {
            write!(f, "-{}", end.strftime("%H:%M"))?;
        }
        Ok(())
    }
}

/// English name of a month number, `1..=12`.
pub fn month_name(month: i8) -> &'static str {
    usize::try_from(month - 1)
        .ok()
        .and_then(|index| MONTH_NAMES.get(index))
        .copied()
        .unwrap_or("?")
}

/// Short weekday and day of month: `Mon 10`.
pub fn short_day(date: Date) -> String {
    date.strftime("%a %d").to_string()
}
