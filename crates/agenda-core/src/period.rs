//! Named date ranges relative to a reference day.
//!
//! Every function here is pure: the reference day is always passed in, so
//! results are re-derivable from it alone. Weeks start on Monday (ISO).

use std::{collections::BTreeMap, fmt};

use jiff::{civil::Date, ToSpan};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, Result};

/// Number of days covered by the call pipeline window.
pub const PIPELINE_DAYS: i64 = 28;

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if end < start {
            return Err(AgendaError::invalid_input("end").with_reason(format!(
                "range end {end} is before range start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single(day: Date) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, day: Date) -> bool {
        self.start <= day && day <= self.end
    }

    /// The overlap of two ranges, if any.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// Iterates every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.tomorrow().ok().filter(|next| *next <= end)
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

/// The standard reporting periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodName {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
}

impl PeriodName {
    pub fn label(&self) -> &'static str {
        match self {
            PeriodName::Today => "Today",
            PeriodName::Yesterday => "Yesterday",
            PeriodName::ThisWeek => "This week",
            PeriodName::LastWeek => "Last week",
            PeriodName::ThisMonth => "This month",
        }
    }
}

impl fmt::Display for PeriodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named inclusive date range computed relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub name: PeriodName,
    pub start: Date,
    pub end: Date,
}

impl Period {
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn contains(&self, day: Date) -> bool {
        self.range().contains(day)
    }

    /// `[today, today]`
    pub fn today(today: Date) -> Self {
        Self {
            name: PeriodName::Today,
            start: today,
            end: today,
        }
    }

    /// `[today - 1, today - 1]`
    pub fn yesterday(today: Date) -> Self {
        let day = today.saturating_sub(1.day());
        Self {
            name: PeriodName::Yesterday,
            start: day,
            end: day,
        }
    }

    /// From the Monday of the current week up to today.
    pub fn this_week(today: Date) -> Self {
        Self {
            name: PeriodName::ThisWeek,
            start: monday_of(today),
            end: today,
        }
    }

    /// The full Monday-to-Sunday week before the current one.
    pub fn last_week(today: Date) -> Self {
        let start = monday_of(today).saturating_sub(7.days());
        Self {
            name: PeriodName::LastWeek,
            start,
            end: start.saturating_add(6.days()),
        }
    }

    /// From the first of the month up to today.
    pub fn this_month(today: Date) -> Self {
        Self {
            name: PeriodName::ThisMonth,
            start: today.first_of_month(),
            end: today,
        }
    }
}

/// The five standard periods derived from one reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periods {
    pub today: Period,
    pub yesterday: Period,
    pub this_week: Period,
    pub last_week: Period,
    pub this_month: Period,
}

impl Periods {
    pub fn relative_to(today: Date) -> Self {
        Self {
            today: Period::today(today),
            yesterday: Period::yesterday(today),
            this_week: Period::this_week(today),
            last_week: Period::last_week(today),
            this_month: Period::this_month(today),
        }
    }

    /// All periods in reporting order.
    pub fn all(&self) -> [Period; 5] {
        [
            self.today,
            self.yesterday,
            self.this_week,
            self.last_week,
            self.this_month,
        ]
    }

    /// The smallest range covering every period, for a single store query.
    pub fn span(&self) -> DateRange {
        let all = self.all();
        let start = all.iter().map(|p| p.start).min().unwrap_or(self.today.start);
        let end = all.iter().map(|p| p.end).max().unwrap_or(self.today.end);
        DateRange { start, end }
    }
}

/// The Monday starting the ISO week that contains `day`.
pub fn monday_of(day: Date) -> Date {
    let offset = i64::from(day.weekday().to_monday_zero_offset());
    day.saturating_sub(offset.days())
}

/// `[today - 28 days, today]`
pub fn pipeline_window(today: Date) -> DateRange {
    DateRange {
        start: today.saturating_sub(PIPELINE_DAYS.days()),
        end: today,
    }
}

/// An ISO 8601 week number qualified by its ISO year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IsoWeek {
    pub year: i16,
    pub week: i8,
}

impl IsoWeek {
    pub fn of(day: Date) -> Self {
        let iso = day.iso_week_date();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Counts days per ISO week, ordered chronologically.
pub fn bucket_by_iso_week(days: impl IntoIterator<Item = Date>) -> Vec<(IsoWeek, usize)> {
    let mut buckets: BTreeMap<IsoWeek, usize> = BTreeMap::new();
    for day in days {
        *buckets.entry(IsoWeek::of(day)).or_default() += 1;
    }
    buckets.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_periods_midweek() {
        // Thursday
        let periods = Periods::relative_to(date(2024, 6, 13));

        assert_eq!(periods.today.range(), DateRange::single(date(2024, 6, 13)));
        assert_eq!(periods.yesterday.range(), DateRange::single(date(2024, 6, 12)));
        assert_eq!(periods.this_week.start, date(2024, 6, 10));
        assert_eq!(periods.this_week.end, date(2024, 6, 13));
        assert_eq!(periods.last_week.start, date(2024, 6, 3));
        assert_eq!(periods.last_week.end, date(2024, 6, 9));
        assert_eq!(periods.this_month.start, date(2024, 6, 1));
        assert_eq!(periods.this_month.end, date(2024, 6, 13));
    }

    #[test]
    fn test_periods_on_monday_and_sunday() {
        let monday = Periods::relative_to(date(2024, 6, 10));
        assert_eq!(monday.this_week.range(), DateRange::single(date(2024, 6, 10)));
        assert_eq!(monday.last_week.start, date(2024, 6, 3));

        let sunday = Periods::relative_to(date(2024, 6, 16));
        assert_eq!(sunday.this_week.start, date(2024, 6, 10));
        assert_eq!(sunday.last_week.end, date(2024, 6, 9));
    }

    #[test]
    fn test_yesterday_crosses_month_and_year() {
        let periods = Periods::relative_to(date(2024, 1, 1));
        assert_eq!(periods.yesterday.start, date(2023, 12, 31));
        assert_eq!(periods.this_month.range(), DateRange::single(date(2024, 1, 1)));
        // 2024-01-01 is a Monday
        assert_eq!(periods.last_week.start, date(2023, 12, 25));
        assert_eq!(periods.last_week.end, date(2023, 12, 31));
    }

    #[test]
    fn test_span_covers_every_period() {
        let periods = Periods::relative_to(date(2024, 6, 3));
        let span = periods.span();
        assert_eq!(span.start, date(2024, 5, 27));
        assert_eq!(span.end, date(2024, 6, 3));
        for period in periods.all() {
            assert!(span.contains(period.start) && span.contains(period.end));
        }
    }

    #[test]
    fn test_pipeline_window() {
        let window = pipeline_window(date(2024, 3, 10));
        assert_eq!(window.start, date(2024, 2, 11));
        assert_eq!(window.days().count(), 29);
    }

    #[test]
    fn test_iso_week_buckets_across_year_boundary() {
        let buckets = bucket_by_iso_week([
            date(2024, 12, 30),
            date(2025, 1, 2),
            date(2024, 12, 27),
        ]);
        assert_eq!(
            buckets,
            vec![
                (IsoWeek { year: 2024, week: 52 }, 1),
                (IsoWeek { year: 2025, week: 1 }, 2),
            ]
        );
        assert_eq!(buckets[1].0.to_string(), "2025-W01");
    }

    #[test]
    fn test_date_range_operations() {
        let june = DateRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        let straddle = DateRange::new(date(2024, 5, 28), date(2024, 6, 2)).unwrap();

        assert_eq!(
            june.intersect(&straddle),
            Some(DateRange {
                start: date(2024, 6, 1),
                end: date(2024, 6, 2)
            })
        );
        assert!(june
            .intersect(&DateRange::single(date(2024, 7, 1)))
            .is_none());
        assert!(DateRange::new(date(2024, 6, 2), date(2024, 6, 1)).is_err());
    }
}
