//! Time-bucketed counters and funnel rates.
//!
//! Everything here is computed from the task store and the directory alone:
//! calls and meetings are counted from task records, and sales from the
//! conversion date of each client. All functions take the reference day as an
//! argument so one report never reads the clock twice.

use std::fmt;

use jiff::{civil::Date, SignedDuration};
use serde::{Deserialize, Serialize};

use crate::{
    calendar::CalendarEntry,
    deadline::DeadlineEntry,
    models::{Client, Order, Task, TaskKind, TaskStatus},
    period::{bucket_by_iso_week, pipeline_window, IsoWeek, Period, PeriodName},
};

/// A funnel ratio that may have no denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Rate {
    Defined(f64),
    /// The denominator was zero
    Undefined,
}

impl Rate {
    pub fn ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            Rate::Undefined
        } else {
            Rate::Defined(numerator as f64 / denominator as f64)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Rate::Defined(value) => Some(*value),
            Rate::Undefined => None,
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rate::Defined(value) => write!(f, "{:.0}%", value * 100.0),
            Rate::Undefined => f.write_str("n/a"),
        }
    }
}

/// Relative change of a metric between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "percent", rename_all = "lowercase")]
pub enum PercentChange {
    /// Percentage change from a non-zero baseline
    Change(f64),
    /// Zero baseline, positive current value: reported as `+100%`
    Saturated,
    /// Zero baseline and zero current value: reported as `0%`
    Flat,
}

impl PercentChange {
    /// Change from `previous` to `current`.
    ///
    /// ```rust
    /// use agenda_core::kpi::PercentChange;
    ///
    /// assert_eq!(PercentChange::between(5.0, 0.0).to_string(), "+100%");
    /// assert_eq!(PercentChange::between(0.0, 0.0).to_string(), "0%");
    /// assert_eq!(PercentChange::between(3.0, 4.0).to_string(), "-25%");
    /// ```
    pub fn between(current: f64, previous: f64) -> Self {
        if previous == 0.0 {
            if current > 0.0 {
                PercentChange::Saturated
            } else {
                PercentChange::Flat
            }
        } else {
            PercentChange::Change((current - previous) / previous * 100.0)
        }
    }

    pub fn percent(&self) -> f64 {
        match self {
            PercentChange::Change(value) => *value,
            PercentChange::Saturated => 100.0,
            PercentChange::Flat => 0.0,
        }
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentChange::Change(value) if value.round() == 0.0 => f.write_str("0%"),
            PercentChange::Change(value) => write!(f, "{value:+.0}%"),
            PercentChange::Saturated => f.write_str("+100%"),
            PercentChange::Flat => f.write_str("0%"),
        }
    }
}

/// Formats a duration as decimal hours, e.g. `1.5h`.
pub fn format_hours(duration: SignedDuration) -> String {
    format!("{:.1}h", duration.as_secs_f64() / 3600.0)
}

/// Counters for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub period: Period,
    pub calls: u64,
    pub meetings: u64,
    pub completed: u64,
    pub hours_worked: SignedDuration,
    pub signed_clients: u64,
}

impl PeriodMetrics {
    /// Counts every task starting and every client converting within
    /// `period`. `orders` only supply the fallback conversion date of clients
    /// without `converted_on`.
    pub fn compute(period: Period, tasks: &[Task], clients: &[Client], orders: &[Order]) -> Self {
        let mut metrics = PeriodMetrics {
            period,
            calls: 0,
            meetings: 0,
            completed: 0,
            hours_worked: SignedDuration::ZERO,
            signed_clients: 0,
        };
        for task in tasks.iter().filter(|t| period.contains(t.start_at.date())) {
            if task.kind.is_call() {
                metrics.calls += 1;
            }
            if task.kind == TaskKind::FirstMeeting {
                metrics.meetings += 1;
            }
            if task.status == TaskStatus::Done {
                metrics.completed += 1;
            }
            metrics.hours_worked = metrics
                .hours_worked
                .saturating_add(task.time_spent_or_extent());
        }
        metrics.signed_clients = clients
            .iter()
            .filter_map(|client| client.conversion_date(orders))
            .filter(|day| period.contains(*day))
            .count() as u64;
        metrics
    }

    /// Meetings per call.
    pub fn meeting_rate(&self) -> Rate {
        Rate::ratio(self.meetings, self.calls)
    }

    /// Signed clients per meeting.
    pub fn conversion_rate(&self) -> Rate {
        Rate::ratio(self.signed_clients, self.meetings)
    }
}

/// Change of every metric from last week to this week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekOverWeek {
    pub calls: PercentChange,
    pub meetings: PercentChange,
    pub completed: PercentChange,
    pub hours_worked: PercentChange,
    pub signed_clients: PercentChange,
}

impl WeekOverWeek {
    pub fn compare(this_week: &PeriodMetrics, last_week: &PeriodMetrics) -> Self {
        let count = |f: fn(&PeriodMetrics) -> u64| {
            PercentChange::between(f(this_week) as f64, f(last_week) as f64)
        };
        Self {
            calls: count(|m| m.calls),
            meetings: count(|m| m.meetings),
            completed: count(|m| m.completed),
            hours_worked: PercentChange::between(
                this_week.hours_worked.as_secs_f64(),
                last_week.hours_worked.as_secs_f64(),
            ),
            signed_clients: count(|m| m.signed_clients),
        }
    }
}

/// Metrics for each requested period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    pub rows: Vec<PeriodMetrics>,
    /// Present when both this week and last week were requested
    pub week_over_week: Option<WeekOverWeek>,
}

impl KpiReport {
    pub fn row(&self, name: PeriodName) -> Option<&PeriodMetrics> {
        self.rows.iter().find(|row| row.period.name == name)
    }
}

/// Computes one row per period, in the order given.
pub fn compute_kpis(
    periods: &[Period],
    tasks: &[Task],
    clients: &[Client],
    orders: &[Order],
) -> KpiReport {
    let rows: Vec<PeriodMetrics> = periods
        .iter()
        .map(|period| PeriodMetrics::compute(*period, tasks, clients, orders))
        .collect();
    let find = |name: PeriodName| rows.iter().find(|row| row.period.name == name);
    let week_over_week = match (find(PeriodName::ThisWeek), find(PeriodName::LastWeek)) {
        (Some(this_week), Some(last_week)) => Some(WeekOverWeek::compare(this_week, last_week)),
        _ => None,
    };
    KpiReport {
        rows,
        week_over_week,
    }
}

/// What got done on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCounters {
    pub day: Date,
    pub completed: u64,
    /// Time spent on the completed tasks
    pub hours_completed: SignedDuration,
    pub first_meetings_completed: u64,
    /// Delivered orders due that day
    pub orders_delivered: u64,
}

impl DailyCounters {
    pub fn compute(day: Date, tasks: &[Task], orders: &[Order]) -> Self {
        let done: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.start_at.date() == day && t.status == TaskStatus::Done)
            .collect();
        Self {
            day,
            completed: done.len() as u64,
            hours_completed: done.iter().fold(SignedDuration::ZERO, |sum, t| {
                sum.saturating_add(t.time_spent_or_extent())
            }),
            first_meetings_completed: done
                .iter()
                .filter(|t| t.kind == TaskKind::FirstMeeting)
                .count() as u64,
            orders_delivered: orders
                .iter()
                .filter(|o| o.delivery.is_delivered() && o.end_date == Some(day))
                .count() as u64,
        }
    }
}

/// Number of tasks starting on `day` for each appointment kind, in
/// [`TaskKind::APPOINTMENTS`] order. Kinds with no task are reported as zero.
pub fn appointments_by_kind(tasks: &[Task], day: Date) -> Vec<(TaskKind, usize)> {
    TaskKind::APPOINTMENTS
        .iter()
        .map(|kind| {
            let count = tasks
                .iter()
                .filter(|t| t.start_at.date() == day && t.kind == *kind)
                .count();
            (kind.clone(), count)
        })
        .collect()
}

/// Calls of the pipeline window ending `today`, counted per ISO week.
pub fn call_pipeline(tasks: &[Task], today: Date) -> Vec<(IsoWeek, usize)> {
    let window = pipeline_window(today);
    bucket_by_iso_week(
        tasks
            .iter()
            .filter(|t| t.kind.is_call())
            .map(|t| t.start_at.date())
            .filter(|day| window.contains(*day)),
    )
}

/// The daily planning page: today's counters, appointments and agenda,
/// the call pipeline and the deadline worklist.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub day: Date,
    pub counters: DailyCounters,
    pub appointments: Vec<(TaskKind, usize)>,
    pub pipeline: Vec<(IsoWeek, usize)>,
    pub agenda: Vec<CalendarEntry>,
    pub deadlines: Vec<DeadlineEntry>,
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, DateTime};

    use super::*;
    use crate::{models::Delivery, period::Periods};

    fn task(id: u64, kind: TaskKind, start_at: DateTime) -> Task {
        Task {
            id,
            client_id: None,
            order_id: None,
            kind,
            title: format!("Task {id}"),
            description: None,
            start_at,
            end_at: None,
            status: TaskStatus::Pending,
            is_process: true,
            service: None,
            time_spent: None,
        }
    }

    fn client(id: u64, converted_on: Option<Date>) -> Client {
        Client {
            id,
            name: format!("Client {id}"),
            phone: None,
            converted_on,
        }
    }

    fn order(id: u64, client_id: u64, start_date: Option<Date>) -> Order {
        Order {
            id,
            client_id,
            service: "Website".to_string(),
            price: 500.0,
            start_date,
            end_date: None,
            delivery: Delivery::Unset,
        }
    }

    #[test]
    fn test_first_meeting_today_counts_in_week_and_month() {
        let today = date(2024, 6, 13);
        let periods = Periods::relative_to(today);
        let tasks = vec![task(1, TaskKind::FirstMeeting, today.at(10, 0, 0, 0))];

        let report = compute_kpis(&periods.all(), &tasks, &[], &[]);
        assert_eq!(report.row(PeriodName::Today).unwrap().meetings, 1);
        assert_eq!(report.row(PeriodName::ThisWeek).unwrap().meetings, 1);
        assert_eq!(report.row(PeriodName::ThisMonth).unwrap().meetings, 1);
        assert_eq!(report.row(PeriodName::Yesterday).unwrap().meetings, 0);
        assert_eq!(report.row(PeriodName::LastWeek).unwrap().meetings, 0);
    }

    #[test]
    fn test_week_over_week_saturates_on_zero_baseline() {
        let today = date(2024, 6, 13);
        let periods = Periods::relative_to(today);
        let tasks: Vec<Task> = (0..5)
            .map(|i| task(i, TaskKind::Generic, date(2024, 6, 10).at(9, 0, 0, 0)))
            .collect();

        let report = compute_kpis(&periods.all(), &tasks, &[], &[]);
        let wow = report.week_over_week.unwrap();
        assert_eq!(report.row(PeriodName::ThisWeek).unwrap().calls, 5);
        assert_eq!(report.row(PeriodName::LastWeek).unwrap().calls, 0);
        assert_eq!(wow.calls, PercentChange::Saturated);
        assert_eq!(wow.calls.to_string(), "+100%");
        assert_eq!(wow.meetings, PercentChange::Flat);
        assert_eq!(wow.meetings.to_string(), "0%");
    }

    #[test]
    fn test_week_over_week_needs_both_weeks() {
        let periods = Periods::relative_to(date(2024, 6, 13));
        let report = compute_kpis(&[periods.today, periods.this_week], &[], &[], &[]);
        assert_eq!(report.rows.len(), 2);
        assert!(report.week_over_week.is_none());
    }

    #[test]
    fn test_rates_are_guarded() {
        let period = Period::today(date(2024, 6, 13));
        let empty = PeriodMetrics::compute(period, &[], &[], &[]);
        assert_eq!(empty.meeting_rate(), Rate::Undefined);
        assert_eq!(empty.conversion_rate(), Rate::Undefined);
        assert_eq!(empty.meeting_rate().to_string(), "n/a");

        let day = date(2024, 6, 13);
        let tasks = vec![
            task(1, TaskKind::Generic, day.at(9, 0, 0, 0)),
            task(2, TaskKind::Generic, day.at(10, 0, 0, 0)),
            task(3, TaskKind::Generic, day.at(11, 0, 0, 0)),
            task(4, TaskKind::Generic, day.at(12, 0, 0, 0)),
            task(5, TaskKind::FirstMeeting, day.at(14, 0, 0, 0)),
        ];
        let metrics =
            PeriodMetrics::compute(period, &tasks, &[client(1, None)], &[order(1, 1, Some(day))]);
        assert_eq!(metrics.meeting_rate(), Rate::Defined(0.25));
        assert_eq!(metrics.meeting_rate().to_string(), "25%");
        assert_eq!(metrics.conversion_rate(), Rate::Defined(1.0));
    }

    #[test]
    fn test_hours_worked_sources() {
        let day = date(2024, 6, 13);
        let mut explicit = task(1, TaskKind::Maintenance, day.at(9, 0, 0, 0));
        explicit.end_at = Some(day.at(17, 0, 0, 0));
        explicit.time_spent = Some(SignedDuration::from_mins(30));
        let mut extent = task(2, TaskKind::Upsell, day.at(9, 0, 0, 0));
        extent.end_at = Some(day.at(10, 0, 0, 0));
        let point = task(3, TaskKind::Generic, day.at(9, 0, 0, 0));

        let metrics = PeriodMetrics::compute(Period::today(day), &[explicit, extent, point], &[], &[]);
        assert_eq!(metrics.hours_worked, SignedDuration::from_mins(90));
        assert_eq!(format_hours(metrics.hours_worked), "1.5h");
    }

    #[test]
    fn test_signed_clients_count_each_client_once() {
        let day = date(2024, 6, 13);
        let clients = vec![
            // Two orders starting today, no explicit conversion day
            client(1, None),
            // Signed today, only order starts next month
            client(2, Some(day)),
            // No usable date at all
            client(3, None),
            // Signed last month
            client(4, None),
            // Explicit conversion day wins over a later order start
            client(5, Some(date(2024, 5, 20))),
        ];
        let orders = vec![
            order(1, 1, Some(day)),
            order(2, 1, Some(day)),
            order(3, 2, Some(date(2024, 7, 1))),
            order(4, 3, None),
            order(5, 4, Some(date(2024, 5, 2))),
            order(6, 5, Some(day)),
        ];

        let report = compute_kpis(&Periods::relative_to(day).all(), &[], &clients, &orders);
        assert_eq!(report.row(PeriodName::Today).unwrap().signed_clients, 2);
        assert_eq!(report.row(PeriodName::ThisMonth).unwrap().signed_clients, 2);
        assert_eq!(report.row(PeriodName::Yesterday).unwrap().signed_clients, 0);
    }

    #[test]
    fn test_conversion_date_falls_back_to_earliest_order() {
        let orders = vec![
            order(1, 1, Some(date(2024, 6, 20))),
            order(2, 1, None),
            order(3, 1, Some(date(2024, 6, 3))),
            order(4, 2, Some(date(2024, 6, 1))),
        ];
        assert_eq!(client(1, None).conversion_date(&orders), Some(date(2024, 6, 3)));
        assert_eq!(
            client(1, Some(date(2024, 6, 25))).conversion_date(&orders),
            Some(date(2024, 6, 25))
        );
        assert_eq!(client(3, None).conversion_date(&orders), None);
    }

    #[test]
    fn test_percent_change_rounding() {
        assert_eq!(PercentChange::between(6.0, 4.0), PercentChange::Change(50.0));
        assert_eq!(PercentChange::between(6.0, 4.0).to_string(), "+50%");
        assert_eq!(PercentChange::between(4.0, 4.0).to_string(), "0%");
    }

    #[test]
    fn test_daily_counters() {
        let day = date(2024, 6, 13);
        let mut meeting = task(1, TaskKind::FirstMeeting, day.at(9, 0, 0, 0));
        meeting.end_at = Some(day.at(10, 30, 0, 0));
        meeting.status = TaskStatus::Done;
        let mut call = task(2, TaskKind::Generic, day.at(11, 0, 0, 0));
        call.status = TaskStatus::Done;
        let pending = task(3, TaskKind::FirstMeeting, day.at(15, 0, 0, 0));

        let mut delivered = order(1, 1, Some(date(2024, 6, 1)));
        delivered.end_date = Some(day);
        delivered.delivery = Delivery::Delivered;
        let mut open = order(2, 1, Some(date(2024, 6, 1)));
        open.end_date = Some(day);

        let counters = DailyCounters::compute(day, &[meeting, call, pending], &[delivered, open]);
        assert_eq!(counters.completed, 2);
        assert_eq!(counters.first_meetings_completed, 1);
        assert_eq!(format_hours(counters.hours_completed), "1.5h");
        assert_eq!(counters.orders_delivered, 1);
    }

    #[test]
    fn test_appointments_by_kind_reports_zeroes() {
        let day = date(2024, 6, 13);
        let tasks = vec![
            task(1, TaskKind::Upsell, day.at(9, 0, 0, 0)),
            task(2, TaskKind::Upsell, day.at(10, 0, 0, 0)),
            task(3, TaskKind::Upsell, date(2024, 6, 14).at(10, 0, 0, 0)),
            task(4, TaskKind::Generic, day.at(10, 0, 0, 0)),
        ];
        let counts = appointments_by_kind(&tasks, day);
        assert_eq!(
            counts,
            vec![
                (TaskKind::FirstMeeting, 0),
                (TaskKind::CallbackReminder, 0),
                (TaskKind::Upsell, 2),
                (TaskKind::Maintenance, 0),
            ]
        );
    }

    #[test]
    fn test_call_pipeline_buckets() {
        let today = date(2024, 6, 13);
        let tasks = vec![
            task(1, TaskKind::Generic, date(2024, 6, 12).at(9, 0, 0, 0)),
            task(2, TaskKind::Generic, date(2024, 6, 13).at(9, 0, 0, 0)),
            task(3, TaskKind::Generic, date(2024, 6, 3).at(9, 0, 0, 0)),
            task(4, TaskKind::FirstMeeting, date(2024, 6, 3).at(9, 0, 0, 0)),
            task(5, TaskKind::Generic, date(2024, 5, 1).at(9, 0, 0, 0)),
        ];
        let pipeline = call_pipeline(&tasks, today);
        assert_eq!(
            pipeline,
            vec![
                (IsoWeek { year: 2024, week: 23 }, 1),
                (IsoWeek { year: 2024, week: 24 }, 2),
            ]
        );
    }
}
