//! Deadline aging of orders.
//!
//! # Fail-open policy
//!
//! An order whose due date is missing or could not be parsed evaluates as
//! [`DeadlineStatus::OnTime`] with no days-remaining figure. A listing must
//! never break on one bad record, and flagging such an order as late would be
//! a guess.

use std::{fmt, str::FromStr};

use jiff::{civil::Date, ToSpan};
use serde::{Deserialize, Serialize};

use crate::{models::Order, params::OrderQuery};

/// Orders due within this many days appear on the worklist.
pub const WORKLIST_HORIZON_DAYS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlineStatus {
    OnTime,
    Late,
    Delivered,
}

impl DeadlineStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DeadlineStatus::OnTime => "On time",
            DeadlineStatus::Late => "Late",
            DeadlineStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of evaluating one order against a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineAssessment {
    pub status: DeadlineStatus,
    /// Whole days until the due date; only reported for on-time orders
    pub days_remaining: Option<i64>,
}

/// Classifies an order as delivered, late or on time.
///
/// The delivered flag wins over any date comparison.
///
/// ```rust
/// use agenda_core::{
///     deadline::{evaluate, DeadlineStatus},
///     models::{Delivery, Order},
/// };
/// use jiff::civil::date;
///
/// let order = Order {
///     id: 1,
///     client_id: 1,
///     service: "Website".to_string(),
///     price: 900.0,
///     start_date: Some(date(2024, 6, 1)),
///     end_date: Some(date(2024, 6, 20)),
///     delivery: Delivery::Unset,
/// };
/// let assessment = evaluate(&order, date(2024, 6, 17));
/// assert_eq!(assessment.status, DeadlineStatus::OnTime);
/// assert_eq!(assessment.days_remaining, Some(3));
/// ```
pub fn evaluate(order: &Order, today: Date) -> DeadlineAssessment {
    if order.delivery.is_delivered() {
        return DeadlineAssessment {
            status: DeadlineStatus::Delivered,
            days_remaining: None,
        };
    }
    match order.end_date {
        Some(due) if due < today => DeadlineAssessment {
            status: DeadlineStatus::Late,
            days_remaining: None,
        },
        Some(due) => DeadlineAssessment {
            status: DeadlineStatus::OnTime,
            days_remaining: Some(days_between(today, due)),
        },
        None => DeadlineAssessment {
            status: DeadlineStatus::OnTime,
            days_remaining: None,
        },
    }
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: Date, to: Date) -> i64 {
    i64::from((to - from).get_days())
}

/// One row of the deadline worklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineEntry {
    pub order: Order,
    pub client_name: String,
    pub due: Date,
    /// Negative when the order is overdue
    pub days_until_due: i64,
    pub assessment: DeadlineAssessment,
}

/// Undelivered orders due within [`WORKLIST_HORIZON_DAYS`] or already late,
/// soonest first.
///
/// Orders without a usable due date are left out.
pub fn deadline_worklist<F>(orders: &[Order], today: Date, client_name: F) -> Vec<DeadlineEntry>
where
    F: Fn(u64) -> String,
{
    let horizon = today.saturating_add(WORKLIST_HORIZON_DAYS.days());
    let mut items: Vec<DeadlineEntry> = orders
        .iter()
        .filter(|order| !order.delivery.is_delivered())
        .filter_map(|order| {
            let due = order.end_date.filter(|due| *due <= horizon)?;
            Some(DeadlineEntry {
                order: order.clone(),
                client_name: client_name(order.client_id),
                due,
                days_until_due: days_between(today, due),
                assessment: evaluate(order, today),
            })
        })
        .collect();
    items.sort_by(|a, b| a.due.cmp(&b.due).then(a.order.id.cmp(&b.order.id)));
    items
}

/// An order with its client's name and current deadline status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderOverview {
    pub order: Order,
    pub client_name: String,
    pub assessment: DeadlineAssessment,
}

impl OrderOverview {
    pub fn new(order: Order, client_name: impl Into<String>, today: Date) -> Self {
        let assessment = evaluate(&order, today);
        Self {
            order,
            client_name: client_name.into(),
            assessment,
        }
    }
}

/// Status filter for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatusFilter {
    Late,
    OnTime,
    Delivered,
}

impl OrderStatusFilter {
    pub fn matches(&self, assessment: &DeadlineAssessment) -> bool {
        matches!(
            (self, assessment.status),
            (OrderStatusFilter::Late, DeadlineStatus::Late)
                | (OrderStatusFilter::OnTime, DeadlineStatus::OnTime)
                | (OrderStatusFilter::Delivered, DeadlineStatus::Delivered)
        )
    }
}

impl FromStr for OrderStatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "late" => Ok(OrderStatusFilter::Late),
            "on-time" | "ontime" => Ok(OrderStatusFilter::OnTime),
            "delivered" => Ok(OrderStatusFilter::Delivered),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

/// Whether an order passes the listing filters.
pub fn order_matches(order: &Order, client_name: &str, query: &OrderQuery, today: Date) -> bool {
    if query.client_id.is_some_and(|id| id != order.client_id) {
        return false;
    }
    if let Some(text) = query.text.as_deref() {
        let needle = text.to_lowercase();
        if !order.service.to_lowercase().contains(&needle)
            && !client_name.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    query
        .status
        .map_or(true, |status| status.matches(&evaluate(order, today)))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::Delivery;

    fn order(id: u64, end_date: Option<Date>, delivery: Delivery) -> Order {
        Order {
            id,
            client_id: id * 10,
            service: format!("Service {id}"),
            price: 100.0,
            start_date: Some(date(2024, 5, 1)),
            end_date,
            delivery,
        }
    }

    #[test]
    fn test_delivered_ignores_dates() {
        let today = date(2024, 6, 10);
        for end in [None, Some(date(2020, 1, 1)), Some(date(2030, 1, 1))] {
            let assessment = evaluate(&order(1, end, Delivery::Delivered), today);
            assert_eq!(assessment.status, DeadlineStatus::Delivered);
            assert_eq!(assessment.days_remaining, None);
        }
    }

    #[test]
    fn test_late_when_due_yesterday() {
        let today = date(2024, 6, 10);
        let assessment = evaluate(&order(1, Some(date(2024, 6, 9)), Delivery::NotDelivered), today);
        assert_eq!(assessment.status, DeadlineStatus::Late);
        assert_eq!(assessment.days_remaining, None);
    }

    #[test]
    fn test_on_time_when_due_today() {
        let today = date(2024, 6, 10);
        let assessment = evaluate(&order(1, Some(today), Delivery::Unset), today);
        assert_eq!(assessment.status, DeadlineStatus::OnTime);
        assert_eq!(assessment.days_remaining, Some(0));
    }

    #[test]
    fn test_unknown_due_date_fails_open() {
        let assessment = evaluate(&order(1, None, Delivery::Unset), date(2024, 6, 10));
        assert_eq!(assessment.status, DeadlineStatus::OnTime);
        assert_eq!(assessment.days_remaining, None);
    }

    #[test]
    fn test_worklist_selection_and_order() {
        let today = date(2024, 6, 10);
        let orders = vec![
            order(1, Some(date(2024, 6, 15)), Delivery::Unset),
            order(2, Some(date(2024, 6, 16)), Delivery::Unset),
            order(3, Some(date(2024, 6, 1)), Delivery::NotDelivered),
            order(4, Some(date(2024, 6, 11)), Delivery::Delivered),
            order(5, None, Delivery::Unset),
            order(6, Some(date(2024, 6, 10)), Delivery::Unset),
        ];

        let items = deadline_worklist(&orders, today, |id| format!("Client {id}"));
        let ids: Vec<u64> = items.iter().map(|item| item.order.id).collect();
        assert_eq!(ids, vec![3, 6, 1]);
        assert_eq!(items[0].days_until_due, -9);
        assert_eq!(items[0].assessment.status, DeadlineStatus::Late);
        assert_eq!(items[0].client_name, "Client 30");
        assert_eq!(items[2].days_until_due, 5);
    }

    #[test]
    fn test_order_matches_filters() {
        let today = date(2024, 6, 10);
        let late = order(1, Some(date(2024, 6, 1)), Delivery::Unset);

        let mut query = OrderQuery {
            text: Some("acme".to_string()),
            ..Default::default()
        };
        assert!(order_matches(&late, "ACME Bakery", &query, today));
        assert!(!order_matches(&late, "Other", &query, today));

        query.text = None;
        query.status = Some(OrderStatusFilter::Late);
        assert!(order_matches(&late, "Other", &query, today));
        query.status = Some(OrderStatusFilter::OnTime);
        assert!(!order_matches(&late, "Other", &query, today));
    }
}
