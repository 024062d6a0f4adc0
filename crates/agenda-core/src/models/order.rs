//! Clients and orders, as read from the directory.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Delivery flag of an order.
///
/// Three states are stored: never set, delivered, and explicitly not
/// delivered. Only [`Delivery::Delivered`] changes deadline evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Delivery {
    #[default]
    Unset,
    Delivered,
    NotDelivered,
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }

    /// Storage representation: `NULL`, `1` or `0`.
    pub fn to_db(self) -> Option<bool> {
        match self {
            Delivery::Unset => None,
            Delivery::Delivered => Some(true),
            Delivery::NotDelivered => Some(false),
        }
    }

    pub fn from_db(value: Option<bool>) -> Self {
        match value {
            None => Delivery::Unset,
            Some(true) => Delivery::Delivered,
            Some(false) => Delivery::NotDelivered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Delivery::Unset => "unset",
            Delivery::Delivered => "delivered",
            Delivery::NotDelivered => "not-delivered",
        }
    }
}

impl FromStr for Delivery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unset" | "none" => Ok(Delivery::Unset),
            "delivered" | "yes" => Ok(Delivery::Delivered),
            "not-delivered" | "no" => Ok(Delivery::NotDelivered),
            _ => Err(format!("Invalid delivery flag: {s}")),
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client of the business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub phone: Option<String>,
    /// Day the prospect signed
    pub converted_on: Option<Date>,
}

impl Client {
    /// The day the client is counted as signed: `converted_on` when set,
    /// else the earliest known start among the client's orders.
    pub fn conversion_date(&self, orders: &[Order]) -> Option<Date> {
        self.converted_on.or_else(|| {
            orders
                .iter()
                .filter(|order| order.client_id == self.id)
                .filter_map(|order| order.start_date)
                .min()
        })
    }
}

/// An order (mission) owned by a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: u64,
    pub client_id: u64,
    /// Name of the service sold
    pub service: String,
    pub price: f64,
    /// Contract start; `None` when missing or unparseable
    pub start_date: Option<Date>,
    /// Due date; `None` when missing or unparseable
    pub end_date: Option<Date>,
    pub delivery: Delivery,
}
