//! Parameter structures for agenda operations.
//!
//! These structures are shared by every interface (the CLI today) and carry
//! no framework-specific derives. Interface layers define their own argument
//! types and convert into these with `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│  Core Params    │───▶│     Agenda      │
//! │  (clap derives) │    │ (minimal deps)  │    │   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::{
    civil::{Date, DateTime},
    SignedDuration,
};
use serde::{Deserialize, Serialize};

use crate::{
    deadline::OrderStatusFilter,
    error::{AgendaError, Result},
    models::{task, Delivery, TaskKind},
};

/// Parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    pub id: u64,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub client_id: Option<u64>,
    pub order_id: Option<u64>,
    pub kind: TaskKind,
    /// Title of the task (required, non-empty)
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTime,
    pub end_at: Option<DateTime>,
    /// Internal work not tied to a client
    #[serde(default)]
    pub is_process: bool,
    pub service: Option<String>,
    pub time_spent: Option<SignedDuration>,
}

impl NewTask {
    /// A pending task with only the required fields set.
    ///
    /// ```rust
    /// use agenda_core::{models::TaskKind, params::NewTask};
    /// use jiff::civil::date;
    ///
    /// let task = NewTask::new("Weekly review", TaskKind::Generic, date(2024, 6, 10).at(9, 0, 0, 0));
    /// assert!(task.is_process);
    /// assert!(task.validate().is_ok());
    /// ```
    pub fn new(title: impl Into<String>, kind: TaskKind, start_at: DateTime) -> Self {
        Self {
            client_id: None,
            order_id: None,
            kind,
            title: title.into(),
            description: None,
            start_at,
            end_at: None,
            is_process: true,
            service: None,
            time_spent: None,
        }
    }

    /// Links the task to a client, which makes it a client task.
    pub fn for_client(mut self, client_id: u64) -> Self {
        self.client_id = Some(client_id);
        self.is_process = false;
        self
    }

    pub fn ending_at(mut self, end_at: DateTime) -> Self {
        self.end_at = Some(end_at);
        self
    }

    pub fn in_order(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Validates title, extent and the client/process invariant.
    pub fn validate(&self) -> Result<()> {
        task::validate_title(&self.title)?;
        task::validate_extent(self.start_at, self.end_at)?;
        task::validate_client(self.client_id, self.is_process)?;
        if let Some(spent) = self.time_spent {
            if spent.is_negative() {
                return Err(AgendaError::invalid_input("time_spent")
                    .with_reason("Time spent cannot be negative"));
            }
            // Stored in whole minutes.
            if spent.as_secs() % 60 != 0 || spent.subsec_nanos() != 0 {
                return Err(AgendaError::invalid_input("time_spent")
                    .with_reason("Time spent must be a whole number of minutes"));
            }
        }
        Ok(())
    }
}

/// Parameters for moving a task to a new extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reschedule {
    pub id: u64,
    pub start_at: DateTime,
    pub end_at: Option<DateTime>,
}

/// Parameters for creating a callback reminder for a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCallback {
    pub client_id: u64,
    pub at: DateTime,
    pub note: Option<String>,
}

/// Parameters for adding a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub phone: Option<String>,
    pub converted_on: Option<Date>,
}

/// Parameters for adding an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub client_id: u64,
    pub service: String,
    pub price: f64,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(default)]
    pub delivery: Delivery,
}

impl NewOrder {
    pub fn validate(&self) -> Result<()> {
        if self.service.trim().is_empty() {
            return Err(
                AgendaError::invalid_input("service").with_reason("Service cannot be empty")
            );
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AgendaError::invalid_input("price")
                .with_reason("Price must be a non-negative amount"));
        }
        if self.end_date < self.start_date {
            return Err(AgendaError::invalid_input("end_date")
                .with_reason("Due date cannot precede the start date"));
        }
        Ok(())
    }
}

/// Parameters for setting the delivery flag of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDelivery {
    pub order_id: u64,
    pub delivery: Delivery,
}

/// Filters for listing orders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Case-insensitive match against client name or service
    pub text: Option<String>,
    pub client_id: Option<u64>,
    pub status: Option<OrderStatusFilter>,
}
