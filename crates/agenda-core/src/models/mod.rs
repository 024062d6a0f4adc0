//! Data models for tasks, clients and orders.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation out of the data types.
//!
//! # Examples
//!
//! ```rust
//! use agenda_core::models::{Task, TaskKind, TaskStatus};
//! use jiff::civil::date;
//!
//! let mut task = Task {
//!     id: 1,
//!     client_id: Some(7),
//!     order_id: None,
//!     kind: TaskKind::FirstMeeting,
//!     title: "Kick-off".to_string(),
//!     description: None,
//!     start_at: date(2024, 6, 10).at(9, 0, 0, 0),
//!     end_at: Some(date(2024, 6, 10).at(10, 0, 0, 0)),
//!     status: TaskStatus::Done,
//!     is_process: false,
//!     service: None,
//!     time_spent: None,
//! };
//!
//! // Rescheduling always re-opens the task
//! task.reschedule(date(2024, 6, 11).at(9, 0, 0, 0), None)?;
//! assert_eq!(task.status, TaskStatus::Pending);
//! # Ok::<(), agenda_core::AgendaError>(())
//! ```

pub mod kind;
pub mod order;
pub mod status;
pub mod task;

#[cfg(test)]
mod tests;

pub use kind::TaskKind;
pub use order::{Client, Delivery, Order};
pub use status::TaskStatus;
pub use task::Task;
