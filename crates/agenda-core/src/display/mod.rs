//! Markdown rendering of agenda data.
//!
//! Domain types implement [`std::fmt::Display`] directly. Collections and
//! operation outcomes use newtype wrappers so the same values can be rendered
//! in different contexts. All output is markdown; the CLI turns it into
//! terminal text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain values  │    │ Wrappers and    │    │    Markdown     │
//! │ (Task, grids,   │───▶│ Display impls   │───▶│     output      │
//! │  reports)       │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`calendar`]: month and week grids as tables
//! - [`collections`]: task lists, clients, orders and deadlines
//! - [`datetime`]: date and time formatting helpers
//! - [`models`]: single tasks, clients and orders
//! - [`reports`]: KPI report and daily dashboard
//! - [`results`]: create, update and delete confirmations
//!
//! ```rust
//! use agenda_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Order 4 marked delivered");
//! assert_eq!(status.to_string(), "Success: Order 4 marked delivered\n");
//! ```

pub mod calendar;
pub mod collections;
pub mod datetime;
pub mod models;
pub mod reports;
pub mod results;

pub use collections::{due_in, Clients, Deadlines, Orders, TaskList};
pub use datetime::{CivilDateTime, Extent};
pub use models::TaskDetails;
pub use results::{CreateResult, DeleteResult, OperationStatus, UpdateResult};
