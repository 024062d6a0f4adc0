//! Core library of the Agenda scheduling engine.
//!
//! The crate manages the tasks of a small sales-and-delivery business and
//! derives four views from them:
//!
//! - **Calendar** ([`calendar`]): month and week grids
//! - **Deadlines** ([`deadline`]): the on-time or late status of each order
//! - **KPIs** ([`kpi`]): counters and funnel rates over standard periods
//! - **Dashboard** ([`kpi::Dashboard`]): the daily planning page
//!
//! Storage sits behind the [`TaskStore`] and [`Directory`] traits. The
//! SQLite [`Database`] implements both, and [`Agenda`] wraps it in an async
//! API for interface layers.
//!
//! # Quick Start
//!
//! ```rust
//! use agenda_core::{
//!     calendar::ProjectionFilter,
//!     params::{NewClient, NewTask},
//!     models::TaskKind,
//!     AgendaBuilder,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let agenda = AgendaBuilder::new()
//!     .with_database_path(Some("agenda.db"))
//!     .build()
//!     .await?;
//!
//! let client = agenda
//!     .add_client(&NewClient {
//!         name: "Acme".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let start = date(2024, 6, 12).at(9, 0, 0, 0);
//! agenda
//!     .add_task(
//!         &NewTask::new("Kick-off", TaskKind::FirstMeeting, start)
//!             .for_client(client.id)
//!             .ending_at(date(2024, 6, 12).at(10, 0, 0, 0)),
//!     )
//!     .await?;
//!
//! let week = agenda
//!     .project_week(start.date(), &ProjectionFilter::default(), None)
//!     .await?;
//! println!("{week}");
//! # Ok(())
//! # }
//! ```

pub mod agenda;
pub mod calendar;
pub mod db;
pub mod deadline;
pub mod display;
pub mod error;
pub mod kpi;
pub mod lifecycle;
pub mod models;
pub mod params;
pub mod period;
pub mod store;

// Re-export commonly used types
pub use agenda::{Agenda, AgendaBuilder};
pub use calendar::{CalendarEntry, HourBand, MonthGrid, ProjectionFilter, WeekGrid};
pub use db::Database;
pub use deadline::{DeadlineAssessment, DeadlineEntry, DeadlineStatus, OrderOverview};
pub use display::{CreateResult, DeleteResult, OperationStatus, TaskList, UpdateResult};
pub use error::{AgendaError, Result};
pub use kpi::{Dashboard, KpiReport, PercentChange, Rate};
pub use models::{Client, Delivery, Order, Task, TaskKind, TaskStatus};
pub use period::{DateRange, Period, PeriodName, Periods};
pub use store::{Directory, TaskStore};
