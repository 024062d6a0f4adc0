//! Command-line argument definitions using clap.
//!
//! Argument structs carry the clap derives and convert into the framework-free
//! parameter types of `agenda_core::params` with `From`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Agenda
//! ```
//!
//! Arguments whose defaults depend on the reference instant (`--now`) are
//! resolved by the command handlers instead.

use std::path::PathBuf;

use agenda_core::{
    calendar::{HourBand, ProjectionFilter},
    deadline::OrderStatusFilter,
    models::{Delivery, TaskKind},
    params::{Id, NewClient, NewOrder, NewTask, OrderQuery, Reschedule, ScheduleCallback, SetDelivery},
};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::{
    civil::{Date, DateTime},
    SignedDuration,
};

/// Calendar, deadlines and KPIs for a small sales pipeline
///
/// Tasks are scheduled against clients and orders. The calendar views, the
/// deadline worklist and the KPI report are derived from them on every call.
#[derive(Parser)]
#[command(version, about, name = "agenda")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/agenda/agenda.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Reference instant, e.g. 2024-06-17T09:00. Defaults to the local clock
    #[arg(long, global = true)]
    pub now: Option<DateTime>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without a command, today's dashboard is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage clients
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Manage orders
    #[command(alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Month and week views
    #[command(alias = "cal")]
    Calendar {
        #[command(subcommand)]
        command: CalendarCommands,
    },
    /// Undelivered orders due soon or already late
    Deadlines,
    /// Today's counters, appointments, agenda and deadlines
    Today,
    /// Key figures for today, yesterday, this week, last week and this month
    Kpi {
        /// Print JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
}

/// Task kinds accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Generic work item; calls are logged with this kind
    Generic,
    FirstMeeting,
    Maintenance,
    Upsell,
    /// Reminder to call a prospect back
    Callback,
}

impl From<KindArg> for TaskKind {
    fn from(val: KindArg) -> Self {
        match val {
            KindArg::Generic => TaskKind::Generic,
            KindArg::FirstMeeting => TaskKind::FirstMeeting,
            KindArg::Maintenance => TaskKind::Maintenance,
            KindArg::Upsell => TaskKind::Upsell,
            KindArg::Callback => TaskKind::CallbackReminder,
        }
    }
}

/// Text and kind filters shared by listings and calendar views
#[derive(ClapArgs)]
pub struct FilterArgs {
    /// Case-insensitive text matched against client, title and kind
    #[arg(short, long)]
    pub filter: Option<String>,
    /// Only show tasks of this kind
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,
}

impl From<FilterArgs> for ProjectionFilter {
    fn from(val: FilterArgs) -> Self {
        ProjectionFilter {
            text: val.filter,
            kind: val.kind.map(TaskKind::from),
        }
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// Schedule a new task
#[derive(ClapArgs)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
    /// Start, e.g. 2024-06-12T09:00
    #[arg(long)]
    pub at: DateTime,
    /// End; must be after the start
    #[arg(long)]
    pub end: Option<DateTime>,
    #[arg(short, long, value_enum, default_value = "generic")]
    pub kind: KindArg,
    /// Client the task is for; omit for internal process work
    #[arg(short, long)]
    pub client: Option<u64>,
    /// Order the task belongs to
    #[arg(short, long)]
    pub order: Option<u64>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Service label shown with the task
    #[arg(long)]
    pub service: Option<String>,
    /// Minutes actually spent, when it differs from the extent
    #[arg(long)]
    pub minutes: Option<i64>,
}

impl From<AddTaskArgs> for NewTask {
    fn from(val: AddTaskArgs) -> Self {
        NewTask {
            client_id: val.client,
            order_id: val.order,
            kind: val.kind.into(),
            title: val.title,
            description: val.description,
            start_at: val.at,
            end_at: val.end,
            is_process: val.client.is_none(),
            service: val.service,
            time_spent: val.minutes.map(SignedDuration::from_mins),
        }
    }
}

/// List tasks over a date range
#[derive(ClapArgs)]
pub struct ListTasksArgs {
    /// First day; defaults to the Monday of the current week
    #[arg(long)]
    pub from: Option<Date>,
    /// Last day; defaults to six days after the first
    #[arg(long)]
    pub to: Option<Date>,
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// A task identified by its ID
#[derive(ClapArgs)]
pub struct TaskIdArgs {
    /// Unique identifier of the task
    pub id: u64,
}

impl From<TaskIdArgs> for Id {
    fn from(val: TaskIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Move a task to a new time
#[derive(ClapArgs)]
pub struct RescheduleArgs {
    /// Unique identifier of the task
    pub id: u64,
    /// New start
    #[arg(long)]
    pub at: DateTime,
    /// New end; omit for a point-in-time task
    #[arg(long)]
    pub end: Option<DateTime>,
}

impl From<RescheduleArgs> for Reschedule {
    fn from(val: RescheduleArgs) -> Self {
        Reschedule {
            id: val.id,
            start_at: val.at,
            end_at: val.end,
        }
    }
}

/// Schedule a callback reminder for a client
#[derive(ClapArgs)]
pub struct CallbackArgs {
    /// Client to call back
    pub client_id: u64,
    /// When to call
    #[arg(long)]
    pub at: DateTime,
    #[arg(short, long)]
    pub note: Option<String>,
}

impl From<CallbackArgs> for ScheduleCallback {
    fn from(val: CallbackArgs) -> Self {
        ScheduleCallback {
            client_id: val.client_id,
            at: val.at,
            note: val.note,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Schedule a new task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List tasks over a date range
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show one task with its client and order
    #[command(alias = "s")]
    Show(TaskIdArgs),
    /// Mark a task done
    #[command(alias = "d")]
    Done(TaskIdArgs),
    /// Move a task; it becomes pending again
    #[command(alias = "r")]
    Reschedule(RescheduleArgs),
    /// Cancel (delete) a task
    #[command(aliases = ["c", "rm"])]
    Cancel(TaskIdArgs),
    /// Schedule a callback reminder for a client
    Callback(CallbackArgs),
}

// ============================================================================
// Clients and orders
// ============================================================================

/// Add a client
#[derive(ClapArgs)]
pub struct AddClientArgs {
    /// Client name
    pub name: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// Day the client signed
    #[arg(long)]
    pub converted_on: Option<Date>,
}

impl From<AddClientArgs> for NewClient {
    fn from(val: AddClientArgs) -> Self {
        NewClient {
            name: val.name,
            phone: val.phone,
            converted_on: val.converted_on,
        }
    }
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Add a client
    #[command(alias = "a")]
    Add(AddClientArgs),
    /// List clients
    #[command(aliases = ["l", "ls"])]
    List,
}

/// Delivery states accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DeliveryArg {
    Delivered,
    NotDelivered,
    Unset,
}

impl From<DeliveryArg> for Delivery {
    fn from(val: DeliveryArg) -> Self {
        match val {
            DeliveryArg::Delivered => Delivery::Delivered,
            DeliveryArg::NotDelivered => Delivery::NotDelivered,
            DeliveryArg::Unset => Delivery::Unset,
        }
    }
}

/// Add an order for a client
#[derive(ClapArgs)]
pub struct AddOrderArgs {
    /// Client placing the order
    pub client_id: u64,
    /// Service sold
    pub service: String,
    #[arg(long, default_value_t = 0.0)]
    pub price: f64,
    /// Contract start
    #[arg(long)]
    pub start: Date,
    /// Due date
    #[arg(long)]
    pub due: Date,
}

impl From<AddOrderArgs> for NewOrder {
    fn from(val: AddOrderArgs) -> Self {
        NewOrder {
            client_id: val.client_id,
            service: val.service,
            price: val.price,
            start_date: val.start,
            end_date: val.due,
            delivery: Delivery::Unset,
        }
    }
}

/// Order statuses accepted by `order list --status`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OrderStatusArg {
    Late,
    OnTime,
    Delivered,
}

impl From<OrderStatusArg> for OrderStatusFilter {
    fn from(val: OrderStatusArg) -> Self {
        match val {
            OrderStatusArg::Late => OrderStatusFilter::Late,
            OrderStatusArg::OnTime => OrderStatusFilter::OnTime,
            OrderStatusArg::Delivered => OrderStatusFilter::Delivered,
        }
    }
}

/// List orders with their deadline status
#[derive(ClapArgs)]
pub struct ListOrdersArgs {
    /// Case-insensitive text matched against client name and service
    #[arg(short, long)]
    pub filter: Option<String>,
    #[arg(short, long)]
    pub client: Option<u64>,
    #[arg(short, long, value_enum)]
    pub status: Option<OrderStatusArg>,
}

impl From<ListOrdersArgs> for OrderQuery {
    fn from(val: ListOrdersArgs) -> Self {
        OrderQuery {
            text: val.filter,
            client_id: val.client,
            status: val.status.map(OrderStatusFilter::from),
        }
    }
}

/// Set the delivery flag of an order
#[derive(ClapArgs)]
pub struct DeliverArgs {
    /// Unique identifier of the order
    pub id: u64,
    #[arg(long, value_enum, default_value = "delivered")]
    pub state: DeliveryArg,
}

impl From<DeliverArgs> for SetDelivery {
    fn from(val: DeliverArgs) -> Self {
        SetDelivery {
            order_id: val.id,
            delivery: val.state.into(),
        }
    }
}

/// Delete an order and every task linked to it
#[derive(ClapArgs)]
pub struct DeleteOrderArgs {
    /// Unique identifier of the order
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Add an order for a client
    #[command(alias = "a")]
    Add(AddOrderArgs),
    /// List orders with their deadline status
    #[command(aliases = ["l", "ls"])]
    List(ListOrdersArgs),
    /// Set the delivery flag of an order
    Deliver(DeliverArgs),
    /// Delete an order and its tasks
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteOrderArgs),
}

// ============================================================================
// Calendar
// ============================================================================

/// Month grid
#[derive(ClapArgs)]
pub struct MonthArgs {
    /// Defaults to the current year
    #[arg(long)]
    pub year: Option<i16>,
    /// 1-12; defaults to the current month
    #[arg(long)]
    pub month: Option<i8>,
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

/// Week grid by hour
#[derive(ClapArgs)]
pub struct WeekArgs {
    /// Any day of the week to show; defaults to today
    #[arg(long)]
    pub date: Option<Date>,
    /// Hour rows to show, e.g. 8-19
    #[arg(long)]
    pub hours: Option<HourBand>,
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum CalendarCommands {
    /// Month grid
    #[command(alias = "m")]
    Month(MonthArgs),
    /// Week grid by hour
    #[command(alias = "w")]
    Week(WeekArgs),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_add_task_args_into_params() {
        let args = Args::parse_from([
            "agenda",
            "task",
            "add",
            "Kick-off",
            "--at",
            "2024-06-12T09:00",
            "--kind",
            "first-meeting",
            "--client",
            "3",
            "--minutes",
            "45",
        ]);
        let Some(Commands::Task {
            command: TaskCommands::Add(add),
        }) = args.command
        else {
            panic!("expected task add");
        };
        let params = NewTask::from(add);
        assert_eq!(params.kind, TaskKind::FirstMeeting);
        assert_eq!(params.client_id, Some(3));
        assert!(!params.is_process);
        assert_eq!(params.time_spent, Some(SignedDuration::from_mins(45)));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_week_hours_are_parsed() {
        let args = Args::parse_from(["agenda", "calendar", "week", "--hours", "9-12"]);
        let Some(Commands::Calendar {
            command: CalendarCommands::Week(week),
        }) = args.command
        else {
            panic!("expected calendar week");
        };
        assert_eq!(week.hours, Some(HourBand::new(9, 12).unwrap()));
    }

    #[test]
    fn test_invalid_hours_rejected() {
        let result = Args::try_parse_from(["agenda", "calendar", "week", "--hours", "19-8"]);
        assert!(result.is_err());
    }
}
