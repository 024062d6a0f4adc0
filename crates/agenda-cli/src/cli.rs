//! Command handlers.
//!
//! Each handler converts its arguments into core parameters, calls the
//! [`Agenda`] and renders the markdown result. The reference instant is read
//! once in `main` and shared by every handler.

use agenda_core::{
    display::{
        CivilDateTime, Clients, CreateResult, Deadlines, DeleteResult, OperationStatus, Orders,
        TaskList, UpdateResult,
    },
    params::Id,
    period::{monday_of, DateRange},
    Agenda,
};
use anyhow::{bail, Context, Result};
use jiff::{
    civil::{Date, DateTime},
    ToSpan,
};
use log::debug;
use serde::Serialize;

use crate::{
    args::{CalendarCommands, ClientCommands, ListTasksArgs, OrderCommands, TaskCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    agenda: Agenda,
    renderer: TerminalRenderer,
    now: DateTime,
}

impl Cli {
    pub fn new(agenda: Agenda, renderer: TerminalRenderer, now: DateTime) -> Self {
        Self {
            agenda,
            renderer,
            now,
        }
    }

    fn today(&self) -> Date {
        self.now.date()
    }

    fn print_json<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
        Ok(())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self
                    .agenda
                    .add_task(&args.into())
                    .await
                    .context("Failed to add task")?;
                self.renderer.render(&CreateResult::new(task).to_string());
            }
            TaskCommands::List(args) => self.list_tasks(args).await?,
            TaskCommands::Show(args) => {
                let id = Id::from(args);
                let Some(details) = self
                    .agenda
                    .show_task(&id)
                    .await
                    .context("Failed to load task")?
                else {
                    bail!("Task with ID {} not found", id.id);
                };
                self.renderer.render(&details.to_string());
            }
            TaskCommands::Done(args) => {
                let task = self
                    .agenda
                    .complete_task(&args.into())
                    .await
                    .context("Failed to complete task")?;
                let result = UpdateResult::with_changes(task, vec!["Marked done".to_string()]);
                self.renderer.render(&result.to_string());
            }
            TaskCommands::Reschedule(args) => {
                let task = self
                    .agenda
                    .reschedule_task(&args.into())
                    .await
                    .context("Failed to reschedule task")?;
                let change = format!("Moved to {}", CivilDateTime(&task.start_at));
                let result = UpdateResult::with_changes(task, vec![change]);
                self.renderer.render(&result.to_string());
            }
            TaskCommands::Cancel(args) => {
                let task = self
                    .agenda
                    .cancel_task(&args.into())
                    .await
                    .context("Failed to cancel task")?;
                self.renderer.render(&DeleteResult::new(task).to_string());
            }
            TaskCommands::Callback(args) => {
                let task = self
                    .agenda
                    .schedule_callback(&args.into())
                    .await
                    .context("Failed to schedule callback")?;
                self.renderer.render(&CreateResult::new(task).to_string());
            }
        }
        Ok(())
    }

    async fn list_tasks(&self, args: ListTasksArgs) -> Result<()> {
        let from = args.from.unwrap_or_else(|| monday_of(self.today()));
        let to = args.to.unwrap_or_else(|| from.saturating_add(6.days()));
        let range = DateRange::new(from, to)?;
        debug!("Listing tasks for {range}");

        let entries = self
            .agenda
            .list_entries_in_range(&range, &args.filter.into())
            .await
            .context("Failed to list tasks")?;
        self.renderer
            .render(&format!("# Tasks, {range}\n\n{}", TaskList(entries)));
        Ok(())
    }

    pub async fn handle_client_command(&self, command: ClientCommands) -> Result<()> {
        match command {
            ClientCommands::Add(args) => {
                let client = self
                    .agenda
                    .add_client(&args.into())
                    .await
                    .context("Failed to add client")?;
                self.renderer.render(&CreateResult::new(client).to_string());
            }
            ClientCommands::List => {
                let clients = self
                    .agenda
                    .list_clients()
                    .await
                    .context("Failed to list clients")?;
                self.renderer
                    .render(&format!("# Clients\n\n{}", Clients(clients)));
            }
        }
        Ok(())
    }

    pub async fn handle_order_command(&self, command: OrderCommands) -> Result<()> {
        match command {
            OrderCommands::Add(args) => {
                let order = self
                    .agenda
                    .add_order(&args.into())
                    .await
                    .context("Failed to add order")?;
                self.renderer.render(&CreateResult::new(order).to_string());
            }
            OrderCommands::List(args) => {
                let orders = self
                    .agenda
                    .list_orders(&args.into(), self.today())
                    .await
                    .context("Failed to list orders")?;
                self.renderer
                    .render(&format!("# Orders\n\n{}", Orders(orders)));
            }
            OrderCommands::Deliver(args) => {
                let order = self
                    .agenda
                    .set_delivery(&args.into())
                    .await
                    .context("Failed to update order")?;
                let change = format!("Delivery set to {}", order.delivery);
                let result = UpdateResult::with_changes(order, vec![change]);
                self.renderer.render(&result.to_string());
            }
            OrderCommands::Delete(args) => {
                if !args.confirm {
                    let status = OperationStatus::failure(format!(
                        "Deleting order {} also deletes its tasks. Re-run with --confirm.",
                        args.id
                    ));
                    self.renderer.render(&status.to_string());
                    return Ok(());
                }
                let removed = self
                    .agenda
                    .delete_order(&Id { id: args.id })
                    .await
                    .context("Failed to delete order")?;
                let status = OperationStatus::success(format!(
                    "Deleted order {} and {removed} linked tasks",
                    args.id
                ));
                self.renderer.render(&status.to_string());
            }
        }
        Ok(())
    }

    pub async fn handle_calendar_command(&self, command: CalendarCommands) -> Result<()> {
        match command {
            CalendarCommands::Month(args) => {
                let year = args.year.unwrap_or_else(|| self.today().year());
                let month = args.month.unwrap_or_else(|| self.today().month());
                let grid = self
                    .agenda
                    .project_month(year, month, &args.filter.into())
                    .await
                    .context("Failed to project month")?;
                if args.json {
                    return Self::print_json(&grid);
                }
                self.renderer.render(&grid.to_string());
            }
            CalendarCommands::Week(args) => {
                let day = args.date.unwrap_or_else(|| self.today());
                let grid = self
                    .agenda
                    .project_week(day, &args.filter.into(), args.hours)
                    .await
                    .context("Failed to project week")?;
                if args.json {
                    return Self::print_json(&grid);
                }
                self.renderer.render(&grid.to_string());
            }
        }
        Ok(())
    }

    pub async fn deadlines(&self) -> Result<()> {
        let worklist = self
            .agenda
            .deadline_worklist(self.today())
            .await
            .context("Failed to load deadlines")?;
        self.renderer
            .render(&format!("# Deadlines\n\n{}", Deadlines(worklist)));
        Ok(())
    }

    pub async fn today_dashboard(&self) -> Result<()> {
        let dashboard = self
            .agenda
            .daily_dashboard(self.now)
            .await
            .context("Failed to build dashboard")?;
        self.renderer.render(&dashboard.to_string());
        Ok(())
    }

    pub async fn kpi(&self, json: bool) -> Result<()> {
        let report = self
            .agenda
            .compute_kpis(self.now)
            .await
            .context("Failed to compute KPIs")?;
        if json {
            return Self::print_json(&report);
        }
        self.renderer.render(&report.to_string());
        Ok(())
    }
}
