//! Agenda CLI application.
//!
//! Command-line interface for the agenda scheduling engine.

mod args;
mod cli;
mod renderer;

use agenda_core::AgendaBuilder;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use jiff::Zoned;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        now,
        command,
    } = Args::parse();

    let agenda = AgendaBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize agenda")?;

    let now = now.unwrap_or_else(|| Zoned::now().datetime());
    let cli = Cli::new(agenda, TerminalRenderer::new(!no_color), now);

    info!("Agenda started at {now}");

    match command {
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Client { command }) => cli.handle_client_command(command).await,
        Some(Order { command }) => cli.handle_order_command(command).await,
        Some(Calendar { command }) => cli.handle_calendar_command(command).await,
        Some(Deadlines) => cli.deadlines().await,
        Some(Kpi { json }) => cli.kpi(json).await,
        Some(Today) | None => cli.today_dashboard().await,
    }
}
