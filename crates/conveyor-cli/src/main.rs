//! conveyor: offline editor for cloud-resource migration plans.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use conveyor_core::{PlanFilter, RepositoryBuilder};
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let repository = RepositoryBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize plan database")?;
    info!("Using plan database {}", repository.database_path().display());

    let cli = Cli::new(repository, TerminalRenderer::new(!no_color));
    match command {
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        None => cli.list_plans(&PlanFilter::default()).await,
    }
}
