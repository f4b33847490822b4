use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::PlanCommands;

/// Offline editor for cloud-resource migration plans
///
/// Loads a plan's dependency graph exported by the migration backend, lets
/// you inspect it, edit resource properties, substitute resources with
/// existing ones and preview the clone payload before submission.
#[derive(Parser)]
#[command(version, about, name = "conveyor")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/conveyor/conveyor.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage migration plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
}
