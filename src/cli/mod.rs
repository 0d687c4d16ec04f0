//! Command-line interface
//!
//! Provides CLI commands for the data checker.

pub mod db;
pub mod list;
pub mod run;

use clap::{Parser, Subcommand};

/// Data Checker CLI
#[derive(Parser)]
#[command(name = "data-checker")]
#[command(about = "Pluggable health checks for market data")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Execute a single check by name
    Run(run::RunArgs),
    /// List registered checks and their activation state
    List(list::ListArgs),
    /// Database operations
    #[command(subcommand)]
    Db(db::DbCommands),
}
