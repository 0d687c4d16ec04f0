//! Data Checker CLI
//!
//! Provides commands for:
//! - `run`: Execute a single health check by name
//! - `list`: List registered checks and their activation state
//! - `db`: Database operations

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use data_checker::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("data_checker=info".parse()?))
        .init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Run(args) => {
            data_checker::cli::run::execute(args).await?;
        }
        Commands::List(args) => {
            data_checker::cli::list::execute(args).await?;
        }
        Commands::Db(cmd) => {
            data_checker::cli::db::execute(cmd).await?;
        }
    }

    Ok(())
}
