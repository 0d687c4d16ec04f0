//! Database management commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use crate::config::Settings;
use crate::storage::PgMetadataStore;

/// Database subcommands
#[derive(Subcommand)]
pub enum DbCommands {
    /// Run database migrations
    Migrate,
    /// Create or update a check registration
    Register(RegisterArgs),
}

/// Arguments for the register command
#[derive(Args)]
pub struct RegisterArgs {
    /// Check name to register
    pub name: String,

    /// Register the check as active
    #[arg(long)]
    pub active: bool,
}

/// Execute database commands
pub async fn execute(cmd: DbCommands) -> Result<()> {
    match cmd {
        DbCommands::Migrate => execute_migrate().await,
        DbCommands::Register(args) => execute_register(args).await,
    }
}

async fn execute_migrate() -> Result<()> {
    let settings = Settings::load().unwrap_or_else(|_| Settings::default_settings());
    let store = PgMetadataStore::from_settings(&settings.database).await?;

    info!("Running migrations...");
    store.run_migrations().await?;

    info!("Migrations completed");
    Ok(())
}

async fn execute_register(args: RegisterArgs) -> Result<()> {
    let settings = Settings::load().unwrap_or_else(|_| Settings::default_settings());
    let store = PgMetadataStore::from_settings(&settings.database).await?;

    let registration = store.upsert_registration(&args.name, args.active).await?;

    info!(
        id = registration.id,
        active = registration.active,
        "registration saved"
    );
    println!(
        "Registered {} (id {}, {})",
        registration.name,
        registration.id,
        if registration.active {
            "active"
        } else {
            "inactive"
        }
    );

    Ok(())
}
