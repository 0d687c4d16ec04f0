//! List command - show registered checks

use anyhow::Result;
use clap::Args;
use tracing::warn;

use crate::checks;
use crate::config::Settings;
use crate::storage::{MetadataStore, PgMetadataStore};

/// Arguments for the list command
#[derive(Args)]
pub struct ListArgs {
    /// Skip the metadata store lookup and list names only
    #[arg(long)]
    pub offline: bool,
}

/// Execute the list command
pub async fn execute(args: ListArgs) -> Result<()> {
    let registry = checks::builtin_registry();

    let store = if args.offline {
        None
    } else {
        let settings = Settings::load().unwrap_or_else(|_| Settings::default_settings());
        match PgMetadataStore::from_settings(&settings.database).await {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(error = %e, "metadata store unavailable, listing names only");
                None
            }
        }
    };

    println!("Registered checks:");
    for name in registry.names() {
        match &store {
            Some(store) => {
                let state = match store.registration(name).await? {
                    Some(registration) if registration.active => "active",
                    Some(_) => "inactive",
                    None => "unregistered",
                };
                println!("  {} ({})", name, state);
            }
            None => println!("  {}", name),
        }
    }

    Ok(())
}
