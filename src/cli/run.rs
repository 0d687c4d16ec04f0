//! Run command - execute one check

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tracing::info;

use crate::checker::{CheckParams, CheckRunner, CheckerContext, RunDisposition};
use crate::checks;
use crate::config::Settings;
use crate::notify::{HttpMailNotifier, NotificationChannel};
use crate::storage::{MetadataStore, PgMetadataStore};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Name of the checker to execute
    pub checker: String,

    /// Checker parameters as key=value pairs
    pub params: Vec<String>,
}

/// Execute the run command
pub async fn execute(args: RunArgs) -> Result<()> {
    // Parameter format problems are reported before anything else runs
    let params = CheckParams::parse(&args.params)?;

    let settings = Settings::load().unwrap_or_else(|_| Settings::default_settings());

    let store: Arc<dyn MetadataStore> =
        Arc::new(PgMetadataStore::from_settings(&settings.database).await?);
    let notifier: Arc<dyn NotificationChannel> =
        Arc::new(HttpMailNotifier::new(&settings.notification));

    let ctx = CheckerContext {
        store: store.clone(),
        notifier,
        settings,
    };

    let registry = checks::builtin_registry();
    let checker = registry.resolve(&args.checker, &ctx)?;

    let runner = CheckRunner::bind(store, checker.name()).await?;

    match runner.run(checker.as_ref(), &params).await? {
        RunDisposition::Completed(_) => {}
        RunDisposition::Skipped => {
            info!(checker = %args.checker, "checker is not active, nothing to do");
        }
    }

    Ok(())
}
