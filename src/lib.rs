//! # Data Checker
//!
//! Pluggable health checks for market data.
//!
//! ## Features
//!
//! - **Checker framework**: activation-gated lifecycle with a durable audit
//!   trail; every executed check persists exactly one outcome row
//! - **Pluggable checks**: a startup-time registry maps check names to
//!   factories, so new checks plug in without touching the dispatcher
//! - **Notifications**: failing checks push a summary to a mail gateway
//!
//! ## Architecture
//!
//! An external scheduler invokes one check per process run. The CLI resolves
//! the check from the registry, binds a runner against the check's metadata
//! registration, and the runner gates on `active`, delegates to the check's
//! domain logic, and records the outcome. Checks read domain data (candles)
//! through the metadata store and never write it.

pub mod checker;
pub mod checks;
pub mod cli;
pub mod config;
pub mod notify;
pub mod schema;
pub mod storage;

// Re-export commonly used types
pub use checker::{
    CheckOutcome, CheckParams, CheckRunner, CheckStatus, Checker, CheckerContext, CheckerError,
    CheckerRegistry, RunDisposition,
};
pub use config::Settings;
pub use notify::{Notification, NotificationChannel};
pub use schema::{Candle, CheckRecord, CheckerRegistration};
pub use storage::{MetadataStore, PgMetadataStore, RepositoryError};
