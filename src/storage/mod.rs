//! Metadata store access
//!
//! The framework consumes the store through the narrow `MetadataStore` trait:
//! registration lookup, candle retrieval, and append-only outcome inserts.
//! `PgMetadataStore` is the Postgres implementation; `MemoryMetadataStore`
//! backs tests and local development.

pub mod memory;
pub mod repository;

pub use memory::MemoryMetadataStore;
pub use repository::PgMetadataStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::schema::{Candle, CheckRecord, CheckerRegistration};

/// Store errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Narrow store interface consumed by the checker framework
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Look up a check's registration row by exact name
    async fn registration(&self, name: &str) -> RepositoryResult<Option<CheckerRegistration>>;

    /// Candles with `from < ts < to` (exclusive on both ends), ordered by
    /// timestamp ascending
    async fn candles_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Candle>>;

    /// Append one outcome row to the audit trail
    async fn insert_check(&self, record: &CheckRecord) -> RepositoryResult<()>;
}
