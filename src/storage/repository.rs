//! Postgres metadata store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use tracing::debug;

use crate::config::DatabaseSettings;
use crate::schema::{Candle, CheckRecord, CheckerRegistration};
use crate::storage::{MetadataStore, RepositoryError, RepositoryResult};

/// Postgres-backed metadata store.
///
/// Owns the connection pool for the lifetime of one invocation.
pub struct PgMetadataStore {
    pool: PgPool,
}

impl PgMetadataStore {
    /// Create a store with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a store from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> RepositoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&settings.url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Get the database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the framework-owned tables.
    ///
    /// `candles` is owned by the upstream producer; it is created here only
    /// so local development has something to read from.
    pub async fn run_migrations(&self) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS checker_types (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                active BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS checks (
                id BIGSERIAL PRIMARY KEY,
                checker_type_id INTEGER NOT NULL REFERENCES checker_types(id),
                status TEXT NOT NULL,
                message TEXT NOT NULL DEFAULT '',
                checked_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS candles (
                id BIGSERIAL PRIMARY KEY,
                ticker_id INTEGER NOT NULL,
                ts TIMESTAMPTZ NOT NULL,
                tick_count BIGINT NOT NULL,
                open NUMERIC NOT NULL,
                high NUMERIC NOT NULL,
                low NUMERIC NOT NULL,
                close NUMERIC NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("migrations applied");
        Ok(())
    }

    /// Create or update a registration row (administrative surface; the
    /// checker framework itself never writes registrations)
    pub async fn upsert_registration(
        &self,
        name: &str,
        active: bool,
    ) -> RepositoryResult<CheckerRegistration> {
        let row = sqlx::query(
            r#"
            INSERT INTO checker_types (name, active)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET active = EXCLUDED.active
            RETURNING id, name, active
            "#,
        )
        .bind(name)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;

        Ok(CheckerRegistration {
            id: row.get("id"),
            name: row.get("name"),
            active: row.get("active"),
        })
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    async fn registration(&self, name: &str) -> RepositoryResult<Option<CheckerRegistration>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, active
            FROM checker_types
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| CheckerRegistration {
            id: row.get("id"),
            name: row.get("name"),
            active: row.get("active"),
        }))
    }

    async fn candles_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Candle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, ticker_id, ts, tick_count, open, high, low, close
            FROM candles
            WHERE ts > $1 AND ts < $2
            ORDER BY ts ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        let candles: Vec<Candle> = rows
            .iter()
            .map(|row| Candle {
                id: row.get("id"),
                ticker_id: row.get("ticker_id"),
                ts: row.get("ts"),
                tick_count: row.get("tick_count"),
                open: row.get("open"),
                high: row.get("high"),
                low: row.get("low"),
                close: row.get("close"),
            })
            .collect();

        debug!("fetched {} candles", candles.len());
        Ok(candles)
    }

    async fn insert_check(&self, record: &CheckRecord) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO checks (checker_type_id, status, message, checked_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.checker_type_id)
        .bind(record.status.as_str())
        .bind(&record.message)
        .bind(record.checked_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
