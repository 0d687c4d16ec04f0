//! In-memory metadata store for testing and development

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

use crate::schema::{Candle, CheckRecord, CheckerRegistration};
use crate::storage::{MetadataStore, RepositoryResult};

/// In-memory store with seedable registrations and candles.
///
/// Inserted check records are kept so tests can assert on the audit trail.
#[derive(Default)]
pub struct MemoryMetadataStore {
    registrations: Mutex<Vec<CheckerRegistration>>,
    candles: Mutex<Vec<Candle>>,
    checks: Mutex<Vec<CheckRecord>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registration row; ids are assigned sequentially from 1
    pub fn with_registration(self, name: &str, active: bool) -> Self {
        {
            let mut registrations = self.registrations.lock().unwrap();
            let id = registrations.len() as i32 + 1;
            registrations.push(CheckerRegistration {
                id,
                name: name.to_string(),
                active,
            });
        }
        self
    }

    /// Seed candle rows
    pub fn with_candles(self, candles: Vec<Candle>) -> Self {
        self.candles.lock().unwrap().extend(candles);
        self
    }

    /// All check records inserted so far, in insertion order
    pub fn inserted_checks(&self) -> Vec<CheckRecord> {
        self.checks.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn registration(&self, name: &str) -> RepositoryResult<Option<CheckerRegistration>> {
        let registrations = self.registrations.lock().unwrap();
        Ok(registrations.iter().find(|r| r.name == name).cloned())
    }

    async fn candles_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Candle>> {
        let mut candles: Vec<Candle> = self
            .candles
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.ts > from && c.ts < to)
            .cloned()
            .collect();
        candles.sort_by_key(|c| c.ts);
        Ok(candles)
    }

    async fn insert_check(&self, record: &CheckRecord) -> RepositoryResult<()> {
        self.checks.lock().unwrap().push(record.clone());
        Ok(())
    }
}
