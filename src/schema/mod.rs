//! Metadata and domain record types
//!
//! `CheckerRegistration` and `CheckRecord` are owned by the checker framework.
//! `Candle` is owned by the upstream data producer; checks read it and never
//! write it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::checker::CheckStatus;

/// Administrative registration of a check type.
///
/// Exactly one row exists per check name. The row must exist before the check
/// can run; the framework never creates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerRegistration {
    /// Store-assigned identifier
    pub id: i32,
    /// Unique name, matching a registered check's declared name
    pub name: String,
    /// Activation gate; inactive checks never execute
    pub active: bool,
}

/// Persisted outcome of one executed check run.
///
/// Stamped by the framework with the registration id and the persistence
/// time; append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRecord {
    /// Registration this run belongs to
    pub checker_type_id: i32,
    /// OK/KO outcome
    pub status: CheckStatus,
    /// Diagnostic message, empty when OK
    pub message: String,
    /// UTC time the outcome was recorded
    pub checked_at: DateTime<Utc>,
}

/// A stored candle bar.
///
/// `tick_count` is the number of ticks the bar was built from; the price
/// payload is carried along but not evaluated by the shipped check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Store-assigned identifier
    pub id: i64,
    /// Instrument the bar belongs to
    pub ticker_id: i32,
    /// Bar timestamp (start of the period)
    pub ts: DateTime<Utc>,
    /// Number of ticks used to build the bar
    pub tick_count: i64,
    /// Open price
    pub open: Decimal,
    /// High price
    pub high: Decimal,
    /// Low price
    pub low: Decimal,
    /// Close price
    pub close: Decimal,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        id: i64,
        ticker_id: i32,
        ts: DateTime<Utc>,
        tick_count: i64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> Self {
        Self {
            id,
            ticker_id,
            ts,
            tick_count,
            open,
            high,
            low,
            close,
        }
    }
}
