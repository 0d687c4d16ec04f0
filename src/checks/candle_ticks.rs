//! Candle tick-count check
//!
//! Verifies that candles in a time interval were built from at least a
//! minimum number of ticks. A candle whose tick count falls strictly below
//! any configured threshold is a violation; any violation fails the check and
//! pushes a per-threshold summary to the notification channel.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::checker::{
    CheckOutcome, CheckParams, Checker, CheckerContext, CheckerError,
};
use crate::config::CandleTickCountSettings;
use crate::notify::{Notification, NotificationChannel};
use crate::schema::Candle;
use crate::storage::MetadataStore;

/// Declared name; the metadata store registration must use the same string
pub const CHECK_NAME: &str = "candle_tick_count";

const KO_MESSAGE: &str = "There are Candles in DDBB created with few ticks";
const SUBJECT: &str = "Data Used In Candles Below Thresholds";
const BODY_PREAMBLE: &str = "If you get this message is because there is something wrong. \
There are Candles in DDBB created with few ticks. Summary:\n";

/// Checks that candles were built from enough ticks
pub struct CandleTickCountCheck {
    store: Arc<dyn MetadataStore>,
    notifier: Arc<dyn NotificationChannel>,
    settings: CandleTickCountSettings,
    sender: String,
    recipients: Vec<String>,
}

impl std::fmt::Debug for CandleTickCountCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleTickCountCheck")
            .field("settings", &self.settings)
            .field("sender", &self.sender)
            .field("recipients", &self.recipients)
            .finish_non_exhaustive()
    }
}

impl CandleTickCountCheck {
    pub fn new(ctx: &CheckerContext) -> Self {
        Self {
            store: ctx.store.clone(),
            notifier: ctx.notifier.clone(),
            settings: ctx.settings.checks.candle_tick_count.clone(),
            sender: ctx.settings.notification.from.clone(),
            recipients: ctx.settings.notification.recipients.clone(),
        }
    }

    /// Registry factory
    pub fn factory(ctx: &CheckerContext) -> Box<dyn Checker> {
        Box::new(Self::new(ctx))
    }

    /// Resolve the check interval from parameters.
    ///
    /// Both bounds must be supplied together or not at all; when absent the
    /// default trailing window applies.
    fn resolve_interval(
        &self,
        params: &CheckParams,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), CheckerError> {
        let from = interval_bound(params, "from_date")?;
        let to = interval_bound(params, "to_date")?;

        match (from, to) {
            (Some(from), Some(to)) => Ok((from, to)),
            (None, None) => {
                let now = Utc::now();
                Ok((
                    now - Duration::days(self.settings.default_lookback_days),
                    now - Duration::days(self.settings.default_lag_days),
                ))
            }
            _ => Err(CheckerError::IncompleteInterval),
        }
    }

    async fn notify(&self, summary: &BTreeMap<i64, usize>) {
        let today = Utc::now().format("%d-%m-%Y");
        let lines: Vec<String> = summary
            .iter()
            .map(|(threshold, count)| format!("Candles below {}: {}", threshold, count))
            .collect();

        let notification = Notification {
            from: self.sender.clone(),
            to: self.recipients.clone(),
            subject: format!("{} {}", SUBJECT, today),
            body: format!("{}{}", BODY_PREAMBLE, lines.join("\n")),
        };

        // Best-effort delivery; a failed send does not change the outcome
        if let Err(err) = self.notifier.send(&notification).await {
            warn!(error = %err, "notification delivery failed");
        } else {
            debug!(recipients = ?notification.to, "notification sent");
        }
    }
}

#[async_trait]
impl Checker for CandleTickCountCheck {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    async fn execute(&self, params: &CheckParams) -> Result<CheckOutcome, CheckerError> {
        let (from, to) = self.resolve_interval(params)?;
        debug!(%from, %to, "resolved check interval");

        let candles = dedup_candles(self.store.candles_between(from, to).await?);
        debug!(count = candles.len(), "candles retrieved");

        let summary = violation_summary(&candles, &self.settings.thresholds);

        if summary.values().any(|&count| count > 0) {
            self.notify(&summary).await;
            return Ok(CheckOutcome::ko(KO_MESSAGE));
        }

        Ok(CheckOutcome::ok())
    }
}

/// Read one interval bound from the parameters.
///
/// Dates are RFC 3339 (`2022-08-12T00:00:00Z`).
fn interval_bound(
    params: &CheckParams,
    key: &str,
) -> Result<Option<DateTime<Utc>>, CheckerError> {
    let Some(value) = params.get(key) else {
        return Ok(None);
    };

    let raw = value.to_string();
    let parsed = DateTime::parse_from_rfc3339(&raw)
        .map_err(|source| CheckerError::InvalidDate { value: raw, source })?;

    Ok(Some(parsed.with_timezone(&Utc)))
}

/// Collapse candles sharing (ticker_id, ts) to one representative, keeping
/// the first seen, ordered by timestamp ascending
fn dedup_candles(mut candles: Vec<Candle>) -> Vec<Candle> {
    let mut seen: HashSet<(i32, DateTime<Utc>)> = HashSet::new();
    candles.retain(|c| seen.insert((c.ticker_id, c.ts)));
    candles.sort_by_key(|c| c.ts);
    candles
}

/// Count candles strictly below each threshold.
///
/// A tick count equal to a threshold is not a violation.
fn violation_summary(candles: &[Candle], thresholds: &[i64]) -> BTreeMap<i64, usize> {
    thresholds
        .iter()
        .map(|&threshold| {
            let count = candles
                .iter()
                .filter(|c| c.tick_count < threshold)
                .count();
            (threshold, count)
        })
        .collect()
}
