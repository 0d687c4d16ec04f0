//! Checker lifecycle integration tests
//!
//! Exercises the full path a real invocation takes: parameter parsing,
//! registry resolution, runner binding, the activation gate, and outcome
//! persistence, against the in-memory store and notifier.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use data_checker::checker::{
    CheckParams, CheckRunner, CheckStatus, CheckerContext, CheckerError, RunDisposition,
};
use data_checker::checks;
use data_checker::config::Settings;
use data_checker::notify::MemoryNotifier;
use data_checker::schema::Candle;
use data_checker::storage::MemoryMetadataStore;

const CHECK_NAME: &str = "candle_tick_count";

fn candle(id: i64, ts: DateTime<Utc>, tick_count: i64) -> Candle {
    Candle::new(
        id,
        1,
        ts,
        tick_count,
        dec!(1.42),
        dec!(1.52),
        dec!(1.33),
        dec!(1.44),
    )
}

/// Candles inside the 2022-08-12 .. 2022-08-17 window, one per day
fn window_candles(tick_counts: &[i64]) -> Vec<Candle> {
    let base = Utc.with_ymd_and_hms(2022, 8, 12, 16, 0, 0).unwrap();
    tick_counts
        .iter()
        .enumerate()
        .map(|(i, &tick_count)| candle(i as i64 + 1, base + Duration::hours(i as i64), tick_count))
        .collect()
}

fn interval_params() -> CheckParams {
    CheckParams::parse(&[
        "from_date=2022-08-12T00:00:00Z".to_string(),
        "to_date=2022-08-17T00:00:00Z".to_string(),
    ])
    .unwrap()
}

async fn run_candle_check(
    store: Arc<MemoryMetadataStore>,
    notifier: Arc<MemoryNotifier>,
    params: &CheckParams,
) -> RunDisposition {
    let ctx = CheckerContext {
        store: store.clone(),
        notifier,
        settings: Settings::default_settings(),
    };

    let registry = checks::builtin_registry();
    let checker = registry.resolve(CHECK_NAME, &ctx).unwrap();
    let runner = CheckRunner::bind(store, checker.name()).await.unwrap();

    runner.run(checker.as_ref(), params).await.unwrap()
}

#[tokio::test]
async fn test_all_candles_above_threshold_records_ok() {
    let store = Arc::new(
        MemoryMetadataStore::new()
            .with_registration(CHECK_NAME, true)
            .with_candles(window_candles(&[1200, 1200, 1151, 1150, 1200])),
    );
    let notifier = Arc::new(MemoryNotifier::new());

    let disposition = run_candle_check(store.clone(), notifier.clone(), &interval_params()).await;

    match disposition {
        RunDisposition::Completed(outcome) => {
            assert_eq!(outcome.status, CheckStatus::Ok);
            assert!(outcome.message.is_empty());
        }
        RunDisposition::Skipped => panic!("active check must execute"),
    }

    let records = store.inserted_checks();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, CheckStatus::Ok);
    assert_eq!(records[0].message, "");
    assert_eq!(records[0].checker_type_id, 1);

    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_candles_below_threshold_record_ko_and_notify() {
    let store = Arc::new(
        MemoryMetadataStore::new()
            .with_registration(CHECK_NAME, true)
            .with_candles(window_candles(&[
                1200, 600, 900, 1200, 1149, 1200, 600, 1200,
            ])),
    );
    let notifier = Arc::new(MemoryNotifier::new());

    let disposition = run_candle_check(store.clone(), notifier.clone(), &interval_params()).await;

    match disposition {
        RunDisposition::Completed(outcome) => {
            assert_eq!(outcome.status, CheckStatus::Ko);
            assert_eq!(
                outcome.message,
                "There are Candles in DDBB created with few ticks"
            );
        }
        RunDisposition::Skipped => panic!("active check must execute"),
    }

    let records = store.inserted_checks();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, CheckStatus::Ko);
    assert_eq!(
        records[0].message,
        "There are Candles in DDBB created with few ticks"
    );

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0]
        .subject
        .starts_with("Data Used In Candles Below Thresholds"));
    assert!(sent[0].body.contains("Candles below 1150: 4"));
}

#[tokio::test]
async fn test_inactive_registration_executes_nothing() {
    let store = Arc::new(
        MemoryMetadataStore::new()
            .with_registration(CHECK_NAME, false)
            .with_candles(window_candles(&[600, 600, 600])),
    );
    let notifier = Arc::new(MemoryNotifier::new());

    let disposition = run_candle_check(store.clone(), notifier.clone(), &interval_params()).await;

    assert!(disposition.is_skipped());
    assert!(store.inserted_checks().is_empty());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_unregistered_check_fails_at_bind() {
    let store = Arc::new(MemoryMetadataStore::new());

    let err = CheckRunner::bind(store, CHECK_NAME).await.unwrap_err();
    assert!(matches!(err, CheckerError::Unregistered(name) if name == CHECK_NAME));
}

#[tokio::test]
async fn test_duplicate_candles_collapse_before_evaluation() {
    // Two rows share (ticker_id, ts); the low-tick duplicate is dropped, so
    // the check passes
    let ts = Utc.with_ymd_and_hms(2022, 8, 13, 16, 0, 0).unwrap();
    let store = Arc::new(
        MemoryMetadataStore::new()
            .with_registration(CHECK_NAME, true)
            .with_candles(vec![candle(1, ts, 1200), candle(2, ts, 600)]),
    );
    let notifier = Arc::new(MemoryNotifier::new());

    let disposition = run_candle_check(store.clone(), notifier.clone(), &interval_params()).await;

    match disposition {
        RunDisposition::Completed(outcome) => assert_eq!(outcome.status, CheckStatus::Ok),
        RunDisposition::Skipped => panic!("active check must execute"),
    }
    assert!(notifier.sent().is_empty());
}
