//! 샘플 거래 파일로 CLI 파이프라인을 검증합니다.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use journal_analytics::TimeFilter;
use journal_cli::commands::analyze::{build_comparison, build_series, SeriesOptions};
use journal_cli::commands::report::{build_performance, build_stats};
use journal_cli::input::read_trades_file;
use journal_core::{Granularity, Trade};

fn demo_trades() -> Vec<Trade> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/trades.json");
    read_trades_file(&path, &chrono_tz::UTC).expect("demo trades")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

#[test]
fn test_monthly_series_from_demo_file() {
    let trades = demo_trades();
    assert_eq!(trades.len(), 10);
    assert_eq!(trades[9].trade_date, None);

    let series = build_series(
        &trades,
        SeriesOptions {
            granularity: Granularity::Months,
            sparse: false,
            pad_slots: 7,
        },
        today(),
    );

    assert_eq!(series.buckets.len(), 12);
    assert_eq!(series.buckets[0].period_key, "2024-07");

    let by_key = |key: &str| {
        series
            .buckets
            .iter()
            .find(|b| b.period_key == key)
            .map(|b| (b.trade_count, b.total_profit))
            .unwrap()
    };
    assert_eq!(by_key("2025-03"), (2, dec!(90)));
    assert_eq!(by_key("2025-04"), (2, dec!(750)));
    assert_eq!(by_key("2025-05"), (2, dec!(363.64)));
    assert_eq!(by_key("2025-06"), (3, dec!(1506)));
}

#[test]
fn test_sparse_series_has_one_slot_per_active_month() {
    let trades = demo_trades();
    let series = build_series(
        &trades,
        SeriesOptions {
            granularity: Granularity::Months,
            sparse: true,
            pad_slots: 7,
        },
        today(),
    );
    assert_eq!(series.slots.len(), 4);
    assert!(series.slots.iter().all(|s| !s.synthetic));
}

#[test]
fn test_reports_from_demo_file() {
    let trades = demo_trades();

    let stats = build_stats(&trades, TimeFilter::All, today());
    assert_eq!(stats.total_trades, 10);
    assert_eq!(stats.winning_trades, 5);
    assert_eq!(stats.losing_trades, 3);
    assert_eq!(stats.breakeven_trades, 2);

    let report = build_performance(&trades, dec!(10000), TimeFilter::LastMonth, today()).unwrap();
    assert_eq!(report.trade_count, 4);
    assert_eq!(report.total_profit_loss, dec!(1506));
    assert_eq!(report.performance_pct, dec!(15.06));

    let cmp = build_comparison(&trades, Granularity::Months, today()).unwrap();
    assert_eq!(cmp.current.period_key, "2025-06");
    assert_eq!(cmp.change, dec!(1142.36));
}
