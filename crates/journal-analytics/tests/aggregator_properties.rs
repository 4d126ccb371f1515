//! 집계기 불변식 속성 테스트

use chrono::{Datelike, NaiveDate, Weekday};
use journal_analytics::aggregate;
use journal_core::{Granularity, Trade};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn arb_granularity() -> impl Strategy<Value = Granularity> {
    prop_oneof![
        Just(Granularity::Days),
        Just(Granularity::Weeks),
        Just(Granularity::Months),
        Just(Granularity::Quarters),
    ]
}

/// 2000-01-01 ~ 2040-12-31 사이 날짜
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..14975).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

/// 센트 단위 손익
fn arb_pnl() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_trades() -> impl Strategy<Value = Vec<Trade>> {
    prop::collection::vec(
        (prop::option::weighted(0.9, arb_date()), arb_pnl())
            .prop_map(|(date, pnl)| Trade::new(date, pnl)),
        0..60,
    )
}

proptest! {
    #[test]
    fn prop_length_is_fixed(
        trades in arb_trades(),
        granularity in arb_granularity(),
        today in arb_date(),
    ) {
        let buckets = aggregate(&trades, granularity, today);
        prop_assert_eq!(buckets.len(), granularity.window_len());
    }

    #[test]
    fn prop_keys_strictly_increasing_and_last_contains_today(
        granularity in arb_granularity(),
        today in arb_date(),
    ) {
        let buckets = aggregate(Vec::<Trade>::new(), granularity, today);
        for pair in buckets.windows(2) {
            prop_assert!(pair[0].period_key < pair[1].period_key);
            prop_assert!(pair[0].end < pair[1].start);
        }
        prop_assert!(buckets.last().unwrap().contains(today));
        prop_assert!(buckets.iter().all(|b| b.total_profit.is_zero() && b.trade_count == 0));
    }

    #[test]
    fn prop_sum_conserved_inside_window(
        trades in arb_trades(),
        granularity in arb_granularity(),
        today in arb_date(),
    ) {
        let buckets = aggregate(&trades, granularity, today);
        let start = buckets.first().unwrap().start;
        let end = buckets.last().unwrap().end;

        let expected: Decimal = trades
            .iter()
            .filter(|t| matches!(t.trade_date, Some(d) if start <= d && d <= end))
            .map(|t| t.profit_loss)
            .sum();
        let actual: Decimal = buckets.iter().map(|b| b.total_profit).sum();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_weekly_buckets_start_on_monday(today in arb_date()) {
        let buckets = aggregate(Vec::<Trade>::new(), Granularity::Weeks, today);
        for bucket in &buckets {
            prop_assert_eq!(bucket.start.weekday(), Weekday::Mon);
            prop_assert_eq!((bucket.end - bucket.start).num_days(), 6);
        }
    }

    #[test]
    fn prop_buckets_are_contiguous(
        granularity in arb_granularity(),
        today in arb_date(),
    ) {
        let buckets = aggregate(Vec::<Trade>::new(), granularity, today);
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].end.succ_opt().unwrap(), pair[1].start);
        }
    }
}
