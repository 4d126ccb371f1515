//! 대시보드 흐름 통합 테스트
//!
//! 백엔드 응답 → 거래 정규화 → 집계 → 패딩 → 차트 지오메트리

use chrono::NaiveDate;
use journal_analytics::{
    aggregate, bar_chart, compare_periods, line_chart, pad_single_point, pie_chart,
    slots_from_buckets, window_filter, ChartArea, ChartSlot, DashboardStats, PerformanceReport,
    TimeFilter,
};
use journal_core::{normalize_records, Granularity, MarketType, Trade, TradeRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn forex_trades() -> Vec<Trade> {
    let body = r#"[
        {"market_type": "FOREX", "profit_loss": "50", "trade_date": "2025-06-14T09:00:00.000Z"},
        {"market_type": "FOREX", "profit_loss": -20, "trade_date": "2025-06-14"},
        {"market_type": "FOREX", "profit_loss": 1000, "trade_date": "2025-05-06"},
        {"market_type": "FOREX", "profit_loss": "bad", "trade_date": "2025-06-15"},
        {"market_type": "INDIAN", "profit_loss": 75, "trade_date": "2025-06-13"}
    ]"#;
    let records: Vec<TradeRecord> = serde_json::from_str(body).unwrap();
    normalize_records(records, &chrono_tz::UTC)
        .into_iter()
        .filter(|t| t.is_market(&MarketType::Forex))
        .collect()
}

#[test]
fn test_daily_series_from_backend_payload() {
    let today = date(2025, 6, 15);
    let buckets = aggregate(&forex_trades(), Granularity::Days, today);

    assert_eq!(buckets.len(), 30);
    let yesterday = buckets
        .iter()
        .find(|b| b.period_key == "2025-06-14")
        .unwrap();
    assert_eq!(yesterday.total_profit, dec!(30));

    let rest: Decimal = buckets
        .iter()
        .filter(|b| b.period_key != "2025-06-14")
        .map(|b| b.total_profit)
        .sum();
    assert_eq!(rest, Decimal::ZERO);
}

#[test]
fn test_single_quarter_padded_bar_chart() {
    // 분기 레이블은 날짜가 아니므로 합성 슬롯 레이블은 비어 있다
    let series = vec![ChartSlot::new("2025-Q2", dec!(250))];
    let padded = pad_single_point(&series);
    let chart = bar_chart(&padded, &ChartArea::for_bars(800.0, 300.0)).unwrap();

    assert_eq!(chart.bars.len(), 7);
    assert_eq!(chart.bars.iter().filter(|b| b.synthetic).count(), 6);
    let labels: Vec<&str> = chart.labels.iter().map(|l| l.text.as_str()).collect();
    assert!(labels.contains(&"Q2 2025"));
    assert_eq!(labels.iter().filter(|l| l.is_empty()).count(), 6);
}

#[test]
fn test_monthly_line_chart_and_comparison() {
    let today = date(2025, 6, 15);
    let trades = forex_trades();

    let buckets = aggregate(&trades, Granularity::Months, today);
    let slots = slots_from_buckets(&buckets);
    let chart = line_chart(&slots, &ChartArea::new(800.0, 300.0)).unwrap();
    assert_eq!(chart.markers.len(), 12);
    assert_eq!(chart.polyline.len(), 12);

    let cmp = compare_periods(&trades, Granularity::Months, today).unwrap();
    assert_eq!(cmp.current.total_profit, dec!(30));
    assert_eq!(cmp.previous.total_profit, dec!(1000));
    assert_eq!(cmp.change, dec!(-970));
    assert_eq!(cmp.change_pct, Some(dec!(-97)));
}

#[test]
fn test_pie_uses_window_filtered_trades() {
    let today = date(2025, 6, 15);
    let trades = forex_trades();

    // 30일 윈도우: 1000 거래(40일 전) 제외, 손익 0 거래는 원 차트에서 무시
    let in_window = window_filter(&trades, Granularity::Days, today);
    assert_eq!(in_window.len(), 3);

    let pie = pie_chart(in_window, 600.0, 300.0).unwrap();
    assert_eq!(pie.slices[0].count, 1);
    assert_eq!(pie.slices[1].count, 1);
    assert_eq!(pie.legend[0].text, "Winning: 1 (50.0%)");
}

#[test]
fn test_stats_and_performance() {
    let today = date(2025, 6, 15);
    let trades = forex_trades();

    let stats = DashboardStats::from_trades(&trades);
    assert_eq!(stats.total_trades, 4);
    assert_eq!(stats.total_profit_loss, dec!(1030));
    assert_eq!(stats.win_rate, dec!(50));

    let report =
        PerformanceReport::calculate(dec!(5000), &trades, TimeFilter::LastMonth, today).unwrap();
    assert_eq!(report.trade_count, 3);
    assert_eq!(report.total_profit_loss, dec!(30));
    assert_eq!(report.final_capital, dec!(5030));
    assert_eq!(report.performance_pct, dec!(0.60));
}
