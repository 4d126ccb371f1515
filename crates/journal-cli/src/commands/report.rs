//! 통계와 성과 리포트 명령.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use journal_analytics::{DashboardStats, PerformanceReport, TimeFilter};
use journal_core::Trade;

/// 대시보드 통계.
pub fn build_stats(trades: &[Trade], filter: TimeFilter, today: NaiveDate) -> DashboardStats {
    let selected: Vec<Trade> = filter.apply(trades, today).into_iter().cloned().collect();
    DashboardStats::from_trades(&selected)
}

/// 초기 자본 대비 성과.
pub fn build_performance(
    trades: &[Trade],
    capital: Decimal,
    filter: TimeFilter,
    today: NaiveDate,
) -> Result<PerformanceReport> {
    match PerformanceReport::calculate(capital, trades, filter, today) {
        Some(report) => Ok(report),
        None => bail!("Initial capital must be positive, got {}", capital),
    }
}
