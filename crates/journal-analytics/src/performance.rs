//! 초기 자본 대비 성과 계산기.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use journal_core::{DatedPnl, DecimalExt};

use crate::filter::TimeFilter;

/// 성과 리포트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub initial_capital: Decimal,
    pub filter: TimeFilter,
    /// 기간 순손익
    pub total_profit_loss: Decimal,
    /// 초기 자본 + 순손익
    pub final_capital: Decimal,
    /// 순손익 / 초기 자본 × 100, 소수 둘째 자리. 범위를 넘으면 포화
    pub performance_pct: Decimal,
    /// 수익 거래 합계
    pub total_profit: Decimal,
    /// 손실 거래 합계 (음수)
    pub total_loss: Decimal,
    pub profitable_trades: usize,
    pub loss_trades: usize,
    /// 필터 적용 후 거래 수
    pub trade_count: usize,
}

impl PerformanceReport {
    /// 필터 구간 거래로 성과를 계산합니다.
    ///
    /// 초기 자본이 0 이하이면 `None`.
    pub fn calculate<T: DatedPnl>(
        initial_capital: Decimal,
        trades: &[T],
        filter: TimeFilter,
        today: NaiveDate,
    ) -> Option<Self> {
        if initial_capital <= Decimal::ZERO {
            return None;
        }

        let selected = filter.apply(trades, today);

        let mut total_profit = Decimal::ZERO;
        let mut total_loss = Decimal::ZERO;
        let mut profitable_trades = 0;
        let mut loss_trades = 0;
        for trade in &selected {
            let pnl = trade.profit_loss();
            if pnl > Decimal::ZERO {
                total_profit = total_profit.saturating_add(pnl);
                profitable_trades += 1;
            } else if pnl < Decimal::ZERO {
                total_loss = total_loss.saturating_add(pnl);
                loss_trades += 1;
            }
        }

        let total_profit_loss = total_profit.saturating_add(total_loss);
        // 범위를 넘는 수익률은 부호 방향으로 포화
        let performance_pct = total_profit_loss
            .percent_of(initial_capital)
            .unwrap_or(if total_profit_loss.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            });

        debug!(
            %filter,
            trades = selected.len(),
            %total_profit_loss,
            "performance calculated"
        );

        Some(Self {
            initial_capital,
            filter,
            total_profit_loss,
            final_capital: initial_capital.saturating_add(total_profit_loss),
            performance_pct,
            total_profit,
            total_loss,
            profitable_trades,
            loss_trades,
            trade_count: selected.len(),
        })
    }

    /// 자본이 늘었는지 확인합니다.
    pub fn is_gain(&self) -> bool {
        self.final_capital >= self.initial_capital
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::Trade;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_non_positive_capital() {
        let trades: Vec<Trade> = vec![];
        let today = date(2025, 6, 15);
        assert!(PerformanceReport::calculate(dec!(0), &trades, TimeFilter::All, today).is_none());
        assert!(PerformanceReport::calculate(dec!(-5), &trades, TimeFilter::All, today).is_none());
    }

    #[test]
    fn test_report_values() {
        let today = date(2025, 6, 15);
        let trades = vec![
            Trade::new(Some(date(2025, 6, 14)), dec!(300)),
            Trade::new(Some(date(2025, 6, 10)), dec!(-120.5)),
            Trade::new(Some(date(2025, 6, 9)), dec!(0)),
            Trade::new(Some(date(2025, 1, 1)), dec!(1000)),
        ];

        let report =
            PerformanceReport::calculate(dec!(10000), &trades, TimeFilter::LastWeek, today).unwrap();
        assert_eq!(report.trade_count, 3);
        assert_eq!(report.total_profit, dec!(300));
        assert_eq!(report.total_loss, dec!(-120.5));
        assert_eq!(report.total_profit_loss, dec!(179.5));
        assert_eq!(report.final_capital, dec!(10179.5));
        assert_eq!(report.performance_pct, dec!(1.80));
        assert_eq!(report.profitable_trades, 1);
        assert_eq!(report.loss_trades, 1);
        assert!(report.is_gain());

        let all = PerformanceReport::calculate(dec!(1000), &trades, TimeFilter::All, today).unwrap();
        assert_eq!(all.performance_pct, dec!(117.95));
    }

    #[test]
    fn test_tiny_capital_saturates_percentage() {
        let today = date(2025, 6, 15);
        let tiny = Decimal::new(1, 28);

        let gain = vec![Trade::new(Some(date(2025, 6, 14)), dec!(1000000))];
        let report = PerformanceReport::calculate(tiny, &gain, TimeFilter::All, today).unwrap();
        assert_eq!(report.performance_pct, Decimal::MAX);
        assert_eq!(report.final_capital, dec!(1000000) + tiny);

        let loss = vec![Trade::new(Some(date(2025, 6, 14)), dec!(-1000000))];
        let report = PerformanceReport::calculate(tiny, &loss, TimeFilter::All, today).unwrap();
        assert_eq!(report.performance_pct, Decimal::MIN);
    }

    #[test]
    fn test_overflowing_totals_saturate() {
        let today = date(2025, 6, 15);
        let trades = vec![
            Trade::new(Some(date(2025, 6, 14)), Decimal::MAX),
            Trade::new(Some(date(2025, 6, 13)), Decimal::MAX),
        ];
        let report = PerformanceReport::calculate(dec!(1), &trades, TimeFilter::All, today).unwrap();
        assert_eq!(report.total_profit, Decimal::MAX);
        assert_eq!(report.final_capital, Decimal::MAX);
        assert_eq!(report.performance_pct, Decimal::MAX);
    }
}
