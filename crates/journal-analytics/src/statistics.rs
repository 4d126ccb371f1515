//! 대시보드 거래 통계.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use journal_core::{DatedPnl, DecimalExt, MarketType, Trade};

/// 시장별 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBreakdown {
    /// 시장 (태그 없는 거래는 `None`)
    pub market: Option<MarketType>,
    pub count: usize,
    pub profit_loss: Decimal,
}

/// 대시보드 통계.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// 전체 거래 수
    pub total_trades: usize,
    /// 순손익
    pub total_profit_loss: Decimal,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    /// 승률 (%) = 수익 거래 / 전체 거래 × 100, 소수 둘째 자리
    pub win_rate: Decimal,
    /// 총수익 (양수)
    pub gross_profit: Decimal,
    /// 총손실 (절댓값, 양수)
    pub gross_loss: Decimal,
    pub average_win: Decimal,
    /// 평균 손실 (음수)
    pub average_loss: Decimal,
    pub largest_win: Decimal,
    /// 최대 손실 (음수)
    pub largest_loss: Decimal,
    /// 총수익 / 총손실. 손실이 없으면 `None`
    pub profit_factor: Option<Decimal>,
    pub trades_by_market: Vec<MarketBreakdown>,
}

impl DashboardStats {
    /// 거래 목록에서 통계를 계산합니다.
    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut stats = Self::from_pnl(trades);

        let mut markets: BTreeMap<Option<MarketType>, (usize, Decimal)> = BTreeMap::new();
        for trade in trades {
            let entry = markets
                .entry(trade.market_type.clone())
                .or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(trade.profit_loss);
        }
        stats.trades_by_market = markets
            .into_iter()
            .map(|(market, (count, profit_loss))| MarketBreakdown {
                market,
                count,
                profit_loss,
            })
            .collect();

        stats
    }

    /// 손익만으로 통계를 계산합니다. 시장 구분은 비어 있습니다.
    pub fn from_pnl<T: DatedPnl>(trades: &[T]) -> Self {
        let mut winning = 0usize;
        let mut losing = 0usize;
        let mut gross_profit = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;
        let mut largest_win = Decimal::ZERO;
        let mut largest_loss = Decimal::ZERO;

        for trade in trades {
            let pnl = trade.profit_loss();
            if pnl > Decimal::ZERO {
                winning += 1;
                gross_profit = gross_profit.saturating_add(pnl);
                largest_win = largest_win.max(pnl);
            } else if pnl < Decimal::ZERO {
                losing += 1;
                gross_loss = gross_loss.saturating_add(pnl.abs());
                largest_loss = largest_loss.min(pnl);
            }
        }

        let total = trades.len();
        let win_rate = if total > 0 {
            Decimal::from(winning)
                .percent_of(Decimal::from(total))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        let average_win = if winning > 0 {
            gross_profit / Decimal::from(winning)
        } else {
            Decimal::ZERO
        };
        let average_loss = if losing > 0 {
            -(gross_loss / Decimal::from(losing))
        } else {
            Decimal::ZERO
        };

        let profit_factor = if gross_loss > Decimal::ZERO {
            Some(gross_profit.checked_div(gross_loss).unwrap_or(Decimal::MAX))
        } else {
            None
        };

        Self {
            total_trades: total,
            total_profit_loss: gross_profit.saturating_sub(gross_loss),
            winning_trades: winning,
            losing_trades: losing,
            breakeven_trades: total - winning - losing,
            win_rate,
            gross_profit,
            gross_loss,
            average_win,
            average_loss,
            largest_win,
            largest_loss,
            profit_factor,
            trades_by_market: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn trade(pnl: Decimal, market: MarketType) -> Trade {
        Trade::new(NaiveDate::from_ymd_opt(2025, 6, 1), pnl).with_market(market)
    }

    #[test]
    fn test_stats_basic() {
        let trades = vec![
            trade(dec!(100), MarketType::Forex),
            trade(dec!(50), MarketType::Forex),
            trade(dec!(-30), MarketType::Indian),
            trade(dec!(0), MarketType::Indian),
        ];
        let stats = DashboardStats::from_trades(&trades);

        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.total_profit_loss, dec!(120));
        assert_eq!(stats.winning_trades, 2);
        assert_eq!(stats.losing_trades, 1);
        assert_eq!(stats.breakeven_trades, 1);
        assert_eq!(stats.win_rate, dec!(50));
        assert_eq!(stats.gross_profit, dec!(150));
        assert_eq!(stats.gross_loss, dec!(30));
        assert_eq!(stats.average_win, dec!(75));
        assert_eq!(stats.average_loss, dec!(-30));
        assert_eq!(stats.largest_win, dec!(100));
        assert_eq!(stats.largest_loss, dec!(-30));
        assert_eq!(stats.profit_factor, Some(dec!(5)));

        assert_eq!(stats.trades_by_market.len(), 2);
        let forex = &stats.trades_by_market[0];
        assert_eq!(forex.market, Some(MarketType::Forex));
        assert_eq!(forex.count, 2);
        assert_eq!(forex.profit_loss, dec!(150));
    }

    #[test]
    fn test_stats_empty_and_no_losses() {
        let empty = DashboardStats::from_trades(&[]);
        assert_eq!(empty.total_trades, 0);
        assert_eq!(empty.win_rate, Decimal::ZERO);
        assert_eq!(empty.profit_factor, None);

        let wins = DashboardStats::from_trades(&[trade(dec!(10), MarketType::Forex)]);
        assert_eq!(wins.win_rate, dec!(100));
        assert_eq!(wins.profit_factor, None);
    }

    #[test]
    fn test_overflowing_totals_saturate() {
        let trades = vec![
            trade(Decimal::MAX, MarketType::Forex),
            trade(Decimal::MAX, MarketType::Forex),
            trade(Decimal::MIN, MarketType::Indian),
        ];
        let stats = DashboardStats::from_trades(&trades);

        assert_eq!(stats.gross_profit, Decimal::MAX);
        assert_eq!(stats.gross_loss, Decimal::MAX);
        assert_eq!(stats.total_profit_loss, Decimal::ZERO);
        assert_eq!(stats.profit_factor, Some(Decimal::ONE));
        assert_eq!(stats.trades_by_market[0].profit_loss, Decimal::MAX);
        assert_eq!(stats.trades_by_market[1].profit_loss, Decimal::MIN);
    }

    #[test]
    fn test_tiny_loss_profit_factor_saturates() {
        let trades = vec![
            trade(dec!(1000000), MarketType::Forex),
            trade(Decimal::new(-1, 28), MarketType::Forex),
        ];
        let stats = DashboardStats::from_pnl(&trades);
        assert_eq!(stats.profit_factor, Some(Decimal::MAX));
    }

    #[test]
    fn test_win_rate_rounding() {
        let trades = vec![
            trade(dec!(1), MarketType::Forex),
            trade(dec!(-1), MarketType::Forex),
            trade(dec!(-1), MarketType::Forex),
        ];
        assert_eq!(DashboardStats::from_trades(&trades).win_rate, dec!(33.33));
    }
}
