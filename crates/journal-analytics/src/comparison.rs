//! 현재 기간과 직전 기간 비교.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use journal_core::{DatedPnl, DecimalExt, Granularity};

use crate::aggregator::{aggregate, PeriodBucket};

/// 기간 비교 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub granularity: Granularity,
    /// 현재 기간 (윈도우의 마지막 버킷)
    pub current: PeriodBucket,
    /// 직전 기간
    pub previous: PeriodBucket,
    /// 현재 - 직전
    pub change: Decimal,
    /// 변화율 (%). 직전 합계가 0이거나 범위를 넘으면 `None`
    pub change_pct: Option<Decimal>,
}

impl PeriodComparison {
    /// 집계 결과에서 마지막 두 버킷을 비교합니다. 버킷이 2개 미만이면 `None`.
    pub fn from_buckets(granularity: Granularity, buckets: &[PeriodBucket]) -> Option<Self> {
        let [.., previous, current] = buckets else {
            return None;
        };

        let change = current.total_profit.saturating_sub(previous.total_profit);
        let change_pct = change.percent_of(previous.total_profit.abs());

        Some(Self {
            granularity,
            current: current.clone(),
            previous: previous.clone(),
            change,
            change_pct,
        })
    }

    /// 값이 개선되었는지 확인합니다.
    pub fn improved(&self) -> bool {
        self.change > Decimal::ZERO
    }
}

/// 거래를 집계한 뒤 현재/직전 기간을 비교합니다.
///
/// 모든 집계 단위의 윈도우는 버킷이 2개 이상이므로 실제로는 항상 `Some`입니다.
pub fn compare_periods<I>(
    trades: I,
    granularity: Granularity,
    today: NaiveDate,
) -> Option<PeriodComparison>
where
    I: IntoIterator,
    I::Item: DatedPnl,
{
    let buckets = aggregate(trades, granularity, today);
    PeriodComparison::from_buckets(granularity, &buckets)
}
