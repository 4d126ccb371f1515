//! 단일 데이터 포인트 패딩.
//!
//! 점이 하나뿐인 시계열은 막대 하나가 차트 전체를 차지하므로,
//! 값 0의 합성 슬롯으로 좌우를 채워 대칭 윈도우로 만듭니다.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use journal_core::parse_trade_date;

use crate::aggregator::PeriodBucket;

/// 기본 패딩 슬롯 수.
pub const DEFAULT_PAD_SLOTS: usize = 7;

/// 차트 입력 슬롯.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlot {
    /// X축 레이블 (원문 기간 키)
    pub label: String,
    /// 값
    pub value: Decimal,
    /// 패딩으로 추가된 슬롯 여부
    pub synthetic: bool,
}

impl ChartSlot {
    /// 실제 데이터 슬롯을 생성합니다.
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
            synthetic: false,
        }
    }

    fn placeholder(label: String) -> Self {
        Self {
            label,
            value: Decimal::ZERO,
            synthetic: true,
        }
    }
}

impl From<&PeriodBucket> for ChartSlot {
    fn from(bucket: &PeriodBucket) -> Self {
        ChartSlot::new(bucket.period_key.clone(), bucket.total_profit)
    }
}

/// 버킷 목록을 차트 슬롯으로 변환합니다.
pub fn slots_from_buckets(buckets: &[PeriodBucket]) -> Vec<ChartSlot> {
    buckets.iter().map(ChartSlot::from).collect()
}

/// 기본 슬롯 수(7)로 단일 포인트를 패딩합니다.
pub fn pad_single_point(series: &[ChartSlot]) -> Vec<ChartSlot> {
    pad_single_point_with(series, DEFAULT_PAD_SLOTS)
}

/// 점이 정확히 하나인 시계열을 `slots`개 슬롯으로 패딩합니다.
///
/// 실제 점은 `slots / 2` 위치에 놓입니다. 레이블이 날짜로 해석되면 합성 슬롯에
/// 일 단위 오프셋 날짜를 붙이고, 아니면 빈 레이블을 붙입니다.
/// 길이가 1이 아닌 시계열은 그대로 반환합니다.
pub fn pad_single_point_with(series: &[ChartSlot], slots: usize) -> Vec<ChartSlot> {
    let [point] = series else {
        return series.to_vec();
    };

    let slots = slots.max(1);
    let center = slots / 2;
    let base = label_date(&point.label);

    (0..slots)
        .map(|i| {
            if i == center {
                return ChartSlot {
                    synthetic: false,
                    ..point.clone()
                };
            }
            let label = base
                .and_then(|d| offset_date(d, i as i64 - center as i64))
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            ChartSlot::placeholder(label)
        })
        .collect()
}

/// 레이블을 날짜로 해석합니다. `YYYY-MM`은 해당 월 1일입니다.
fn label_date(label: &str) -> Option<NaiveDate> {
    parse_trade_date(label, &chrono_tz::UTC)
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", label.trim()), "%Y-%m-%d").ok())
}

fn offset_date(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    if offset >= 0 {
        date.checked_add_days(Days::new(offset as u64))
    } else {
        date.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}
