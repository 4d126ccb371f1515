//! 기간별 손익 집계 (TimeSeriesAggregator).
//!
//! 거래 목록을 달력 기준 기간 버킷으로 묶어, 빈 기간까지 0으로 채운
//! 오름차순 시계열을 만듭니다. 버킷 수는 집계 단위마다 고정입니다.
//!
//! # 윈도우
//!
//! - 일별: 오늘을 포함한 최근 30일
//! - 주별: 월요일 시작 7일 구간 12개 (마지막 구간은 이번 주 월요일 시작)
//! - 월별: 이번 달을 포함한 최근 12개월
//! - 분기별: 이번 분기를 포함한 최근 8분기 (연도 넘김 포함)
//!
//! 날짜 연산은 chrono의 표현 범위에서 포화되며 패닉하지 않습니다.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use journal_core::{DatedPnl, Granularity};

/// 단일 기간 구간.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// 기간 키 (`YYYY-MM-DD`, `YYYY-MM`, `YYYY-Qn`)
    pub key: String,
    /// 시작일 (포함)
    pub start: NaiveDate,
    /// 종료일 (포함)
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// 날짜가 구간에 포함되는지 확인합니다.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// 기간별 손익 버킷.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    /// 기간 키
    #[serde(rename = "period")]
    pub period_key: String,
    /// 시작일 (포함)
    pub start: NaiveDate,
    /// 종료일 (포함)
    pub end: NaiveDate,
    /// 기간 내 손익 합계
    pub total_profit: Decimal,
    /// 기간 내 거래 수
    pub trade_count: usize,
}

impl PeriodBucket {
    fn empty(window: PeriodWindow) -> Self {
        Self {
            period_key: window.key,
            start: window.start,
            end: window.end,
            total_profit: Decimal::ZERO,
            trade_count: 0,
        }
    }

    /// 날짜가 버킷 구간에 포함되는지 확인합니다.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// 일자별 손익 합계와 거래 수.
#[derive(Debug, Default)]
struct DailyTotals {
    days: BTreeMap<NaiveDate, (Decimal, usize)>,
    excluded: usize,
}

impl DailyTotals {
    fn from_trades<I>(trades: I) -> Self
    where
        I: IntoIterator,
        I::Item: DatedPnl,
    {
        let mut totals = Self::default();
        for trade in trades {
            match trade.trade_date() {
                Some(date) => {
                    let entry = totals.days.entry(date).or_insert((Decimal::ZERO, 0));
                    entry.0 = entry.0.saturating_add(trade.profit_loss());
                    entry.1 += 1;
                }
                None => totals.excluded += 1,
            }
        }
        totals
    }

    fn sum(&self, start: NaiveDate, end: NaiveDate) -> (Decimal, usize) {
        if start > end {
            return (Decimal::ZERO, 0);
        }
        self.days
            .range(start..=end)
            .fold((Decimal::ZERO, 0), |(sum, count), (_, (pnl, n))| {
                (sum.saturating_add(*pnl), count + *n)
            })
    }

    fn trade_count(&self) -> usize {
        self.days.values().map(|(_, n)| *n).sum()
    }
}

/// 집계 단위의 기간 구간 목록을 오름차순으로 반환합니다.
///
/// 길이는 항상 `granularity.window_len()`이며 마지막 구간은 `today`를 포함합니다.
pub fn windows(granularity: Granularity, today: NaiveDate) -> Vec<PeriodWindow> {
    let len = granularity.window_len() as i64;

    match granularity {
        Granularity::Days => (0..len)
            .rev()
            .map(|back| {
                let day = sub_days(today, back as u64);
                PeriodWindow {
                    key: day_key(day),
                    start: day,
                    end: day,
                }
            })
            .collect(),
        Granularity::Weeks => {
            let monday = sub_days(today, u64::from(today.weekday().num_days_from_monday()));
            (0..len)
                .rev()
                .map(|back| {
                    let start = sub_days(monday, 7 * back as u64);
                    PeriodWindow {
                        key: day_key(start),
                        start,
                        end: add_days(start, 6),
                    }
                })
                .collect()
        }
        Granularity::Months => {
            let current = month_index(today);
            (0..len)
                .rev()
                .map(|back| {
                    let index = clamp_month_index(current - back);
                    PeriodWindow {
                        key: month_key(index),
                        start: first_of_month(index),
                        end: last_of_month(index),
                    }
                })
                .collect()
        }
        Granularity::Quarters => {
            let current = month_index(today).div_euclid(3);
            (0..len)
                .rev()
                .map(|back| {
                    let quarter = current - back;
                    let first_month = clamp_month_index(quarter * 3);
                    let last_month = clamp_month_index(quarter * 3 + 2);
                    PeriodWindow {
                        key: quarter_key(quarter),
                        start: first_of_month(first_month),
                        end: last_of_month(last_month),
                    }
                })
                .collect()
        }
    }
}

/// 기준일(`today`)의 윈도우로 거래를 집계합니다.
///
/// 입력과 무관하게 항상 윈도우 길이만큼의 버킷을 반환합니다.
/// 날짜가 없는 거래와 윈도우 밖 거래는 어떤 버킷에도 들어가지 않습니다.
pub fn aggregate<I>(trades: I, granularity: Granularity, today: NaiveDate) -> Vec<PeriodBucket>
where
    I: IntoIterator,
    I::Item: DatedPnl,
{
    let totals = DailyTotals::from_trades(trades);

    let buckets: Vec<PeriodBucket> = windows(granularity, today)
        .into_iter()
        .map(|window| {
            let (total_profit, trade_count) = totals.sum(window.start, window.end);
            PeriodBucket {
                total_profit,
                trade_count,
                ..PeriodBucket::empty(window)
            }
        })
        .collect();

    debug!(
        granularity = %granularity,
        %today,
        trades = totals.trade_count(),
        excluded = totals.excluded,
        in_window = buckets.iter().map(|b| b.trade_count).sum::<usize>(),
        "aggregated trades into period buckets"
    );

    buckets
}

/// 시간대 기준 오늘 날짜로 집계합니다.
pub fn aggregate_today<I>(trades: I, granularity: Granularity, tz: &Tz) -> Vec<PeriodBucket>
where
    I: IntoIterator,
    I::Item: DatedPnl,
{
    aggregate(trades, granularity, today_in(tz))
}

/// 시간대 기준 오늘 날짜.
pub fn today_in(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// 집계 단위와 보고 시간대를 묶은 집계기.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesAggregator {
    granularity: Granularity,
    tz: Tz,
}

impl TimeSeriesAggregator {
    /// UTC 기준 집계기를 생성합니다.
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            tz: chrono_tz::UTC,
        }
    }

    /// 보고 시간대를 설정합니다.
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    /// 집계 단위.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// 보고 시간대.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// 주어진 기준일로 집계합니다.
    pub fn aggregate_at<I>(&self, trades: I, today: NaiveDate) -> Vec<PeriodBucket>
    where
        I: IntoIterator,
        I::Item: DatedPnl,
    {
        aggregate(trades, self.granularity, today)
    }

    /// 현재 날짜로 집계합니다.
    pub fn aggregate<I>(&self, trades: I) -> Vec<PeriodBucket>
    where
        I: IntoIterator,
        I::Item: DatedPnl,
    {
        aggregate(trades, self.granularity, today_in(&self.tz))
    }
}

fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `year * 12 + month0` 형태의 월 인덱스.
fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn clamp_month_index(index: i64) -> i64 {
    index.clamp(month_index(NaiveDate::MIN), month_index(NaiveDate::MAX))
}

fn first_of_month(index: i64) -> NaiveDate {
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_month(index: i64) -> NaiveDate {
    if index >= month_index(NaiveDate::MAX) {
        return NaiveDate::MAX;
    }
    first_of_month(index + 1)
        .pred_opt()
        .unwrap_or(NaiveDate::MIN)
}

fn month_key(index: i64) -> String {
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

fn quarter_key(quarter: i64) -> String {
    format!("{:04}-Q{}", quarter.div_euclid(4), quarter.rem_euclid(4) + 1)
}
