//! 거래 기간 필터.
//!
//! - `TimeFilter`: 대시보드/성과 계산기의 상대 기간 선택
//! - `window_filter`: 집계 윈도우(`[첫 버킷 시작, 오늘]`) 안의 거래만 선택 (원 차트 입력)

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use journal_core::{DatedPnl, Granularity};

use crate::aggregator::windows;

/// 상대 기간 필터.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    /// 전체 기간
    #[default]
    All,
    /// 오늘
    Today,
    /// 최근 7일
    LastWeek,
    /// 최근 1개월
    LastMonth,
    /// 최근 3개월
    #[serde(rename = "last_3months", alias = "last_3_months")]
    Last3Months,
}

impl TimeFilter {
    /// 백엔드 쿼리 값.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::All => "all",
            TimeFilter::Today => "today",
            TimeFilter::LastWeek => "last_week",
            TimeFilter::LastMonth => "last_month",
            TimeFilter::Last3Months => "last_3months",
        }
    }

    /// `today` 기준 포함 구간 `[start, end]`. 전체 기간은 `None`.
    ///
    /// 월 단위 차감은 월말로 맞춥니다 (3월 31일 - 1개월 = 2월 28/29일).
    pub fn range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let start = match self {
            TimeFilter::All => return None,
            TimeFilter::Today => today,
            TimeFilter::LastWeek => today
                .checked_sub_days(Days::new(7))
                .unwrap_or(NaiveDate::MIN),
            TimeFilter::LastMonth => today
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN),
            TimeFilter::Last3Months => today
                .checked_sub_months(Months::new(3))
                .unwrap_or(NaiveDate::MIN),
        };
        Some((start, today))
    }

    /// 날짜가 필터 구간에 포함되는지 확인합니다.
    ///
    /// 전체 기간 필터는 날짜가 없는 거래도 포함합니다.
    pub fn includes(&self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match (self.range(today), date) {
            (None, _) => true,
            (Some((start, end)), Some(d)) => start <= d && d <= end,
            (Some(_), None) => false,
        }
    }

    /// 필터를 적용한 거래 목록.
    pub fn apply<'a, T: DatedPnl>(&self, trades: &'a [T], today: NaiveDate) -> Vec<&'a T> {
        trades
            .iter()
            .filter(|t| self.includes(t.trade_date(), today))
            .collect()
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TimeFilter::All),
            "today" => Ok(TimeFilter::Today),
            "last_week" | "week" => Ok(TimeFilter::LastWeek),
            "last_month" | "month" => Ok(TimeFilter::LastMonth),
            "last_3months" | "last_3_months" => Ok(TimeFilter::Last3Months),
            _ => Err(format!("Invalid time filter: {}", s)),
        }
    }
}

/// 집계 윈도우 구간 `[첫 버킷 시작, today]`.
pub fn window_range(granularity: Granularity, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = windows(granularity, today)
        .first()
        .map(|w| w.start)
        .unwrap_or(today);
    (start, today)
}

/// 집계 윈도우 안의 거래만 선택합니다.
pub fn window_filter<'a, T: DatedPnl>(
    trades: &'a [T],
    granularity: Granularity,
    today: NaiveDate,
) -> Vec<&'a T> {
    let (start, end) = window_range(granularity, today);
    trades
        .iter()
        .filter(|t| matches!(t.trade_date(), Some(d) if start <= d && d <= end))
        .collect()
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
    fn test_ranges() {
        let today = date(2025, 3, 31);
        assert_eq!(TimeFilter::All.range(today), None);
        assert_eq!(TimeFilter::Today.range(today), Some((today, today)));
        assert_eq!(
            TimeFilter::LastWeek.range(today),
            Some((date(2025, 3, 24), today))
        );
        assert_eq!(
            TimeFilter::LastMonth.range(today),
            Some((date(2025, 2, 28), today))
        );
        assert_eq!(
            TimeFilter::Last3Months.range(today),
            Some((date(2024, 12, 31), today))
        );
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("last_3_months".parse::<TimeFilter>(), Ok(TimeFilter::Last3Months));
        assert_eq!("LAST_WEEK".parse::<TimeFilter>(), Ok(TimeFilter::LastWeek));
        assert!("yearly".parse::<TimeFilter>().is_err());

        assert_eq!(
            serde_json::to_string(&TimeFilter::Last3Months).unwrap(),
            "\"last_3months\""
        );
        let f: TimeFilter = serde_json::from_str("\"last_3_months\"").unwrap();
        assert_eq!(f, TimeFilter::Last3Months);
    }

    #[test]
    fn test_apply_excludes_undated_unless_all() {
        let today = date(2025, 6, 15);
        let trades = vec![
            Trade::new(Some(today), dec!(1)),
            Trade::new(None, dec!(2)),
            Trade::new(Some(date(2025, 6, 1)), dec!(3)),
        ];
        assert_eq!(TimeFilter::All.apply(&trades, today).len(), 3);
        assert_eq!(TimeFilter::Today.apply(&trades, today).len(), 1);
        assert_eq!(TimeFilter::LastMonth.apply(&trades, today).len(), 2);
    }

    #[test]
    fn test_window_filter_bounds() {
        let today = date(2025, 6, 15);
        let trades = vec![
            Trade::new(Some(date(2025, 5, 17)), dec!(1)), // 30일 윈도우 첫날
            Trade::new(Some(date(2025, 5, 16)), dec!(1)),
            Trade::new(Some(date(2025, 6, 16)), dec!(1)), // 미래
            Trade::new(None, dec!(1)),
        ];
        let picked = window_filter(&trades, Granularity::Days, today);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].trade_date, Some(date(2025, 5, 17)));

        assert_eq!(
            window_range(Granularity::Quarters, date(2025, 2, 15)).0,
            date(2023, 4, 1)
        );
    }
}
