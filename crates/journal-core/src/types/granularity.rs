//! 손익 집계 단위(Granularity) 정의.
//!
//! 집계 단위마다 윈도우 길이(버킷 수)가 고정되어 있습니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 손익 차트 집계 단위.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// 일별 (최근 30일)
    #[default]
    Days,
    /// 주별, 월요일 시작 (최근 12주)
    Weeks,
    /// 월별 (최근 12개월)
    Months,
    /// 분기별 (최근 8분기)
    Quarters,
}

impl Granularity {
    /// 모든 집계 단위.
    pub const ALL: [Granularity; 4] = [
        Granularity::Days,
        Granularity::Weeks,
        Granularity::Months,
        Granularity::Quarters,
    ];

    /// 윈도우를 구성하는 버킷 수.
    pub const fn window_len(&self) -> usize {
        match self {
            Granularity::Days => 30,
            Granularity::Weeks => 12,
            Granularity::Months => 12,
            Granularity::Quarters => 8,
        }
    }

    /// API 쿼리 및 설정에서 사용하는 문자열.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Granularity::Days => "days",
            Granularity::Weeks => "weeks",
            Granularity::Months => "months",
            Granularity::Quarters => "quarters",
        }
    }

    /// 표시 이름.
    pub fn display_name(&self) -> &'static str {
        match self {
            Granularity::Days => "일별",
            Granularity::Weeks => "주별",
            Granularity::Months => "월별",
            Granularity::Quarters => "분기별",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days" | "day" | "daily" => Ok(Granularity::Days),
            "weeks" | "week" | "weekly" => Ok(Granularity::Weeks),
            "months" | "month" | "monthly" => Ok(Granularity::Months),
            "quarters" | "quarter" | "quarterly" => Ok(Granularity::Quarters),
            _ => Err(format!("Invalid granularity: {}", s)),
        }
    }
}
