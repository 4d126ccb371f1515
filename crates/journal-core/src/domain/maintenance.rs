//! 시스템 점검 일정.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::types::{deserialize_optional_string, parse_trade_date};

/// 점검 일정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceWindow {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub id: Option<String>,
    /// 점검일 (원문)
    pub maintenance_date: String,
    /// 시작 시각 (`HH:MM[:SS]`)
    #[serde(alias = "from_time")]
    pub start_time: String,
    /// 종료 시각 (`HH:MM[:SS]`)
    #[serde(alias = "to_time")]
    pub end_time: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl MaintenanceWindow {
    /// 점검일.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_trade_date(&self.maintenance_date, &chrono_tz::UTC)
    }

    /// `Jun 15, 2025` 형식의 점검일. 파싱 불가 시 빈 문자열.
    pub fn display_date(&self) -> String {
        self.date()
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }

    /// `3 PM - 5 PM` 형식의 점검 시간대.
    pub fn display_range(&self) -> String {
        format!(
            "{} - {}",
            format_hour(&self.start_time),
            format_hour(&self.end_time)
        )
    }
}

/// `HH:MM[:SS]`를 `3 PM` 형식으로 표시합니다. 분은 버립니다.
pub fn format_hour(time: &str) -> String {
    let hour = time
        .split(':')
        .next()
        .and_then(|h| h.trim().parse::<u32>().ok());

    match hour {
        Some(h) if h < 24 => {
            let suffix = if h >= 12 { "PM" } else { "AM" };
            let display = if h % 12 == 0 { 12 } else { h % 12 };
            format!("{} {}", display, suffix)
        }
        _ => String::new(),
    }
}

/// 점검 일정 생성 요청.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaintenance {
    pub maintenance_date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub from_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub to_time: NaiveTime,
    pub message: String,
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
