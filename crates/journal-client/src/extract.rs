//! 이미지 추출 거래 검증.
//!
//! 이미지 서비스는 필드가 빠지거나 숫자가 아닌 값을 돌려줄 수 있습니다.
//! 필수 필드가 모두 있는 후보만 [`NewTrade`]로 바꾸고, 나머지는 번호(1부터)와
//! 빠진 필드 목록으로 보고합니다.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use journal_core::{
    deserialize_optional_decimal, deserialize_optional_string, normalize_dotted_date, MarketType,
    NewTrade,
};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const TRADE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 이미지에서 추출한 거래 후보.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTrade {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub symbol: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "deserialize_optional_string")]
    pub trade_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub lot: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub price_in: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub price_out: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub profit: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub datetime: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ExtractedTrade {
    /// 빠졌거나 숫자가 아닌 필수 필드 이름.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_blank(&self.symbol).is_none() {
            missing.push("symbol");
        }
        if non_blank(&self.trade_type).is_none() {
            missing.push("type");
        }
        if self.lot.is_none() {
            missing.push("lot");
        }
        if self.price_in.is_none() {
            missing.push("entry price");
        }
        if self.price_out.is_none() {
            missing.push("exit price");
        }
        if self.profit.is_none() {
            missing.push("profit");
        }
        missing
    }

    /// 저장 요청으로 변환합니다. 필수 필드가 빠졌으면 `None`.
    ///
    /// 일시를 해석할 수 없으면 `now`를 사용합니다.
    pub fn to_new_trade(&self, market: &MarketType, now: NaiveDateTime) -> Option<NewTrade> {
        let symbol = non_blank(&self.symbol)?;
        let trade_type = non_blank(&self.trade_type)?;

        let traded_at = self
            .datetime
            .as_deref()
            .and_then(parse_extracted_datetime)
            .unwrap_or(now);

        Some(NewTrade {
            market_type: market.clone(),
            symbol: symbol.to_uppercase(),
            trade_type: trade_type.to_uppercase(),
            lot_size: self.lot?,
            entry_price: self.price_in?,
            exit_price: self.price_out?,
            profit_loss: self.profit?,
            trade_date: traded_at.format(TRADE_DATE_FORMAT).to_string(),
            notes: None,
        })
    }
}

/// `2025.06.15  10:30:00` 같은 추출 일시를 해석합니다.
///
/// 연속 공백은 하나로 줄이고 날짜의 `.` 구분자는 `-`로 바꿉니다.
/// 오프셋이 있으면 UTC 기준 일시로 바꿉니다.
pub fn parse_extracted_datetime(raw: &str) -> Option<NaiveDateTime> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    let normalized = normalize_dotted_date(&collapsed);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 검증에 실패한 후보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidTrade {
    /// 1부터 시작하는 후보 번호
    pub index: usize,
    pub missing: Vec<&'static str>,
}

impl fmt::Display for InvalidTrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trade {}: missing {}", self.index, self.missing.join(", "))
    }
}

/// 후보 검증 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub valid: Vec<NewTrade>,
    pub invalid: Vec<InvalidTrade>,
}

impl ExtractionReport {
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }

    /// 사용자에게 보여줄 요약. 실패한 후보가 없으면 `None`.
    pub fn summary(&self) -> Option<String> {
        if self.invalid.is_empty() {
            return None;
        }
        let details = self
            .invalid
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Some(format!(
            "Image quality issue! {} trade(s) have missing data ({}). \
             Please upload a clear image or enter trades manually.",
            self.invalid.len(),
            details
        ))
    }
}

/// 추출 후보를 검증합니다. 시장을 지정하지 않으면 `FOREX`입니다.
pub fn validate_extracted(
    candidates: &[ExtractedTrade],
    market: Option<MarketType>,
    now: NaiveDateTime,
) -> ExtractionReport {
    let market = market.unwrap_or(MarketType::Forex);
    let mut report = ExtractionReport::default();

    for (i, candidate) in candidates.iter().enumerate() {
        let missing = candidate.missing_fields();
        if !missing.is_empty() {
            report.invalid.push(InvalidTrade {
                index: i + 1,
                missing,
            });
            continue;
        }
        if let Some(trade) = candidate.to_new_trade(&market, now) {
            report.valid.push(trade);
        }
    }

    tracing::debug!(
        valid = report.valid.len(),
        invalid = report.invalid.len(),
        "Extracted trades validated"
    );
    report
}
