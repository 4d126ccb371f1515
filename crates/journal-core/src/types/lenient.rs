//! 느슨한 입력 파싱.
//!
//! 백엔드는 `trade_date`와 `profit_loss`를 여러 형태로 내려줍니다.
//! 파싱할 수 없는 날짜는 `None`, 파싱할 수 없는 금액은 0으로 취급합니다.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 시간대 정보가 없는 일시 형식.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 거래일 문자열을 보고 시간대 기준 날짜로 변환합니다.
///
/// 오프셋이 있는 RFC 3339 값은 `tz`로 변환한 뒤 날짜를 취하고,
/// 오프셋이 없는 값은 이미 보고 시간대의 로컬 시각으로 간주합니다.
pub fn parse_trade_date(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz).date_naive());
    }

    let normalized = normalize_dotted_date(s);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok()
}

/// `2025.06.15 10:30` 형태(이미지 추출 결과)의 날짜 구분자를 `-`로 바꿉니다.
pub fn normalize_dotted_date(s: &str) -> String {
    let s = s.trim();
    let (date_part, rest) = match s.find(|c: char| c.is_whitespace() || c == 'T') {
        Some(idx) => s.split_at(idx),
        None => (s, ""),
    };

    if date_part.contains('.') && !date_part.contains('-') {
        format!("{}{}", date_part.replace('.', "-"), rest)
    } else {
        s.to_string()
    }
}

/// 임의의 JSON 값을 금액으로 해석합니다.
///
/// 숫자와 숫자 문자열만 인정하며 나머지는 모두 0입니다.
pub fn decimal_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        _ => Decimal::ZERO,
    }
}

/// 숫자 문자열을 금액으로 해석합니다. 실패 시 0.
pub fn parse_decimal_str(s: &str) -> Decimal {
    let s = s.trim();
    if s.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or(Decimal::ZERO)
}

/// `#[serde(deserialize_with)]`용 느슨한 금액 역직렬화.
pub fn deserialize_lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(decimal_from_value).unwrap_or(Decimal::ZERO))
}

/// `#[serde(deserialize_with)]`용 느슨한 선택 금액 역직렬화.
///
/// 값이 없거나 숫자가 아니면 `None`입니다.
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Some(Value::String(s)) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        _ => None,
    })
}

/// `#[serde(deserialize_with)]`용 문자열/숫자 겸용 선택 문자열 역직렬화.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{Asia, UTC};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_trade_date("2025-06-15", &UTC), Some(date(2025, 6, 15)));
        assert_eq!(parse_trade_date("  2025-06-15 ", &UTC), Some(date(2025, 6, 15)));
    }

    #[test]
    fn test_parse_rfc3339_converts_timezone() {
        // UTC 20:00은 콜카타(+05:30) 기준 다음 날
        let raw = "2025-06-15T20:00:00Z";
        assert_eq!(parse_trade_date(raw, &UTC), Some(date(2025, 6, 15)));
        assert_eq!(parse_trade_date(raw, &Asia::Kolkata), Some(date(2025, 6, 16)));
    }

    #[test]
    fn test_parse_naive_datetime_forms() {
        assert_eq!(
            parse_trade_date("2025-06-15T10:30:00.000", &UTC),
            Some(date(2025, 6, 15))
        );
        assert_eq!(parse_trade_date("2025-06-15 10:30", &UTC), Some(date(2025, 6, 15)));
        assert_eq!(
            parse_trade_date("2025.06.15 10:30:45", &UTC),
            Some(date(2025, 6, 15))
        );
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(parse_trade_date("", &UTC), None);
        assert_eq!(parse_trade_date("yesterday", &UTC), None);
        assert_eq!(parse_trade_date("2025-13-40", &UTC), None);
    }

    #[test]
    fn test_normalize_dotted_date() {
        assert_eq!(normalize_dotted_date("2025.06.15 10:30"), "2025-06-15 10:30");
        assert_eq!(
            normalize_dotted_date("2025-06-15T10:30:00.5"),
            "2025-06-15T10:30:00.5"
        );
    }

    #[test]
    fn test_decimal_from_value() {
        assert_eq!(decimal_from_value(&json!(12.5)), dec!(12.5));
        assert_eq!(decimal_from_value(&json!(-40)), dec!(-40));
        assert_eq!(decimal_from_value(&json!("  -20.75 ")), dec!(-20.75));
        assert_eq!(decimal_from_value(&json!("abc")), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!(null)), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!(true)), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!({"v": 1})), Decimal::ZERO);
    }
}
