//! 매매일지 항목.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::MarketType;
use crate::types::deserialize_optional_string;

/// 일지 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    /// 작성일
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub market_type: Option<MarketType>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl JournalEntry {
    /// 새 일지 항목을 생성합니다.
    pub fn new(entry_date: NaiveDate, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: None,
            entry_date,
            market_type: None,
            title: title.into(),
            content: content.into(),
        }
    }

    /// 시장 유형을 설정합니다.
    pub fn with_market(mut self, market: MarketType) -> Self {
        self.market_type = Some(market);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_format() {
        let entry: JournalEntry = serde_json::from_str(
            r#"{"id": 9, "user_id": 2, "entry_date": "2025-06-15", "market_type": "INDIAN",
                "title": "Gap up", "content": "Stayed out"}"#,
        )
        .unwrap();
        assert_eq!(entry.id.as_deref(), Some("9"));
        assert_eq!(entry.market_type, Some(MarketType::Indian));

        let json = serde_json::to_value(
            JournalEntry::new(entry.entry_date, "t", "c").with_market(MarketType::Forex),
        )
        .unwrap();
        assert_eq!(json["entry_date"], "2025-06-15");
        assert_eq!(json["market_type"], "FOREX");
    }
}
