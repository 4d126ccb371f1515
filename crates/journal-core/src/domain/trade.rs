//! 거래 기록.
//!
//! 이 모듈은 매매일지의 거래 관련 타입을 정의합니다:
//! - `TradeRecord` - 백엔드가 내려주는 원시 거래 레코드
//! - `Trade` - 날짜/금액이 정규화된 거래
//! - `NewTrade` - 저장 요청용 거래
//! - `DatedPnl` - 집계기가 요구하는 최소 인터페이스

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    deserialize_lenient_decimal, deserialize_optional_decimal, deserialize_optional_string,
    parse_trade_date, Currency,
};

/// 시장 유형.
///
/// 집계기는 시장을 구분하지 않으며, 입력 집합을 나눌 때만 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarketType {
    /// 외환
    Forex,
    /// 인도 주식
    Indian,
    /// 알 수 없는 태그 (원문 보존)
    Other(String),
}

impl MarketType {
    /// 와이어 태그.
    pub fn as_str(&self) -> &str {
        match self {
            MarketType::Forex => "FOREX",
            MarketType::Indian => "INDIAN",
            MarketType::Other(tag) => tag,
        }
    }

    /// 시장 기본 통화.
    pub fn currency(&self) -> Currency {
        match self {
            MarketType::Indian => Currency::Inr,
            _ => Currency::Usd,
        }
    }
}

impl From<String> for MarketType {
    fn from(tag: String) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "FOREX" => MarketType::Forex,
            "INDIAN" => MarketType::Indian,
            _ => MarketType::Other(tag),
        }
    }
}

impl From<&str> for MarketType {
    fn from(tag: &str) -> Self {
        MarketType::from(tag.to_string())
    }
}

impl From<MarketType> for String {
    fn from(market: MarketType) -> Self {
        market.as_str().to_string()
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MarketType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MarketType::from(s))
    }
}

/// 날짜가 있는 손익 이벤트.
///
/// 집계기, 통계, 필터가 요구하는 최소 인터페이스입니다.
/// 백엔드 응답, CSV 행 등 어떤 타입이든 구현하면 집계할 수 있습니다.
pub trait DatedPnl {
    /// 거래일. 파싱 불가 시 `None` (모든 윈도우에서 제외).
    fn trade_date(&self) -> Option<NaiveDate>;

    /// 부호 있는 손익.
    fn profit_loss(&self) -> Decimal;

    /// 수익 거래 여부.
    fn is_win(&self) -> bool {
        self.profit_loss() > Decimal::ZERO
    }

    /// 손실 거래 여부.
    fn is_loss(&self) -> bool {
        self.profit_loss() < Decimal::ZERO
    }
}

impl<T: DatedPnl + ?Sized> DatedPnl for &T {
    fn trade_date(&self) -> Option<NaiveDate> {
        (**self).trade_date()
    }

    fn profit_loss(&self) -> Decimal {
        (**self).profit_loss()
    }
}

impl DatedPnl for (NaiveDate, Decimal) {
    fn trade_date(&self) -> Option<NaiveDate> {
        Some(self.0)
    }

    fn profit_loss(&self) -> Decimal {
        self.1
    }
}

/// 백엔드 원시 거래 레코드.
///
/// 모든 필드가 느슨하게 역직렬화됩니다. 금액은 숫자/숫자 문자열을 허용하고
/// 나머지는 0, 날짜는 원문 문자열로 보존합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub market_type: Option<MarketType>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub lot_size: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub entry_price: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub exit_price: Option<Decimal>,
    /// 손익 (파싱 불가 시 0)
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub profit_loss: Decimal,
    /// 거래일 원문
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub trade_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TradeRecord {
    /// 보고 시간대 기준으로 정규화된 거래로 변환합니다.
    pub fn into_trade(self, tz: &Tz) -> Trade {
        let trade_date = self
            .trade_date
            .as_deref()
            .and_then(|raw| parse_trade_date(raw, tz));

        if trade_date.is_none() {
            tracing::trace!(id = ?self.id, raw = ?self.trade_date, "unparseable trade date");
        }

        Trade {
            id: self.id,
            user_id: self.user_id,
            market_type: self.market_type,
            symbol: self.symbol,
            trade_type: self.trade_type,
            lot_size: self.lot_size,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            profit_loss: self.profit_loss,
            trade_date,
            notes: self.notes,
        }
    }
}

/// 정규화된 거래.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TradeRecord")]
pub struct Trade {
    /// 거래 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 소유 사용자 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// 시장 유형
    pub market_type: Option<MarketType>,
    /// 종목
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// 매매 방향 (BUY/SELL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_type: Option<String>,
    /// 수량(랏)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<Decimal>,
    /// 진입가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<Decimal>,
    /// 청산가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<Decimal>,
    /// 손익
    pub profit_loss: Decimal,
    /// 거래일
    pub trade_date: Option<NaiveDate>,
    /// 메모
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 시간대 정보 없이 역직렬화하는 경우 UTC 기준으로 날짜를 취합니다.
impl From<TradeRecord> for Trade {
    fn from(record: TradeRecord) -> Self {
        record.into_trade(&chrono_tz::UTC)
    }
}

impl Trade {
    /// 날짜와 손익만으로 거래를 생성합니다.
    pub fn new(trade_date: Option<NaiveDate>, profit_loss: Decimal) -> Self {
        Self {
            id: None,
            user_id: None,
            market_type: None,
            symbol: None,
            trade_type: None,
            lot_size: None,
            entry_price: None,
            exit_price: None,
            profit_loss,
            trade_date,
            notes: None,
        }
    }

    /// 시장 유형을 설정합니다.
    pub fn with_market(mut self, market: MarketType) -> Self {
        self.market_type = Some(market);
        self
    }

    /// 종목을 설정합니다.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// 거래 ID를 설정합니다.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// 주어진 시장의 거래인지 확인합니다.
    pub fn is_market(&self, market: &MarketType) -> bool {
        self.market_type.as_ref() == Some(market)
    }
}

impl DatedPnl for Trade {
    fn trade_date(&self) -> Option<NaiveDate> {
        self.trade_date
    }

    fn profit_loss(&self) -> Decimal {
        self.profit_loss
    }
}

/// 원시 레코드 목록을 거래 목록으로 변환합니다.
pub fn normalize_records(records: Vec<TradeRecord>, tz: &Tz) -> Vec<Trade> {
    records.into_iter().map(|r| r.into_trade(tz)).collect()
}

/// 시장별로 거래를 나눕니다.
///
/// 시장 태그가 없는 거래는 `None` 키로 모입니다.
pub fn partition_by_market(trades: &[Trade]) -> BTreeMap<Option<MarketType>, Vec<&Trade>> {
    let mut groups: BTreeMap<Option<MarketType>, Vec<&Trade>> = BTreeMap::new();
    for trade in trades {
        groups
            .entry(trade.market_type.clone())
            .or_default()
            .push(trade);
    }
    groups
}

/// 거래 저장 요청 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub market_type: MarketType,
    pub symbol: String,
    pub trade_type: String,
    pub lot_size: Decimal,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub profit_loss: Decimal,
    /// 거래 일시 (`YYYY-MM-DDTHH:MM:SS`)
    pub trade_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
