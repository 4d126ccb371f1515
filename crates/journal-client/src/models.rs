//! 요청/응답 본문 타입.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use journal_core::{
    deserialize_lenient_decimal, JournalEntry, MaintenanceWindow, Role, TradeRecord, User,
};

/// `{ trades: [...] }` 응답.
#[derive(Debug, Deserialize)]
pub(crate) struct TradesEnvelope {
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
}

/// `{ users: [...] }` 응답.
#[derive(Debug, Deserialize)]
pub(crate) struct UsersEnvelope {
    #[serde(default)]
    pub users: Vec<User>,
}

/// `{ user: {...} }` 응답.
#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

/// `{ journals: [...] }` 응답.
#[derive(Debug, Deserialize)]
pub(crate) struct JournalsEnvelope {
    #[serde(default)]
    pub journals: Vec<JournalEntry>,
}

/// `{ success, maintenance: [...] }` 응답.
#[derive(Debug, Deserialize)]
pub(crate) struct MaintenanceEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceWindow>,
}

/// `{ stats: {...} }` 응답.
#[derive(Debug, Deserialize)]
pub(crate) struct StatsEnvelope {
    pub stats: BackendStats,
}

/// 백엔드가 계산한 대시보드 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendStats {
    #[serde(default)]
    pub total_trades: u64,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub profit_loss: Decimal,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub win_rate: Decimal,
    #[serde(default)]
    pub winning_trades: u64,
    #[serde(default)]
    pub losing_trades: u64,
    /// 시장별 요약 (형태는 백엔드 버전에 따라 다름)
    #[serde(default)]
    pub trades_by_market: Vec<Value>,
}

/// 기간별 손익 한 점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitPoint {
    #[serde(alias = "period_key", alias = "date")]
    pub period: String,
    #[serde(
        default,
        alias = "profit",
        alias = "total_profit",
        deserialize_with = "deserialize_lenient_decimal"
    )]
    pub total_profit: Decimal,
}

/// `{ data: [...] }` 응답.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfitEnvelope {
    #[serde(default, alias = "profitData")]
    pub data: Vec<ProfitPoint>,
}

/// 인증 응답 (`login`, `verify-otp`).
#[derive(Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .field("message", &self.message)
            .finish()
    }
}

/// 상태 메시지 응답. 알 수 없는 필드는 `extra`에 보존합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 회원가입 요청.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// 관리자 사용자 수정 요청. `None` 필드는 전송하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// 변경할 필드가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
