//! 거래 엔드포인트.

use reqwest::Method;
use serde_json::json;
use tracing::info;

use journal_core::{normalize_records, NewTrade, Trade};

use crate::client::{Auth, JournalApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{MessageResponse, TradesEnvelope};

impl JournalApi {
    /// `POST /trades/save` (`{ trades: [...] }`)
    pub async fn save_trades(&self, trades: &[NewTrade]) -> ApiResult<MessageResponse> {
        if trades.is_empty() {
            return Err(ApiError::InvalidInput(
                "저장할 거래가 없습니다".to_string(),
            ));
        }

        let body = json!({ "trades": trades });
        let response: MessageResponse = self
            .send_json(Method::POST, "/trades/save", &body, Auth::Bearer)
            .await?;
        info!(count = trades.len(), "Trades saved");
        Ok(response)
    }

    /// `GET /trades/all`
    pub async fn all_trades(&self) -> ApiResult<Vec<Trade>> {
        let envelope: TradesEnvelope = self.get("/trades/all", Auth::Bearer).await?;
        Ok(normalize_records(envelope.trades, &self.timezone()))
    }

    /// `GET /trades/data`
    pub async fn trade_data(&self) -> ApiResult<Vec<Trade>> {
        let envelope: TradesEnvelope = self.get("/trades/data", Auth::Bearer).await?;
        Ok(normalize_records(envelope.trades, &self.timezone()))
    }
}
