//! 거래 데이터 소스 추상화.
//!
//! 대시보드 계산은 거래 목록만 있으면 되므로 백엔드와 로컬 파일을 같은
//! 인터페이스로 다룹니다.

use async_trait::async_trait;

use journal_core::Trade;

use crate::client::JournalApi;
use crate::endpoints::TradeQuery;
use crate::error::ApiResult;

/// 거래 데이터 소스 trait.
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// 조건에 맞는 거래를 조회합니다.
    async fn fetch_trades(&self, query: &TradeQuery) -> ApiResult<Vec<Trade>>;

    /// 소스 이름을 반환합니다.
    fn name(&self) -> &str;
}

#[async_trait]
impl TradeSource for JournalApi {
    async fn fetch_trades(&self, query: &TradeQuery) -> ApiResult<Vec<Trade>> {
        self.dashboard_trades(query).await
    }

    fn name(&self) -> &str {
        "backend"
    }
}

/// 메모리에 올린 거래 목록 (파일 입력, 테스트용).
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    trades: Vec<Trade>,
}

impl InMemorySource {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

#[async_trait]
impl TradeSource for InMemorySource {
    async fn fetch_trades(&self, query: &TradeQuery) -> ApiResult<Vec<Trade>> {
        let mut selected: Vec<Trade> = self
            .trades
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        if let Some(limit) = query.limit {
            selected.truncate(limit as usize);
        }
        Ok(selected)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
