//! 대시보드 엔드포인트.

use chrono::NaiveDate;
use serde_json::Value;

use journal_core::{normalize_records, Granularity, MarketType, Trade};

use crate::client::{Auth, JournalApi};
use crate::error::ApiResult;
use crate::models::{BackendStats, ProfitEnvelope, ProfitPoint, StatsEnvelope, TradesEnvelope};

/// 시장별 거래 조회 조건.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeQuery {
    pub market: MarketType,
    /// 최대 건수 (`None`이면 클라이언트 기본값)
    pub limit: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TradeQuery {
    pub fn new(market: MarketType) -> Self {
        Self {
            market,
            limit: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 조회 구간 (양 끝 포함).
    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// 쿼리 문자열 파라미터. 날짜는 지정된 경우에만 포함합니다.
    pub fn to_params(&self, default_limit: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("market", self.market.as_str().to_string()),
            ("limit", self.limit.unwrap_or(default_limit).to_string()),
        ];
        if let Some(start) = self.start_date {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        params
    }

    /// 메모리의 거래가 조건에 맞는지 확인합니다.
    pub fn matches(&self, trade: &Trade) -> bool {
        if !trade.is_market(&self.market) {
            return false;
        }
        match (trade.trade_date, self.start_date, self.end_date) {
            (None, None, None) => true,
            (None, _, _) => false,
            (Some(d), start, end) => {
                start.map_or(true, |s| d >= s) && end.map_or(true, |e| d <= e)
            }
        }
    }
}

impl JournalApi {
    /// `GET /dashboard/stats`
    pub async fn dashboard_stats(&self) -> ApiResult<BackendStats> {
        let envelope: StatsEnvelope = self.get("/dashboard/stats", Auth::Bearer).await?;
        Ok(envelope.stats)
    }

    /// `GET /dashboard/comparison`
    ///
    /// 응답 형태는 백엔드가 정하므로 그대로 반환합니다.
    pub async fn dashboard_comparison(&self) -> ApiResult<Value> {
        self.get("/dashboard/comparison", Auth::Bearer).await
    }

    /// `GET /dashboard/trades?market=&limit=[&startDate=][&endDate=]`
    pub async fn dashboard_trades(&self, query: &TradeQuery) -> ApiResult<Vec<Trade>> {
        let params = query.to_params(self.default_limit());
        let envelope: TradesEnvelope = self
            .get_with_query("/dashboard/trades", &params, Auth::Bearer)
            .await?;
        Ok(normalize_records(envelope.trades, &self.timezone()))
    }

    /// `GET /dashboard/profit-over-time?period=&market=[&timeFilter=]`
    ///
    /// `time_filter`가 없거나 `all`이면 파라미터를 생략합니다.
    pub async fn profit_over_time(
        &self,
        granularity: Granularity,
        market: &MarketType,
        time_filter: Option<&str>,
    ) -> ApiResult<Vec<ProfitPoint>> {
        let params = profit_params(granularity, market, time_filter);
        let envelope: ProfitEnvelope = self
            .get_with_query("/dashboard/profit-over-time", &params, Auth::Bearer)
            .await?;
        Ok(envelope.data)
    }
}

fn profit_params(
    granularity: Granularity,
    market: &MarketType,
    time_filter: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("period", granularity.as_str().to_string()),
        ("market", market.as_str().to_string()),
    ];
    if let Some(filter) = time_filter.filter(|f| !f.eq_ignore_ascii_case("all")) {
        params.push(("timeFilter", filter.to_string()));
    }
    params
}
