//! 거래 입력 소스 (로컬 JSON 파일 또는 백엔드).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::Args;
use serde_json::Value;
use tracing::info;

use journal_client::{InMemorySource, JournalApi, TradeQuery, TradeSource};
use journal_core::{normalize_records, AppConfig, MarketType, Trade, TradeRecord};

use crate::session::resolve_token;

/// 인증 토큰 환경 변수.
pub const TOKEN_ENV: &str = "JOURNAL_TOKEN";

/// 거래 입력 옵션.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// 거래 JSON 파일 (배열 또는 `{ "trades": [...] }`). 없으면 백엔드에서 조회
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 시장 필터 (FOREX, INDIAN)
    #[arg(short, long)]
    pub market: Option<MarketType>,

    /// 백엔드 인증 토큰 (기본: JOURNAL_TOKEN 환경변수, 저장된 로그인 세션)
    #[arg(long)]
    pub token: Option<String>,
}

/// 설정으로 백엔드 클라이언트를 생성합니다.
pub fn backend(config: &AppConfig, token: Option<String>) -> Result<JournalApi> {
    let tz = config.analytics.tz()?;
    let mut api = JournalApi::from_config(&config.api)
        .context("Failed to build API client")?
        .with_timezone(tz);
    if let Some(token) = token {
        api.set_token(token);
    }
    Ok(api)
}

/// 입력 옵션에 따라 거래를 불러옵니다.
pub async fn load_trades(args: &SourceArgs, config: &AppConfig) -> Result<Vec<Trade>> {
    let tz = config.analytics.tz()?;

    if let Some(path) = &args.input {
        let trades = read_trades_file(path, &tz)?;
        info!("Loaded {} trades from {}", trades.len(), path.display());
        return match &args.market {
            Some(market) => {
                let source = InMemorySource::new(trades);
                fetch(&source, market).await
            }
            None => Ok(trades),
        };
    }

    let api = backend(config, resolve_token(args.token.clone(), config))?;
    let trades = match &args.market {
        Some(market) => fetch(&api, market).await?,
        None => api.all_trades().await.context("Failed to fetch trades")?,
    };
    info!("Fetched {} trades from backend", trades.len());
    Ok(trades)
}

async fn fetch(source: &dyn TradeSource, market: &MarketType) -> Result<Vec<Trade>> {
    source
        .fetch_trades(&TradeQuery::new(market.clone()))
        .await
        .with_context(|| format!("Failed to load {} trades from {}", market, source.name()))
}

/// 거래 JSON 파일을 읽습니다.
pub fn read_trades_file(path: &Path, tz: &Tz) -> Result<Vec<Trade>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trades file: {}", path.display()))?;
    parse_trades_json(&raw, tz).with_context(|| format!("Invalid trades file: {}", path.display()))
}

/// 거래 배열 또는 `{ "trades": [...] }` 문서를 파싱합니다.
pub fn parse_trades_json(raw: &str, tz: &Tz) -> Result<Vec<Trade>> {
    let value: Value = serde_json::from_str(raw)?;
    let list = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove("trades")
            .context("JSON object has no \"trades\" field")?,
        _ => anyhow::bail!("Expected an array of trades or an object with \"trades\""),
    };
    let records: Vec<TradeRecord> = serde_json::from_value(list)?;
    Ok(normalize_records(records, tz))
}
