//! 백엔드 연동 명령 (로그인, 점검 일정, 이미지 추출, 거래 조회).

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDateTime, Utc};
use tracing::{info, warn};

use journal_client::{validate_extracted, ExtractionReport, JournalApi, TradeQuery};
use journal_core::{KeyValueStore, MaintenanceWindow, MarketType, SessionManager, Trade, User};

/// 로그인하고 세션을 저장합니다.
pub async fn login<S: KeyValueStore>(
    api: &JournalApi,
    manager: &mut SessionManager<S>,
    email: &str,
    password: &str,
) -> Result<User> {
    let response = api.login(email, password).await.context("Login failed")?;
    let token = response.token.context("Login response has no token")?;
    let user = response.user.context("Login response has no user")?;

    let session = manager.sign_in(token, user, Utc::now())?;
    info!(user = session.user.display_name(), "Session stored");
    Ok(session.user.clone())
}

/// 세션을 지웁니다. 로그인 상태였으면 `true`.
pub fn logout<S: KeyValueStore>(manager: &mut SessionManager<S>) -> bool {
    let was_signed_in = manager.session().is_some();
    manager.sign_out();
    was_signed_in
}

/// 예정된 점검 일정.
pub async fn upcoming(api: &JournalApi) -> Result<Vec<MaintenanceWindow>> {
    api.upcoming_maintenance()
        .await
        .context("Failed to fetch maintenance schedule")
}

/// 로그인당 한 번만 보여줄 점검 배너.
///
/// 이미 보여주었거나 로그인 상태가 아니면 `None`. 조회 실패는 배너를 건너뜁니다.
pub async fn maintenance_banner<S: KeyValueStore>(
    api: &JournalApi,
    manager: &mut SessionManager<S>,
) -> Option<Vec<MaintenanceWindow>> {
    if !manager.should_show_maintenance() {
        return None;
    }
    match api.upcoming_maintenance().await {
        Ok(windows) if windows.is_empty() => None,
        Ok(windows) => {
            manager.mark_maintenance_shown();
            Some(windows)
        }
        Err(e) => {
            warn!("Skipping maintenance banner: {}", e);
            None
        }
    }
}

/// 이미지 추출 옵션.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub market: Option<MarketType>,
    /// 검증을 통과하면 백엔드에 저장
    pub save: bool,
}

/// 거래 스크린샷에서 거래를 추출·검증하고, 요청 시 저장합니다.
///
/// 누락 필드가 있는 후보가 하나라도 있으면 저장하지 않습니다.
pub async fn extract(
    api: &JournalApi,
    image: &Path,
    options: &ExtractOptions,
    now: NaiveDateTime,
) -> Result<ExtractionReport> {
    let candidates = api
        .extract_trades_from_file(image)
        .await
        .context("Image extraction failed")?;
    info!("Extracted {} candidate trades from {}", candidates.len(), image.display());

    let report = validate_extracted(&candidates, options.market.clone(), now);

    if options.save {
        if !report.is_clean() {
            bail!(
                "{}",
                report
                    .summary()
                    .unwrap_or_else(|| "Extracted trades are incomplete".to_string())
            );
        }
        if report.valid.is_empty() {
            bail!("No trades found in {}", image.display());
        }
        api.save_trades(&report.valid)
            .await
            .context("Failed to save extracted trades")?;
        info!("Saved {} extracted trades", report.valid.len());
    }
    Ok(report)
}

/// 백엔드에서 거래를 조회합니다. 시장을 지정하면 대시보드 조회를 사용합니다.
pub async fn fetch(api: &JournalApi, query: Option<&TradeQuery>) -> Result<Vec<Trade>> {
    let trades = match query {
        Some(query) => api.dashboard_trades(query).await,
        None => api.all_trades().await,
    }
    .context("Failed to fetch trades")?;
    info!("Fetched {} trades", trades.len());
    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::{MemoryStore, Role, KEY_AUTH_TOKEN};
    use mockito::{Matcher, Server};

    fn manager() -> SessionManager<MemoryStore> {
        SessionManager::new(MemoryStore::new(), chrono::Duration::hours(2))
    }

    #[tokio::test]
    async fn test_login_stores_session_and_banner_once() {
        let mut server = Server::new_async().await;
        let _login = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"tok-9","user":{"id":"9","name":"Ravi","role":"admin"}}"#)
            .create_async()
            .await;
        let upcoming = server
            .mock("GET", "/maintenance/upcoming")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"maintenance":[{"id":"m1","maintenance_date":"2025-07-01","from_time":"15:00","to_time":"17:00","message":"DB upgrade"}]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let api = JournalApi::new(server.url(), server.url()).unwrap();
        let mut manager = manager();

        let user = login(&api, &mut manager, "ravi@example.com", "secret").await.unwrap();
        assert!(user.has_role(Role::Admin));
        assert_eq!(manager.store().get(KEY_AUTH_TOKEN).as_deref(), Some("tok-9"));

        let first = maintenance_banner(&api, &mut manager).await.unwrap();
        assert_eq!(first[0].message.as_deref(), Some("DB upgrade"));
        assert!(maintenance_banner(&api, &mut manager).await.is_none());
        upcoming.assert_async().await;

        assert!(logout(&mut manager));
        assert!(!logout(&mut manager));
    }

    #[tokio::test]
    async fn test_extract_refuses_to_save_incomplete_trades() {
        let mut server = Server::new_async().await;
        let _extract = server
            .mock("POST", "/imgdetails/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"trades":[
                    {"symbol":"eurusd","type":"buy","lot":"0.5","price_in":"1.1","price_out":"1.2","profit":"50","datetime":"2025.06.01 10:30"},
                    {"symbol":"gbpusd","type":"sell","lot":null,"price_in":"1.3","price_out":null,"profit":"-5","datetime":""}
                ]}"#,
            )
            .create_async()
            .await;
        let save = server
            .mock("POST", "/trades/save")
            .expect(0)
            .create_async()
            .await;

        let image = std::env::temp_dir().join(format!("journal-cli-extract-{}.png", std::process::id()));
        std::fs::write(&image, b"\x89PNG fake").unwrap();

        let api = JournalApi::new(server.url(), server.url())
            .unwrap()
            .with_token("tok");
        let now = chrono::NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        let report = extract(&api, &image, &ExtractOptions { market: None, save: false }, now)
            .await
            .unwrap();
        assert_eq!(report.valid.len(), 1);
        assert_eq!(report.valid[0].symbol, "EURUSD");
        assert_eq!(report.invalid[0].index, 2);

        let err = extract(&api, &image, &ExtractOptions { market: None, save: true }, now)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Trade 2: missing lot, exit price"));
        save.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_uses_dashboard_query() {
        let mut server = Server::new_async().await;
        let _trades = server
            .mock("GET", "/dashboard/trades")
            .match_query(Matcher::UrlEncoded("market".into(), "INDIAN".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"trades":[{"profit_loss":"12.5","trade_date":"2025-06-01","market_type":"INDIAN"}]}"#)
            .create_async()
            .await;

        let api = JournalApi::new(server.url(), server.url())
            .unwrap()
            .with_token("tok");
        let query = TradeQuery::new(MarketType::Indian);
        let trades = fetch(&api, Some(&query)).await.unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].market_type, Some(MarketType::Indian));
    }
}
