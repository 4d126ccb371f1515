//! 매매일지 백엔드 REST 클라이언트.
//!
//! 모든 엔드포인트는 `endpoints` 모듈에서 `JournalApi`에 메서드로 추가됩니다.
//! 이 모듈은 URL 조합, 인증 헤더, 응답/에러 변환만 담당합니다.

use std::time::Duration;

use chrono_tz::Tz;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use journal_core::{ApiConfig, Session};

use crate::error::{ApiError, ApiResult};

/// 요청 인증 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// `Authorization: Bearer <token>` 필수
    Bearer,
    /// 인증 없음
    Public,
}

/// 매매일지 백엔드 클라이언트.
#[derive(Debug, Clone)]
pub struct JournalApi {
    client: reqwest::Client,
    base_url: String,
    image_url: String,
    default_limit: u32,
    tz: Tz,
    token: Option<SecretString>,
}

impl JournalApi {
    /// 기본 타임아웃(30초)으로 클라이언트를 생성합니다.
    pub fn new(base_url: impl Into<String>, image_url: impl Into<String>) -> ApiResult<Self> {
        Self::build(base_url.into(), image_url.into(), Duration::from_secs(30))
    }

    /// `[api]` 설정으로 클라이언트를 생성합니다.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        let mut api = Self::build(
            config.base_url.clone(),
            config.image_url.clone(),
            config.timeout(),
        )?;
        api.default_limit = config.default_limit;
        Ok(api)
    }

    fn build(base_url: String, image_url: String, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
            default_limit: 1000,
            tz: Tz::UTC,
            token: None,
        })
    }

    /// 인증 토큰을 설정합니다.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    /// 세션의 토큰을 사용합니다.
    pub fn with_session(self, session: &Session) -> Self {
        self.with_token(session.token())
    }

    /// 거래일 해석에 사용할 보고 시간대를 설정합니다.
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    /// 대시보드 거래 조회 기본 건수를 설정합니다.
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(SecretString::from(token.into()));
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub(crate) fn default_limit(&self) -> u32 {
        self.default_limit
    }

    pub(crate) fn image_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.image_url, path)
    }

    /// 요청 빌더를 생성합니다.
    ///
    /// 토큰이 필요한 요청인데 토큰이 없으면 네트워크 호출 없이 실패합니다.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        auth: Auth,
    ) -> ApiResult<RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);

        match auth {
            Auth::Public => Ok(builder),
            Auth::Bearer => match &self.token {
                Some(token) => Ok(builder.bearer_auth(token.expose_secret())),
                None => {
                    warn!(path, "Request requires authentication but no token is set");
                    Err(ApiError::Unauthorized(
                        "인증 토큰이 없습니다".to_string(),
                    ))
                }
            },
        }
    }

    /// 외부 URL(이미지 서비스)로 요청 빌더를 생성합니다.
    pub(crate) fn raw_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> ApiResult<T> {
        let request = self.request(Method::GET, path, auth)?;
        self.execute(request, path).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q, auth: Auth) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path, auth)?.query(query);
        self.execute(request, path).await
    }

    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method, path, auth)?.json(body);
        self.execute(request, path).await
    }

    /// 요청을 전송하고 응답을 변환합니다.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> ApiResult<T> {
        debug!(path, "Sending API request");
        let response = request.send().await?;
        parse_response(response, path).await
    }
}

/// 응답 상태를 확인하고 본문을 역직렬화합니다.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    response: Response,
    path: &str,
) -> ApiResult<T> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.is_success() {
        return serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("{}: {}", path, e)));
    }

    let message = backend_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    if status == StatusCode::UNAUTHORIZED {
        warn!(path, "API rejected credentials");
        return Err(ApiError::Unauthorized(message));
    }

    error!("API request failed: {} {} - {}", path, status, message);
    Err(ApiError::Http {
        status: status.as_u16(),
        message,
    })
}

/// 백엔드 에러 본문 `{ "error": "..." }` (또는 `message`)에서 메시지를 꺼냅니다.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// 경로 세그먼트로 쓸 ID를 검증합니다.
pub(crate) fn path_id(id: &str) -> ApiResult<&str> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') || id.contains('?') {
        return Err(ApiError::InvalidInput(format!("잘못된 ID: '{}'", id)));
    }
    Ok(id)
}
