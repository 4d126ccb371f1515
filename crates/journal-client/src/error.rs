//! 백엔드 API 에러 타입.

use thiserror::Error;

/// 백엔드 API 호출 에러.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 네트워크 에러 (연결 실패, 타임아웃 등)
    #[error("네트워크 에러: {0}")]
    Network(#[from] reqwest::Error),

    /// 인증 필요 (토큰 없음 또는 401)
    #[error("인증 실패: {0}")]
    Unauthorized(String),

    /// 2xx가 아닌 응답
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 응답 파싱 에러
    #[error("응답 파싱 에러: {0}")]
    Parse(String),

    /// 잘못된 요청 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// API 호출을 위한 Result 타입.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 재시도 가능한 에러인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// 재로그인이 필요한 에러인지 확인합니다.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// HTTP 상태 코드 (있는 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}
