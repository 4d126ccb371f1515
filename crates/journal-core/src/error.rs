//! 매매일지 시스템의 에러 타입.
//!
//! 집계/차트 계산은 모든 입력에 대해 정의되므로 에러를 반환하지 않습니다.
//! 이 모듈의 에러는 설정, 세션, 입력 검증 등 경계 영역에서만 사용됩니다.

use thiserror::Error;

/// 핵심 매매일지 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 세션 에러 (만료, 손상된 저장 데이터 등)
    #[error("세션 에러: {0}")]
    Session(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 매매일지 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl JournalError {
    /// 사용자가 입력을 고쳐서 재시도할 수 있는 에러인지 확인합니다.
    pub fn is_user_error(&self) -> bool {
        matches!(self, JournalError::InvalidInput(_) | JournalError::NotFound(_))
    }

    /// 재로그인이 필요한 에러인지 확인합니다.
    pub fn requires_login(&self) -> bool {
        matches!(self, JournalError::Session(_))
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}
