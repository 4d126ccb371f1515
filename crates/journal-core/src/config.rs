//! 설정 관리.
//!
//! TOML 파일과 `JOURNAL__` 접두사 환경 변수에서 애플리케이션 설정을 로드합니다.

use std::path::Path;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, JournalResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 백엔드 API 설정
    pub api: ApiConfig,
    /// 집계/차트 설정
    pub analytics: AnalyticsConfig,
    /// 세션 설정
    pub session: SessionConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 백엔드 API 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 이미지 추출 서비스 기본 URL
    pub image_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 대시보드 거래 조회 기본 건수
    pub default_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            image_url: "http://localhost:7080".to_string(),
            timeout_secs: 30,
            default_limit: 1000,
        }
    }
}

impl ApiConfig {
    /// 요청 타임아웃.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 집계/차트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// 보고 기준 시간대 (IANA 이름, 예: "Asia/Kolkata")
    pub timezone: String,
    /// 단일 데이터 포인트 패딩 슬롯 수
    pub pad_slots: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            pad_slots: 7,
        }
    }
}

impl AnalyticsConfig {
    /// 설정된 시간대를 파싱합니다.
    pub fn tz(&self) -> JournalResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| JournalError::Config(format!("잘못된 시간대 '{}': {}", self.timezone, e)))
    }

    /// 설정된 시간대 기준 오늘 날짜.
    pub fn today(&self) -> JournalResult<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }
}

/// 세션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 로그인 세션 유효 시간 (초)
    pub ttl_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_secs: 2 * 60 * 60 }
    }
}

impl SessionConfig {
    /// 세션 유효 시간.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> JournalResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("JOURNAL")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 값 범위를 검증합니다.
    pub fn validate(&self) -> JournalResult<()> {
        self.analytics.tz()?;
        if self.analytics.pad_slots == 0 {
            return Err(JournalError::Config(
                "analytics.pad_slots는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.session.ttl_secs <= 0 {
            return Err(JournalError::Config(
                "session.ttl_secs는 양수여야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}
