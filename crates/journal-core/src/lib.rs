//! # Journal Core
//!
//! 매매일지 시스템의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 매매일지 전반에서 사용되는 기본 타입을 제공합니다:
//! - 거래 기록 및 시장 유형
//! - 집계 단위(Granularity) 정의
//! - 사용자, 역할, 세션
//! - 점검 일정 및 일지 항목
//! - 관대한(lenient) 입력 파싱
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
