//! # Journal Client
//!
//! 매매일지 백엔드 REST API용 비동기 클라이언트.
//!
//! - 대시보드, 거래, 인증, 점검 일정, 관리자, 일지 엔드포인트
//! - 거래 내역 이미지 추출과 추출 결과 검증
//! - 백엔드/로컬 파일을 같은 방식으로 다루는 [`TradeSource`]
//!
//! 토큰이 필요한 요청은 토큰이 없으면 네트워크 호출 없이
//! [`ApiError::Unauthorized`]로 실패합니다.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod extract;
pub mod models;
pub mod source;

pub use client::JournalApi;
pub use endpoints::TradeQuery;
pub use error::{ApiError, ApiResult};
pub use extract::{
    parse_extracted_datetime, validate_extracted, ExtractedTrade, ExtractionReport, InvalidTrade,
};
pub use models::{AuthResponse, BackendStats, MessageResponse, ProfitPoint, SignupRequest, UserUpdate};
pub use source::{InMemorySource, TradeSource};
