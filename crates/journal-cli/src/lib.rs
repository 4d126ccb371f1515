//! 매매일지 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 거래 JSON 파일 또는 백엔드에서 거래 불러오기
//! - 기간 집계, 패딩, 차트 지오메트리 계산
//! - 통계, 성과, 기간 비교 리포트
//! - 로그인 세션 파일 저장소

pub mod commands;
pub mod input;
pub mod output;
pub mod session;
