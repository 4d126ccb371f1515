//! 백엔드 엔드포인트별 `JournalApi` 메서드.

mod admin;
mod auth;
mod dashboard;
mod image;
mod journals;
mod maintenance;
mod trades;

pub use dashboard::TradeQuery;
