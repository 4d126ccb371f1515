//! 매매일지 도메인 모델.

mod journal;
mod maintenance;
mod session;
mod trade;
mod user;

pub use journal::*;
pub use maintenance::*;
pub use session::*;
pub use trade::*;
pub use user::*;
