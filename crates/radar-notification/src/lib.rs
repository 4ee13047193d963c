//! # Radar Notification
//!
//! 실행 결과 산출물과 알림 서비스.
//!
//! - SVG 게이지 렌더링
//! - 리포트 전송 채널:
//!   - Telegram
//!   - Discord (webhook)
//!   - SMTP 이메일 (HTML, 게이지 인라인 첨부)

pub mod discord;
pub mod dispatch;
pub mod gauge;
pub mod smtp;
pub mod telegram;
pub mod types;

pub use discord::*;
pub use dispatch::*;
pub use gauge::*;
pub use smtp::*;
pub use telegram::*;
pub use types::*;
