//! 스트레스 레이더 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 1회 배치 실행 (데이터 조회 → 점수 → 산출물 → 전송)
//! - 매크로 스캔 확인
//! - 유효 설정 출력

pub mod commands;

pub use commands::*;
