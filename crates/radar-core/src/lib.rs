//! # Radar Core
//!
//! 시장 스트레스 레이더의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 0~100 범위로 고정된 점수 타입 (`Score`)
//! - 상태 밴드 (`StatusLabel`)
//! - 가격 시계열 및 매크로 이벤트
//! - 실행 결과 스냅샷
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
