//! 시장 데이터 조회.
//!
//! 이 crate는 다음을 제공합니다:
//! - 종가 시계열 제공자 trait (`PriceProvider`)
//! - Yahoo Finance 차트 API 기반 제공자
//! - 파일/메모리 기반 제공자 (오프라인 실행 및 테스트용)

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{InMemoryPriceProvider, PriceProvider, YahooChartProvider};
