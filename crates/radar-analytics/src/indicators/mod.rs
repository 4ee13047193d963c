//! 기술적 지표 모듈.
//!
//! 스트레스 점수에 필요한 두 가지 롤링 지표만 제공합니다.
//!
//! ## 추세 지표
//! - **SMA**: 단순 이동평균, 최신 종가와 후행 평균 비교
//!
//! ## 변동성 지표
//! - **실현 변동성**: 일간 수익률의 표본 표준편차

pub mod trend;
pub mod volatility;

use thiserror::Error;

pub use trend::{is_below_trailing_mean, sma, SmaParams};
pub use volatility::{pct_returns, realized_volatility, RealizedVolParams};

/// 지표 계산 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;
