//! 스트레스 레이더의 에러 타입.
//!
//! 이 모듈은 레이더 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 레이더 에러.
#[derive(Debug, Error)]
pub enum RadarError {
    /// 가격 데이터를 가져올 수 없거나 정제 후 남은 값이 없음
    #[error("no usable price data for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    /// 설정 로드/검증 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 활성화된 모든 시장 클래스의 계산이 실패함
    #[error("집계할 시장 점수가 없습니다 (활성화된 모든 클래스가 실패)")]
    NoClassScores,

    /// 파일 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 레이더 작업을 위한 Result 타입.
pub type RadarResult<T> = Result<T, RadarError>;

impl RadarError {
    /// 특정 티커에 대한 데이터 부재 에러를 생성합니다.
    pub fn data_unavailable(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }

    /// 단일 시장 클래스에만 영향을 주는 에러인지 확인합니다.
    ///
    /// 클래스 단위 에러는 다른 클래스의 계산을 중단시키지 않습니다.
    pub fn is_class_scoped(&self) -> bool {
        matches!(self, RadarError::DataUnavailable { .. })
    }
}

impl From<serde_json::Error> for RadarError {
    fn from(err: serde_json::Error) -> Self {
        RadarError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for RadarError {
    fn from(err: std::io::Error) -> Self {
        RadarError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for RadarError {
    fn from(err: config::ConfigError) -> Self {
        RadarError::Config(err.to_string())
    }
}
