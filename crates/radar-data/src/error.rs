//! 데이터 모듈 오류 타입.

use radar_core::RadarError;
use thiserror::Error;

/// 데이터 조회 오류.
///
/// 모든 변형은 실패한 티커를 포함합니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 요청 실패 (연결, 타임아웃 등)
    #[error("HTTP request for {ticker} failed: {source}")]
    Http {
        ticker: String,
        #[source]
        source: reqwest::Error,
    },

    /// 제공자가 에러 응답을 반환함
    #[error("API error for {ticker}: {message}")]
    Api { ticker: String, message: String },

    /// 응답 파싱 실패
    #[error("Parse error for {ticker}: {message}")]
    Parse { ticker: String, message: String },

    /// 사용 가능한 종가가 없음
    #[error("no usable price data for {ticker}")]
    NoUsableData { ticker: String },

    /// 잘못된 요청 구성 (URL 등)
    #[error("Invalid request for {ticker}: {message}")]
    InvalidRequest { ticker: String, message: String },
}

impl DataError {
    /// 실패한 티커.
    pub fn ticker(&self) -> &str {
        match self {
            DataError::Http { ticker, .. }
            | DataError::Api { ticker, .. }
            | DataError::Parse { ticker, .. }
            | DataError::NoUsableData { ticker }
            | DataError::InvalidRequest { ticker, .. } => ticker,
        }
    }
}

impl From<DataError> for RadarError {
    fn from(err: DataError) -> Self {
        let ticker = err.ticker().to_string();
        let reason = match &err {
            DataError::NoUsableData { .. } => "no observations after cleaning".to_string(),
            other => other.to_string(),
        };
        RadarError::data_unavailable(ticker, reason)
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
