//! 메모리/파일 기반 종가 제공자.
//!
//! 네트워크 없이 저장된 시계열로 점수를 재계산할 때 사용합니다.
//!
//! # 파일 형식
//!
//! ```json
//! {
//!   "^VIX": [{"date": "2024-01-02", "close": 13.2}, ...],
//!   "BTC-USD": [...]
//! }
//! ```

use async_trait::async_trait;
use chrono::Duration;
use radar_core::{PricePoint, PriceSeries};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::PriceProvider;
use crate::error::{DataError, Result};

/// 티커별 시계열을 메모리에 보관하는 제공자.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceProvider {
    series: HashMap<String, Vec<PricePoint>>,
}

impl InMemoryPriceProvider {
    /// 빈 제공자를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 시계열을 추가합니다.
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    /// 시계열을 추가하거나 교체합니다.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series
            .insert(series.ticker().to_string(), series.points().to_vec());
    }

    /// JSON 파일에서 제공자를 생성합니다.
    pub fn from_json_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let series: HashMap<String, Vec<PricePoint>> = serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Self { series })
    }

    /// 보관 중인 티커 목록.
    pub fn tickers(&self) -> Vec<&str> {
        let mut tickers: Vec<&str> = self.series.keys().map(String::as_str).collect();
        tickers.sort_unstable();
        tickers
    }
}

#[async_trait]
impl PriceProvider for InMemoryPriceProvider {
    async fn fetch_closes(&self, ticker: &str, lookback_days: u32) -> Result<PriceSeries> {
        let no_data = || DataError::NoUsableData {
            ticker: ticker.to_string(),
        };

        let points = self.series.get(ticker).ok_or_else(no_data)?;
        let series = PriceSeries::new(ticker, points.iter().map(|p| (p.date, p.close)))
            .map_err(|_| no_data())?;

        // 가장 최근 관측일 기준으로 조회 기간을 적용
        let cutoff = series.latest().date - Duration::days(i64::from(lookback_days));
        let windowed = PriceSeries::new(
            ticker,
            series
                .points()
                .iter()
                .filter(|p| p.date > cutoff)
                .map(|p| (p.date, p.close)),
        )
        .map_err(|_| no_data())?;

        debug!(ticker, points = windowed.len(), "Served closes from memory");
        Ok(windowed)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
