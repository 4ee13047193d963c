//! 종가 시계열.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

/// 일별 종가 관측치.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 거래일
    pub date: NaiveDate,
    /// 종가
    pub close: f64,
}

/// 단일 종목의 종가 시계열.
///
/// # 불변 조건
///
/// - 날짜 오름차순, 중복 날짜 없음
/// - 모든 종가는 양의 유한값
/// - 최소 1개 이상의 관측치
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 원시 관측치에서 시계열을 생성합니다.
    ///
    /// 결측/비유한/0 이하 종가는 제거하고, 날짜순으로 정렬하며,
    /// 같은 날짜가 여러 번 나오면 마지막 관측치를 사용합니다.
    /// 정제 후 남은 값이 없으면 `DataUnavailable`을 반환합니다.
    pub fn new(
        ticker: impl Into<String>,
        observations: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> RadarResult<Self> {
        let ticker = ticker.into();

        let mut raw: Vec<PricePoint> = observations
            .into_iter()
            .filter(|(_, close)| close.is_finite() && *close > 0.0)
            .map(|(date, close)| PricePoint { date, close })
            .collect();

        // 안정 정렬이므로 같은 날짜 내에서는 입력 순서가 유지됨
        raw.sort_by_key(|p| p.date);

        let mut points: Vec<PricePoint> = Vec::with_capacity(raw.len());
        for point in raw {
            match points.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => points.push(point),
            }
        }

        if points.is_empty() {
            return Err(RadarError::data_unavailable(
                ticker,
                "series is empty after removing missing observations",
            ));
        }

        Ok(Self { ticker, points })
    }

    /// 시작일부터 하루 간격의 종가 목록으로 시계열을 생성합니다.
    pub fn from_closes(
        ticker: impl Into<String>,
        start: NaiveDate,
        closes: &[f64],
    ) -> RadarResult<Self> {
        let observations = closes
            .iter()
            .enumerate()
            .map(|(i, close)| (start + Duration::days(i as i64), *close));
        Self::new(ticker, observations)
    }

    /// 종목 심볼.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// 관측치 수 (항상 1 이상).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 항상 `false` (빈 시계열은 생성할 수 없음).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 전체 관측치.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 종가만 추출합니다.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// 가장 최근 관측치.
    pub fn latest(&self) -> PricePoint {
        self.points[self.points.len() - 1]
    }

    /// 가장 최근 종가.
    pub fn latest_close(&self) -> f64 {
        self.latest().close
    }
}
