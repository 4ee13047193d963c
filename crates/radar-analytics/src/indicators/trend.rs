//! 추세 지표.

use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmaParams {
    /// 이동평균 기간
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 50 }
    }
}

/// 단순 이동평균 (SMA) 계산.
///
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// # 반환
/// 각 시점의 SMA 값 (처음 period-1개는 None)
pub fn sma(prices: &[f64], params: SmaParams) -> IndicatorResult<Vec<Option<f64>>> {
    let period = params.period;

    if period == 0 {
        return Err(IndicatorError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }

    if prices.len() < period {
        return Err(IndicatorError::InsufficientData {
            required: period,
            provided: prices.len(),
        });
    }

    let mut result = Vec::with_capacity(prices.len());
    let mut sum: f64 = prices[..period - 1].iter().sum();
    result.extend(std::iter::repeat(None).take(period - 1));

    for i in period - 1..prices.len() {
        sum += prices[i];
        result.push(Some(sum / period as f64));
        sum -= prices[i + 1 - period];
    }

    Ok(result)
}

/// 최신 종가가 자신을 포함한 후행 `period`개 평균보다 낮은지 여부.
pub fn is_below_trailing_mean(prices: &[f64], params: SmaParams) -> IndicatorResult<bool> {
    let averages = sma(prices, params)?;

    match (prices.last(), averages.last().copied().flatten()) {
        (Some(latest), Some(mean)) => Ok(*latest < mean),
        _ => Err(IndicatorError::InsufficientData {
            required: params.period,
            provided: prices.len(),
        }),
    }
}
