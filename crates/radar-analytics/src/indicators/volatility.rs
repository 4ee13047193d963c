//! 변동성 지표.

use super::{IndicatorError, IndicatorResult};

/// 실현 변동성 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealizedVolParams {
    /// 표준편차를 구할 수익률 개수
    pub window: usize,
}

impl Default for RealizedVolParams {
    fn default() -> Self {
        Self { window: 14 }
    }
}

/// 일간 수익률 `c[i] / c[i-1] - 1`.
///
/// 결과 길이는 입력보다 1 짧습니다.
pub fn pct_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// 최근 `window`개 일간 수익률의 표본 표준편차 (n-1).
///
/// 소수 단위로 반환합니다 (0.02 = 2%).
pub fn realized_volatility(prices: &[f64], params: RealizedVolParams) -> IndicatorResult<f64> {
    let window = params.window;

    if window < 2 {
        return Err(IndicatorError::InvalidParameter(
            "표본 표준편차에는 2개 이상의 수익률이 필요합니다".to_string(),
        ));
    }

    let returns = pct_returns(prices);
    if returns.len() < window {
        return Err(IndicatorError::InsufficientData {
            required: window + 1,
            provided: prices.len(),
        });
    }

    let recent = &returns[returns.len() - window..];
    let n = recent.len() as f64;
    let mean = recent.iter().sum::<f64>() / n;
    let variance = recent.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_returns() {
        let returns = pct_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.10).abs() < 1e-12);
        assert!((returns[1] + 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_constant_series_has_zero_vol() {
        let prices = vec![100.0; 30];
        let vol = realized_volatility(&prices, RealizedVolParams::default()).unwrap();
        assert_eq!(vol, 0.0);
    }

    #[test]
    fn test_alternating_returns() {
        // +1%, -1% 반복 (최근 14개 중 7개씩)
        let mut prices = vec![100.0];
        for i in 0..20 {
            let last = *prices.last().unwrap();
            let r = if i % 2 == 0 { 0.01 } else { -0.01 };
            prices.push(last * (1.0 + r));
        }

        let vol = realized_volatility(&prices, RealizedVolParams::default()).unwrap();
        // 평균 0, 편차 제곱합 14 * 0.0001, / 13
        let expected = (14.0 * 0.0001f64 / 13.0).sqrt();
        assert!((vol - expected).abs() < 1e-9);
    }

    #[test]
    fn test_only_recent_window_counts() {
        // 초반의 큰 변동은 최근 14개 수익률 밖에 있음
        let mut prices = vec![100.0, 150.0, 80.0];
        prices.extend(std::iter::repeat(80.0).take(20));

        let vol = realized_volatility(&prices, RealizedVolParams::default()).unwrap();
        assert_eq!(vol, 0.0);
    }

    #[test]
    fn test_insufficient_data() {
        let prices = vec![100.0; 14];
        assert_eq!(
            realized_volatility(&prices, RealizedVolParams::default()).unwrap_err(),
            IndicatorError::InsufficientData {
                required: 15,
                provided: 14
            }
        );
    }
}
