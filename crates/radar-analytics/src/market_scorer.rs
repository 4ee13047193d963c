//! 시장 클래스 스트레스 점수 계산기.
//!
//! 원시 지표를 보정 테이블로 정규화한 뒤 가중 합산하여 클래스 점수(0~100)를
//! 산출합니다.
//!
//! # 주식 (가중치 합계 = 1.0)
//!
//! 1. **변동성 (^VIX)**: 0.30 - `(vix - 12) × 4`
//! 2. **추세 (^GSPC)**: 0.20 - 50일 평균 아래 60, 아니면 25
//! 3. **금리 (^TNX)**: 0.20 - `(tnx - 40) × 2`
//! 4. **달러 (DX-Y.NYB)**: 0.15 - `(dxy - 100) × 1.5`
//! 5. **매크로**: 0.15 - 매크로 스캐너 점수
//!
//! # 암호화폐
//!
//! `실현 변동성(%) × 1.2 + 추세(60 / 30)`. 매크로는 반영하지 않습니다.
//!
//! 롤링 윈도우에 필요한 데이터가 부족해도 에러가 아닙니다. 추세는 "평균 아래 아님"으로
//! 읽고, 실현 변동성을 계산할 수 없는 암호화폐 점수는 100(최대 스트레스)이 됩니다.
//! 두 경우 모두 경고 로그를 남깁니다.

use serde::Serialize;
use tracing::{debug, warn};

use radar_core::{ClassScore, MacroReading, MarketClass, PriceSeries, Score};

use crate::indicators::{is_below_trailing_mean, realized_volatility, RealizedVolParams, SmaParams};
use crate::normalizer::normalize;

/// 선형 정규화 지표 보정값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorCalibration {
    /// 0점이 되는 원시 값
    pub offset: f64,
    /// 원시 단위당 점수
    pub scale: f64,
    /// 클래스 점수 내 가중치
    pub weight: f64,
}

impl IndicatorCalibration {
    /// 원시 값을 서브 점수로 변환합니다.
    pub fn sub_score(&self, raw: f64) -> Score {
        normalize(raw, self.offset, self.scale)
    }
}

/// 이동평균 대비 추세 보정값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendCalibration {
    /// 이동평균 기간
    pub window: usize,
    /// 최신 종가가 평균 아래일 때 점수
    pub below_score: f64,
    /// 그 외 점수
    pub above_score: f64,
    /// 클래스 점수 내 가중치
    pub weight: f64,
}

impl TrendCalibration {
    /// 시계열의 추세 서브 점수.
    ///
    /// 윈도우보다 짧은 시계열은 "평균 아래 아님"으로 처리합니다.
    pub fn sub_score(&self, series: &PriceSeries) -> Score {
        let below = match is_below_trailing_mean(
            &series.closes(),
            SmaParams {
                period: self.window,
            },
        ) {
            Ok(below) => below,
            Err(e) => {
                warn!(
                    ticker = series.ticker(),
                    window = self.window,
                    error = %e,
                    "Trend window not filled, treating as not below mean"
                );
                false
            }
        };

        Score::clamped(if below {
            self.below_score
        } else {
            self.above_score
        })
    }
}

/// 주식 클래스 보정 테이블.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquitiesCalibration {
    /// 변동성 지수 (VIX)
    pub volatility: IndicatorCalibration,
    /// 벤치마크 추세
    pub trend: TrendCalibration,
    /// 금리 프록시
    pub rate: IndicatorCalibration,
    /// 달러 인덱스
    pub dollar: IndicatorCalibration,
    /// 매크로 점수 가중치
    pub macro_weight: f64,
}

impl Default for EquitiesCalibration {
    fn default() -> Self {
        Self {
            volatility: IndicatorCalibration {
                offset: 12.0,
                scale: 4.0,
                weight: 0.30,
            },
            trend: TrendCalibration {
                window: 50,
                below_score: 60.0,
                above_score: 25.0,
                weight: 0.20,
            },
            rate: IndicatorCalibration {
                offset: 40.0,
                scale: 2.0,
                weight: 0.20,
            },
            dollar: IndicatorCalibration {
                offset: 100.0,
                scale: 1.5,
                weight: 0.15,
            },
            macro_weight: 0.15,
        }
    }
}

/// 암호화폐 클래스 보정 테이블.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CryptoCalibration {
    /// 실현 변동성 수익률 개수
    pub volatility_window: usize,
    /// 변동성(%) 승수
    pub volatility_multiplier: f64,
    /// 벤치마크 추세 (가산, weight는 1.0)
    pub trend: TrendCalibration,
}

impl Default for CryptoCalibration {
    fn default() -> Self {
        Self {
            volatility_window: 14,
            volatility_multiplier: 1.2,
            trend: TrendCalibration {
                window: 50,
                below_score: 60.0,
                above_score: 30.0,
                weight: 1.0,
            },
        }
    }
}

/// 주식 클래스 입력.
#[derive(Debug, Clone)]
pub struct EquitiesInputs {
    /// 최신 변동성 지수 값
    pub volatility: f64,
    /// 벤치마크 종가 시계열
    pub benchmark: PriceSeries,
    /// 최신 금리 프록시 값
    pub rate_proxy: f64,
    /// 최신 달러 인덱스 값
    pub dollar_index: f64,
    /// 매크로 스캔 결과
    pub macro_reading: MacroReading,
}

/// 주식 클래스 지표별 점수.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquitiesBreakdown {
    pub volatility: Score,
    pub trend: Score,
    pub rate: Score,
    pub dollar: Score,
    #[serde(rename = "macro")]
    pub macro_score: Score,
    pub composite: Score,
    /// 매크로 노트
    pub note: String,
}

impl EquitiesBreakdown {
    /// 매크로 노트를 포함한 클래스 점수.
    pub fn class_score(&self) -> ClassScore {
        ClassScore::new(MarketClass::Equities, self.composite).with_note(self.note.clone())
    }
}

/// 암호화폐 클래스 지표별 점수.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoBreakdown {
    /// 실현 변동성 (%), 데이터 부족 시 None
    pub realized_vol_pct: Option<f64>,
    pub trend: Score,
    pub composite: Score,
}

impl CryptoBreakdown {
    /// 클래스 점수.
    pub fn class_score(&self) -> ClassScore {
        ClassScore::new(MarketClass::Crypto, self.composite)
    }
}

/// 시장 클래스 점수 계산기.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketScorer {
    equities: EquitiesCalibration,
    crypto: CryptoCalibration,
}

impl MarketScorer {
    /// 주식 클래스 점수 계산.
    pub fn score_equities(&self, inputs: &EquitiesInputs) -> EquitiesBreakdown {
        let cal = &self.equities;

        let volatility = cal.volatility.sub_score(inputs.volatility);
        let trend = cal.trend.sub_score(&inputs.benchmark);
        let rate = cal.rate.sub_score(inputs.rate_proxy);
        let dollar = cal.dollar.sub_score(inputs.dollar_index);
        let macro_score = inputs.macro_reading.score;

        let composite = Score::clamped(
            cal.volatility.weight * volatility.value()
                + cal.trend.weight * trend.value()
                + cal.rate.weight * rate.value()
                + cal.dollar.weight * dollar.value()
                + cal.macro_weight * macro_score.value(),
        );

        debug!(
            %volatility,
            %trend,
            %rate,
            %dollar,
            macro_score = %macro_score,
            %composite,
            "Equities stress scored"
        );

        EquitiesBreakdown {
            volatility,
            trend,
            rate,
            dollar,
            macro_score,
            composite,
            note: inputs.macro_reading.note.clone(),
        }
    }

    /// 암호화폐 클래스 점수 계산.
    pub fn score_crypto(&self, benchmark: &PriceSeries) -> CryptoBreakdown {
        let cal = &self.crypto;

        let realized_vol_pct = match realized_volatility(
            &benchmark.closes(),
            RealizedVolParams {
                window: cal.volatility_window,
            },
        ) {
            Ok(vol) => Some(vol * 100.0),
            Err(e) => {
                warn!(
                    ticker = benchmark.ticker(),
                    window = cal.volatility_window,
                    error = %e,
                    "Volatility window not filled, crypto scored as maximum stress"
                );
                None
            }
        };

        let trend = cal.trend.sub_score(benchmark);
        // 변동성 미정은 NaN과 같이 취급: clamp 결과 100
        let composite = Score::clamped(
            realized_vol_pct.map_or(f64::NAN, |vol| vol * cal.volatility_multiplier)
                + cal.trend.weight * trend.value(),
        );

        debug!(?realized_vol_pct, %trend, %composite, "Crypto stress scored");

        CryptoBreakdown {
            realized_vol_pct,
            trend,
            composite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// 하락 후 횡보: 최신 종가가 50일 평균 아래.
    fn declining_then_flat() -> PriceSeries {
        let mut closes: Vec<f64> = (0..60).map(|i| 5000.0 - 10.0 * i as f64).collect();
        closes.extend(std::iter::repeat(4400.0).take(10));
        PriceSeries::from_closes("^GSPC", start(), &closes).unwrap()
    }

    fn rising() -> PriceSeries {
        let closes: Vec<f64> = (0..70).map(|i| 4000.0 + 10.0 * i as f64).collect();
        PriceSeries::from_closes("^GSPC", start(), &closes).unwrap()
    }

    fn macro_reading(score: f64) -> MacroReading {
        MacroReading {
            score: Score::clamped(score),
            note: "CPI this week.".to_string(),
            event: None,
            lead_days: Some(5),
        }
    }

    fn inputs(benchmark: PriceSeries) -> EquitiesInputs {
        EquitiesInputs {
            volatility: 20.0,
            benchmark,
            rate_proxy: 45.0,
            dollar_index: 102.0,
            macro_reading: macro_reading(40.0),
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let cal = EquitiesCalibration::default();
        let sum = cal.volatility.weight
            + cal.trend.weight
            + cal.rate.weight
            + cal.dollar.weight
            + cal.macro_weight;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equities_trend_below_mean() {
        let breakdown = MarketScorer::default().score_equities(&inputs(declining_then_flat()));
        assert_eq!(breakdown.trend.value(), 60.0);
    }

    #[test]
    fn test_equities_trend_rising() {
        let breakdown = MarketScorer::default().score_equities(&inputs(rising()));
        assert_eq!(breakdown.trend.value(), 25.0);
    }

    #[test]
    fn test_equities_end_to_end() {
        let breakdown = MarketScorer::default().score_equities(&inputs(declining_then_flat()));

        assert_eq!(breakdown.volatility.value(), 32.0);
        assert_eq!(breakdown.rate.value(), 10.0);
        assert!((breakdown.dollar.value() - 3.0).abs() < 1e-9);
        assert_eq!(breakdown.macro_score.value(), 40.0);

        // 9.6 + 12 + 2 + 0.45 + 6
        assert!((breakdown.composite.value() - 30.05).abs() < 1e-9);
        assert_eq!(breakdown.composite.status(), radar_core::StatusLabel::Elevated);

        let class = breakdown.class_score();
        assert_eq!(class.class, MarketClass::Equities);
        assert_eq!(class.note.as_deref(), Some("CPI this week."));
    }

    #[test]
    fn test_equities_short_benchmark_reads_not_below() {
        let short = PriceSeries::from_closes("^GSPC", start(), &[100.0, 90.0, 80.0]).unwrap();
        let breakdown = MarketScorer::default().score_equities(&inputs(short));
        assert_eq!(breakdown.trend.value(), 25.0);
    }

    #[test]
    fn test_equities_extreme_inputs_clamped() {
        let mut extreme = inputs(declining_then_flat());
        extreme.volatility = 90.0;
        extreme.rate_proxy = 200.0;
        extreme.dollar_index = 300.0;
        extreme.macro_reading = macro_reading(90.0);

        let breakdown = MarketScorer::default().score_equities(&extreme);
        assert!(breakdown.composite.value() <= 100.0);
        assert_eq!(breakdown.volatility, Score::MAX);
    }

    #[test]
    fn test_crypto_flat_rising_is_calm() {
        let closes: Vec<f64> = (0..70).map(|i| 40000.0 + i as f64).collect();
        let series = PriceSeries::from_closes("BTC-USD", start(), &closes).unwrap();

        let breakdown = MarketScorer::default().score_crypto(&series);
        assert_eq!(breakdown.trend.value(), 30.0);
        assert!(breakdown.realized_vol_pct.unwrap() < 0.01);
        assert!((breakdown.composite.value() - 30.0).abs() < 0.05);
    }

    #[test]
    fn test_crypto_volatile_decline() {
        // 하락 후 ±5% 진동
        let mut closes: Vec<f64> = (0..60).map(|i| 60000.0 - 200.0 * i as f64).collect();
        let mut last = *closes.last().unwrap();
        for i in 0..20 {
            last *= if i % 2 == 0 { 1.05 } else { 0.95 };
            closes.push(last);
        }
        let series = PriceSeries::from_closes("BTC-USD", start(), &closes).unwrap();

        let breakdown = MarketScorer::default().score_crypto(&series);
        assert_eq!(breakdown.trend.value(), 60.0);
        let vol = breakdown.realized_vol_pct.unwrap();
        assert!(vol > 4.0);
        let expected = vol * 1.2 + 60.0;
        assert!((breakdown.composite.value() - expected.min(100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_crypto_short_history_is_max_stress() {
        let series = PriceSeries::from_closes("BTC-USD", start(), &[100.0, 120.0, 80.0]).unwrap();
        let breakdown = MarketScorer::default().score_crypto(&series);

        assert_eq!(breakdown.realized_vol_pct, None);
        assert_eq!(breakdown.composite, Score::MAX);
        assert_eq!(breakdown.class_score().class, MarketClass::Crypto);
    }

    #[test]
    fn test_crypto_rising_series_below_vol_window_is_max_stress() {
        // 10개 종가 = 수익률 9개 < 14
        let closes: Vec<f64> = (0..10).map(|i| 40000.0 + 100.0 * i as f64).collect();
        let series = PriceSeries::from_closes("BTC-USD", start(), &closes).unwrap();
        let breakdown = MarketScorer::default().score_crypto(&series);

        assert_eq!(breakdown.trend.value(), 30.0);
        assert_eq!(breakdown.composite.value(), 100.0);
        assert_eq!(breakdown.composite.status(), radar_core::StatusLabel::Crisis);
    }

    #[test]
    fn test_crypto_fifteen_closes_fill_vol_window() {
        let closes: Vec<f64> = (0..15).map(|i| 40000.0 + i as f64).collect();
        let series = PriceSeries::from_closes("BTC-USD", start(), &closes).unwrap();
        let breakdown = MarketScorer::default().score_crypto(&series);

        assert!(breakdown.realized_vol_pct.is_some());
        assert!(breakdown.composite.value() < 31.0);
    }
}
