//! 스트레스 레이더 1회 실행 엔진.
//!
//! 활성화된 시장 클래스마다 데이터 조회와 점수 계산을 동시에 수행한 뒤
//! 종합 스냅샷을 생성합니다. 한 클래스의 실패는 다른 클래스를 취소하지 않으며,
//! 실패한 클래스는 노트로 기록되고 0점으로 집계됩니다.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate};
use tracing::{info, warn, Instrument};

use radar_core::{
    class_span, ClassScore, MacroReading, MarketClass, PriceSeries, RadarConfig, RadarError,
    RadarResult, Snapshot,
};
use radar_data::PriceProvider;

use crate::aggregator::aggregate;
use crate::macro_calendar::{MacroCalendar, MacroScanner};
use crate::market_scorer::{EquitiesBreakdown, EquitiesInputs, MarketScorer};

/// 실패한 시장 클래스.
#[derive(Debug)]
pub struct ClassFailure {
    pub class: MarketClass,
    pub error: RadarError,
}

impl ClassFailure {
    /// 스냅샷 노트 문구.
    pub fn note(&self) -> String {
        format!("{} unavailable: {}", self.class, self.error)
    }
}

/// 1회 실행 결과.
#[derive(Debug)]
pub struct RunOutcome {
    /// 종합 스냅샷
    pub snapshot: Snapshot,
    /// 계산에 성공한 클래스 점수
    pub classes: Vec<ClassScore>,
    /// 주식 클래스가 성공했을 때의 매크로 스캔 결과
    pub macro_reading: Option<MacroReading>,
    /// 실패한 클래스
    pub failures: Vec<ClassFailure>,
}

/// 스트레스 레이더 엔진.
pub struct StressEngine {
    provider: Arc<dyn PriceProvider>,
    scanner: MacroScanner,
    scorer: MarketScorer,
    config: RadarConfig,
}

impl StressEngine {
    /// 기본 캘린더와 보정 테이블로 엔진을 생성합니다.
    pub fn new(provider: Arc<dyn PriceProvider>, config: RadarConfig) -> Self {
        Self {
            provider,
            scanner: MacroScanner::default(),
            scorer: MarketScorer::default(),
            config,
        }
    }

    /// 매크로 캘린더를 교체합니다.
    pub fn with_calendar(mut self, calendar: impl MacroCalendar + 'static) -> Self {
        self.scanner = MacroScanner::new(calendar);
        self
    }

    /// 엔진 설정.
    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// 레이더를 1회 실행합니다.
    ///
    /// 활성화된 모든 클래스가 실패하면 `NoClassScores`를 반환합니다.
    pub async fn run(
        &self,
        today: NaiveDate,
        generated: DateTime<Local>,
    ) -> RadarResult<RunOutcome> {
        let markets = &self.config.markets;

        info!(
            provider = self.provider.name(),
            %today,
            equities = markets.equities,
            crypto = markets.crypto,
            "Starting stress radar run"
        );

        let equities = async {
            if !markets.equities {
                return None;
            }
            Some(
                self.run_equities(today)
                    .instrument(class_span!("equities_pipeline", MarketClass::Equities))
                    .await,
            )
        };

        let crypto = async {
            if !markets.crypto {
                return None;
            }
            Some(
                self.run_crypto()
                    .instrument(class_span!("crypto_pipeline", MarketClass::Crypto))
                    .await,
            )
        };

        let (equities, crypto) = tokio::join!(equities, crypto);

        let mut notes = Vec::new();
        let mut classes = Vec::new();
        let mut failures = Vec::new();
        let mut macro_reading = None;

        let equities_score = match settle(MarketClass::Equities, equities, &mut failures)? {
            Some((breakdown, reading)) => {
                notes.push(breakdown.note.clone());
                macro_reading = Some(reading);
                let class = breakdown.class_score();
                let score = class.score;
                classes.push(class);
                Some(score)
            }
            None => None,
        };

        let crypto_score = match settle(MarketClass::Crypto, crypto, &mut failures)? {
            Some(class) => {
                let score = class.score;
                classes.push(class);
                Some(score)
            }
            None => None,
        };

        for failure in &failures {
            warn!(class = %failure.class, error = %failure.error, "Market class failed");
            notes.push(failure.note());
        }

        let snapshot = aggregate(
            equities_score,
            crypto_score,
            &self.config.weights,
            notes,
            generated,
        )?;

        Ok(RunOutcome {
            snapshot,
            classes,
            macro_reading,
            failures,
        })
    }

    async fn run_equities(
        &self,
        today: NaiveDate,
    ) -> RadarResult<(EquitiesBreakdown, MacroReading)> {
        let tickers = &self.config.tickers;

        let (volatility, benchmark, rate_proxy, dollar_index) = futures::try_join!(
            self.fetch(&tickers.volatility),
            self.fetch(&tickers.equity_benchmark),
            self.fetch(&tickers.rate_proxy),
            self.fetch(&tickers.dollar_index),
        )?;

        let macro_reading = self.scanner.scan(today);

        let inputs = EquitiesInputs {
            volatility: volatility.latest_close(),
            benchmark,
            rate_proxy: rate_proxy.latest_close(),
            dollar_index: dollar_index.latest_close(),
            macro_reading: macro_reading.clone(),
        };

        let breakdown = self.scorer.score_equities(&inputs);
        info!(score = %breakdown.composite, note = %breakdown.note, "Equities scored");

        Ok((breakdown, macro_reading))
    }

    async fn run_crypto(&self) -> RadarResult<ClassScore> {
        let benchmark = self.fetch(&self.config.tickers.crypto_benchmark).await?;

        let breakdown = self.scorer.score_crypto(&benchmark);
        info!(score = %breakdown.composite, "Crypto scored");

        Ok(breakdown.class_score())
    }

    async fn fetch(&self, ticker: &str) -> RadarResult<PriceSeries> {
        let series = self
            .provider
            .fetch_closes(ticker, self.config.data.lookback_days)
            .await?;
        Ok(series)
    }
}

/// 클래스 파이프라인 결과를 정리합니다.
///
/// 클래스 단위 에러는 실패로 기록하고 `None`을 돌려주며, 그 외 에러는 실행을 중단합니다.
fn settle<T>(
    class: MarketClass,
    result: Option<RadarResult<T>>,
    failures: &mut Vec<ClassFailure>,
) -> RadarResult<Option<T>> {
    match result {
        Some(Ok(value)) => Ok(Some(value)),
        Some(Err(error)) if error.is_class_scoped() => {
            failures.push(ClassFailure { class, error });
            Ok(None)
        }
        Some(Err(error)) => Err(error),
        None => Ok(None),
    }
}
