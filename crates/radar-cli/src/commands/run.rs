//! 1회 배치 실행 명령.
//!
//! 데이터 조회 → 클래스 점수 → 종합 스냅샷 → 게이지/요약 파일 → 리포트 전송.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use radar_analytics::{RunOutcome, StressEngine};
use radar_core::RadarConfig;
use radar_data::{InMemoryPriceProvider, PriceProvider, YahooChartProvider};
use radar_notification::{
    build_dispatcher, dispatch_report, render_class_gauges, StressReport, SvgGaugeRenderer,
};

use super::output::write_snapshot;

/// 실행 옵션 (명령줄 오버라이드).
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 기준일 (None이면 오늘)
    pub today: Option<NaiveDate>,
    /// 게이지 렌더링 생략
    pub no_gauge: bool,
    /// 요약 파일 저장 생략
    pub no_save: bool,
    /// 리포트 전송 생략
    pub no_notify: bool,
    /// 네트워크 대신 사용할 종가 JSON 파일
    pub prices_file: Option<PathBuf>,
}

/// 실행 결과 요약.
#[derive(Debug)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// 기록된 요약 파일
    pub summary_path: Option<PathBuf>,
    /// 렌더링된 게이지
    pub gauges: Vec<PathBuf>,
    /// 리포트 전송 성공 여부 (전송하지 않았으면 None)
    pub dispatched: Option<bool>,
}

/// 종가 제공자를 생성합니다.
fn build_provider(config: &RadarConfig, options: &RunOptions) -> Result<Arc<dyn PriceProvider>> {
    match &options.prices_file {
        Some(path) => {
            let provider = InMemoryPriceProvider::from_json_file(path)
                .with_context(|| format!("Failed to load prices file {}", path.display()))?;
            info!(path = %path.display(), tickers = ?provider.tickers(), "Using offline prices");
            Ok(Arc::new(provider))
        }
        None => {
            let provider = YahooChartProvider::from_config(&config.data)
                .context("Failed to build HTTP client")?;
            Ok(Arc::new(provider))
        }
    }
}

/// 레이더를 1회 실행합니다.
pub async fn run_radar(config: RadarConfig, options: RunOptions) -> Result<RunSummary> {
    let today = options.today.unwrap_or_else(|| Local::now().date_naive());
    let provider = build_provider(&config, &options)?;

    let engine = StressEngine::new(provider, config);
    let outcome = engine
        .run(today, Local::now())
        .await
        .context("Stress radar run failed")?;

    let config = engine.config();
    let enabled = config.markets.enabled();
    let output_dir = PathBuf::from(&config.output.dir);

    let gauges = if config.output.render_gauge && !options.no_gauge {
        let renderer = SvgGaugeRenderer::new(&output_dir);
        render_class_gauges(&renderer, &outcome.snapshot, &enabled)
            .context("Failed to render gauges")?
    } else {
        Vec::new()
    };

    let summary_path = if config.output.save_output && !options.no_save {
        Some(write_snapshot(&output_dir, &outcome.snapshot).context("Failed to write snapshot")?)
    } else {
        None
    };

    println!("{}", outcome.snapshot.headline());

    let dispatched = if options.no_notify {
        None
    } else {
        match build_dispatcher(&config.notification) {
            Ok(Some(dispatcher)) => {
                let report =
                    StressReport::new(&outcome.snapshot, &enabled).with_gauges(gauges.clone());
                Some(dispatch_report(dispatcher.as_ref(), &report).await)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Report dispatcher unavailable");
                Some(false)
            }
        }
    };

    Ok(RunSummary {
        outcome,
        summary_path,
        gauges,
        dispatched,
    })
}
