//! 시장 스트레스 레이더 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 1회 실행 (기본 명령)
//! radar
//! radar run --config config/radar.toml
//!
//! # 특정 기준일로 실행, 산출물/전송 생략
//! radar run --today 2024-03-13 --no-gauge --no-save --no-notify
//!
//! # 저장된 종가로 오프라인 실행
//! radar run --prices-file data/prices.json
//!
//! # 매크로 스캔 확인
//! radar macro --date 2024-03-14
//!
//! # 유효 설정 출력
//! radar config
//! ```

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use radar_cli::commands::config::render_effective_config;
use radar_cli::commands::macro_scan::{format_reading, scan_macro};
use radar_cli::commands::parse_date;
use radar_cli::commands::run::{run_radar, RunOptions};
use radar_core::logging::{init_logging, LogConfig};
use radar_core::RadarConfig;

#[derive(Parser)]
#[command(name = "radar")]
#[command(about = "Market Stress Radar - 주식/암호화폐 시장 스트레스 점수", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 레이더 1회 실행 (기본 명령)
    Run(RunArgs),

    /// 매크로 이벤트 스캔 결과 확인
    Macro {
        /// 기준일 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// 검증된 유효 설정을 TOML로 출력
    Config {
        /// 설정 파일 경로
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// 설정 파일 경로 (기본: config/radar.toml, 없어도 됨)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 기준일 (YYYY-MM-DD, 기본: 오늘)
    #[arg(long)]
    today: Option<String>,

    /// 게이지 렌더링 생략
    #[arg(long)]
    no_gauge: bool,

    /// 요약 파일 저장 생략
    #[arg(long)]
    no_save: bool,

    /// 리포트 전송 생략
    #[arg(long)]
    no_notify: bool,

    /// 네트워크 대신 사용할 종가 JSON 파일
    #[arg(long)]
    prices_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            let config = RadarConfig::load_validated(args.config.as_deref())?;

            init_logging(LogConfig::from_settings(
                &config.logging,
                config.output.verbose,
            ))
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

            let options = RunOptions {
                today: args.today.as_deref().map(parse_date).transpose()?,
                no_gauge: args.no_gauge,
                no_save: args.no_save,
                no_notify: args.no_notify,
                prices_file: args.prices_file,
            };

            info!(?options, "Starting run");

            match run_radar(config, options).await {
                Ok(summary) => {
                    info!(
                        overall = %summary.outcome.snapshot.overall(),
                        status = %summary.outcome.snapshot.status(),
                        failures = summary.outcome.failures.len(),
                        "Run completed"
                    );
                }
                Err(e) => {
                    error!("Run failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Macro { date } => {
            init_logging(LogConfig::from_env())
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            println!("{}", format_reading(date, &scan_macro(date)));
        }

        Commands::Config { config } => {
            init_logging(LogConfig::from_env())
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

            print!("{}", render_effective_config(config.as_deref())?);
        }
    }

    Ok(())
}
