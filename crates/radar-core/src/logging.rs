//! tracing을 사용한 로깅 인프라.
//!
//! 배치 실행 한 번 동안의 구조화된 로그를 제공합니다:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 스케줄러/로그 수집기용 JSON 형식
//! - **compact**: 크론 메일 등에 적합한 한 줄 형식

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식
    #[default]
    Pretty,
    /// JSON 형식
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 초기화 옵션.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "radar_data=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_file: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 설정 파일의 `[logging]` 섹션과 `output.verbose`에서 생성합니다.
    ///
    /// verbose가 꺼져 있으면 레벨과 무관하게 warn 이상만 출력합니다.
    /// 알 수 없는 형식 문자열은 pretty로 처리합니다.
    pub fn from_settings(settings: &LoggingConfig, verbose: bool) -> Self {
        let level = if verbose {
            settings.level.clone()
        } else {
            "warn".to_string()
        };

        Self {
            level,
            format: settings.format.parse().unwrap_or_default(),
            ..Default::default()
        }
    }

    /// 환경 변수에서 설정을 생성합니다.
    pub fn from_env() -> Self {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            level,
            format,
            ..Default::default()
        }
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`가 설정되어 있으면 설정 파일의 레벨보다 우선합니다.
/// 로그는 stderr로 출력되어 stdout의 요약 출력과 섞이지 않습니다.
///
/// # 예제
///
/// ```no_run
/// use radar_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::new("debug").with_format(LogFormat::Json);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.with_file)
        .with_line_number(config.with_file)
        .with_target(config.with_target);

    let fmt_layer = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(
        format = ?config.format,
        level = %config.level,
        "Logging initialized"
    );

    Ok(())
}

/// 시장 클래스 컨텍스트 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! class_span {
    ($name:expr, $class:expr) => {
        tracing::info_span!($name, class = %$class)
    };
    ($name:expr, $class:expr, $ticker:expr) => {
        tracing::info_span!($name, class = %$class, ticker = %$ticker)
    };
}
