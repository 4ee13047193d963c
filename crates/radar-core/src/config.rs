//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//!
//! 설정은 두 단계로 처리됩니다:
//! 1. [`RadarConfig::load`] - 기본값 → TOML 파일(선택) → 환경 변수 순으로 병합
//! 2. [`RadarConfig::validate`] - 값 검증, 실패 시 `RadarError::Config`
//!
//! 설정 파일이 없어도 에러가 아닙니다. `RadarConfig::default()`는 그 자체로
//! 완전하고 유효한 설정입니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RadarError, RadarResult};
use crate::types::MarketClass;

/// 명시적 경로가 없을 때 찾는 설정 파일 (확장자 생략).
pub const DEFAULT_CONFIG_FILE: &str = "config/radar";

/// 환경 변수 접두사 (`RADAR__WEIGHTS__EQUITIES=0.7`).
pub const ENV_PREFIX: &str = "RADAR";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RadarConfig {
    /// 시장 클래스 활성화
    pub markets: MarketsConfig,
    /// 클래스별 가중치
    pub weights: WeightsConfig,
    /// 데이터 조회 설정
    pub data: DataConfig,
    /// 조회 티커
    pub tickers: TickersConfig,
    /// 출력 설정
    pub output: OutputConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 알림 설정
    pub notification: NotificationConfig,
}

/// 시장 클래스 활성화 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketsConfig {
    /// 주식 점수 계산 여부
    pub equities: bool,
    /// 암호화폐 점수 계산 여부
    pub crypto: bool,
}

impl Default for MarketsConfig {
    fn default() -> Self {
        Self {
            equities: true,
            crypto: true,
        }
    }
}

impl MarketsConfig {
    /// 클래스 활성화 여부.
    pub fn is_enabled(&self, class: MarketClass) -> bool {
        match class {
            MarketClass::Equities => self.equities,
            MarketClass::Crypto => self.crypto,
        }
    }

    /// 활성화된 클래스 목록.
    pub fn enabled(&self) -> Vec<MarketClass> {
        MarketClass::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }
}

/// 종합 점수 가중치.
///
/// 합이 1일 필요는 없지만 보통 1로 맞춥니다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeightsConfig {
    /// 주식 가중치
    pub equities: f64,
    /// 암호화폐 가중치
    pub crypto: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            equities: 0.6,
            crypto: 0.4,
        }
    }
}

impl WeightsConfig {
    /// 클래스 가중치.
    pub fn for_class(&self, class: MarketClass) -> f64 {
        match class {
            MarketClass::Equities => self.equities,
            MarketClass::Crypto => self.crypto,
        }
    }
}

/// 데이터 조회 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// 조회 기간 (일)
    pub lookback_days: u32,
    /// HTTP 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 시세 API 기본 URL
    pub base_url: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            lookback_days: 180,
            request_timeout_secs: 30,
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }
}

/// 지표별 조회 티커.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TickersConfig {
    /// 변동성 지수
    pub volatility: String,
    /// 주식 벤치마크
    pub equity_benchmark: String,
    /// 장기 금리 프록시
    pub rate_proxy: String,
    /// 달러 인덱스
    pub dollar_index: String,
    /// 암호화폐 벤치마크
    pub crypto_benchmark: String,
}

impl Default for TickersConfig {
    fn default() -> Self {
        Self {
            volatility: "^VIX".to_string(),
            equity_benchmark: "^GSPC".to_string(),
            rate_proxy: "^TNX".to_string(),
            dollar_index: "DX-Y.NYB".to_string(),
            crypto_benchmark: "BTC-USD".to_string(),
        }
    }
}

impl TickersConfig {
    /// 클래스 계산에 필요한 티커 목록.
    pub fn for_class(&self, class: MarketClass) -> Vec<&str> {
        match class {
            MarketClass::Equities => vec![
                self.volatility.as_str(),
                self.equity_benchmark.as_str(),
                self.rate_proxy.as_str(),
                self.dollar_index.as_str(),
            ],
            MarketClass::Crypto => vec![self.crypto_benchmark.as_str()],
        }
    }
}

/// 출력 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 출력 디렉토리
    pub dir: String,
    /// 게이지 이미지 생성 여부
    pub render_gauge: bool,
    /// 요약 파일 저장 여부
    pub save_output: bool,
    /// 상세 로그 여부 (false면 warn 이상만)
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            render_gauge: true,
            save_output: true,
            verbose: true,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 리포트 전송 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// 전송하지 않음
    #[default]
    None,
    /// 텔레그램 봇
    Telegram,
    /// 디스코드 웹훅
    Discord,
    /// SMTP (STARTTLS + 로그인)
    Smtp,
}

/// 알림 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// 전송 방식
    pub mode: DispatchMode,
    /// 제목 접두사
    pub subject_prefix: String,
    /// 텔레그램 설정
    pub telegram: TelegramConfig,
    /// 디스코드 설정
    pub discord: DiscordConfig,
    /// 이메일 설정
    pub email: EmailConfig,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::None,
            subject_prefix: "Market Stress Radar".to_string(),
            telegram: TelegramConfig::default(),
            discord: DiscordConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

/// 텔레그램 알림 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// 봇 토큰
    pub bot_token: String,
    /// 채팅 ID
    pub chat_id: String,
}

/// 디스코드 알림 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// 웹훅 URL
    pub webhook_url: String,
}

/// 이메일(SMTP) 설정.
///
/// 비밀번호는 설정 파일 대신 `RADAR__NOTIFICATION__EMAIL__PASSWORD`로 주입하는 것을 권장합니다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// SMTP 서버 호스트
    pub host: String,
    /// SMTP 서버 포트 (STARTTLS)
    pub port: u16,
    /// 발신자 주소 (로그인 계정)
    pub sender: String,
    /// 로그인 비밀번호 (앱 비밀번호)
    pub password: String,
    /// 수신자 목록
    pub recipients: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            sender: String::new(),
            password: String::new(),
            recipients: Vec::new(),
        }
    }
}

impl RadarConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// `path`가 주어지면 해당 파일은 반드시 존재해야 합니다.
    /// 주어지지 않으면 `config/radar.{toml,..}`을 찾되 없어도 무방합니다.
    pub fn load(path: Option<&Path>) -> RadarResult<Self> {
        let env = config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("notification.email.recipients")
            .try_parsing(true);

        Self::load_with_env(path, env)
    }

    /// 환경 변수 소스를 지정하여 설정을 로드합니다.
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> RadarResult<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        let loaded: RadarConfig = settings.try_deserialize()?;
        Ok(loaded)
    }

    /// 설정 값을 검증합니다.
    pub fn validate(&self) -> RadarResult<()> {
        let enabled = self.markets.enabled();
        if enabled.is_empty() {
            return Err(RadarError::Config(
                "at least one market (equities, crypto) must be enabled".to_string(),
            ));
        }

        for (name, weight) in [
            ("weights.equities", self.weights.equities),
            ("weights.crypto", self.weights.crypto),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RadarError::Config(format!(
                    "{name} must be a finite, non-negative number (got {weight})"
                )));
            }
        }

        for class in &enabled {
            if self.weights.for_class(*class) <= 0.0 {
                return Err(RadarError::Config(format!(
                    "{class} is enabled but its weight is zero"
                )));
            }
            if self.tickers.for_class(*class).iter().any(|t| t.trim().is_empty()) {
                return Err(RadarError::Config(format!(
                    "{class} is enabled but one of its tickers is empty"
                )));
            }
        }

        if self.data.lookback_days == 0 {
            return Err(RadarError::Config(
                "data.lookback_days must be at least 1".to_string(),
            ));
        }

        if self.data.request_timeout_secs == 0 {
            return Err(RadarError::Config(
                "data.request_timeout_secs must be at least 1".to_string(),
            ));
        }

        self.validate_notification()
    }

    fn validate_notification(&self) -> RadarResult<()> {
        let n = &self.notification;
        match n.mode {
            DispatchMode::None => Ok(()),
            DispatchMode::Telegram => {
                if n.telegram.bot_token.is_empty() || n.telegram.chat_id.is_empty() {
                    return Err(RadarError::Config(
                        "telegram mode requires notification.telegram.bot_token and chat_id"
                            .to_string(),
                    ));
                }
                Ok(())
            }
            DispatchMode::Discord => {
                if n.discord.webhook_url.is_empty() {
                    return Err(RadarError::Config(
                        "discord mode requires notification.discord.webhook_url".to_string(),
                    ));
                }
                Ok(())
            }
            DispatchMode::Smtp => {
                if n.email.host.is_empty() || n.email.port == 0 {
                    return Err(RadarError::Config(
                        "smtp mode requires notification.email.host and port".to_string(),
                    ));
                }
                if n.email.sender.is_empty() || n.email.password.is_empty() {
                    return Err(RadarError::Config(
                        "smtp mode requires notification.email.sender and password".to_string(),
                    ));
                }
                if n.email.recipients.is_empty() {
                    return Err(RadarError::Config(
                        "smtp mode requires at least one notification.email.recipients entry"
                            .to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// 로드 후 검증까지 수행합니다.
    pub fn load_validated(path: Option<&Path>) -> RadarResult<Self> {
        let loaded = Self::load(path)?;
        loaded.validate()?;
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_defaults_are_valid() {
        let cfg = RadarConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.markets.equities && cfg.markets.crypto);
        assert_eq!(cfg.weights.equities, 0.6);
        assert_eq!(cfg.weights.crypto, 0.4);
        assert_eq!(cfg.data.lookback_days, 180);
        assert_eq!(cfg.notification.mode, DispatchMode::None);
        assert_eq!(cfg.output.dir, "output");
    }

    #[test]
    fn test_missing_optional_file_yields_defaults() {
        let cfg = RadarConfig::load_with_env(None, env_from(&[])).unwrap();
        assert_eq!(cfg, RadarConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = RadarConfig::load_with_env(
            Some(Path::new("/nonexistent/radar.toml")),
            env_from(&[]),
        );
        assert!(matches!(result, Err(RadarError::Config(_))));
    }

    #[test]
    fn test_file_then_env_layering() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[markets]\ncrypto = false\n\n[weights]\nequities = 1.0\n\n[data]\nlookback_days = 90\n"
        )
        .unwrap();

        let cfg = RadarConfig::load_with_env(
            Some(file.path()),
            env_from(&[("RADAR__DATA__LOOKBACK_DAYS", "120")]),
        )
        .unwrap();

        assert!(!cfg.markets.crypto);
        assert!(cfg.markets.equities);
        assert_eq!(cfg.weights.equities, 1.0);
        // 파일에 없는 키는 기본값 유지
        assert_eq!(cfg.weights.crypto, 0.4);
        // 환경 변수가 파일보다 우선
        assert_eq!(cfg.data.lookback_days, 120);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_all_disabled() {
        let mut cfg = RadarConfig::default();
        cfg.markets.equities = false;
        cfg.markets.crypto = false;
        assert!(matches!(cfg.validate(), Err(RadarError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let mut cfg = RadarConfig::default();
        cfg.weights.crypto = -0.1;
        assert!(cfg.validate().is_err());

        let mut cfg = RadarConfig::default();
        cfg.weights.equities = f64::NAN;
        assert!(cfg.validate().is_err());

        // 비활성 클래스의 가중치 0은 허용
        let mut cfg = RadarConfig::default();
        cfg.markets.crypto = false;
        cfg.weights.crypto = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_lookback() {
        let mut cfg = RadarConfig::default();
        cfg.data.lookback_days = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_notification_modes() {
        let mut cfg = RadarConfig::default();
        cfg.notification.mode = DispatchMode::Telegram;
        assert!(cfg.validate().is_err());
        cfg.notification.telegram.bot_token = "token".to_string();
        cfg.notification.telegram.chat_id = "42".to_string();
        assert!(cfg.validate().is_ok());

        let mut cfg = RadarConfig::default();
        cfg.notification.mode = DispatchMode::Smtp;
        cfg.notification.email.sender = "radar@example.com".to_string();
        assert!(cfg.validate().is_err());
        cfg.notification.email.password = "app-password".to_string();
        assert!(cfg.validate().is_err());
        cfg.notification.email.recipients = vec!["ops@example.com".to_string()];
        assert!(cfg.validate().is_ok());
        cfg.notification.email.host.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_smtp_settings_from_env() {
        let cfg = RadarConfig::load_with_env(
            None,
            env_from(&[
                ("RADAR__NOTIFICATION__MODE", "smtp"),
                ("RADAR__NOTIFICATION__EMAIL__PORT", "2525"),
                ("RADAR__NOTIFICATION__EMAIL__PASSWORD", "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.notification.mode, DispatchMode::Smtp);
        assert_eq!(cfg.notification.email.host, "smtp.gmail.com");
        assert_eq!(cfg.notification.email.port, 2525);
        assert_eq!(cfg.notification.email.password, "secret");
    }

    #[test]
    fn test_enabled_classes() {
        let mut markets = MarketsConfig::default();
        assert_eq!(markets.enabled(), vec![MarketClass::Equities, MarketClass::Crypto]);
        markets.equities = false;
        assert_eq!(markets.enabled(), vec![MarketClass::Crypto]);
    }
}
