//! 유효 설정 출력 명령.

use std::path::Path;

use anyhow::{Context, Result};

use radar_core::RadarConfig;

/// 설정을 로드·검증하고 TOML 문자열로 반환합니다.
pub fn render_effective_config(path: Option<&Path>) -> Result<String> {
    let config = RadarConfig::load_validated(path).context("Failed to load configuration")?;
    toml::to_string_pretty(&config).context("Failed to serialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_effective_config_round_trips() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[weights]\nequities = 0.7\ncrypto = 0.3").unwrap();

        let rendered = render_effective_config(Some(file.path())).unwrap();
        let parsed: RadarConfig = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed.weights.equities, 0.7);
        assert_eq!(parsed.tickers.volatility, "^VIX");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(render_effective_config(Some(Path::new("/nonexistent/radar.toml"))).is_err());
    }
}
