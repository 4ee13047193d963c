//! CLI 명령어 구현 모듈.

pub mod config;
pub mod macro_scan;
pub mod output;
pub mod run;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// `YYYY-MM-DD` 형식의 날짜를 파싱합니다.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
        );
        assert!(parse_date("14/03/2024").is_err());
    }
}
