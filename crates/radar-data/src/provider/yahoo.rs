//! Yahoo Finance 차트 API 제공자.
//!
//! `v8/finance/chart` 엔드포인트에서 일봉 종가를 조회합니다.
//! 조정 종가가 있으면 우선 사용하고, 없으면 원시 종가를 사용합니다.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use radar_core::{DataConfig, PriceSeries};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::PriceProvider;
use crate::error::{DataError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance API v8 응답 구조
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance 기반 종가 제공자.
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl YahooChartProvider {
    /// 새 제공자를 생성합니다.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// `[data]` 설정에서 제공자를 생성합니다.
    pub fn from_config(config: &DataConfig) -> std::result::Result<Self, reqwest::Error> {
        Self::new(config.base_url.clone(), config.request_timeout_secs)
    }

    /// 차트 요청 URL을 생성합니다. 티커는 경로 세그먼트로 인코딩됩니다 (`^VIX` → `%5EVIX`).
    fn chart_url(&self, ticker: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Url> {
        let raw = format!(
            "{}/v8/finance/chart/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(ticker)
        );

        let mut url = Url::parse(&raw).map_err(|e| DataError::InvalidRequest {
            ticker: ticker.to_string(),
            message: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("period1", &start.timestamp().to_string())
            .append_pair("period2", &end.timestamp().to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");

        Ok(url)
    }
}

#[async_trait]
impl PriceProvider for YahooChartProvider {
    #[instrument(skip(self), fields(provider = "yahoo"))]
    async fn fetch_closes(&self, ticker: &str, lookback_days: u32) -> Result<PriceSeries> {
        let end = Utc::now();
        let start = end - Duration::days(i64::from(lookback_days));
        let url = self.chart_url(ticker, start, end)?;

        debug!("Fetching from Yahoo Finance: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DataError::Http {
                ticker: ticker.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| DataError::Http {
            ticker: ticker.to_string(),
            source,
        })?;

        if !status.is_success() {
            // 404 등에서도 chart.error 본문이 오는 경우가 많음
            if let Ok(parsed) = serde_json::from_str::<ChartResponse>(&body) {
                if let Some(error) = parsed.chart.error {
                    return Err(DataError::Api {
                        ticker: ticker.to_string(),
                        message: format!("{} - {}", error.code, error.description),
                    });
                }
            }
            warn!(ticker, %status, "Yahoo Finance returned an error status");
            return Err(DataError::Api {
                ticker: ticker.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        debug!("Yahoo Finance response length: {} bytes", body.len());
        let series = parse_chart_response(ticker, &body)?;
        debug!(ticker, points = series.len(), "Fetched closes");
        Ok(series)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// 차트 API 응답 본문을 종가 시계열로 변환합니다.
pub fn parse_chart_response(ticker: &str, body: &str) -> Result<PriceSeries> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| DataError::Parse {
            ticker: ticker.to_string(),
            message: e.to_string(),
        })?;

    if let Some(error) = response.chart.error {
        return Err(DataError::Api {
            ticker: ticker.to_string(),
            message: format!("{} - {}", error.code, error.description),
        });
    }

    let no_data = || DataError::NoUsableData {
        ticker: ticker.to_string(),
    };

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(no_data)?;

    let timestamps = result.timestamp.unwrap_or_default();

    // 조정 종가 우선, 없으면 원시 종가
    let adj_closes = result
        .indicators
        .adj_close
        .and_then(|ac| ac.into_iter().next())
        .and_then(|ac| ac.adj_close);
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close);

    let column = adj_closes.or(closes).ok_or_else(no_data)?;

    let observations = timestamps
        .iter()
        .zip(column)
        .filter_map(|(ts, close)| {
            let close = close?;
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            Some((date, close))
        });

    PriceSeries::new(ticker, observations).map_err(|_| no_data())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-01-02, 2024-01-03, 2024-01-04 14:30 UTC
    const TS: [i64; 3] = [1_704_205_800, 1_704_292_200, 1_704_378_600];

    fn body(closes: &str, adj: Option<&str>) -> String {
        let adj = adj
            .map(|a| format!(r#","adjclose":[{{"adjclose":{a}}}]"#))
            .unwrap_or_default();
        format!(
            r#"{{"chart":{{"result":[{{"meta":{{"symbol":"^GSPC"}},"timestamp":[{},{},{}],
            "indicators":{{"quote":[{{"open":[1,1,1],"close":{closes}}}]{adj}}}}}],"error":null}}}}"#,
            TS[0], TS[1], TS[2]
        )
    }

    #[test]
    fn test_parse_prefers_adjusted_close() {
        let series =
            parse_chart_response("^GSPC", &body("[10.0,11.0,12.0]", Some("[9.5,10.5,11.5]")))
                .unwrap();
        assert_eq!(series.closes(), vec![9.5, 10.5, 11.5]);
        assert_eq!(
            series.latest().date,
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()
        );
    }

    #[test]
    fn test_parse_falls_back_to_raw_close_and_drops_nulls() {
        let series = parse_chart_response("^VIX", &body("[13.1,null,14.2]", None)).unwrap();
        assert_eq!(series.closes(), vec![13.1, 14.2]);
    }

    #[test]
    fn test_parse_all_null_is_no_usable_data() {
        let err = parse_chart_response("^TNX", &body("[null,null,null]", None)).unwrap_err();
        assert!(matches!(err, DataError::NoUsableData { ref ticker } if ticker == "^TNX"));
    }

    #[test]
    fn test_parse_error_object() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("NOPE", body).unwrap_err();
        match err {
            DataError::Api { ticker, message } => {
                assert_eq!(ticker, "NOPE");
                assert!(message.contains("delisted"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_result() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(
            parse_chart_response("X", body),
            Err(DataError::NoUsableData { .. })
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_chart_response("X", "<html>rate limited</html>"),
            Err(DataError::Parse { .. })
        ));
    }

    #[test]
    fn test_chart_url_keeps_unreserved_ticker() {
        let provider = YahooChartProvider::new("https://query1.finance.yahoo.com/", 5).unwrap();
        let end = DateTime::from_timestamp(TS[2], 0).unwrap();
        let start = DateTime::from_timestamp(TS[0], 0).unwrap();

        let url = provider.chart_url("DX-Y.NYB", start, end).unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/DX-Y.NYB");

        let url = provider.chart_url("KRW=X", start, end).unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/KRW%3DX");
    }

    #[test]
    fn test_chart_url_encodes_ticker() {
        let provider = YahooChartProvider::new("https://query1.finance.yahoo.com", 5).unwrap();
        let end = DateTime::from_timestamp(TS[2], 0).unwrap();
        let start = DateTime::from_timestamp(TS[0], 0).unwrap();
        let url = provider.chart_url("^VIX", start, end).unwrap();

        assert_eq!(url.path(), "/v8/finance/chart/%5EVIX");
        let query = url.query().unwrap();
        assert!(query.contains(&format!("period1={}", TS[0])));
        assert!(query.contains("interval=1d"));
    }
}
