//! Yahoo 차트 제공자 HTTP 통합 테스트
//!
//! mockito 서버를 Yahoo Finance 대신 사용합니다.

use mockito::Matcher;
use radar_data::{DataError, PriceProvider, YahooChartProvider};

const CHART_BODY: &str = r#"{
  "chart": {
    "result": [{
      "meta": {"symbol": "^VIX", "currency": "USD"},
      "timestamp": [1704205800, 1704292200, 1704378600],
      "indicators": {
        "quote": [{"close": [13.2, null, 14.1]}]
      }
    }],
    "error": null
  }
}"#;

#[tokio::test]
async fn test_fetch_closes_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v8/finance/chart/%5EVIX".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("interval".into(), "1d".into()),
            Matcher::UrlEncoded("events".into(), "history".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CHART_BODY)
        .create_async()
        .await;

    let provider = YahooChartProvider::new(server.url(), 5).unwrap();
    let series = provider.fetch_closes("^VIX", 30).await.unwrap();

    assert_eq!(series.ticker(), "^VIX");
    assert_eq!(series.closes(), vec![13.2, 14.1]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_closes_not_found_reports_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/v8/finance/chart/NOPE".to_string()))
        .with_status(404)
        .with_body(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        )
        .create_async()
        .await;

    let provider = YahooChartProvider::new(server.url(), 5).unwrap();
    let err = provider.fetch_closes("NOPE", 30).await.unwrap_err();

    match err {
        DataError::Api { ticker, message } => {
            assert_eq!(ticker, "NOPE");
            assert!(message.contains("Not Found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_closes_server_error_without_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let provider = YahooChartProvider::new(server.url(), 5).unwrap();
    let err = provider.fetch_closes("BTC-USD", 30).await.unwrap_err();

    assert_eq!(err.ticker(), "BTC-USD");
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_fetch_closes_connection_refused_is_transport_error() {
    // 바인딩 후 즉시 닫아 사용되지 않는 포트를 얻음
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = YahooChartProvider::new(format!("http://{addr}"), 2).unwrap();
    let err = provider.fetch_closes("^GSPC", 30).await.unwrap_err();

    assert!(matches!(err, DataError::Http { .. }));
    assert_eq!(err.ticker(), "^GSPC");
}
