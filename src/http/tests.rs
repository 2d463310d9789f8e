//! Tests for the wallet service HTTP client

use super::*;
use crate::auth::{AuthConfig, Location};
use crate::error::Error;
use crate::types::BackoffType;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HISTORY: &str = "/v1/txhistory/";

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        backoff_type: BackoffType::Constant,
        initial_backoff: Duration::from_millis(5),
        max_backoff: Duration::from_millis(5),
    }
}

fn client(server: &MockServer, max_retries: u32) -> HttpClient {
    let config = HttpClientConfig {
        retry: fast_retry(max_retries),
        ..HttpClientConfig::new(server.uri())
    };
    HttpClient::with_auth(config, AuthConfig::None).unwrap()
}

fn page_query(skip: u64, limit: usize) -> [(&'static str, String); 2] {
    [("skip", skip.to_string()), ("limit", limit.to_string())]
}

// ============================================================================
// Retry policy
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = HttpClientConfig::new("https://bws.example.com/bws/api");

    assert_eq!(config.base_url, "https://bws.example.com/bws/api");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.retry, RetryPolicy::default());
    assert_eq!(config.retry.max_retries, 3);
    assert!(config.rate_limit.is_none());
}

#[test_case(BackoffType::Constant, [100, 100, 100, 100] ; "constant")]
#[test_case(BackoffType::Linear, [100, 200, 300, 400] ; "linear")]
#[test_case(BackoffType::Exponential, [100, 200, 400, 800] ; "exponential")]
fn test_retry_delay(backoff_type: BackoffType, expected_ms: [u64; 4]) {
    let policy = RetryPolicy {
        backoff_type,
        ..RetryPolicy::default()
    };

    let delays: Vec<u64> = (0..4).map(|n| policy.delay(n).as_millis() as u64).collect();
    assert_eq!(delays, expected_ms);
}

#[test]
fn test_retry_delay_is_capped() {
    let policy = RetryPolicy {
        max_backoff: Duration::from_millis(250),
        ..RetryPolicy::default()
    };

    assert_eq!(policy.delay(2), Duration::from_millis(250));
    assert_eq!(policy.delay(40), Duration::from_millis(250));
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_history_page_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bws/api/v1/txhistory/"))
        .and(query_param("skip", "40"))
        .and(query_param("limit", "21"))
        .and(header("Authorization", "Bearer wallet-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"txid": "t9"}])))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::new(format!("{}/bws/api/", server.uri()));
    let client = HttpClient::with_auth(
        config,
        AuthConfig::Bearer {
            token: "wallet-secret".to_string(),
        },
    )
    .unwrap();

    let body: Value = client
        .get_json_with_query(HISTORY, &page_query(40, 21))
        .await
        .unwrap();
    assert_eq!(body, json!([{"txid": "t9"}]));
}

#[tokio::test]
async fn test_api_key_in_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/wallets/"))
        .and(query_param("key", "k-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wallet": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_auth(
        HttpClientConfig::new(server.uri()),
        AuthConfig::ApiKey {
            location: Location::Query,
            name: "key".to_string(),
            prefix: None,
            value: "k-123".to_string(),
        },
    )
    .unwrap();

    let status: Value = client.get_json("/v3/wallets/").await.unwrap();
    assert_eq!(status, json!({"wallet": {}}));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server, 0)
        .get_json::<Value>(HISTORY)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
    assert!(!err.is_retryable());
}

// ============================================================================
// Failures and retries
// ============================================================================

#[test_case(401 ; "unauthorized")]
#[test_case(403 ; "forbidden")]
#[test_case(404 ; "unknown wallet")]
#[tokio::test]
async fn test_access_failures_are_not_retried(status: u16) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/wallets/"))
        .respond_with(ResponseTemplate::new(status).set_body_string("denied"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 3)
        .get_json::<Value>("/v3/wallets/")
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status: got, body } => {
            assert_eq!(got, status);
            assert_eq!(body, "denied");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transient_status_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let body: Value = client(&server, 3)
        .get_json_with_query(HISTORY, &page_query(0, 10))
        .await
        .unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_retries_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server, 2)
        .get_json::<Value>(HISTORY)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MaxRetriesExceeded { max_retries: 2 }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_no_retries_keeps_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 0)
        .get_json::<Value>(HISTORY)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 502, ref body } if body == "upstream down"));
}

#[tokio::test]
async fn test_timeout_is_retried_then_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = HttpClientConfig {
        timeout: Duration::from_millis(50),
        retry: fast_retry(1),
        ..HttpClientConfig::new(server.uri())
    };
    let client = HttpClient::with_auth(config, AuthConfig::None).unwrap();

    let err = client.get_json::<Value>(HISTORY).await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_rate_limited_waits_for_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "1")
                .set_body_string("slow down"),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"txid": "t1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let started = std::time::Instant::now();
    let body: Value = client(&server, 2)
        .get_json_with_query(HISTORY, &page_query(0, 1))
        .await
        .unwrap();

    assert_eq!(body, json!([{"txid": "t1"}]));
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[test_case(Some("7"), 7 ; "header value")]
#[test_case(None, 60 ; "missing header")]
#[test_case(Some("Wed, 21 Oct 2015 07:28:00 GMT"), 60 ; "http date")]
#[tokio::test]
async fn test_rate_limited_without_retries(retry_after: Option<&str>, expected: u64) {
    let server = MockServer::start().await;

    let mut response = ResponseTemplate::new(429);
    if let Some(value) = retry_after {
        response = response.insert_header("retry-after", value);
    }
    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 0)
        .get_json::<Value>(HISTORY)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited { retry_after_seconds } if retry_after_seconds == expected
    ));
}

// ============================================================================
// Misc
// ============================================================================

#[test]
fn test_debug_hides_credentials() {
    let client = HttpClient::with_auth(
        HttpClientConfig::new("https://bws.example.com/"),
        AuthConfig::Basic {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        },
    )
    .unwrap();

    let debug = format!("{client:?}");
    assert!(debug.contains("https://bws.example.com"));
    assert!(debug.contains("basic"));
    assert!(!debug.contains("hunter2"));
}

#[tokio::test]
async fn test_rate_limited_client_still_serves_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&server)
        .await;

    let config = HttpClientConfig {
        rate_limit: Some(RateLimiterConfig::new(100, 10)),
        ..HttpClientConfig::new(server.uri())
    };
    let client = HttpClient::with_auth(config, AuthConfig::None).unwrap();

    for skip in [0, 10, 20] {
        let _: Value = client
            .get_json_with_query(HISTORY, &page_query(skip, 10))
            .await
            .unwrap();
    }
}
