/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - transport and authorization server endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use std::time::Duration;

use common::setup_mock_server;
use reqwest::StatusCode;
use siwe_fetch::{ClientConfig, FetchClient, FetchError};
use tokio_test::assert_ok;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(FetchClient::new());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig {
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        user_agent: Some("siwe-fetch-tests".to_string()),
    };
    let _client = assert_ok!(FetchClient::with_config(config));
}

#[tokio::test]
async fn test_execute_sends_once_and_keeps_headers() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FetchClient::from_client(reqwest::Client::new());
    let request = client
        .http_client()
        .get(format!("{}/health", server.uri()))
        .header("x-trace", "abc")
        .build()
        .unwrap();

    let response = assert_ok!(client.execute(request).await);
    assert!(response.status().is_success());

    let body: serde_json::Value = assert_ok!(response.json().await);
    assert_eq!(body.get("status").and_then(|value| value.as_str()), Some("ok"));
}

#[tokio::test]
async fn test_exchange_non_json_error_uses_status_message() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = assert_ok!(FetchClient::new());
    let token_uri = Url::parse(&format!("{}/token", server.uri())).unwrap();
    let err = client
        .exchange_token(&token_uri, "m", "0xsig", "a")
        .await
        .unwrap_err();

    match err {
        FetchError::Upstream { status, message, endpoint } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert!(message.contains("502"));
            assert!(endpoint.ends_with("/token"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_nonce_and_exchange_share_endpoint_root() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/nonce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "nonce": "abc123",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FetchClient::new());
    let token_uri = Url::parse(&format!("{}/v1/auth/token", server.uri())).unwrap();
    let nonce = assert_ok!(client.fetch_nonce(&token_uri).await);
    assert_eq!(nonce, "abc123");
}
