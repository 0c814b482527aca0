/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for siwe-fetch tests

#![allow(dead_code)]

use siwe_fetch::{AuthOrchestrator, FetchClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const SIGNATURE: &str = "0xfixed_signature";
pub const RESOURCE_PATH: &str = "/private/data";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn orchestrator() -> AuthOrchestrator {
    AuthOrchestrator::new(FetchClient::new().expect("client init"))
}

pub fn resource_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), RESOURCE_PATH)
}

pub fn token_uri(server: &MockServer) -> String {
    format!("{}/oauth/token", server.uri())
}

/// `WWW-Authenticate` value pointing at the mock token endpoint
pub fn challenge_header(server: &MockServer, scope: &str) -> String {
    format!(
        r#"Bearer, realm="private-data", scope="{scope}", token_uri="{}""#,
        token_uri(server)
    )
}

/// 401 response carrying the given challenge
pub fn unauthorized(challenge: &str) -> ResponseTemplate {
    ResponseTemplate::new(401).insert_header("www-authenticate", challenge)
}

pub async fn mount_nonce(server: &MockServer, nonce: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/oauth/nonce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "nonce": nonce,
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_token(server: &MockServer, access_token: &str, scope: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": access_token,
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": scope,
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}
