/*
[INPUT]:  HTTP configuration (timeouts, user agent) or a caller-owned reqwest client
[OUTPUT]: Configured transport shared by the resource, nonce and token calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::{Client, Request, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::http::{FetchError, Result};
use crate::types::ErrorBody;

/// HTTP client configuration
///
/// Timeouts apply per HTTP call. Time spent waiting on the signer is not
/// bounded here.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: None,
        }
    }
}

/// Transport used for every outbound call of the flow
#[derive(Debug, Clone)]
pub struct FetchClient {
    http_client: Client,
}

impl FetchClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);
        if let Some(user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            http_client: builder.build()?,
        })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Underlying reqwest client, for building requests to pass to `execute`
    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// Send a prepared request exactly once
    pub async fn execute(&self, request: Request) -> Result<Response> {
        Ok(self.http_client.execute(request).await?)
    }

    /// Send a request to the authorization server and decode a JSON body.
    ///
    /// Non-success statuses become `FetchError::Upstream`; a success body
    /// that does not decode as `T` becomes `FetchError::MalformedResponse`.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let endpoint = response.url().to_string();
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::upstream(
                endpoint,
                status,
                upstream_message(status, &body),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(format!("{endpoint}: {e}")))
    }
}

/// Server-provided `error` field when the body is JSON, else a status-derived message.
pub(crate) fn upstream_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => format!("request failed with status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_prefers_error_field() {
        let message = upstream_message(StatusCode::BAD_REQUEST, r#"{"error":"invalid_signature"}"#);
        assert_eq!(message, "invalid_signature");
    }

    #[test]
    fn test_upstream_message_falls_back_to_status() {
        let message = upstream_message(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(message, "request failed with status 502 Bad Gateway");
    }

    #[test]
    fn test_client_with_user_agent() {
        let config = ClientConfig {
            user_agent: Some("siwe-fetch-test".to_string()),
            ..ClientConfig::default()
        };
        assert!(FetchClient::with_config(config).is_ok());
    }
}
