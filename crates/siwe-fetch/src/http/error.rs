/*
[INPUT]:  Error sources (transport, upstream auth server, signer, challenge, serialization)
[OUTPUT]: Structured error types carried through the authenticated-fetch flow
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for siwe-fetch
///
/// A `401` without a usable challenge is not represented here: the
/// orchestrator hands that response back to the caller unchanged.
#[derive(Error, Debug)]
pub enum FetchError {
    /// An HTTP call (original, nonce, exchange or retry) did not complete
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The challenge asked for a signing scheme other than EIP-4361
    #[error("Unsupported signing scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    /// Nonce or token endpoint answered with a non-success status
    #[error("Upstream {endpoint} returned {status}: {message}")]
    Upstream {
        endpoint: String,
        status: StatusCode,
        message: String,
    },

    /// Nonce or token endpoint answered 2xx with an unusable body
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The signer failed or the user declined to sign
    #[error("Signer failed: {0}")]
    Signer(String),

    /// The `WWW-Authenticate` challenge carried an unparseable value
    #[error("Invalid challenge: {0}")]
    InvalidChallenge(String),

    /// The original request has a streaming body and cannot be sent twice
    #[error("Request body cannot be replayed after authentication")]
    RequestNotReplayable,

    /// A token could not be encoded as an `Authorization` header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Check if the error comes from the authorization attempt itself
    /// rather than from reaching the protected resource.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            FetchError::UnsupportedScheme { .. }
                | FetchError::Upstream { .. }
                | FetchError::MalformedResponse(_)
                | FetchError::Signer(_)
                | FetchError::InvalidChallenge(_)
        )
    }

    /// Status code returned by the nonce or token endpoint, if any
    pub fn upstream_status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create an upstream error from endpoint, status code and message
    pub fn upstream(endpoint: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        FetchError::Upstream {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }
}

/// Result type alias for siwe-fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
