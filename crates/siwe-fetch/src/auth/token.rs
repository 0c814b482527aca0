/*
[INPUT]:  Bearer tokens obtained from a successful exchange
[OUTPUT]: Token notifications to the caller and an optional in-memory cache
[POS]:    Auth layer - caller-owned token storage seam
[UPDATE]: When changing the notification contract or cache contents
*/

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, PoisonError, RwLock};

/// Receives every newly obtained token before the original request is retried
///
/// Storage, persistence and expiry decisions belong to the implementor.
pub trait TokenSink: Send + Sync {
    /// Called with the access token and the granted scope string
    fn token_obtained(&self, access_token: &str, scope: &str, expires_in: Option<u64>);
}

impl<F> TokenSink for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn token_obtained(&self, access_token: &str, scope: &str, _expires_in: Option<u64>) {
        self(access_token, scope)
    }
}

/// Cached token with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub access_token: String,
    pub scope: String,
    pub obtained_at: DateTime<Utc>,
    /// Informational; nothing in this crate acts on it
    pub expires_at: Option<DateTime<Utc>>,
}

/// Thread-safe single-slot token cache
///
/// Writes are atomic; concurrent callers may still race and overwrite one
/// another's token.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl TokenCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token
    pub fn set_token(&self, access_token: &str, scope: &str, expires_in: Option<u64>) {
        let obtained_at = Utc::now();
        let expires_at = expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .map(|secs| obtained_at + Duration::seconds(secs));
        let token_data = TokenData {
            access_token: access_token.to_string(),
            scope: scope.to_string(),
            obtained_at,
            expires_at,
        };

        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token_data);
    }

    /// Get the current token if available
    pub fn get_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| data.access_token.clone())
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

impl TokenSink for TokenCache {
    fn token_obtained(&self, access_token: &str, scope: &str, expires_in: Option<u64>) {
        self.set_token(access_token, scope, expires_in);
    }
}
