use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use siwe_fetch::TokenSink;
use tracing::{debug, warn};

/// Token data structure for persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub scope: String,
    pub obtained_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn new(access_token: &str, scope: &str, expires_in: Option<u64>) -> Self {
        let obtained_at = Utc::now();
        let expires_at = expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .map(|secs| obtained_at + Duration::seconds(secs));
        Self {
            access_token: access_token.to_string(),
            scope: scope.to_string(),
            obtained_at,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// JSON file holding the last obtained token
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored token, if the file exists
    pub fn load(&self) -> Result<Option<StoredToken>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("read token file {}", self.path.display()))?;
        let token = serde_json::from_str(&content)
            .with_context(|| format!("parse token file {}", self.path.display()))?;
        Ok(Some(token))
    }

    /// Load the stored token unless it is known to be expired
    pub fn load_valid(&self) -> Result<Option<StoredToken>> {
        let token = self.load()?;
        Ok(token.filter(|token| {
            let expired = token.is_expired(Utc::now());
            if expired {
                debug!(path = %self.path.display(), "stored token expired, ignoring");
            }
            !expired
        }))
    }

    pub fn save(&self, token: &StoredToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create token directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(token)?;
        fs::write(&self.path, content)
            .with_context(|| format!("write token file {}", self.path.display()))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl TokenSink for FileTokenStore {
    fn token_obtained(&self, access_token: &str, scope: &str, expires_in: Option<u64>) {
        let token = StoredToken::new(access_token, scope, expires_in);
        match self.save(&token) {
            Ok(()) => debug!(path = %self.path.display(), "token persisted"),
            Err(err) => warn!(error = %err, "failed to persist token"),
        }
    }
}
