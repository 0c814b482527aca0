/*
[INPUT]:  YAML configuration file and environment
[OUTPUT]: Parsed fetch configuration (chain, key source, token file, transport)
[POS]:    Configuration layer - CLI setup
[UPDATE]: When adding new configuration options
*/

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use siwe_fetch::ClientConfig;

/// Top-level configuration for the fetch CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Chain id used when a challenge does not declare one
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Environment variable holding the hex private key
    #[serde(default = "default_private_key_env")]
    pub private_key_env: String,
    /// Where obtained tokens are persisted
    #[serde(default)]
    pub token_file: Option<PathBuf>,
    /// Transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: None,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            private_key_env: default_private_key_env(),
            token_file: None,
            http: HttpConfig::default(),
        }
    }
}

fn default_chain_id() -> u64 {
    1
}

fn default_private_key_env() -> String {
    "SIWE_FETCH_PRIVATE_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl FetchConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.private_key_env.trim().is_empty() {
            return Err(anyhow!("private_key_env cannot be empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(anyhow!("http.timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.http.timeout_secs),
            connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
            user_agent: self.http.user_agent.clone(),
        }
    }

    /// Read the private key from the configured environment variable
    pub fn private_key(&self) -> Result<String> {
        std::env::var(&self.private_key_env)
            .with_context(|| format!("environment variable {} is not set", self.private_key_env))
    }

    /// Token file path, defaulting to `<data dir>/siwe-fetch/token.json`
    pub fn token_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.token_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("siwe-fetch").join("token.json"))
    }
}
