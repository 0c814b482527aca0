/*
[INPUT]:  Wallet address, nonce, scopes, request URL and chain id
[OUTPUT]: Canonical EIP-4361 message text to be signed
[POS]:    Auth layer - SIWE message construction
[UPDATE]: When the message layout, statement or resource naming changes
*/

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

/// Fixed disclosure shown to the user in the wallet prompt
pub const SIWE_STATEMENT: &str = "Authorize access to your private data.";

pub const SIWE_VERSION: &str = "1";

/// Prefix for scope resources
pub const SCOPE_URN_PREFIX: &str = "urn:oauth:scope:";

/// Fields of an EIP-4361 message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiweMessage {
    pub domain: String,
    pub address: String,
    pub statement: String,
    pub uri: String,
    pub version: String,
    pub chain_id: u64,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub resources: Vec<String>,
}

impl SiweMessage {
    /// Assemble message fields, stamping `issued_at` with the current time
    pub fn new<S: AsRef<str>>(
        address: &str,
        nonce: &str,
        scopes: &[S],
        request_uri: &Url,
        chain_id: u64,
    ) -> Self {
        Self {
            domain: domain_of(request_uri),
            address: address.to_string(),
            statement: SIWE_STATEMENT.to_string(),
            uri: request_uri.to_string(),
            version: SIWE_VERSION.to_string(),
            chain_id,
            nonce: nonce.to_string(),
            issued_at: Utc::now(),
            resources: scopes
                .iter()
                .map(|scope| format!("{SCOPE_URN_PREFIX}{}", scope.as_ref()))
                .collect(),
        }
    }

    /// Pin the `Issued At` timestamp
    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }
}

impl fmt::Display for SiweMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} wants you to sign in with your Ethereum account:",
            self.domain
        )?;
        writeln!(f, "{}", self.address)?;
        writeln!(f)?;
        writeln!(f, "{}", self.statement)?;
        writeln!(f)?;
        writeln!(f, "URI: {}", self.uri)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Chain ID: {}", self.chain_id)?;
        writeln!(f, "Nonce: {}", self.nonce)?;
        write!(
            f,
            "Issued At: {}",
            self.issued_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )?;
        if !self.resources.is_empty() {
            write!(f, "\nResources:")?;
            for resource in &self.resources {
                write!(f, "\n- {resource}")?;
            }
        }
        Ok(())
    }
}

/// Build the text to be signed for a challenge
pub fn build_message<S: AsRef<str>>(
    address: &str,
    nonce: &str,
    scopes: &[S],
    request_uri: &Url,
    chain_id: u64,
) -> String {
    SiweMessage::new(address, nonce, scopes, request_uri, chain_id).to_string()
}

// Host plus explicit port, like a browser's `URL.host`.
fn domain_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
