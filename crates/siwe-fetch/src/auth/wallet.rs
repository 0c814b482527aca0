/*
[INPUT]:  SIWE message text to sign
[OUTPUT]: Hex-encoded signature string, or a signer failure
[POS]:    Auth layer - wallet integration abstraction
[UPDATE]: When adding new wallet types or changing signature format
*/

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::http::{FetchError, Result};

/// Trait for wallet signing operations
///
/// The trait is async so that an implementation may wait on a hardware
/// wallet or a human confirmation prompt for as long as it needs.
/// Failures (including a user declining) should be reported as
/// `FetchError::Signer`.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Get the wallet address placed in the SIWE message
    fn address(&self) -> &str;

    /// Sign a message and return the hex-encoded signature (0x...)
    async fn sign_message(&self, message: &str) -> Result<String>;
}

/// Mock wallet signer for testing
///
/// Returns a fixed signature (or a fixed refusal) and records every
/// message it was asked to sign.
#[derive(Debug, Clone)]
pub struct MockWalletSigner {
    address: String,
    outcome: std::result::Result<String, String>,
    signed: Arc<Mutex<Vec<String>>>,
}

impl MockWalletSigner {
    /// Create a new mock signer with predetermined signature
    pub fn new(address: &str, signature: &str) -> Self {
        Self {
            address: address.to_string(),
            outcome: Ok(signature.to_string()),
            signed: Arc::default(),
        }
    }

    /// Create a mock signer whose every request is declined
    pub fn declining(address: &str, reason: &str) -> Self {
        Self {
            address: address.to_string(),
            outcome: Err(reason.to_string()),
            signed: Arc::default(),
        }
    }

    /// Messages passed to `sign_message`, in call order
    pub fn signed_messages(&self) -> Vec<String> {
        self.signed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl WalletSigner for MockWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        self.signed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        self.outcome.clone().map_err(FetchError::Signer)
    }
}
