/*
[INPUT]:  Signed SIWE message, signature and requested scope
[OUTPUT]: Token exchange request body
[POS]:    Data layer - outbound request types
[UPDATE]: When the token endpoint request schema changes
*/

use serde::{Deserialize, Serialize};

/// Grant type sent to the token endpoint
pub const ETH_SIGNATURE_GRANT: &str = "eth_signature";

/// Body of `POST <token_uri>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenExchangeRequest {
    pub grant_type: String,
    pub message: String,
    pub signature: String,
    pub scope: String,
}

impl TokenExchangeRequest {
    pub fn new(message: &str, signature: &str, scope: &str) -> Self {
        Self {
            grant_type: ETH_SIGNATURE_GRANT.to_string(),
            message: message.to_string(),
            signature: signature.to_string(),
            scope: scope.to_string(),
        }
    }
}
