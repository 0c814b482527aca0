/*
[INPUT]:  Authorization server wire schema and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - nonce, token and error bodies
[UPDATE]: When wire schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// `GET <nonce_uri>` success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nonce: String,
}

/// `POST <token_uri>` success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Error body returned by the nonce or token endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}
