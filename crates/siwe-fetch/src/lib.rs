/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public siwe-fetch crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthContext,
    AuthOrchestrator,
    AuthenticatedFetch,
    Challenge,
    EvmWalletSigner,
    MockWalletSigner,
    SiweMessage,
    TokenCache,
    TokenData,
    TokenSink,
    WalletSigner,
    build_message,
    parse_challenge,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    FetchClient,
    FetchError,
    Result,
};

// Re-export all types
pub use types::*;
