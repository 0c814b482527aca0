/*
[INPUT]:  HTTP client configuration and authorization server endpoints
[OUTPUT]: HTTP responses, nonces and bearer tokens
[POS]:    HTTP layer - transport and authorization server communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod exchange;
pub mod nonce;

pub use error::{FetchError, Result};
pub use nonce::nonce_uri;

pub use client::{ClientConfig, FetchClient};
