/*
[INPUT]:  Public API exports for siwe-fetch-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod token_store;

// Re-export main types for convenience
pub use config::FetchConfig;
pub use token_store::{FileTokenStore, StoredToken};
