/*
[INPUT]:  Challenge headers, wallet signer, caller token state
[OUTPUT]: Bearer tokens and authenticated responses
[POS]:    Auth layer - SIWE challenge-response flow
[UPDATE]: When auth flow or signature methods change
*/

pub mod bound;
pub mod challenge;
pub mod evm_wallet;
pub mod orchestrator;
pub mod siwe;
pub mod token;
pub mod wallet;

pub use bound::AuthenticatedFetch;
pub use challenge::{Challenge, DEFAULT_CHAIN_ID, EIP4361_SCHEME, parse_challenge};
pub use evm_wallet::EvmWalletSigner;
pub use orchestrator::{AuthContext, AuthOrchestrator};
pub use siwe::{SiweMessage, build_message};
pub use token::{TokenCache, TokenData, TokenSink};
pub use wallet::{MockWalletSigner, WalletSigner};
