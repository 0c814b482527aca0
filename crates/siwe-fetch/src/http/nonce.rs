/*
[INPUT]:  Token endpoint URL taken from the challenge
[OUTPUT]: Fresh anti-replay nonce from the authorization server
[POS]:    HTTP layer - nonce endpoint (derived from the token endpoint)
[UPDATE]: When the nonce derivation convention or response schema changes
*/

use tracing::debug;
use url::Url;

use crate::http::{FetchClient, Result};
use crate::types::NonceResponse;

/// Derive the nonce endpoint by replacing the first `/token` with `/nonce`.
///
/// A URI without `/token` comes back unchanged.
pub fn nonce_uri(token_uri: &Url) -> Result<Url> {
    let derived = token_uri.as_str().replacen("/token", "/nonce", 1);
    Ok(Url::parse(&derived)?)
}

impl FetchClient {
    /// Fetch a nonce for the given token endpoint
    ///
    /// GET {token_uri with /token -> /nonce}
    pub async fn fetch_nonce(&self, token_uri: &Url) -> Result<String> {
        let endpoint = nonce_uri(token_uri)?;
        debug!(endpoint = %endpoint, "fetching nonce");

        let builder = self.http_client().get(endpoint);
        let response: NonceResponse = self.send_json(builder).await?;
        Ok(response.nonce)
    }
}
