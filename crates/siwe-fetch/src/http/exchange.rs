/*
[INPUT]:  Token endpoint, signed SIWE message, signature and requested scope
[OUTPUT]: Bearer token response or upstream error
[POS]:    HTTP layer - token exchange endpoint
[UPDATE]: When the exchange request/response schema changes
*/

use tracing::{debug, warn};
use url::Url;

use crate::http::{FetchClient, FetchError, Result};
use crate::types::{TokenExchangeRequest, TokenResponse};

impl FetchClient {
    /// Exchange a signed message for a bearer token
    ///
    /// POST {token_uri}
    /// Body: {"grant_type":"eth_signature","message":..,"signature":..,"scope":..}
    pub async fn exchange_token(
        &self,
        token_uri: &Url,
        message: &str,
        signature: &str,
        scope: &str,
    ) -> Result<TokenResponse> {
        debug!(endpoint = %token_uri, scope, "exchanging signature for token");

        let body = TokenExchangeRequest::new(message, signature, scope);
        let builder = self.http_client().post(token_uri.clone()).json(&body);

        let response: TokenResponse = self.send_json(builder).await.inspect_err(|err| {
            if let FetchError::Upstream { status, message, .. } = err {
                warn!(%status, error = %message, "token exchange rejected");
            }
        })?;

        if response.access_token.is_empty() {
            return Err(FetchError::MalformedResponse(
                "token response has an empty access_token".to_string(),
            ));
        }

        Ok(response)
    }
}
