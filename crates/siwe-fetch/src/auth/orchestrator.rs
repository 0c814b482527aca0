/*
[INPUT]:  Original HTTP request, signer, optional token, optional token sink
[OUTPUT]: Final response (first attempt, untouched 401, or authenticated retry)
[POS]:    Auth layer - orchestrates the challenge/nonce/sign/exchange/retry flow
[UPDATE]: When flow steps, retry policy or header handling change
*/

use reqwest::header::{AUTHORIZATION, HeaderValue, WWW_AUTHENTICATE};
use reqwest::{Request, Response, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use crate::http::{FetchClient, FetchError, Result};

use super::{Challenge, DEFAULT_CHAIN_ID, TokenSink, WalletSigner, build_message, parse_challenge};

/// Per-call authentication inputs
#[derive(Clone, Copy)]
pub struct AuthContext<'a> {
    signer: &'a dyn WalletSigner,
    token: Option<&'a str>,
    token_sink: Option<&'a dyn TokenSink>,
    chain_id: u64,
}

impl<'a> AuthContext<'a> {
    pub fn new(signer: &'a dyn WalletSigner) -> Self {
        Self {
            signer,
            token: None,
            token_sink: None,
            chain_id: DEFAULT_CHAIN_ID,
        }
    }

    /// Token to attach to the first attempt
    pub fn with_token(mut self, token: Option<&'a str>) -> Self {
        self.token = token;
        self
    }

    /// Sink notified when a new token is obtained
    pub fn with_token_sink(mut self, sink: &'a dyn TokenSink) -> Self {
        self.token_sink = Some(sink);
        self
    }

    /// Chain id used when the challenge does not declare one
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }
}

/// Stateless authenticated-fetch coordinator
#[derive(Debug, Clone)]
pub struct AuthOrchestrator {
    client: FetchClient,
}

impl AuthOrchestrator {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// GET a URL through [`fetch`](Self::fetch)
    pub async fn get(&self, url: &str, auth: &AuthContext<'_>) -> Result<Response> {
        let request = self.client.http_client().get(url).build()?;
        self.fetch(request, auth).await
    }

    /// Complete authenticated fetch
    ///
    /// 1. Send the request (with the caller's token, if any)
    /// 2. Anything but a 401 carrying a challenge is returned as-is
    /// 3. Fetch nonce, build SIWE message, sign, exchange for a token
    /// 4. Notify the token sink
    /// 5. Retry the original request once with the new token
    pub async fn fetch(&self, mut request: Request, auth: &AuthContext<'_>) -> Result<Response> {
        let replay = request.try_clone();
        if let Some(token) = auth.token {
            set_bearer(&mut request, token)?;
        }

        debug!(
            method = %request.method(),
            url = %request.url(),
            has_token = auth.token.is_some(),
            "sending request"
        );
        let response = self.client.execute(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(challenge) = challenge_from(&response)? else {
            debug!("401 without a usable challenge, returning it");
            return Ok(response);
        };
        debug!(realm = %challenge.realm, scope = %challenge.scope, "challenge detected");

        if !challenge.is_supported_scheme() {
            warn!(scheme = %challenge.signing_scheme, "unsupported signing scheme");
            return Err(FetchError::UnsupportedScheme {
                scheme: challenge.signing_scheme,
            });
        }

        let mut retry = replay.ok_or(FetchError::RequestNotReplayable)?;
        let request_url = retry.url().clone();
        let token = self.authorize(&request_url, &challenge, auth).await?;

        set_bearer(&mut retry, &token)?;
        debug!(url = %request_url, "retrying with new token");
        self.client.execute(retry).await
    }

    /// Run nonce, message, signature and exchange for a challenge and
    /// return the new access token.
    async fn authorize(
        &self,
        request_url: &Url,
        challenge: &Challenge,
        auth: &AuthContext<'_>,
    ) -> Result<String> {
        let token_uri = request_url.join(&challenge.token_uri)?;

        let nonce = self.client.fetch_nonce(&token_uri).await?;
        debug!("nonce fetched");

        let chain_id = challenge.chain_id.unwrap_or(auth.chain_id);
        let message = build_message(
            auth.signer.address(),
            &nonce,
            &challenge.scopes(),
            request_url,
            chain_id,
        );

        let signature = auth.signer.sign_message(&message).await?;
        debug!(address = auth.signer.address(), "message signed");

        let token = self
            .client
            .exchange_token(&token_uri, &message, &signature, &challenge.scope)
            .await?;

        let granted = token.scope.as_deref().unwrap_or(&challenge.scope);
        info!(realm = %challenge.realm, scope = granted, "access token obtained");
        if let Some(sink) = auth.token_sink {
            sink.token_obtained(&token.access_token, granted, token.expires_in);
        }

        Ok(token.access_token)
    }
}

/// Replace any `Authorization` header with `Bearer <token>`
fn set_bearer(request: &mut Request, token: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

// Multiple WWW-Authenticate headers are read as one comma-joined value.
fn challenge_from(response: &Response) -> Result<Option<Challenge>> {
    let values: Vec<&str> = response
        .headers()
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    if values.is_empty() {
        return Ok(None);
    }
    parse_challenge(&values.join(", "))
}
