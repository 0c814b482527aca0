/*
[INPUT]:  Orchestrator, one signer identity, optional extra token sink
[OUTPUT]: Reusable authenticated fetch that remembers the last token
[POS]:    Auth layer - bound client with in-memory token cache
[UPDATE]: When cache behavior or bound-client options change
*/

use std::sync::Arc;

use reqwest::{Request, Response};

use crate::http::Result;

use super::{AuthContext, AuthOrchestrator, DEFAULT_CHAIN_ID, TokenCache, TokenSink, WalletSigner};

/// Authenticated fetch bound to one address/signer pair
///
/// The cached token is shared by every call through this value (and its
/// clones). There is no single-flight guard: concurrent calls that all hit
/// a challenge each run their own exchange, and the last one wins the cache.
#[derive(Clone)]
pub struct AuthenticatedFetch {
    orchestrator: AuthOrchestrator,
    signer: Arc<dyn WalletSigner>,
    cache: TokenCache,
    token_sink: Option<Arc<dyn TokenSink>>,
    chain_id: u64,
}

impl AuthenticatedFetch {
    pub fn new(orchestrator: AuthOrchestrator, signer: Arc<dyn WalletSigner>) -> Self {
        Self {
            orchestrator,
            signer,
            cache: TokenCache::new(),
            token_sink: None,
            chain_id: DEFAULT_CHAIN_ID,
        }
    }

    /// Chain id used when a challenge does not declare one
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Use an existing (possibly pre-seeded) cache
    pub fn with_cache(mut self, cache: TokenCache) -> Self {
        self.cache = cache;
        self
    }

    /// Also forward new tokens to `sink`, after the cache is updated
    pub fn with_token_sink(mut self, sink: Arc<dyn TokenSink>) -> Self {
        self.token_sink = Some(sink);
        self
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.cache
    }

    pub fn address(&self) -> &str {
        self.signer.address()
    }

    /// Fetch with the cached token, refreshing the cache on a new exchange
    pub async fn fetch(&self, request: Request) -> Result<Response> {
        let token = self.cache.get_token();
        let sink = CacheSink {
            cache: &self.cache,
            forward: self.token_sink.as_deref(),
        };
        let auth = AuthContext::new(self.signer.as_ref())
            .with_token(token.as_deref())
            .with_token_sink(&sink)
            .with_chain_id(self.chain_id);

        self.orchestrator.fetch(request, &auth).await
    }

    pub async fn get(&self, url: &str) -> Result<Response> {
        let request = self.orchestrator.client().http_client().get(url).build()?;
        self.fetch(request).await
    }
}

struct CacheSink<'a> {
    cache: &'a TokenCache,
    forward: Option<&'a dyn TokenSink>,
}

impl TokenSink for CacheSink<'_> {
    fn token_obtained(&self, access_token: &str, scope: &str, expires_in: Option<u64>) {
        self.cache.set_token(access_token, scope, expires_in);
        if let Some(forward) = self.forward {
            forward.token_obtained(access_token, scope, expires_in);
        }
    }
}
