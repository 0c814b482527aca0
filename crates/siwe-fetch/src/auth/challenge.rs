/*
[INPUT]:  WWW-Authenticate header text from a 401 response
[OUTPUT]: Structured challenge (realm, scope, token endpoint, chain, scheme)
[POS]:    Auth layer - challenge discovery
[UPDATE]: When recognised challenge parameters or defaults change
*/

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::http::{FetchError, Result};

/// Chain id used when neither the challenge nor the caller names one
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// The only signing scheme this crate drives
pub const EIP4361_SCHEME: &str = "eip4361";

static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("challenge parameter pattern"));

/// Requirements announced by a protected resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub realm: String,
    /// Space-separated scope list, echoed verbatim in the token exchange
    pub scope: String,
    /// Absolute or resource-relative token endpoint
    pub token_uri: String,
    /// Chain id as declared by the header, if any
    pub chain_id: Option<u64>,
    pub signing_scheme: String,
}

impl Challenge {
    /// Parse a `WWW-Authenticate` header; see [`parse_challenge`]
    pub fn from_header(header: &str) -> Result<Option<Self>> {
        parse_challenge(header)
    }

    /// Declared chain id, or 1
    pub fn chain_id(&self) -> u64 {
        self.chain_id.unwrap_or(DEFAULT_CHAIN_ID)
    }

    /// Scope tokens in header order, split on single spaces
    pub fn scopes(&self) -> Vec<&str> {
        self.scope.split(' ').collect()
    }

    pub fn is_supported_scheme(&self) -> bool {
        self.signing_scheme == EIP4361_SCHEME
    }
}

/// Parse a `WWW-Authenticate` header into a challenge.
///
/// Every `key="value"` pair is collected; a repeated key keeps its last value.
/// Returns `Ok(None)` unless `realm`, `scope` and `token_uri` are all present.
/// A `chain_id` that is not a base-10 integer is an error.
pub fn parse_challenge(header: &str) -> Result<Option<Challenge>> {
    let params: HashMap<&str, &str> = PARAM_RE
        .captures_iter(header)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect();

    let (Some(realm), Some(scope), Some(token_uri)) = (
        params.get("realm"),
        params.get("scope"),
        params.get("token_uri"),
    ) else {
        return Ok(None);
    };

    let chain_id = params
        .get("chain_id")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| FetchError::InvalidChallenge(format!("chain_id {raw:?}: {e}")))
        })
        .transpose()?;

    let signing_scheme = params
        .get("signing_scheme")
        .copied()
        .unwrap_or(EIP4361_SCHEME);

    Ok(Some(Challenge {
        realm: realm.to_string(),
        scope: scope.to_string(),
        token_uri: token_uri.to_string(),
        chain_id,
        signing_scheme: signing_scheme.to_string(),
    }))
}
