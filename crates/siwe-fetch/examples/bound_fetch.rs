/*
[INPUT]:  Resource URL (first argument) and EVM private key (SIWE_FETCH_PRIVATE_KEY)
[OUTPUT]: Two fetches through one bound client; the second reuses the token
[POS]:    Examples - authenticated fetch demonstration
[UPDATE]: When the public fetch API changes
*/

use std::sync::Arc;

use siwe_fetch::*;

/// Example: bound authenticated fetch
///
/// 1. Create HTTP client and orchestrator
/// 2. Load an EVM wallet signer
/// 3. Fetch the resource (challenge, nonce, sign, exchange, retry)
/// 4. Fetch again with the cached token
#[tokio::main]
async fn main() {
    println!("=== siwe-fetch Bound Client Example ===\n");

    let Some(url) = std::env::args().nth(1) else {
        eprintln!("usage: bound_fetch <url>");
        return;
    };

    let client = match FetchClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    let private_key = match std::env::var("SIWE_FETCH_PRIVATE_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Set SIWE_FETCH_PRIVATE_KEY to a hex private key");
            return;
        }
    };
    let signer = match EvmWalletSigner::new(&private_key) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load signer: {}", e);
            return;
        }
    };
    println!("✓ Signer loaded for {}", signer.address());

    let fetch = AuthenticatedFetch::new(AuthOrchestrator::new(client), Arc::new(signer));

    for attempt in 1..=2 {
        match fetch.get(&url).await {
            Ok(response) => println!("  attempt {attempt}: {}", response.status()),
            Err(e) => {
                eprintln!("  attempt {attempt} failed: {}", e);
                return;
            }
        }
    }

    match fetch.token_cache().token_data() {
        Some(data) => println!("\n✓ Cached token for scope {:?}", data.scope),
        None => println!("\nNo token was needed"),
    }
}
