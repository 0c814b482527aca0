/*
[INPUT]:  Mock resource, nonce and token endpoints
[OUTPUT]: Test results for the bound, caching fetch client
[POS]:    Integration tests - token reuse across calls
[UPDATE]: When cache behavior changes
*/

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use reqwest::StatusCode;
use siwe_fetch::{AuthenticatedFetch, MockWalletSigner, TokenCache};
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_protected_resource(server: &wiremock::MockServer, token: &str, challenges: u64) {
    Mock::given(method("GET"))
        .and(path(RESOURCE_PATH))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(RESOURCE_PATH))
        .respond_with(unauthorized(&challenge_header(server, "a b")))
        .expect(challenges)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_second_call_reuses_cached_token() {
    let server = setup_mock_server().await;
    mount_protected_resource(&server, "T1", 1).await;
    mount_nonce(&server, "N1", 1).await;
    mount_token(&server, "T1", "a b", 1).await;

    let signer = Arc::new(MockWalletSigner::new(ADDRESS, SIGNATURE));
    let fetch = AuthenticatedFetch::new(orchestrator(), signer.clone());

    let first = assert_ok!(fetch.get(&resource_url(&server)).await);
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(fetch.token_cache().get_token(), Some("T1".to_string()));

    let second = assert_ok!(fetch.get(&resource_url(&server)).await);
    assert_eq!(second.status(), StatusCode::OK);

    assert_eq!(signer.signed_messages().len(), 1);
    // challenge, nonce, exchange, retry, then one direct hit
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_seeded_cache_skips_challenge() {
    let server = setup_mock_server().await;
    mount_protected_resource(&server, "T0", 0).await;
    mount_nonce(&server, "N1", 0).await;

    let cache = TokenCache::new();
    cache.set_token("T0", "a b", Some(3600));

    let signer = Arc::new(MockWalletSigner::new(ADDRESS, SIGNATURE));
    let fetch = AuthenticatedFetch::new(orchestrator(), signer.clone()).with_cache(cache);

    let response = assert_ok!(fetch.get(&resource_url(&server)).await);
    assert_eq!(response.status(), StatusCode::OK);
    assert!(signer.signed_messages().is_empty());
}

#[tokio::test]
async fn test_forwarding_sink_sees_new_token() {
    let server = setup_mock_server().await;
    mount_protected_resource(&server, "T1", 1).await;
    mount_nonce(&server, "N1", 1).await;
    mount_token(&server, "T1", "a b", 1).await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let sink = move |token: &str, scope: &str| {
        recorder
            .lock()
            .unwrap()
            .push(format!("{token}:{scope}"));
    };

    let signer = Arc::new(MockWalletSigner::new(ADDRESS, SIGNATURE));
    let fetch = AuthenticatedFetch::new(orchestrator(), signer)
        .with_chain_id(8453)
        .with_token_sink(Arc::new(sink));
    assert_eq!(fetch.address(), ADDRESS);

    assert_ok!(fetch.get(&resource_url(&server)).await);
    assert_eq!(*seen.lock().unwrap(), vec!["T1:a b".to_string()]);
    assert_eq!(
        fetch.token_cache().token_data().map(|data| data.scope),
        Some("a b".to_string())
    );
}
