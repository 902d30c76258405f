//! # Token Refresh Flows
//!
//! Single-flight and expiry behaviour observed from the identity provider's
//! side while real deliveries run.

use std::time::Duration;

use axum::http::StatusCode;
use futures::future::join_all;

use super::support::{credentials, dispatcher, envelope, spawn_idp, spawn_peer};

const RESULTS: &str = r#"{"results":[]}"#;

#[tokio::test]
async fn test_concurrent_sends_share_one_token_fetch() {
    let (token_endpoint, idp) = spawn_idp(300, Duration::from_millis(100), false).await;
    let (uri, peer) = spawn_peer(StatusCode::OK, "").await;
    let (dispatcher, cache) = dispatcher(true, false);
    let creds = credentials(&token_endpoint);

    let sends = (0..20).map(|i| {
        let envelope = envelope(&format!("m{}", i), RESULTS);
        dispatcher.send(envelope, &uri, &creds)
    });
    let results = join_all(sends).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(idp.calls(), 1);
    assert_eq!(cache.stats().refreshes, 1);

    let requests = peer.requests();
    assert_eq!(requests.len(), 20);
    assert!(requests
        .iter()
        .all(|r| r.authorization.as_deref() == Some("Bearer tok-1")));
}

#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let (token_endpoint, idp) = spawn_idp(1, Duration::ZERO, false).await;
    let (uri, peer) = spawn_peer(StatusCode::OK, "").await;
    let (dispatcher, _) = dispatcher(false, false);
    let creds = credentials(&token_endpoint);

    dispatcher.send(envelope("m1", RESULTS), &uri, &creds).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    dispatcher.send(envelope("m2", RESULTS), &uri, &creds).await.unwrap();

    assert_eq!(idp.calls(), 2);
    let auth: Vec<_> = peer
        .requests()
        .into_iter()
        .map(|r| r.authorization.unwrap_or_default())
        .collect();
    assert_eq!(auth, vec!["Bearer tok-1", "Bearer tok-2"]);
}

#[tokio::test]
async fn test_refresh_failure_reaches_every_waiter() {
    let (token_endpoint, idp) = spawn_idp(300, Duration::from_millis(100), true).await;
    let (uri, peer) = spawn_peer(StatusCode::OK, "").await;
    let (dispatcher, cache) = dispatcher(false, false);
    let creds = credentials(&token_endpoint);

    let sends = (0..5).map(|i| {
        let envelope = envelope(&format!("m{}", i), RESULTS);
        dispatcher.send(envelope, &uri, &creds)
    });
    let results = join_all(sends).await;

    assert_eq!(idp.calls(), 1);
    for result in &results {
        assert_eq!(result.as_ref().unwrap_err().code(), "err.token.rejected");
    }
    assert!(peer.requests().is_empty());
    assert_eq!(cache.stats().failures, 1);

    // The cache does not retry on its own; the next send does.
    assert!(dispatcher.send(envelope("m9", RESULTS), &uri, &creds).await.is_err());
    assert_eq!(idp.calls(), 2);
}
