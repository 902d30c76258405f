//! # Delivery Flows
//!
//! Envelope → policy engine → token cache → HTTP peer, and the peer's view of
//! what arrived.

use std::time::Duration;

use axum::http::StatusCode;
use sd_02_envelope_security::EnvelopeOpenApi;
use sd_03_dispatcher::DispatchError;
use shared_types::{Envelope, ErrorPayload};

use super::support::{
    credentials, dead_address, dispatcher, envelope, spawn_idp, spawn_peer, verifier,
};

const RESULTS: &str = r#"{"results":[]}"#;

#[tokio::test]
async fn test_sign_and_encrypt_delivery_opens_on_peer() {
    let (token_endpoint, idp) = spawn_idp(300, Duration::ZERO, false).await;
    let (uri, peer) = spawn_peer(StatusCode::OK, "").await;
    let (dispatcher, _) = dispatcher(true, true);

    let status = dispatcher
        .send(envelope("m1", RESULTS), &uri, &credentials(&token_endpoint))
        .await
        .unwrap();
    assert_eq!(status, 200);
    assert_eq!(idp.calls(), 1);

    let requests = peer.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.authorization.as_deref(), Some("Bearer tok-1"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));

    let received: Envelope = serde_json::from_str(&request.body).unwrap();
    assert!(received.header().is_msg_encrypted);
    assert!(received.signature().is_some());
    assert_ne!(received.message().as_str(), RESULTS);

    let opened = verifier(true, true).open(&received).unwrap();
    assert_eq!(opened.as_str(), RESULTS);
}

#[tokio::test]
async fn test_sign_only_message_arrives_verbatim() {
    let (token_endpoint, _) = spawn_idp(300, Duration::ZERO, false).await;
    let (uri, peer) = spawn_peer(StatusCode::OK, "").await;
    let (dispatcher, _) = dispatcher(true, false);

    dispatcher
        .send(envelope("m1", RESULTS), &uri, &credentials(&token_endpoint))
        .await
        .unwrap();

    let requests = peer.requests();
    let body = &requests[0].body;
    assert!(body.contains(r#""message":{"results":[]}"#));

    let received: Envelope = serde_json::from_str(body).unwrap();
    assert!(!received.header().is_msg_encrypted);
    assert!(!received.signature().unwrap_or_default().is_empty());
    assert_eq!(received.header().message_id, "m1");
    assert!(verifier(true, false).open(&received).is_ok());
}

#[tokio::test]
async fn test_peer_unauthorized_is_parsed() {
    let (token_endpoint, _) = spawn_idp(300, Duration::ZERO, false).await;
    let body = r#"{"g2pcError":{"code":"err.sender_id.invalid","message":"unknown sender"}}"#;
    let (uri, _) = spawn_peer(StatusCode::UNAUTHORIZED, body).await;
    let (dispatcher, _) = dispatcher(false, false);

    let err = dispatcher
        .send(envelope("m2", RESULTS), &uri, &credentials(&token_endpoint))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DispatchError::Unauthorized(ErrorPayload::new("err.sender_id.invalid", "unknown sender"))
    );
    assert_eq!(err.code(), "err.sender_id.invalid");
}

#[tokio::test]
async fn test_peer_errors_are_classified() {
    let (token_endpoint, _) = spawn_idp(300, Duration::ZERO, false).await;
    let (dispatcher, _) = dispatcher(false, false);
    let creds = credentials(&token_endpoint);

    let (uri, _) = spawn_peer(StatusCode::INTERNAL_SERVER_ERROR, "db down").await;
    let err = dispatcher
        .send(envelope("m3", RESULTS), &uri, &creds)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::ServiceUnavailable {
            status: 500,
            body: "db down".into()
        }
    );

    let (uri, _) = spawn_peer(StatusCode::BAD_REQUEST, "missing header").await;
    let err = dispatcher
        .send(envelope("m4", RESULTS), &uri, &creds)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "err.request.bad");

    let (uri, _) = spawn_peer(StatusCode::SERVICE_UNAVAILABLE, "").await;
    let err = dispatcher
        .send(envelope("m5", RESULTS), &uri, &creds)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "err.service.unavailable");
}

#[tokio::test]
async fn test_unreachable_peer() {
    let (token_endpoint, idp) = spawn_idp(300, Duration::ZERO, false).await;
    let uri = format!("http://{}/registry/on-search", dead_address().await);
    let (dispatcher, _) = dispatcher(false, false);

    let err = dispatcher
        .send(envelope("m6", RESULTS), &uri, &credentials(&token_endpoint))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "err.transport.unreachable");
    assert_eq!(idp.calls(), 1);
}

#[tokio::test]
async fn test_rejected_credentials_send_nothing() {
    let (token_endpoint, _) = spawn_idp(300, Duration::ZERO, true).await;
    let (uri, peer) = spawn_peer(StatusCode::OK, "").await;
    let (dispatcher, cache) = dispatcher(false, false);

    let err = dispatcher
        .send(envelope("m7", RESULTS), &uri, &credentials(&token_endpoint))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "err.token.rejected");
    assert!(peer.requests().is_empty());
    assert!(cache.cached_clients("*").await.unwrap().is_empty());
}
