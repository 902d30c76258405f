//! Test fixtures: local identity provider and peer servers, wired services.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use parking_lot::Mutex;

use sd_01_token_cache::{default_cache, ClientCredentials, DefaultTokenCache, TokenCacheConfig};
use sd_02_envelope_security::{
    EnvelopeBuilder, EnvelopeVerifier, SecurityConfig, SecurityPolicyEngine,
};
use sd_03_dispatcher::{DispatchConfig, Dispatcher, ReqwestTransport};
use shared_crypto::{AesGcmSha256Provider, SecretKey};
use shared_types::{Envelope, Message, TrackerState};

/// Key shared by sender and peer.
pub const SHARED_KEY: [u8; 32] = [0x11; 32];

/// Serve `app` on an ephemeral local port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing listens on.
pub async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    addr
}

/// Mock identity provider state.
pub struct IdentityProvider {
    calls: AtomicUsize,
    expires_in: u64,
    delay: Duration,
    reject: bool,
}

impl IdentityProvider {
    /// Issuer calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn issue(State(idp): State<Arc<IdentityProvider>>) -> (StatusCode, String) {
    let n = idp.calls.fetch_add(1, Ordering::SeqCst) + 1;
    tokio::time::sleep(idp.delay).await;
    if idp.reject {
        return (StatusCode::UNAUTHORIZED, "invalid_client".to_string());
    }
    let body = serde_json::json!({
        "access_token": format!("tok-{}", n),
        "expires_in": idp.expires_in,
        "token_type": "Bearer",
    });
    (StatusCode::OK, body.to_string())
}

/// Start an identity provider issuing `tok-<n>` tokens.
pub async fn spawn_idp(
    expires_in: u64,
    delay: Duration,
    reject: bool,
) -> (String, Arc<IdentityProvider>) {
    let idp = Arc::new(IdentityProvider {
        calls: AtomicUsize::new(0),
        expires_in,
        delay,
        reject,
    });
    let app = Router::new()
        .route("/oauth2/token", post(issue))
        .with_state(Arc::clone(&idp));
    let addr = serve(app).await;
    (format!("http://{}/oauth2/token", addr), idp)
}

/// A request received by the mock peer.
#[derive(Debug, Clone)]
pub struct PeerRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Mock receiving peer state.
pub struct Peer {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<PeerRequest>>,
}

impl Peer {
    /// Requests received so far.
    pub fn requests(&self) -> Vec<PeerRequest> {
        self.requests.lock().clone()
    }
}

async fn receive(
    State(peer): State<Arc<Peer>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    peer.requests.lock().push(PeerRequest {
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    });
    (peer.status, peer.body.clone())
}

/// Start a peer answering every delivery with `status` and `body`.
pub async fn spawn_peer(status: StatusCode, body: &str) -> (String, Arc<Peer>) {
    let peer = Arc::new(Peer {
        status,
        body: body.to_string(),
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/registry/on-search", post(receive))
        .with_state(Arc::clone(&peer));
    let addr = serve(app).await;
    (format!("http://{}/registry/on-search", addr), peer)
}

/// Sender-side security engine.
pub fn engine(sign: bool, encrypt: bool) -> Arc<SecurityPolicyEngine> {
    Arc::new(
        SecurityPolicyEngine::new(
            SecurityConfig::new(sign, encrypt),
            Arc::new(AesGcmSha256Provider),
            Some(SecretKey::from_bytes(SHARED_KEY)),
        )
        .expect("engine config"),
    )
}

/// Peer-side verifier matching [`engine`].
pub fn verifier(sign: bool, encrypt: bool) -> EnvelopeVerifier {
    EnvelopeVerifier::new(
        SecurityConfig::new(sign, encrypt),
        Arc::new(AesGcmSha256Provider),
        Some(SecretKey::from_bytes(SHARED_KEY)),
    )
}

/// Dispatcher over the real token cache and transport, plus a handle on the cache.
pub fn dispatcher(sign: bool, encrypt: bool) -> (Dispatcher, DefaultTokenCache) {
    let token_config = TokenCacheConfig {
        refresh_skew_secs: 0,
        ..TokenCacheConfig::default()
    };
    let cache = default_cache(&token_config).expect("token cache");
    let transport = ReqwestTransport::new(&DispatchConfig::default()).expect("transport");
    let dispatcher = Dispatcher::new(
        engine(sign, encrypt),
        Arc::new(cache.clone()),
        Arc::new(transport),
    );
    (dispatcher, cache)
}

/// Credentials for the test client.
pub fn credentials(token_endpoint: &str) -> ClientCredentials {
    ClientCredentials::new("registry-client", "registry-secret", token_endpoint)
}

/// Response envelope with the given message id and JSON body.
pub fn envelope(message_id: &str, body: &str) -> Envelope {
    let header = EnvelopeBuilder::build_header(&TrackerState {
        version: "1.0.0".into(),
        message_id: message_id.into(),
        message_ts: "2024-01-01T00:00:00Z".into(),
        action: "on-search".into(),
        sender_id: "registry.example.org".into(),
        receiver_id: "client.example.org".into(),
        status: "succ".into(),
        ..TrackerState::default()
    });
    EnvelopeBuilder::build_envelope(header, Message::plaintext(body).expect("json body"))
}
