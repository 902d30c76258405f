//! # Token Cache Subsystem (SD-01)
//!
//! Maps a client id to its cached access token and refreshes it from the
//! identity provider when absent or expired.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Token records, expiry rule, errors, config
//! - **Ports Layer** (`ports/`): `TokenProvider` inbound; `TokenIssuer`,
//!   `TokenStore`, `Clock` outbound
//! - **Adapters Layer** (`adapters/`): HTTP issuer, in-memory store, clocks
//! - **Service Layer** (`service.rs`): Single-flight `TokenCache`
//!
//! ## Guarantees
//!
//! - An expired token is never handed out
//! - At most one identity provider call is in flight per client id; concurrent
//!   callers share its outcome, success or failure
//! - A failed refresh stores nothing and is not retried automatically

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{HttpTokenIssuer, InMemoryTokenStore, ManualClock, SystemClock};
pub use domain::config::{ConfigError, TokenCacheConfig};
pub use domain::entities::{is_expired, ClientCredentials, IssuedToken, TokenRecord};
pub use domain::errors::{StoreError, TokenError};
pub use ports::inbound::TokenProvider;
pub use ports::outbound::{Clock, TokenIssuer, TokenStore};
pub use service::{CacheStats, TokenCache};

/// Token cache wired to the HTTP issuer, the in-memory store and the wall clock.
pub type DefaultTokenCache = TokenCache<HttpTokenIssuer, InMemoryTokenStore, SystemClock>;

/// Build the default token cache from `config`.
pub fn default_cache(config: &TokenCacheConfig) -> Result<DefaultTokenCache, TokenError> {
    let issuer = HttpTokenIssuer::new(config)?;
    Ok(TokenCache::new(
        issuer,
        InMemoryTokenStore::new(),
        SystemClock,
        config,
    ))
}
