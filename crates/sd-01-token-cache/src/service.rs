//! # Token Cache Service
//!
//! Application service implementing the `TokenProvider` inbound port.
//!
//! ## Single-flight refresh
//!
//! Refreshes are tracked in a table keyed by client id. The first caller that
//! finds no valid record installs a shared refresh future; every later caller
//! for the same id awaits that same future until it completes. The future
//! re-reads the store before calling the issuer, writes the new record, and
//! only then removes its own table entry, so a caller arriving after removal
//! always finds the fresh record.
//!
//! The table holds weak handles only. If every waiter is dropped the refresh
//! is dropped with them and the next caller starts a new one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::config::TokenCacheConfig;
use crate::domain::entities::{is_expired, ClientCredentials, TokenRecord};
use crate::domain::errors::TokenError;
use crate::ports::inbound::TokenProvider;
use crate::ports::outbound::{Clock, TokenIssuer, TokenStore};

type RefreshOutcome = BoxFuture<'static, Result<TokenRecord, TokenError>>;
type RefreshFuture = Shared<RefreshOutcome>;

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls answered from a valid cached record
    pub hits: u64,
    /// Successful issuer calls
    pub refreshes: u64,
    /// Failed refresh attempts
    pub failures: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

struct Inner<I, S, C> {
    issuer: I,
    store: S,
    clock: C,
    refresh_skew: Duration,
    in_flight: Mutex<HashMap<String, WeakShared<RefreshOutcome>>>,
    counters: Counters,
}

/// Per-client token cache with expiry-driven, single-flight refresh.
pub struct TokenCache<I, S, C> {
    inner: Arc<Inner<I, S, C>>,
}

impl<I, S, C> Clone for TokenCache<I, S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, S, C> TokenCache<I, S, C>
where
    I: TokenIssuer + 'static,
    S: TokenStore + 'static,
    C: Clock + 'static,
{
    /// Create a new token cache.
    ///
    /// # Arguments
    /// * `issuer` - Identity provider client
    /// * `store` - Backing store for token records
    /// * `clock` - Time source for expiry decisions
    /// * `config` - Refresh skew
    pub fn new(issuer: I, store: S, clock: C, config: &TokenCacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                issuer,
                store,
                clock,
                refresh_skew: config.refresh_skew(),
                in_flight: Mutex::new(HashMap::new()),
                counters: Counters::default(),
            }),
        }
    }

    /// Cached record for `client_id`, expired or not.
    ///
    /// A stored value that does not decode is treated as absent.
    pub async fn lookup(&self, client_id: &str) -> Result<Option<TokenRecord>, TokenError> {
        self.inner.lookup(client_id).await
    }

    /// True if `record` is absent or expired at the current time.
    pub fn is_expired(&self, record: Option<&TokenRecord>) -> bool {
        is_expired(record, self.inner.clock.now())
    }

    /// Store `record` for `client_id`, replacing any previous record.
    pub async fn store(&self, client_id: &str, record: &TokenRecord) -> Result<(), TokenError> {
        self.inner.save(client_id, record).await
    }

    /// Client ids with a stored record whose id matches `pattern`.
    pub async fn cached_clients(&self, pattern: &str) -> Result<Vec<String>, TokenError> {
        Ok(self.inner.store.keys(pattern).await?)
    }

    /// Return a valid token for the client, refreshing at most once
    /// concurrently per client id.
    pub async fn get_or_refresh(&self, credentials: &ClientCredentials) -> Result<String, TokenError> {
        let record = self.inner.lookup(&credentials.client_id).await?;
        if let Some(record) = record {
            if !record.is_expired_at(self.inner.clock.now()) {
                self.inner.counters.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(record.token);
            }
        }

        let flight = self.flight_for(credentials);
        flight.await.map(|record| record.token)
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        let counters = &self.inner.counters;
        CacheStats {
            hits: counters.hits.load(Ordering::Relaxed),
            refreshes: counters.refreshes.load(Ordering::Relaxed),
            failures: counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Number of refreshes currently in flight.
    pub fn in_flight(&self) -> usize {
        let mut in_flight = self.inner.in_flight.lock();
        in_flight.retain(|_, flight| flight.upgrade().is_some());
        in_flight.len()
    }

    fn flight_for(&self, credentials: &ClientCredentials) -> RefreshFuture {
        let mut in_flight = self.inner.in_flight.lock();
        if let Some(flight) = in_flight
            .get(&credentials.client_id)
            .and_then(WeakShared::upgrade)
        {
            debug!(client_id = %credentials.client_id, "Joining in-flight token refresh");
            return flight;
        }

        let inner = Arc::clone(&self.inner);
        let credentials = credentials.clone();
        let client_id = credentials.client_id.clone();
        let flight = async move {
            let result = inner.refresh(&credentials).await;
            inner.in_flight.lock().remove(&credentials.client_id);
            result
        }
        .boxed()
        .shared();

        if let Some(handle) = flight.downgrade() {
            in_flight.insert(client_id, handle);
        }
        flight
    }
}

impl<I, S, C> Inner<I, S, C>
where
    I: TokenIssuer,
    S: TokenStore,
    C: Clock,
{
    async fn lookup(&self, client_id: &str) -> Result<Option<TokenRecord>, TokenError> {
        let Some(raw) = self.store.get(client_id).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<TokenRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(client_id = %client_id, error = %e, "Discarding undecodable token record");
                Ok(None)
            }
        }
    }

    async fn save(&self, client_id: &str, record: &TokenRecord) -> Result<(), TokenError> {
        let value = serde_json::to_string(record)
            .map_err(|e| TokenError::Store(format!("encoding token record: {}", e)))?;
        self.store.set(client_id, value).await?;
        Ok(())
    }

    async fn refresh(&self, credentials: &ClientCredentials) -> Result<TokenRecord, TokenError> {
        let client_id = credentials.client_id.as_str();

        // Another flight may have completed between the caller's lookup and
        // this one starting.
        if let Some(record) = self.lookup(client_id).await? {
            if !record.is_expired_at(self.clock.now()) {
                return Ok(record);
            }
        }

        let outcome = async {
            let issued = self.issuer.fetch_token(credentials).await?;
            let record = TokenRecord::from_issued(issued, self.clock.now(), self.refresh_skew)?;
            self.save(client_id, &record).await?;
            Ok::<_, TokenError>(record)
        }
        .await;

        match &outcome {
            Ok(record) => {
                self.counters.refreshes.fetch_add(1, Ordering::Relaxed);
                info!(
                    client_id = %client_id,
                    expires_at = %record.expires_at,
                    "Access token refreshed"
                );
            }
            Err(e) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                warn!(client_id = %client_id, code = e.code(), error = %e, "Token refresh failed");
            }
        }
        outcome
    }
}

#[async_trait]
impl<I, S, C> TokenProvider for TokenCache<I, S, C>
where
    I: TokenIssuer + 'static,
    S: TokenStore + 'static,
    C: Clock + 'static,
{
    async fn get_or_refresh(&self, credentials: &ClientCredentials) -> Result<String, TokenError> {
        TokenCache::get_or_refresh(self, credentials).await
    }
}
