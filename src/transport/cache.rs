//! Per-origin transport client cache.
//!
//! Clients are built lazily, at most once per origin even when several
//! tasks miss at the same time, and dropped after a period without use or
//! when the cache is full.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tokio::time::Instant;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, TransportError, resolve_url};
use crate::config::defaults;

/// Builds the HTTP client used for one origin.
///
/// Implemented by [`ReqwestFactory`](super::ReqwestFactory) in production
/// and by mock factories in tests.
pub trait TransportFactory: Send + Sync {
    /// The client type produced.
    type Client: HttpClient + 'static;

    /// Builds a client bound to `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Construction`] if the client cannot be built.
    fn create(&self, origin: &url::Url) -> Result<Self::Client, TransportError>;
}

/// An HTTP client bound to one origin.
///
/// Handed out by [`TransportCache::get`] behind an `Arc`; a handle stays
/// usable after the cache has evicted it.
#[derive(Debug)]
pub struct Transport<C> {
    origin: url::Url,
    client: C,
}

impl<C: HttpClient> Transport<C> {
    /// Binds `client` to `origin`.
    #[must_use]
    pub const fn new(origin: url::Url, client: C) -> Self {
        Self { origin, client }
    }

    /// The protocol-qualified origin.
    #[must_use]
    pub const fn origin(&self) -> &url::Url {
        &self.origin
    }

    /// The underlying client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Starts a request for `path` (relative to the origin) with `query`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] when the target URL cannot be built.
    pub fn prepare<'a, I>(
        &self,
        method: http::Method,
        path: &str,
        query: I,
    ) -> Result<HttpRequest, HttpError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let url = resolve_url(&self.origin, path, query)?;
        Ok(HttpRequest::new(method, url))
    }

    /// Sends a prepared request.
    ///
    /// # Errors
    ///
    /// Propagates the client's [`HttpError`].
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.client.request(request).await
    }
}

/// Protocol-qualifies a base URL and parses it.
///
/// Origins without an `http://` or `https://` prefix get `http://`.
///
/// # Errors
///
/// Returns [`TransportError::InvalidOrigin`] for blank or unparsable origins.
pub fn normalize_origin(base_url: &str) -> Result<url::Url, TransportError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(TransportError::invalid_origin(
            base_url,
            "origin must not be blank",
        ));
    }

    let lower = trimmed.to_ascii_lowercase();
    let qualified = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    url::Url::parse(&qualified).map_err(|e| TransportError::invalid_origin(base_url, e.to_string()))
}

struct Slot<C> {
    cell: Arc<OnceCell<Arc<Transport<C>>>>,
    last_access: Instant,
}

/// Bounded, idle-expiring cache of [`Transport`] handles keyed by origin.
///
/// # Eviction
///
/// - At most `capacity` entries; inserting beyond that drops the least
///   recently accessed one.
/// - An entry not accessed for `idle_ttl` expires.
/// - Every successful [`get`](Self::get) both refreshes the entry's idle
///   timer and makes it the most recently used.
///
/// # Concurrency
///
/// The index lock is held only to look up or insert a slot, never while a
/// client is being built. Construction runs inside the slot's own
/// [`OnceCell`], so concurrent misses on one origin build a single client
/// while misses on different origins proceed in parallel.
pub struct TransportCache<F: TransportFactory> {
    factory: F,
    idle_ttl: Duration,
    slots: Mutex<LruCache<String, Slot<F::Client>>>,
}

impl<F: TransportFactory> TransportCache<F> {
    /// Creates a cache with the default limits (10 entries, 1 hour idle).
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self::with_limits(
            factory,
            defaults::cache_capacity(),
            defaults::cache_idle_ttl(),
        )
    }

    /// Creates a cache with explicit limits.
    #[must_use]
    pub fn with_limits(factory: F, capacity: NonZeroUsize, idle_ttl: Duration) -> Self {
        Self {
            factory,
            idle_ttl,
            slots: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the transport for `base_url`, building it on a miss.
    ///
    /// # Errors
    ///
    /// - [`TransportError::InvalidOrigin`] for a blank or unparsable origin;
    ///   the cache is left untouched.
    /// - [`TransportError::Construction`] if the factory fails; no entry is
    ///   kept for the origin.
    pub async fn get(&self, base_url: &str) -> Result<Arc<Transport<F::Client>>, TransportError> {
        let origin = normalize_origin(base_url)?;
        let key = origin.to_string();
        let cell = self.slot(&key);

        let result = cell
            .get_or_try_init(|| async {
                tracing::debug!(origin = %origin, "Transport cache miss");
                self.factory
                    .create(&origin)
                    .map(|client| Arc::new(Transport::new(origin.clone(), client)))
            })
            .await;

        match result {
            Ok(transport) => Ok(Arc::clone(transport)),
            Err(e) => {
                self.discard(&key, &cell);
                Err(e)
            }
        }
    }

    /// Number of live (non-expired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut slots = self.slots.lock();
        self.purge_expired(&mut slots, Instant::now());
        slots.len()
    }

    /// Returns true if the cache holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if a live entry exists for `base_url`.
    ///
    /// Does not count as an access.
    #[must_use]
    pub fn contains(&self, base_url: &str) -> bool {
        let Ok(origin) = normalize_origin(base_url) else {
            return false;
        };
        let mut slots = self.slots.lock();
        self.purge_expired(&mut slots, Instant::now());
        slots.contains(origin.as_str())
    }

    /// Finds or inserts the slot for `key`, marking it as accessed.
    fn slot(&self, key: &str) -> Arc<OnceCell<Arc<Transport<F::Client>>>> {
        let now = Instant::now();
        let mut slots = self.slots.lock();
        self.purge_expired(&mut slots, now);

        if let Some(slot) = slots.get_mut(key) {
            slot.last_access = now;
            return Arc::clone(&slot.cell);
        }

        let cell = Arc::new(OnceCell::new());
        let slot = Slot {
            cell: Arc::clone(&cell),
            last_access: now,
        };
        if let Some((evicted, _)) = slots.push(key.to_string(), slot) {
            tracing::debug!(origin = %evicted, "Evicted least recently used transport");
        }
        cell
    }

    /// Drops expired entries.
    ///
    /// Access time and recency order are updated together, so expired
    /// entries always sit at the least-recently-used end.
    fn purge_expired(&self, slots: &mut LruCache<String, Slot<F::Client>>, now: Instant) {
        loop {
            let expired = slots
                .peek_lru()
                .is_some_and(|(_, slot)| now.duration_since(slot.last_access) >= self.idle_ttl);
            if !expired {
                break;
            }
            if let Some((origin, _)) = slots.pop_lru() {
                tracing::debug!(origin = %origin, "Expired idle transport");
            }
        }
    }

    /// Removes the slot for `key` if it still holds `cell`.
    fn discard(&self, key: &str, cell: &Arc<OnceCell<Arc<Transport<F::Client>>>>) {
        let mut slots = self.slots.lock();
        let same = slots
            .peek(key)
            .is_some_and(|slot| Arc::ptr_eq(&slot.cell, cell));
        if same {
            slots.pop(key);
        }
    }
}

impl<F: TransportFactory + std::fmt::Debug> std::fmt::Debug for TransportCache<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportCache")
            .field("factory", &self.factory)
            .field("idle_ttl", &self.idle_ttl)
            .field("entries", &self.slots.lock().len())
            .finish()
    }
}
