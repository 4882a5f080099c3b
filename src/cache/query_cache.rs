use lru::LruCache;
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::config::CacheConfig;
use super::stats::CacheStats;
use crate::core::DriverError;

/// Scope-dependent key over bound query text.
///
/// Globally scoped queries share one key across sessions; session-scoped
/// queries prepend the session identifier. Construction is a pure function of
/// its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn global(bound_query: impl Into<String>) -> Self {
        Self(bound_query.into())
    }

    #[must_use]
    pub fn session(session_id: &str, bound_query: &str) -> Self {
        Self(format!("{session_id}{bound_query}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn weight(&self) -> usize {
        self.0.len()
    }
}

/// Byte weight of a cached value, charged against the cache budget.
pub trait EntryWeight {
    fn weight_bytes(&self) -> usize;
}

/// Entry stored in the cache
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    size_bytes: usize,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

enum FlightState<V> {
    Pending,
    Settled(Result<V, DriverError>),
}

/// Per-key in-flight computation marker (v0.3.0 - single-flight). The leader
/// publishes its settled result here; every waiter blocked on the key
/// observes that one outcome.
struct Flight<V> {
    state: Mutex<FlightState<V>>,
    settled: Condvar,
}

impl<V: Clone> Flight<V> {
    fn new() -> Self {
        Self {
            state: Mutex::new(FlightState::Pending),
            settled: Condvar::new(),
        }
    }

    fn publish(&self, result: Result<V, DriverError>) {
        *self.state.lock() = FlightState::Settled(result);
        self.settled.notify_all();
    }

    fn wait(&self) -> Result<V, DriverError> {
        let mut state = self.state.lock();
        loop {
            if let FlightState::Settled(result) = &*state {
                return result.clone();
            }
            self.settled.wait(&mut state);
        }
    }
}

struct CacheInner<V> {
    entries: LruCache<CacheKey, CacheEntry<V>>,
    memory_used: usize,
    inflight: HashMap<CacheKey, Arc<Flight<V>>>,
}

enum Role<V> {
    Leader(Arc<Flight<V>>),
    Waiter(Arc<Flight<V>>),
}

/// Thread-safe result cache with TTL expiry, a cumulative byte budget and
/// single-flight compute-on-miss.
///
/// `get_or_compute` guarantees at most one in-flight computation per key
/// across all threads. Failures propagate to every caller blocked on the key
/// and are never cached, so the next call retries.
pub struct QueryCache<V> {
    inner: Mutex<CacheInner<V>>,
    config: CacheConfig,
    stats: CacheStats,
}

impl<V: Clone + EntryWeight> QueryCache<V> {
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(CacheInner {
                entries: LruCache::new(capacity),
                memory_used: 0,
                inflight: HashMap::new(),
            }),
            config,
            stats: CacheStats::new(),
        }
    }

    /// Returns the cached value for `key`, or runs `compute` exactly once to
    /// produce it.
    ///
    /// Concurrent callers for the same key block until the first computation
    /// settles and then each observe its outcome. With caching disabled the
    /// call recomputes directly, no coordination.
    pub fn get_or_compute<F>(&self, key: &CacheKey, compute: F) -> Result<V, DriverError>
    where
        F: FnOnce() -> Result<V, DriverError>,
    {
        if !self.config.enabled {
            return compute();
        }

        let role = {
            let mut inner = self.inner.lock();
            if let Some(value) = self.lookup_live(&mut inner, key) {
                self.stats.record_hit();
                trace!(key = key.as_str(), "cache hit");
                return Ok(value);
            }
            self.stats.record_miss();
            if let Some(flight) = inner.inflight.get(key) {
                trace!(key = key.as_str(), "awaiting in-flight computation");
                Role::Waiter(Arc::clone(flight))
            } else {
                let flight = Arc::new(Flight::new());
                inner.inflight.insert(key.clone(), Arc::clone(&flight));
                Role::Leader(flight)
            }
        };

        match role {
            Role::Waiter(flight) => flight.wait(),
            Role::Leader(flight) => {
                let result = compute();
                {
                    let mut inner = self.inner.lock();
                    inner.inflight.remove(key);
                    if let Ok(value) = &result {
                        Self::insert_locked(
                            &mut inner,
                            &self.config,
                            &self.stats,
                            key,
                            value.clone(),
                        );
                    }
                }
                flight.publish(result.clone());
                result
            }
        }
    }

    /// Live (non-expired) entry lookup; drops an expired entry on the way.
    fn lookup_live(&self, inner: &mut CacheInner<V>, key: &CacheKey) -> Option<V> {
        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired(self.config.ttl) => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            if let Some(entry) = inner.entries.pop(key) {
                inner.memory_used = inner.memory_used.saturating_sub(entry.size_bytes);
                self.stats.record_expiration();
            }
        }
        None
    }

    fn insert_locked(
        inner: &mut CacheInner<V>,
        config: &CacheConfig,
        stats: &CacheStats,
        key: &CacheKey,
        value: V,
    ) {
        let size_bytes = key.weight() + value.weight_bytes();
        if size_bytes > config.max_memory_bytes {
            debug!(key = key.as_str(), size_bytes, "entry exceeds cache budget, not cached");
            return;
        }

        while inner.memory_used + size_bytes > config.max_memory_bytes {
            match inner.entries.pop_lru() {
                Some((_, evicted)) => {
                    inner.memory_used = inner.memory_used.saturating_sub(evicted.size_bytes);
                    stats.record_eviction();
                }
                None => break,
            }
        }

        // Replacing an existing entry: release its weight first
        if let Some(old) = inner.entries.peek(key) {
            inner.memory_used = inner.memory_used.saturating_sub(old.size_bytes);
        }

        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
            size_bytes,
        };
        if let Some((evicted_key, evicted)) = inner.entries.push(key.clone(), entry) {
            if evicted_key != *key {
                inner.memory_used = inner.memory_used.saturating_sub(evicted.size_bytes);
                stats.record_eviction();
            }
        }
        inner.memory_used += size_bytes;
    }

    /// Remove an entry from the cache
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.entries.pop(key) {
            inner.memory_used = inner.memory_used.saturating_sub(entry.size_bytes);
            true
        } else {
            false
        }
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.memory_used = 0;
    }

    /// Expire entries that have exceeded TTL, returning how many were dropped.
    pub fn expire_stale(&self) -> usize {
        let mut inner = self.inner.lock();
        let ttl = self.config.ttl;

        let expired_keys: Vec<CacheKey> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            if let Some(entry) = inner.entries.pop(&key) {
                inner.memory_used = inner.memory_used.saturating_sub(entry.size_bytes);
                self.stats.record_expiration();
            }
        }
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Current memory usage in bytes
    #[must_use]
    pub fn memory_used(&self) -> usize {
        self.inner.lock().memory_used
    }

    #[must_use]
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl<V> std::fmt::Debug for QueryCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("QueryCache")
            .field("enabled", &self.config.enabled)
            .field("max_entries", &self.config.max_entries)
            .field("max_memory_bytes", &self.config.max_memory_bytes)
            .field("ttl", &self.config.ttl)
            .field("current_entries", &inner.entries.len())
            .field("memory_used", &inner.memory_used)
            .finish()
    }
}
