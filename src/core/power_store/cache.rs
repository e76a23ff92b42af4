//! Time-bounded cache in front of a power store.
//!
//! # Architecture
//!
//! ```text
//!                 CachedPowerStore
//!                        |
//!     +------------------+------------------+
//!     |                  |                  |
//!     v                  v                  v
//!  LRU Cache        Flight Gates        Cache Stats
//!  (entries)      (single-flight)        (metrics)
//! ```
//!
//! Entries are keyed by list identifier and requested fields. Concurrent
//! misses on the same key queue behind one gate: the first caller fetches,
//! the rest are served from the entry it leaves behind. Failed fetches leave
//! nothing behind, so the next waiter tries again.
//!
//! All mutable state is protected by `tokio::sync::Mutex`; no lock is held
//! while the inner store is awaited except the per-key gate.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{ListFields, PowerStore, Result};
use crate::core::hero::models::PowerRecord;

// ============================================================================
// Constants
// ============================================================================

/// Default number of cached lists.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Default TTL for cache entries (5 minutes).
pub const DEFAULT_TTL_SECONDS: u64 = 300;

// ============================================================================
// CacheConfig
// ============================================================================

/// Configuration options for the store cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached lists; least recently used are evicted.
    pub capacity: usize,

    /// Time-to-live for entries in seconds. 0 disables expiry.
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

impl CacheConfig {
    /// Builder method to set TTL.
    pub fn ttl(mut self, seconds: u64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    /// Builder method to set capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    fn ttl_duration(&self) -> Option<Duration> {
        (self.ttl_seconds > 0).then(|| Duration::from_secs(self.ttl_seconds))
    }
}

// ============================================================================
// CacheStats
// ============================================================================

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Fetches answered from the cache.
    pub hits: u64,
    /// Fetches that went to the inner store.
    pub misses: u64,
    /// Entries dropped because their TTL ran out.
    pub expirations: u64,
    /// Entries currently held.
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a fraction (0.0 - 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// ============================================================================
// CachedPowerStore
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    list: String,
    fields: ListFields,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    records: Vec<PowerRecord>,
    created_at: Instant,
}

/// A [`PowerStore`] that caches another one.
pub struct CachedPowerStore<S> {
    inner: S,
    config: CacheConfig,
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    gates: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
}

impl<S: PowerStore> CachedPowerStore<S> {
    pub fn new(inner: S, config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            config,
            entries: Mutex::new(LruCache::new(capacity)),
            gates: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Drop every cached entry for `list`, whatever fields were requested.
    pub async fn invalidate(&self, list: &str) -> usize {
        let mut entries = self.entries.lock().await;
        let stale: Vec<CacheKey> = entries
            .iter()
            .filter(|(key, _)| key.list == list)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.pop(key);
        }
        if !stale.is_empty() {
            log::debug!("Invalidated {} cache entries for list '{}'", stale.len(), list);
        }
        stale.len()
    }

    /// Drop every cached entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            entries: self.entries.lock().await.len(),
        }
    }

    async fn lookup(&self, key: &CacheKey) -> Option<Vec<PowerRecord>> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => self
                .config
                .ttl_duration()
                .map(|ttl| entry.created_at.elapsed() >= ttl)
                .unwrap_or(false),
        };

        if expired {
            entries.pop(key);
            self.expirations.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        entries.get(key).map(|entry| entry.records.clone())
    }

    async fn gate_for(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().await;
        gates
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn release_gate(&self, key: &CacheKey, gate: &Arc<Mutex<()>>) {
        let mut gates = self.gates.lock().await;
        // map + ours: nobody else is queued
        if Arc::strong_count(gate) <= 2 {
            gates.remove(key);
        }
    }
}

#[async_trait]
impl<S: PowerStore> PowerStore for CachedPowerStore<S> {
    async fn fetch_all(&self, list: &str, fields: &ListFields) -> Result<Vec<PowerRecord>> {
        let key = CacheKey {
            list: list.to_string(),
            fields: fields.clone(),
        };

        if let Some(records) = self.lookup(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("Cache hit for list '{}'", list);
            return Ok(records);
        }

        let gate = self.gate_for(&key).await;
        let result = {
            let _flight = gate.lock().await;

            // Whoever held the gate before us may have filled the entry.
            if let Some(records) = self.lookup(&key).await {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(records)
            } else {
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::debug!("Cache miss for list '{}', fetching", list);
                let fetched = self.inner.fetch_all(list, fields).await;
                if let Ok(records) = &fetched {
                    self.entries.lock().await.put(
                        key.clone(),
                        CacheEntry {
                            records: records.clone(),
                            created_at: Instant::now(),
                        },
                    );
                }
                fetched
            }
        };
        self.release_gate(&key, &gate).await;

        result
    }
}
