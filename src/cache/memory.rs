//! Memory Cache Module
//!
//! In-process reference backend: a HashMap guarded by a reader/writer lock,
//! with expiration checked on access instead of by a background sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::stats::StatsCounters;
use crate::cache::{validate_key, Cache, CacheEntry, CacheStats};
use crate::context::Context;
use crate::error::Result;

/// Outcome of the shared-lock part of a lookup.
enum Lookup {
    Hit(Arc<[u8]>),
    Expired,
    Missing,
}

// == Memory Cache ==
/// Unbounded in-memory cache with lazy TTL expiration.
///
/// Readers share the lock; writes and the purge of an expired entry found
/// by a read take it exclusively. Expired entries that are never read stay
/// resident until `cleanup_expired` or an overwrite removes them.
#[derive(Debug, Default)]
pub struct MemoryCache {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Performance statistics
    stats: StatsCounters,
}

impl MemoryCache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.entries.read().await.len();
        self.stats.snapshot(total_entries)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let removed = {
            let mut entries = self.entries.write().await;
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            before - entries.len()
        };

        if removed > 0 {
            self.stats.record_expirations(removed as u64);
            debug!(removed, "purged expired entries");
        }
        removed
    }

    // == Time To Live ==
    /// Remaining lifetime of a live entry.
    ///
    /// Returns None for absent or expired keys and `Duration::MAX` for
    /// entries whose TTL was too large to track.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let entries = self.entries.read().await;
        let entry = entries.get(key).filter(|entry| !entry.is_expired())?;
        Some(entry.ttl_remaining().unwrap_or(Duration::MAX))
    }

    // == Length ==
    /// Returns the current number of entries, expired-but-unread included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Removes `key` if the entry is still expired under the write lock.
    ///
    /// A concurrent `set` may have replaced the entry since the read.
    async fn purge_if_expired(&self, key: &str) {
        let purged = {
            let mut entries = self.entries.write().await;
            match entries.get(key) {
                Some(entry) if entry.is_expired() => entries.remove(key).is_some(),
                _ => false,
            }
        };

        if purged {
            self.stats.record_expirations(1);
            debug!(key, "purged expired entry on read");
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    // == Get ==
    /// Returns a copy of the stored value.
    ///
    /// Expired entries are removed and counted as misses. Invalid keys can
    /// never have been stored, so they are plain misses.
    async fn get(&self, _ctx: &Context, key: &str) -> Option<Vec<u8>> {
        if validate_key(key).is_err() {
            self.stats.record_miss();
            return None;
        }

        let lookup = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_expired() => Lookup::Expired,
                Some(entry) => Lookup::Hit(Arc::clone(&entry.value)),
                None => Lookup::Missing,
            }
        };

        match lookup {
            Lookup::Hit(value) => {
                self.stats.record_hit();
                Some(value.to_vec())
            }
            Lookup::Expired => {
                self.purge_if_expired(key).await;
                self.stats.record_miss();
                None
            }
            Lookup::Missing => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a copy of `value`, replacing any previous entry and its TTL.
    async fn set(&self, _ctx: &Context, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        validate_key(key)?;

        if ttl.is_zero() {
            self.stats.record_skipped_write();
            debug!(key, "zero ttl, skipping write");
            return Ok(());
        }

        let entry = CacheEntry::new(value, ttl);
        self.entries.write().await.insert(key.to_string(), entry);
        self.stats.record_write();

        Ok(())
    }

    // == Delete ==
    async fn delete(&self, _ctx: &Context, key: &str) -> Result<()> {
        validate_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}
