//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::sync::Arc;
use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value and its absolute expiration time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes; cloning the entry shares them
    pub value: Arc<[u8]>,
    /// Expiration instant, None = TTL too large to represent
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Copies `value` into a new entry expiring `ttl` from now.
    pub fn new(value: &[u8], ttl: Duration) -> Self {
        Self {
            value: Arc::from(value),
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining TTL, `Duration::ZERO` once expired, or None
    /// when the entry never expires.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
