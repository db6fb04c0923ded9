//! Cache Module
//!
//! The pluggable store contract, key validation shared by every backend, and
//! the in-memory reference backend with lazy TTL expiration.

mod entry;
mod memory;
mod stats;


use std::time::Duration;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::{CacheError, Result};

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use stats::CacheStats;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

// == Cache Trait ==
/// Key/value store with per-entry expiration.
///
/// Implementations must be safe under any number of concurrent callers and
/// must never return an entry whose TTL has passed. Values cross the trait
/// boundary as copies in both directions. Backends doing real I/O should
/// give up early once `ctx` is cancelled.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the live value stored under `key`, if any.
    async fn get(&self, ctx: &Context, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key` for `ttl`.
    ///
    /// A zero `ttl` is a no-op: nothing is written and an existing entry
    /// under the same key is left in place.
    async fn set(&self, ctx: &Context, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, ctx: &Context, key: &str) -> Result<()>;
}

// == Key Validation ==
/// Rejects keys no backend should accept.
///
/// A key is invalid when it is empty or whitespace-only, longer than
/// `MAX_KEY_LENGTH` bytes, or contains `\r` or `\n`.
pub fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(CacheError::InvalidKey("empty key".to_string()));
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::KeyTooLong {
            len: key.len(),
            max: MAX_KEY_LENGTH,
        });
    }

    if key.contains(['\r', '\n']) {
        return Err(CacheError::InvalidKey(
            "key contains a line break".to_string(),
        ));
    }

    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_derived_key() {
        assert!(validate_key("toolcache:fs:read_file:fc2d5a6e81f0b5e0").is_ok());
    }

    #[test]
    fn test_validate_key_length_boundary() {
        assert!(validate_key(&"k".repeat(MAX_KEY_LENGTH)).is_ok());

        let err = validate_key(&"k".repeat(MAX_KEY_LENGTH + 1)).unwrap_err();
        assert_eq!(err, CacheError::KeyTooLong { len: 513, max: 512 });
    }

    #[test]
    fn test_validate_key_counts_bytes() {
        // 'é' is two bytes in UTF-8
        let key = "é".repeat(MAX_KEY_LENGTH / 2 + 1);
        assert!(matches!(
            validate_key(&key),
            Err(CacheError::KeyTooLong { .. })
        ));
    }

    #[test]
    fn test_validate_key_rejects_line_breaks() {
        assert!(matches!(validate_key("a\nb"), Err(CacheError::InvalidKey(_))));
        assert!(matches!(validate_key("a\rb"), Err(CacheError::InvalidKey(_))));
        assert!(matches!(validate_key("ab\r\n"), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_validate_key_rejects_empty() {
        assert!(matches!(validate_key(""), Err(CacheError::InvalidKey(_))));
        assert!(matches!(validate_key("   "), Err(CacheError::InvalidKey(_))));
        assert!(matches!(validate_key("\t "), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_validate_key_inner_spaces_allowed() {
        assert!(validate_key("tool with spaces").is_ok());
    }
}
