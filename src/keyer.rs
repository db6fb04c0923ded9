//! Key Derivation Module
//!
//! Derives cache keys of the form `toolcache:<tool_id>:<hash>` from a tool
//! identifier and its canonicalized input.

use sha2::{Digest, Sha256};

use crate::canonical::{encode, CanonicalValue};
use crate::error::Result;

/// Namespace prefix of every derived key.
pub const KEY_PREFIX: &str = "toolcache";

/// Digest bytes kept in the key (16 hex characters).
///
/// 64 bits keeps keys short; two distinct inputs sharing a prefix would
/// read each other's results.
pub const KEY_HASH_BYTES: usize = 8;

// == Keyer Trait ==
/// Derives cache keys from tool input.
///
/// Implementations must be deterministic and safe for concurrent use.
pub trait Keyer: Send + Sync {
    fn key(&self, tool_id: &str, input: &CanonicalValue) -> Result<String>;
}

// == Default Keyer ==
/// SHA-256 over the canonical encoding, truncated to `KEY_HASH_BYTES`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeyer;

impl DefaultKeyer {
    pub fn new() -> Self {
        Self
    }
}

impl Keyer for DefaultKeyer {
    fn key(&self, tool_id: &str, input: &CanonicalValue) -> Result<String> {
        let canonical = encode(input);
        let digest = Sha256::digest(&canonical);
        let hash_hex = hex::encode(&digest[..KEY_HASH_BYTES]);

        Ok(format!("{}:{}:{}", KEY_PREFIX, tool_id, hash_hex))
    }
}
