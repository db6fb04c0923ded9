//! Error types for the tool cache
//!
//! Provides unified error handling using thiserror. Every variant here
//! concerns the caching optimization only; tool executor failures travel
//! as `anyhow::Error` and never pass through this type.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for key derivation and cache backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key is empty, whitespace-only, or contains a line break
    #[error("toolcache: key is invalid: {0}")]
    InvalidKey(String),

    /// Key is longer than the backend accepts
    #[error("toolcache: key exceeds max length of {max} bytes (got {len})")]
    KeyTooLong { len: usize, max: usize },

    /// Input could not be canonicalized
    #[error("toolcache: failed to canonicalize input: {0}")]
    Encoding(String),

    /// Backend storage failure
    #[error("toolcache: backend error: {0}")]
    Backend(String),
}

impl CacheError {
    /// True for the two key validation kinds.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, CacheError::InvalidKey(_) | CacheError::KeyTooLong { .. })
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Encoding(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
