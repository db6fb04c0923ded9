//! Tool Cache - read-through result caching for idempotent tool calls
//!
//! Derives deterministic keys from a tool ID and its canonicalized input,
//! serves repeat calls from a pluggable store, and bypasses the cache for
//! tools tagged as side-effecting.

pub mod cache;
pub mod canonical;
pub mod config;
pub mod context;
pub mod error;
pub mod keyer;
pub mod middleware;
pub mod policy;

pub use cache::{validate_key, Cache, CacheStats, MemoryCache, MAX_KEY_LENGTH};
pub use canonical::{encode, CanonicalValue};
pub use config::Config;
pub use context::Context;
pub use error::{CacheError, Result};
pub use keyer::{DefaultKeyer, Keyer, KEY_HASH_BYTES, KEY_PREFIX};
pub use middleware::{
    default_skip_rule, executor_fn, never_skip, AnyOf, CacheMiddleware, SkipByPrefix, SkipRule,
    ToolExecutor, DEFAULT_UNSAFE_TAGS,
};
pub use policy::Policy;
