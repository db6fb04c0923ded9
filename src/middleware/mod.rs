//! Read-Through Middleware
//!
//! Wraps tool execution with a cache lookup and, on a miss, stores the
//! result under a key derived from the tool ID and its input.
//!
//! Only the caching optimization degrades on failure: key derivation and
//! store write errors fall back to plain execution, while executor errors
//! always reach the caller unchanged.

mod executor;
mod skip;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::Cache;
use crate::canonical::CanonicalValue;
use crate::context::Context;
use crate::keyer::Keyer;
use crate::policy::Policy;

pub use executor::{executor_fn, FnExecutor, ToolExecutor};
pub use skip::{default_skip_rule, never_skip, AnyOf, SkipByPrefix, SkipRule, DEFAULT_UNSAFE_TAGS};

// == Cache Middleware ==
/// Memoizes idempotent tool calls.
///
/// Holds no mutable state of its own; clones share the same store.
/// Concurrent cold-cache calls for the same input each run the executor,
/// and the last write wins.
#[derive(Clone)]
pub struct CacheMiddleware {
    cache: Arc<dyn Cache>,
    keyer: Arc<dyn Keyer>,
    policy: Policy,
    skip_rule: Option<Arc<dyn SkipRule>>,
}

impl CacheMiddleware {
    // == Constructor ==
    /// Creates a middleware using `default_skip_rule` for bypass decisions.
    pub fn new(cache: Arc<dyn Cache>, keyer: Arc<dyn Keyer>, policy: Policy) -> Self {
        Self {
            cache,
            keyer,
            policy,
            skip_rule: None,
        }
    }

    /// Replaces the default skip rule.
    pub fn with_skip_rule(mut self, rule: impl SkipRule + 'static) -> Self {
        self.skip_rule = Some(Arc::new(rule));
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    // == Execute ==
    /// Returns the cached result for `(tool_id, input)` or runs `executor`
    /// and caches what it returns.
    ///
    /// 1. Skipped calls run the executor without touching the cache.
    /// 2. A key derivation failure is treated as a skip.
    /// 3. A hit returns the stored bytes; the executor does not run.
    /// 4. On a miss, executor errors are returned as-is and nothing is stored.
    /// 5. Successful results are stored with the policy's default TTL; a
    ///    failed write is logged and ignored.
    pub async fn execute<E>(
        &self,
        ctx: &Context,
        tool_id: &str,
        input: &CanonicalValue,
        tags: &[&str],
        executor: &E,
    ) -> anyhow::Result<Vec<u8>>
    where
        E: ToolExecutor + ?Sized,
    {
        if self.should_skip(tool_id, tags) {
            debug!(tool_id, ?tags, "cache bypassed by skip rule");
            return executor.execute(ctx, tool_id, input).await;
        }

        let key = match self.keyer.key(tool_id, input) {
            Ok(key) => key,
            Err(err) => {
                warn!(tool_id, error = %err, "key derivation failed, executing uncached");
                return executor.execute(ctx, tool_id, input).await;
            }
        };

        if let Some(cached) = self.cache.get(ctx, &key).await {
            debug!(tool_id, key = %key, "cache hit");
            return Ok(cached);
        }
        debug!(tool_id, key = %key, "cache miss");

        let result = executor.execute(ctx, tool_id, input).await?;

        // Per-call overrides are not exposed; only the policy decides
        let ttl = self.policy.effective_ttl(Duration::ZERO);
        if ttl.is_zero() {
            debug!(tool_id, key = %key, "policy ttl is zero, not caching");
        } else if let Err(err) = self.cache.set(ctx, &key, &result, ttl).await {
            warn!(
                tool_id,
                key = %key,
                ttl_ms = ttl.as_millis() as u64,
                error = %err,
                "failed to cache tool result"
            );
        }

        Ok(result)
    }

    // == Skip Decision ==
    /// Whether a call bypasses the cache.
    ///
    /// `allow_unsafe` disables every skip rule, the configured one included.
    pub fn should_skip(&self, tool_id: &str, tags: &[&str]) -> bool {
        if self.policy.allow_unsafe {
            return false;
        }

        match &self.skip_rule {
            Some(rule) => rule.should_skip(tool_id, tags),
            None => default_skip_rule(tool_id, tags),
        }
    }
}

impl std::fmt::Debug for CacheMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheMiddleware")
            .field("policy", &self.policy)
            .field("custom_skip_rule", &self.skip_rule.is_some())
            .finish_non_exhaustive()
    }
}
