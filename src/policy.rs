//! Policy Module
//!
//! TTL defaults, limits, and the unsafe-caching switch.

use std::time::Duration;

/// Default TTL of `Policy::default()` (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Max TTL of `Policy::default()` (1 hour)
pub const DEFAULT_MAX_TTL: Duration = Duration::from_secs(60 * 60);

// == Policy ==
/// Immutable caching policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// TTL used when no override is given; zero disables caching by default
    pub default_ttl: Duration,
    /// Upper bound for any effective TTL; zero means unbounded
    pub max_ttl: Duration,
    /// Cache results of tools tagged unsafe
    pub allow_unsafe: bool,
}

impl Policy {
    pub const fn new(default_ttl: Duration, max_ttl: Duration, allow_unsafe: bool) -> Self {
        Self {
            default_ttl,
            max_ttl,
            allow_unsafe,
        }
    }

    /// 5 minute default, 1 hour max, unsafe caching off.
    pub const fn standard() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_TTL, false)
    }

    /// Caches nothing.
    pub const fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, false)
    }

    pub const fn with_allow_unsafe(mut self, allow_unsafe: bool) -> Self {
        self.allow_unsafe = allow_unsafe;
        self
    }

    // == Effective TTL ==
    /// Resolves the TTL to store with.
    ///
    /// 1. A non-zero `override_ttl` wins, else `default_ttl`.
    /// 2. A non-zero `max_ttl` clamps the result.
    ///
    /// A zero result means "do not cache".
    pub fn effective_ttl(&self, override_ttl: Duration) -> Duration {
        let ttl = if override_ttl > Duration::ZERO {
            override_ttl
        } else {
            self.default_ttl
        };

        if self.max_ttl > Duration::ZERO && ttl > self.max_ttl {
            self.max_ttl
        } else {
            ttl
        }
    }

    /// Whether caching is on before any override is considered.
    pub fn should_cache(&self) -> bool {
        self.default_ttl > Duration::ZERO
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::standard()
    }
}
