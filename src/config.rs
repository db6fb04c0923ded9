//! Configuration Module
//!
//! Loads the caching policy from environment variables.

use std::env;
use std::time::Duration;

use crate::policy::{Policy, DEFAULT_MAX_TTL, DEFAULT_TTL};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default TTL in seconds; 0 disables caching unless overridden
    pub default_ttl: u64,
    /// Maximum TTL in seconds; 0 means no upper bound
    pub max_ttl: u64,
    /// Cache results of tools tagged as unsafe
    pub allow_unsafe: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TOOLCACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `TOOLCACHE_MAX_TTL` - Maximum TTL in seconds (default: 3600)
    /// - `TOOLCACHE_ALLOW_UNSAFE` - `true`/`1`/`yes`/`on` to enable (default: false)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            default_ttl: lookup("TOOLCACHE_DEFAULT_TTL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.default_ttl),
            max_ttl: lookup("TOOLCACHE_MAX_TTL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_ttl),
            allow_unsafe: lookup("TOOLCACHE_ALLOW_UNSAFE")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.allow_unsafe),
        }
    }

    /// The immutable policy these settings describe.
    pub fn policy(&self) -> Policy {
        Policy::new(
            Duration::from_secs(self.default_ttl),
            Duration::from_secs(self.max_ttl),
            self.allow_unsafe,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL.as_secs(),
            max_ttl: DEFAULT_MAX_TTL.as_secs(),
            allow_unsafe: false,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
