//! Skip Rules
//!
//! Predicates deciding that a tool call must bypass the cache entirely.
//! Rules are pure: they never touch the cache or do I/O.

use std::sync::Arc;

/// Tags marking a tool as side-effecting; matched case-insensitively.
pub const DEFAULT_UNSAFE_TAGS: [&str; 5] = ["write", "danger", "unsafe", "mutation", "delete"];

// == Skip Rule Trait ==
/// Decides whether a call bypasses the cache.
///
/// Any `Fn(&str, &[&str]) -> bool` closure is a rule.
pub trait SkipRule: Send + Sync {
    fn should_skip(&self, tool_id: &str, tags: &[&str]) -> bool;
}

impl<F> SkipRule for F
where
    F: Fn(&str, &[&str]) -> bool + Send + Sync,
{
    fn should_skip(&self, tool_id: &str, tags: &[&str]) -> bool {
        self(tool_id, tags)
    }
}

// == Built-in Rules ==
/// Skips when any tag is one of `DEFAULT_UNSAFE_TAGS`, ignoring case.
pub fn default_skip_rule(_tool_id: &str, tags: &[&str]) -> bool {
    tags.iter().any(|tag| {
        DEFAULT_UNSAFE_TAGS
            .iter()
            .any(|unsafe_tag| tag.eq_ignore_ascii_case(unsafe_tag))
    })
}

/// Caches everything. Only sensible when every tool is idempotent.
pub fn never_skip(_tool_id: &str, _tags: &[&str]) -> bool {
    false
}

/// Skips tools whose ID starts with any of the given namespace prefixes.
#[derive(Debug, Clone, Default)]
pub struct SkipByPrefix {
    prefixes: Vec<String>,
}

impl SkipByPrefix {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl SkipRule for SkipByPrefix {
    fn should_skip(&self, tool_id: &str, _tags: &[&str]) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| tool_id.starts_with(prefix.as_str()))
    }
}

/// Skips when any inner rule skips. An empty set never skips.
#[derive(Clone, Default)]
pub struct AnyOf {
    rules: Vec<Arc<dyn SkipRule>>,
}

impl AnyOf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rule: impl SkipRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }
}

impl std::fmt::Debug for AnyOf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyOf")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl SkipRule for AnyOf {
    fn should_skip(&self, tool_id: &str, tags: &[&str]) -> bool {
        self.rules.iter().any(|rule| rule.should_skip(tool_id, tags))
    }
}
