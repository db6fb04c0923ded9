//! Tool Executors
//!
//! The operation the middleware wraps. Executors must be idempotent for
//! their results to be safely cached; nothing here verifies that.

use std::future::Future;

use async_trait::async_trait;

use crate::canonical::CanonicalValue;
use crate::context::Context;

// == Tool Executor Trait ==
/// Runs a tool and returns its serialized result.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(
        &self,
        ctx: &Context,
        tool_id: &str,
        input: &CanonicalValue,
    ) -> anyhow::Result<Vec<u8>>;
}

// == Closure Adapter ==
/// Executor backed by an async closure. Built with [`executor_fn`].
#[derive(Clone)]
pub struct FnExecutor<F> {
    f: F,
}

/// Wraps `Fn(Context, String, CanonicalValue) -> Future` as a [`ToolExecutor`].
///
/// The closure receives owned copies so the returned future can be `'static`.
pub fn executor_fn<F, Fut>(f: F) -> FnExecutor<F>
where
    F: Fn(Context, String, CanonicalValue) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<u8>>> + Send + 'static,
{
    FnExecutor { f }
}

#[async_trait]
impl<F, Fut> ToolExecutor for FnExecutor<F>
where
    F: Fn(Context, String, CanonicalValue) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<u8>>> + Send + 'static,
{
    async fn execute(
        &self,
        ctx: &Context,
        tool_id: &str,
        input: &CanonicalValue,
    ) -> anyhow::Result<Vec<u8>> {
        (self.f)(ctx.clone(), tool_id.to_string(), input.clone()).await
    }
}

impl<F> std::fmt::Debug for FnExecutor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnExecutor").finish_non_exhaustive()
    }
}
