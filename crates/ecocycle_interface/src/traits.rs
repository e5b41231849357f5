//! Trait definitions for advice backends.

use crate::AdviceRequest;
use async_trait::async_trait;
use ecocycle_error::ProviderResult;

/// A generative text service that answers a single prompt.
///
/// Implementations make exactly one upstream call per invocation and never
/// retry; retry and pacing decisions belong to the gateway.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Generate a plain-text answer for the request.
    async fn generate(&self, req: &AdviceRequest) -> ProviderResult<String>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-1.5-flash").
    fn model_name(&self) -> &str;
}
