//! Trait definitions for model backends.

use animatic_core::{GenerateRequest, GenerateResponse};
use animatic_error::AnimaticResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait that all model backends implement.
///
/// One call performs one model invocation. Implementations own their timeout
/// and retry policy; callers never retry.
#[async_trait]
pub trait AnimaticDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> AnimaticResult<GenerateResponse>;

    /// Provider name (e.g., "openrouter", "google").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: AnimaticDriver + ?Sized> AnimaticDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> AnimaticResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
