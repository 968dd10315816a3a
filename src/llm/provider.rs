use async_trait::async_trait;

use crate::errors::ProviderError;

/// A single generation backend: prompt in, completion text out.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name for logging (e.g. "self-hosted", "openai").
    fn name(&self) -> &str;

    /// Run one completion. Errors are handled by the fallback chain in
    /// `GenerationService`, never by callers.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
