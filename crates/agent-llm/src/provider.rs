//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// The advisor agent and the reviewer agent each hold an
/// `Arc<dyn LLMProvider>`, so tests can substitute a scripted provider.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion for the conversation in `request`
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name (e.g., "openai", "gemini")
    fn name(&self) -> &str;
}
