//! LLM provider trait for generating answers

use async_trait::async_trait;
use crate::error::Result;

/// Trait for hosted language models
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API (gemini-2.5-flash)
/// - `OllamaLlm`: Local Ollama server
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Verify the provider can be called at all (credential present)
    ///
    /// Callers check this before `generate`, so a missing credential never
    /// produces an outbound request.
    fn check_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Complete a fully assembled prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
