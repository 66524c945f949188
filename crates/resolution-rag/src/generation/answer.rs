//! Grounded answer generation

use std::sync::Arc;

use super::prompt::PromptBuilder;
use crate::error::Result;
use crate::providers::{LlmProvider, VectorSearchResult};

/// Turns a question and retrieved chunks into an answer
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerGenerator {
    /// Create a generator backed by `llm`
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Fail early when the model cannot be called
    pub fn check_configured(&self) -> Result<()> {
        self.llm.check_configured()
    }

    /// Generate an answer grounded in `chunks`
    pub async fn generate(&self, question: &str, chunks: &[VectorSearchResult]) -> Result<String> {
        // No prompt is built and no request is made without a credential
        self.llm.check_configured()?;

        let context = PromptBuilder::build_context(chunks);
        let prompt = PromptBuilder::build_rag_prompt(question, &context);

        tracing::debug!(
            "Generating answer with {} ({} chunks, {} prompt chars)",
            self.llm.model(),
            chunks.len(),
            prompt.chars().count()
        );

        self.llm.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testing::{EchoLlm, UnconfiguredLlm};

    #[tokio::test]
    async fn test_missing_credential_makes_no_call() {
        let llm = Arc::new(UnconfiguredLlm::default());
        let generator = AnswerGenerator::new(llm.clone());

        let err = generator.generate("¿Quién?", &[]).await.unwrap_err();

        assert!(matches!(err, Error::MissingCredential(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_prompt_reaches_model() {
        let llm = Arc::new(EchoLlm::default());
        let generator = AnswerGenerator::new(llm.clone());

        generator.generate("¿Quién?", &[]).await.unwrap();

        assert_eq!(llm.calls(), 1);
        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("PREGUNTA: ¿Quién?"));
    }
}
