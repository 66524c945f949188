//! Retrieve-then-generate query pipeline

use std::sync::Arc;

use crate::error::Result;
use crate::generation::AnswerGenerator;
use crate::providers::{EmbeddingProvider, LlmProvider, VectorStoreProvider};
use crate::retrieval::Retriever;
use crate::types::QueryResult;

/// One question in, one grounded answer out
///
/// Holds no per-request state; each call is an independent sequential run.
pub struct RagPipeline {
    retriever: Retriever,
    generator: AnswerGenerator,
}

impl RagPipeline {
    /// Create a pipeline from its three capabilities
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            retriever: Retriever::new(embedder, store),
            generator: AnswerGenerator::new(llm),
        }
    }

    /// Answer `question` from the `k` most similar chunks
    pub async fn query(&self, question: &str, k: usize) -> Result<QueryResult> {
        // Skip retrieval entirely when the answer could never be generated
        self.generator.check_configured()?;

        let retrieved_chunks = self.retriever.retrieve(question, k).await?;
        let generated_answer = self.generator.generate(question, &retrieved_chunks).await?;

        tracing::info!(
            "Answered question ({} chunks, top similarity {:.3})",
            retrieved_chunks.len(),
            retrieved_chunks.first().map(|r| r.similarity).unwrap_or(0.0)
        );

        Ok(QueryResult {
            retrieved_chunks,
            generated_answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testing::{CountingEmbedder, EchoLlm, FailingLlm, FixedStore, UnconfiguredLlm};

    #[tokio::test]
    async fn test_query_runs_retrieve_then_generate() {
        let embedder = Arc::new(CountingEmbedder::new(4));
        let store = Arc::new(FixedStore::with_texts(&["uno", "dos", "tres"]));
        let llm = Arc::new(EchoLlm::default());
        let pipeline = RagPipeline::new(embedder.clone(), store, llm.clone());

        let result = pipeline.query("¿Qué?", 2).await.unwrap();

        assert_eq!(result.retrieved_chunks.len(), 2);
        assert_eq!(result.generated_answer, "Según el contexto: uno\n\ndos");
        assert_eq!(embedder.calls(), 1);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_credential_skips_everything() {
        let embedder = Arc::new(CountingEmbedder::new(4));
        let store = Arc::new(FixedStore::with_texts(&["uno"]));
        let llm = Arc::new(UnconfiguredLlm::default());
        let pipeline = RagPipeline::new(embedder.clone(), store, llm.clone());

        let err = pipeline.query("¿Qué?", 5).await.unwrap_err();

        assert!(matches!(err, Error::MissingCredential(_)));
        assert_eq!(embedder.calls(), 0);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_is_reported() {
        let store = Arc::new(FixedStore::with_texts(&["uno"]));
        let llm = Arc::new(FailingLlm::default());
        let pipeline = RagPipeline::new(Arc::new(CountingEmbedder::new(4)), store, llm.clone());

        let err = pipeline.query("¿Qué?", 5).await.unwrap_err();

        assert!(matches!(err, Error::Generation(_)));
        assert_eq!(llm.calls(), 1);
    }
}
