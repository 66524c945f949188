//! Question-to-chunks retrieval

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{EmbeddingProvider, VectorSearchResult, VectorStoreProvider};

/// Embeds a question and searches the index with it
///
/// The embedder must be the same instance the index was built with; mixing
/// embedding spaces produces meaningless scores.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
}

impl Retriever {
    /// Create a retriever over `store`
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
    ) -> Self {
        Self { embedder, store }
    }

    /// The `min(k, len)` chunks most similar to `question`
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<VectorSearchResult>> {
        if k == 0 || self.store.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(question).await?;
        let results = self.store.search(&query_embedding, k)?;

        tracing::debug!(
            "Retrieved {} chunks (k={}, store={})",
            results.len(),
            k,
            self.store.name()
        );

        Ok(results)
    }
}
