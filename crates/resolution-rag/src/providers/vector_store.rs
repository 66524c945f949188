//! Vector store provider trait for searching embedded chunks

use crate::error::Result;
use crate::types::Chunk;

/// Search result from vector store
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSearchResult {
    /// The matched chunk
    pub chunk: Chunk,
    /// Similarity score (higher is more similar)
    pub similarity: f32,
}

/// Read-only similarity search over embedded chunks
///
/// Implementations:
/// - `FlatIndex`: exact in-memory cosine search
pub trait VectorStoreProvider: Send + Sync {
    /// Up to `top_k` chunks nearest to `query_embedding`, most similar first
    fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<VectorSearchResult>>;

    /// Get total number of vectors stored
    fn len(&self) -> usize;

    /// Check if store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get provider name for logging
    fn name(&self) -> &str;
}
