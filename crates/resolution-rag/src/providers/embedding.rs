//! Embedding provider trait for generating text embeddings

use async_trait::async_trait;
use crate::error::Result;

/// Trait for generating text embeddings
///
/// The same instance must embed both the indexed chunks and the questions;
/// vectors from different models are not comparable and nothing at runtime
/// can detect the mismatch.
///
/// Implementations:
/// - `HashingEmbedder`: local feature hashing, no model download
/// - `OllamaEmbedder`: local Ollama server
/// - `OnnxEmbedder`: sentence-transformers ONNX model (`onnx` feature)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batch)
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Get embedding dimensions (e.g., 384 for all-MiniLM-L6-v2)
    fn dimensions(&self) -> usize;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
