//! Provider abstractions for embeddings, generation and vector search
//!
//! The pipeline only sees the traits; which implementation backs each one is
//! decided once, from configuration, when the application starts.

pub mod embedding;
pub mod gemini;
pub mod hashing;
pub mod llm;
pub mod ollama;
pub mod vector_store;

#[cfg(feature = "onnx")]
pub mod onnx;

use std::sync::Arc;

use crate::config::{EmbeddingBackend, EmbeddingConfig, LlmBackend, LlmConfig};
use crate::error::Result;

pub use embedding::EmbeddingProvider;
pub use gemini::GeminiClient;
pub use hashing::HashingEmbedder;
pub use llm::LlmProvider;
pub use ollama::{OllamaEmbedder, OllamaLlm};
pub use vector_store::{VectorSearchResult, VectorStoreProvider};

/// Create the configured embedding provider
pub async fn embedding_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        EmbeddingBackend::Hashing => Arc::new(HashingEmbedder::new(config.dimensions)?),
        EmbeddingBackend::Ollama => Arc::new(OllamaEmbedder::new(config)?),
        #[cfg(feature = "onnx")]
        EmbeddingBackend::Onnx => Arc::new(onnx::OnnxEmbedder::new(config).await?),
        #[cfg(not(feature = "onnx"))]
        EmbeddingBackend::Onnx => {
            return Err(crate::error::Error::Config(
                "ONNX embeddings selected but the onnx feature is not enabled. \
                 Rebuild with --features onnx"
                    .to_string(),
            ));
        }
    };

    tracing::info!(
        "Embedding provider: {} ({} dimensions)",
        provider.name(),
        provider.dimensions()
    );

    Ok(provider)
}

/// Create the configured LLM provider
///
/// A missing credential does not fail here; it is reported by
/// `LlmProvider::check_configured` so the page can still be served.
pub fn llm_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        LlmBackend::Gemini => Arc::new(GeminiClient::new(config)?),
        LlmBackend::Ollama => Arc::new(OllamaLlm::new(config)?),
    };

    tracing::info!("LLM provider: {} ({})", provider.name(), provider.model());

    Ok(provider)
}
