//! Application state for the RAG server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::pipeline::RagPipeline;
use crate::providers::{self, EmbeddingProvider, LlmProvider};
use crate::retrieval::{self, FlatIndex, IndexCell, IndexState};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// The one embedder, used for both the corpus and questions
    embedder: Arc<dyn EmbeddingProvider>,
    /// Answer model
    llm: Arc<dyn LlmProvider>,
    /// Index, built at most once
    index: IndexCell,
}

impl AppState {
    /// Create state with the providers named in `config`
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let embedder = providers::embedding_provider(&config.embeddings).await?;
        let llm = providers::llm_provider(&config.llm)?;

        if let Err(e) = llm.check_configured() {
            tracing::warn!("{}", e);
        }

        Ok(Self::from_parts(config, embedder, llm))
    }

    /// Create state from already constructed providers; the index is built on first use
    pub fn from_parts(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                llm,
                index: IndexCell::new(),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the embedding provider
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    /// Get the LLM provider
    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }

    /// The index, building it from the configured file on first call
    ///
    /// A failed build is remembered; later calls return the same
    /// `IndexUnavailable` error until the process restarts.
    pub async fn index(&self) -> Result<Arc<FlatIndex>> {
        let inner = &self.inner;
        inner
            .index
            .get_or_build(|| retrieval::build_corpus_index(&inner.config, inner.embedder.as_ref()))
            .await
    }

    /// Index state without triggering a build
    pub fn index_state(&self) -> IndexState {
        self.inner.index.state()
    }

    /// Whether a query could be answered right now
    pub fn is_ready(&self) -> bool {
        matches!(self.index_state(), IndexState::Ready { .. })
            && self.inner.llm.check_configured().is_ok()
    }

    /// Pipeline over `index` using the shared providers
    pub fn pipeline(&self, index: Arc<FlatIndex>) -> RagPipeline {
        RagPipeline::new(
            Arc::clone(&self.inner.embedder),
            index,
            Arc::clone(&self.inner.llm),
        )
    }
}
