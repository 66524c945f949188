//! Vector index, corpus build and retrieval

mod cache;
mod index;
mod retriever;

pub use cache::{IndexCell, IndexState};
pub use index::{cosine_similarity, FlatIndex, IndexBuilder};
pub use retriever::Retriever;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::ingestion::{JsonlLoader, TextChunker};
use crate::providers::EmbeddingProvider;

/// Load, chunk and embed the configured corpus
pub async fn build_corpus_index(
    config: &RagConfig,
    embedder: &dyn EmbeddingProvider,
) -> Result<FlatIndex> {
    let loader = JsonlLoader::new(&config.data.path, &config.data.text_field);
    let chunker = TextChunker::from_config(&config.chunking)?;

    tracing::info!("Building index from {}", loader.path().display());

    let chunks = tokio::task::spawn_blocking(move || {
        let documents = loader.load()?;
        Ok::<_, Error>(chunker.split_documents(&documents))
    })
    .await
    .map_err(|e| Error::internal(format!("Task join error: {}", e)))??;

    // Nothing to retrieve from; answering would only send an empty context
    if chunks.is_empty() {
        return Err(Error::ingestion(
            config.data.path.display().to_string(),
            "no documents with text",
        ));
    }

    IndexBuilder::new(embedder, config.embeddings.batch_size)
        .build(chunks)
        .await
}
