//! In-memory vector index with exact cosine search

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorSearchResult, VectorStoreProvider};
use crate::types::Chunk;

/// Cosine similarity; 0.0 when either vector is all zeros
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[derive(Debug)]
struct IndexedChunk {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// Exact nearest-neighbour index over embedded chunks
///
/// Immutable once built. Ties in similarity keep insertion order, so the
/// same query always returns the same ranking.
#[derive(Debug)]
pub struct FlatIndex {
    entries: Vec<IndexedChunk>,
    dimensions: usize,
}

impl FlatIndex {
    /// Create an index from chunks and their vectors (same order, same length)
    pub fn from_embedded(
        chunks: Vec<Chunk>,
        vectors: Vec<Vec<f32>>,
        dimensions: usize,
    ) -> Result<Self> {
        if chunks.len() != vectors.len() {
            return Err(Error::embedding(format!(
                "Got {} embeddings for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let mut entries = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            if vector.len() != dimensions {
                return Err(Error::embedding(format!(
                    "Chunk {} embedded to {} dimensions, expected {}",
                    chunk.id,
                    vector.len(),
                    dimensions
                )));
            }
            entries.push(IndexedChunk { chunk, vector });
        }

        Ok(Self { entries, dimensions })
    }

    /// Embedding dimensions
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of distinct source documents
    pub fn document_count(&self) -> usize {
        let mut indices: Vec<usize> = self
            .entries
            .iter()
            .map(|e| e.chunk.document_index)
            .collect();
        indices.dedup();
        indices.len()
    }

    /// All indexed chunks in insertion order
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|e| &e.chunk)
    }
}

impl VectorStoreProvider for FlatIndex {
    fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<VectorSearchResult>> {
        if query_embedding.len() != self.dimensions {
            return Err(Error::embedding(format!(
                "Query embedding has {} dimensions, index has {}",
                query_embedding.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query_embedding, &entry.vector)))
            .collect();

        // Stable sort: equal scores stay in insertion order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(i, similarity)| VectorSearchResult {
                chunk: self.entries[i].chunk.clone(),
                similarity,
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn name(&self) -> &str {
        "flat-cosine"
    }
}

/// Embeds chunks in batches and assembles a `FlatIndex`
pub struct IndexBuilder<'a> {
    embedder: &'a dyn EmbeddingProvider,
    batch_size: usize,
}

impl<'a> IndexBuilder<'a> {
    /// Create a builder using `embedder`
    pub fn new(embedder: &'a dyn EmbeddingProvider, batch_size: usize) -> Self {
        Self {
            embedder,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed every chunk and build the index
    pub async fn build(&self, chunks: Vec<Chunk>) -> Result<FlatIndex> {
        let total = chunks.len();
        let mut vectors = Vec::with_capacity(total);

        for (batch_idx, batch) in chunks.chunks(self.batch_size).enumerate() {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;
            vectors.extend(embeddings);

            tracing::debug!(
                "Embedded batch {} ({}/{} chunks)",
                batch_idx + 1,
                vectors.len().min(total),
                total
            );
        }

        let index = FlatIndex::from_embedded(chunks, vectors, self.embedder.dimensions())?;

        tracing::info!(
            "Index built: {} chunks, {} dimensions ({})",
            index.len(),
            index.dimensions(),
            self.embedder.name()
        );

        Ok(index)
    }
}
