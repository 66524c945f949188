//! Response types for RAG queries

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::Metadata;
use crate::providers::vector_store::VectorSearchResult;

/// Outcome of one question: the answer and the chunks it was grounded on
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Retrieved chunks, most similar first
    pub retrieved_chunks: Vec<VectorSearchResult>,
    /// Answer produced by the model
    pub generated_answer: String,
}

/// A retrieved chunk as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    /// Chunk ID
    pub chunk_id: Uuid,
    /// Resolution title (`titulo`)
    pub title: String,
    /// Document type (`tipo`)
    pub doc_type: String,
    /// Full chunk text, verbatim
    pub content: String,
    /// Similarity score (higher is more similar)
    pub similarity: f32,
    /// Record number of the source document
    pub document_index: usize,
    /// Position of the chunk within its document
    pub chunk_index: u32,
    /// All metadata of the source document
    pub metadata: Metadata,
}

impl Citation {
    /// Create a citation from a search result
    pub fn from_result(result: &VectorSearchResult) -> Self {
        let chunk = &result.chunk;
        Self {
            chunk_id: chunk.id,
            title: chunk.title().to_string(),
            doc_type: chunk.doc_type().to_string(),
            content: chunk.text.clone(),
            similarity: result.similarity,
            document_index: chunk.document_index,
            chunk_index: chunk.chunk_index,
            metadata: chunk.metadata.clone(),
        }
    }

    /// Heading used by the page: `type | Título: title`
    pub fn label(&self) -> String {
        format!("{} | Título: {}", self.doc_type, self.title)
    }
}

/// Response from a RAG query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer
    pub answer: String,
    /// Retrieved chunks, most similar first
    pub sources: Vec<Citation>,
    /// Number of chunks retrieved
    pub chunks_retrieved: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl QueryResponse {
    /// Build the wire response from a pipeline result
    pub fn from_result(result: &QueryResult, processing_time_ms: u64) -> Self {
        let sources: Vec<Citation> = result
            .retrieved_chunks
            .iter()
            .map(Citation::from_result)
            .collect();

        Self {
            answer: result.generated_answer.clone(),
            chunks_retrieved: sources.len(),
            sources,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, RawDocument};
    use serde_json::json;

    #[test]
    fn test_response_keeps_retrieval_order() {
        let doc = RawDocument::new(
            "uno dos",
            json!({"titulo": "RM-002", "tipo": "Resolución"})
                .as_object()
                .cloned()
                .unwrap(),
        );
        let first = VectorSearchResult {
            chunk: Chunk::new(&doc, "uno".to_string(), 0, 0, 3),
            similarity: 0.9,
        };
        let second = VectorSearchResult {
            chunk: Chunk::new(&doc, "dos".to_string(), 1, 4, 7),
            similarity: 0.4,
        };
        let result = QueryResult {
            retrieved_chunks: vec![first, second],
            generated_answer: "respuesta".to_string(),
        };

        let response = QueryResponse::from_result(&result, 12);

        assert_eq!(response.chunks_retrieved, 2);
        assert_eq!(response.sources[0].content, "uno");
        assert_eq!(response.sources[1].content, "dos");
        assert_eq!(response.sources[0].label(), "Resolución | Título: RM-002");
        assert_eq!(response.processing_time_ms, 12);
    }
}
