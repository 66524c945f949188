//! resolution-rag: question answering over ministry resolutions with cited sources
//!
//! Loads a JSONL file of resolutions, splits each into overlapping character
//! windows, embeds them into an in-memory index and answers questions with a
//! hosted model restricted to the retrieved text. Every answer carries the
//! chunks it was grounded on.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::RagPipeline;
pub use types::{
    document::{Chunk, Metadata, RawDocument},
    query::QueryRequest,
    response::{Citation, QueryResponse, QueryResult},
};
