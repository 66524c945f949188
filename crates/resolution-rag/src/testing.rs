//! Stub providers for tests
//!
//! Available to the crate's own tests and, through the `test-util` feature,
//! to integration tests. None of these touch the network.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::providers::{
    EmbeddingProvider, HashingEmbedder, LlmProvider, VectorSearchResult, VectorStoreProvider,
};
use crate::types::{Chunk, Metadata, RawDocument};

/// Prefix of every `EchoLlm` answer
pub const ECHO_PREFIX: &str = "Según el contexto: ";

/// Hashing embedder that counts how many texts it embedded
pub struct CountingEmbedder {
    inner: HashingEmbedder,
    calls: AtomicUsize,
}

impl CountingEmbedder {
    /// Create an embedder with `dimensions` buckets
    pub fn new(dimensions: usize) -> Self {
        Self {
            inner: HashingEmbedder::new(dimensions.max(1))
                .unwrap_or_else(|e| panic!("stub embedder: {e}")),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of texts embedded so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for CountingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.inner.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "counting-stub"
    }
}

/// Store returning its chunks in insertion order, ignoring the query
pub struct FixedStore {
    results: Vec<VectorSearchResult>,
}

impl FixedStore {
    /// One chunk per text, with descending similarity
    pub fn with_texts(texts: &[&str]) -> Self {
        let results = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let doc = RawDocument::new(*text, Metadata::new()).with_source("stub", i + 1);
                VectorSearchResult {
                    chunk: Chunk::new(&doc, text.to_string(), 0, 0, text.chars().count()),
                    similarity: 1.0 - i as f32 * 0.1,
                }
            })
            .collect();
        Self { results }
    }
}

impl VectorStoreProvider for FixedStore {
    fn search(&self, _query_embedding: &[f32], top_k: usize) -> Result<Vec<VectorSearchResult>> {
        Ok(self.results.iter().take(top_k).cloned().collect())
    }

    fn len(&self) -> usize {
        self.results.len()
    }

    fn name(&self) -> &str {
        "fixed-stub"
    }
}

/// Call bookkeeping shared by the LLM stubs
#[derive(Default)]
struct CallLog {
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl CallLog {
    fn record(&self, prompt: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.to_string());
    }
}

/// Answers with the CONTEXT block of its prompt
#[derive(Default)]
pub struct EchoLlm {
    log: CallLog,
}

impl EchoLlm {
    /// Number of `generate` calls
    pub fn calls(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }

    /// Prompt of the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.log.last_prompt.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for EchoLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.log.record(prompt);

        let context = prompt
            .split_once("CONTEXTO: ")
            .and_then(|(_, rest)| rest.rsplit_once("\nPREGUNTA:"))
            .map(|(context, _)| context)
            .unwrap_or_default();

        Ok(format!("{}{}", ECHO_PREFIX, context))
    }

    fn name(&self) -> &str {
        "echo-stub"
    }

    fn model(&self) -> &str {
        "echo"
    }
}

/// Provider without a credential; counts any call that slips through
#[derive(Default)]
pub struct UnconfiguredLlm {
    log: CallLog,
}

impl UnconfiguredLlm {
    /// Number of `generate` calls (should stay zero)
    pub fn calls(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }

    fn missing() -> Error {
        Error::MissingCredential(
            "GEMINI_API_KEY is not set; add it to the environment or a .env file".to_string(),
        )
    }
}

#[async_trait]
impl LlmProvider for UnconfiguredLlm {
    fn check_configured(&self) -> Result<()> {
        Err(Self::missing())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.log.record(prompt);
        Err(Self::missing())
    }

    fn name(&self) -> &str {
        "unconfigured-stub"
    }

    fn model(&self) -> &str {
        "none"
    }
}

/// Configured provider whose every call fails
#[derive(Default)]
pub struct FailingLlm {
    log: CallLog,
}

impl FailingLlm {
    /// Number of `generate` calls
    pub fn calls(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.log.record(prompt);
        Err(Error::generation("quota exceeded"))
    }

    fn name(&self) -> &str {
        "failing-stub"
    }

    fn model(&self) -> &str {
        "failing"
    }
}
