//! Fixed-size text chunking with exact character overlap

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::types::{Chunk, RawDocument};

/// Text chunker with configurable size and overlap
///
/// Sizes are counted in characters, not bytes. Consecutive chunks of a
/// document share exactly `overlap` characters, so dropping the first
/// `overlap` characters of every chunk after the first and concatenating
/// gives back the original text.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap between chunks
    overlap: usize,
    /// Cut after whitespace when one is close to the window end
    respect_whitespace: bool,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk size must be positive".to_string()));
        }
        if overlap >= chunk_size {
            return Err(Error::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
            respect_whitespace: true,
        })
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Ok(Self::new(config.chunk_size, config.chunk_overlap)?
            .with_respect_whitespace(config.respect_whitespace))
    }

    /// Toggle whitespace-aware window ends
    pub fn with_respect_whitespace(mut self, respect: bool) -> Self {
        self.respect_whitespace = respect;
        self
    }

    /// Chunk every document, preserving document order
    pub fn split_documents(&self, documents: &[RawDocument]) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = documents
            .iter()
            .flat_map(|doc| self.split_document(doc))
            .collect();

        tracing::debug!(
            "Split {} documents into {} chunks (size {}, overlap {})",
            documents.len(),
            chunks.len(),
            self.chunk_size,
            self.overlap
        );

        chunks
    }

    /// Chunk a single document
    pub fn split_document(&self, doc: &RawDocument) -> Vec<Chunk> {
        let chars: Vec<char> = doc.text.chars().collect();

        self.window_bounds(&chars)
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| {
                let text: String = chars[start..end].iter().collect();
                Chunk::new(doc, text, index as u32, start, end)
            })
            .collect()
    }

    /// Character ranges of each chunk
    fn window_bounds(&self, chars: &[char]) -> Vec<(usize, usize)> {
        let len = chars.len();
        let mut bounds = Vec::new();

        if len == 0 {
            return bounds;
        }

        let mut start = 0usize;
        loop {
            let hard_end = (start + self.chunk_size).min(len);
            if hard_end == len {
                bounds.push((start, len));
                break;
            }

            let end = if self.respect_whitespace {
                self.whitespace_end(chars, start, hard_end)
            } else {
                hard_end
            };

            bounds.push((start, end));
            // end > start + overlap, so this always advances
            start = end - self.overlap;
        }

        bounds
    }

    /// End the window just after the last whitespace in its second half
    fn whitespace_end(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let floor = (start + self.overlap).max(start + self.chunk_size / 2);

        (floor..hard_end)
            .rev()
            .find(|&pos| chars[pos].is_whitespace())
            .map(|pos| pos + 1)
            .unwrap_or(hard_end)
    }
}
