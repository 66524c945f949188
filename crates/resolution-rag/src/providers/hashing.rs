//! Local feature-hashing embedder
//!
//! Maps words and character trigrams into a fixed number of signed buckets.
//! No model download and fully deterministic, which makes it the default for
//! offline use and for tests. Quality is lexical, not semantic.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use unicode_segmentation::UnicodeSegmentation;

use super::embedding::EmbeddingProvider;
use crate::error::{Error, Result};

/// Weight of a whole-word feature
const WORD_WEIGHT: f32 = 1.0;
/// Weight of a character trigram feature
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Feature-hashing text embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    /// Create an embedder producing `dimensions`-sized vectors
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::Config("embedding dimensions must be positive".to_string()));
        }
        Ok(Self { dimensions })
    }

    /// Embed synchronously
    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for word in text.unicode_words() {
            let word = normalize(word);
            if word.is_empty() {
                continue;
            }

            self.add_feature(&mut vector, "w", &word, WORD_WEIGHT);

            let padded: Vec<char> = std::iter::once('^')
                .chain(word.chars())
                .chain(std::iter::once('$'))
                .collect();
            for gram in padded.windows(3) {
                let gram: String = gram.iter().collect();
                self.add_feature(&mut vector, "t", &gram, TRIGRAM_WEIGHT);
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut vector {
                *val /= norm;
            }
        }

        vector
    }

    fn add_feature(&self, vector: &mut [f32], kind: &str, feature: &str, weight: f32) {
        let mut hasher = Sha256::new();
        hasher.update(kind.as_bytes());
        hasher.update([0u8]);
        hasher.update(feature.as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        let hash = u64::from_le_bytes(bytes);

        let bucket = (hash % self.dimensions as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

/// Lowercase and strip Spanish diacritics so "Resolución" matches "resolucion"
fn normalize(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
