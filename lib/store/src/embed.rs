//! Deterministic hash-based text embedder
//!
//! Hashes character trigrams and words into a fixed-dimension normalized
//! vector. Deterministic across processes, so repeated embeddings of the
//! same text are directly comparable under cosine similarity. An ML-backed
//! embedder can replace this behind the same [`Embedder`] trait.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ahash::AHashSet;

use compatx_core::{Embedder, Embedding, Result};

/// Default embedding dimension.
pub const DEFAULT_EMBED_DIM: usize = 384;

#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBED_DIM)
    }
}

impl HashEmbedder {
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut vector = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in generate_trigrams(&normalized) {
            let mut hasher = DefaultHasher::new();
            trigram.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            vector[pos] += 1.0;
        }

        // Word-level hashing; words contribute more than trigrams
        for word in normalized.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            vector[pos] += 2.0;
        }

        let mut embedding = Embedding::new(vector);
        embedding.normalize();
        Ok(embedding)
    }
}

/// Generate character trigrams from a string, with boundary padding.
fn generate_trigrams(s: &str) -> AHashSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    if chars.len() < 3 {
        return AHashSet::new();
    }

    chars
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
