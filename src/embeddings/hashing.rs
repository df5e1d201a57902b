// lingocore/src/embeddings/hashing.rs
//
// Model-free embedder using the hashing trick.
//
// Words (and optionally character n-grams) are hashed with FNV-1a into a
// fixed number of buckets, then L2 normalized. Lexical overlap drives
// similarity, so it works offline, needs no model assets, and is fully
// deterministic across platforms.

use crate::embeddings::{l2_normalize, Embedder, ModelError};
use unicode_segmentation::UnicodeSegmentation;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Character n-grams contribute half as much as whole words
const NGRAM_WEIGHT: f32 = 0.5;

fn fnv1a(bytes: &[u8], seed: u64) -> u64 {
    bytes.iter().fold(FNV_OFFSET ^ seed, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Feature-hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
    char_ngram: Option<usize>,
    model_id: String,
}

impl HashingEmbedder {
    /// Word features only
    pub fn new(dimensions: usize) -> Self {
        let dimensions = dimensions.max(1);
        Self {
            dimensions,
            char_ngram: None,
            model_id: format!("hashing-{}", dimensions),
        }
    }

    /// Builder: also hash character n-grams of each word
    pub fn with_char_ngrams(mut self, n: usize) -> Self {
        if n > 0 {
            self.char_ngram = Some(n);
            self.model_id = format!("hashing-{}-c{}", self.dimensions, n);
        }
        self
    }

    fn bucket(&self, feature: &str, seed: u64) -> usize {
        (fnv1a(feature.as_bytes(), seed) % self.dimensions as u64) as usize
    }

    /// Embed one text (never fails, never empty)
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let lowered = text.to_lowercase();

        for word in lowered.unicode_words() {
            vector[self.bucket(word, 0)] += 1.0;

            if let Some(n) = self.char_ngram {
                // Boundary markers so prefixes and suffixes hash differently
                let chars: Vec<char> = std::iter::once('<')
                    .chain(word.chars())
                    .chain(std::iter::once('>'))
                    .collect();

                for window in chars.windows(n) {
                    let gram: String = window.iter().collect();
                    vector[self.bucket(&gram, n as u64)] += NGRAM_WEIGHT;
                }
            }
        }

        l2_normalize(&mut vector);
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

impl Embedder for HashingEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}
