// lingocore/src/embeddings/mod.rs
//
// Embedding backends behind a single `Embedder` seam.
//
// Supported backends:
// - EmbedModel: ONNX inference via `tract-onnx` (WASM-compatible)
//   - all-MiniLM-L6-v2 (default) - 384 dimensions
//   - BGESmallENV15 (BAAI/bge-small-en-v1.5) - 384 dimensions
//   - ModernBERTBase (nomic-ai/modernbert-embed-base) - 768 dimensions
// - HashingEmbedder: model-free feature hashing, deterministic and offline

pub mod config;
pub mod hashing;
pub mod model;
pub mod tokenize;

pub use config::{EmbedConfig, OnnxModel, PoolingStrategy};
pub use hashing::HashingEmbedder;
pub use model::{EmbedModel, ModelError};
pub use tokenize::{EmbedTokenizer, TokenizedInput, TokenizerError};

use crate::index::distance::magnitude;
use std::sync::Arc;

/// Maps text to fixed-dimension dense vectors
///
/// Implementations are deterministic for a fixed model and must be safe to
/// call from several queries at once.
pub trait Embedder: Send + Sync {
    /// Identity of the underlying model (fixed for the embedder's lifetime)
    fn model_id(&self) -> &str;

    /// Width of every vector this embedder returns
    fn dimensions(&self) -> usize;

    /// Embed a batch, one vector per text, order preserved
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError>;

    /// Embed a single text
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let vector = self
            .embed(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or(ModelError::CountMismatch { expected: 1, got: 0 })?;

        if vector.is_empty() {
            return Err(ModelError::EmptyOutput);
        }
        Ok(vector)
    }
}

impl<T: Embedder + ?Sized> Embedder for Box<T> {
    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        (**self).embed(texts)
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        (**self).embed_one(text)
    }
}

impl<T: Embedder + ?Sized> Embedder for Arc<T> {
    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        (**self).embed(texts)
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        (**self).embed_one(text)
    }
}

/// L2 normalize in place (zero vectors are left untouched)
pub fn l2_normalize(embedding: &mut [f32]) {
    let norm = magnitude(embedding);
    if norm > 0.0 {
        embedding.iter_mut().for_each(|x| *x /= norm);
    }
}
