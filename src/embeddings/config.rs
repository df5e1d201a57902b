// lingocore/src/embeddings/config.rs
//
// Configuration types for the embedding pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported ONNX models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OnnxModel {
    /// all-MiniLM-L6-v2 - 384 dimensions, lightweight
    #[default]
    #[serde(rename = "all-minilm-l6-v2")]
    AllMiniLML6V2,

    /// BAAI/bge-small-en-v1.5 - 384 dimensions, fast
    #[serde(rename = "bge-small-en-v1.5")]
    BGESmallENV15,

    /// nomic-ai/modernbert-embed-base - 768 dimensions, high quality
    #[serde(rename = "modernbert-embed-base")]
    ModernBERTBase,
}

impl fmt::Display for OnnxModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllMiniLML6V2 => write!(f, "all-minilm-l6-v2"),
            Self::BGESmallENV15 => write!(f, "bge-small-en-v1.5"),
            Self::ModernBERTBase => write!(f, "modernbert-embed-base"),
        }
    }
}

impl OnnxModel {
    /// Resolve a model from its short name or HuggingFace ID
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "all-minilm-l6-v2" | "sentence-transformers/all-minilm-l6-v2" => {
                Some(Self::AllMiniLML6V2)
            }
            "bge-small" | "bge-small-en-v1.5" | "baai/bge-small-en-v1.5" => {
                Some(Self::BGESmallENV15)
            }
            "modernbert-base" | "modernbert-embed-base" | "nomic-ai/modernbert-embed-base" => {
                Some(Self::ModernBERTBase)
            }
            _ => None,
        }
    }

    /// Get the expected embedding dimensions for this model
    pub fn dimensions(&self) -> usize {
        match self {
            Self::AllMiniLML6V2 => 384,
            Self::BGESmallENV15 => 384,
            Self::ModernBERTBase => 768,
        }
    }

    /// Get the maximum sequence length for this model
    pub fn max_length(&self) -> usize {
        match self {
            // sentence-transformers max_seq_length
            Self::AllMiniLML6V2 => 256,
            Self::BGESmallENV15 => 512,
            Self::ModernBERTBase => 8192,
        }
    }

    /// Get HuggingFace model ID
    pub fn hf_model_id(&self) -> &'static str {
        match self {
            Self::AllMiniLML6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            Self::BGESmallENV15 => "BAAI/bge-small-en-v1.5",
            Self::ModernBERTBase => "nomic-ai/modernbert-embed-base",
        }
    }

    /// Check if model supports Matryoshka Representation Learning (MRL)
    /// MRL models front-load signal, so truncation preserves quality
    pub fn supports_matryoshka(&self) -> bool {
        matches!(self, Self::BGESmallENV15 | Self::ModernBERTBase)
    }
}

/// Pooling strategy for converting token embeddings to sentence embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PoolingStrategy {
    /// Mean pooling over all tokens (most common)
    #[default]
    Mean,

    /// Use [CLS] token embedding
    Cls,

    /// Max pooling over tokens
    Max,
}

/// Embedding pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Which model to use
    pub model: OnnxModel,

    /// Matryoshka truncation dimension (None = full dimensions)
    /// Only effective for models that support MRL
    pub truncate_dim: Option<usize>,

    /// Batch size for a single inference call
    pub batch_size: usize,

    /// Pooling strategy
    pub pooling: PoolingStrategy,

    /// Whether to normalize embeddings (L2)
    pub normalize: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            model: OnnxModel::default(),
            truncate_dim: None,
            batch_size: 32,
            pooling: PoolingStrategy::default(),
            normalize: true,
        }
    }
}

impl EmbedConfig {
    /// Create config for MiniLM
    pub fn minilm() -> Self {
        Self::default()
    }

    /// Create config for BGE Small
    pub fn bge_small() -> Self {
        Self {
            model: OnnxModel::BGESmallENV15,
            pooling: PoolingStrategy::Cls,
            ..Default::default()
        }
    }

    /// Create config for ModernBERT
    pub fn modernbert() -> Self {
        Self {
            model: OnnxModel::ModernBERTBase,
            ..Default::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builder: set batch size
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Builder: set pooling strategy
    pub fn with_pooling(mut self, pooling: PoolingStrategy) -> Self {
        self.pooling = pooling;
        self
    }

    /// Builder: set truncation dimension (Matryoshka)
    pub fn with_truncate_dim(mut self, dim: usize) -> Self {
        self.truncate_dim = Some(dim);
        self
    }

    /// Get effective embedding dimension (after truncation)
    ///
    /// Truncation is ignored for models without MRL support, and never
    /// widens past the native dimension.
    pub fn effective_dim(&self) -> usize {
        let full = self.model.dimensions();
        match self.truncate_dim {
            Some(dim) if self.model.supports_matryoshka() && dim > 0 => dim.min(full),
            _ => full,
        }
    }
}
