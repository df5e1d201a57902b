//! Retrieval error taxonomy

use thiserror::Error;

use crate::embeddings::ModelError;
use crate::extract::ExtractError;
use crate::index::{IndexError, IndexHandle};

/// Errors surfaced by the retrieval service
///
/// `DocumentUnreadable` and `EmbeddingUnavailable` during build abort startup.
/// At query time `EmbeddingUnavailable` goes back to the caller and the
/// service stays usable. The dimension/empty/missing-page variants indicate a broken
/// embedder or configuration and never occur with a well-behaved one.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Document unreadable: {0}")]
    DocumentUnreadable(#[from] ExtractError),

    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(#[from] ModelError),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Document has no pages to index")]
    EmptyCorpus,

    #[error("Embedder produced zero-width vectors")]
    EmptyEmbedding,

    #[error("Index handle {handle} has no page (corpus holds {pages})")]
    MissingPage { handle: IndexHandle, pages: usize },

    #[error("k must be at least 1")]
    InvalidK,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<IndexError> for RetrievalError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::DimensionMismatch { expected, got } => {
                Self::DimensionMismatch { expected, got }
            }
            IndexError::EmptyCorpus => Self::EmptyCorpus,
            IndexError::EmptyVector => Self::EmptyEmbedding,
        }
    }
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
