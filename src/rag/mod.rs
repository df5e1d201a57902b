//! RAG Retrieval - page-level semantic search for document Q&A
//!
//! Built on:
//! - extract: page text from the external text extractor
//! - embeddings: any `Embedder` (ONNX EmbedModel or HashingEmbedder)
//! - index: exact flat L2 k-NN
//!
//! # Architecture
//! ```text
//! Document → PageRecords → Embedder → FlatIndex
//!                                         ↓
//! Query → Embedder → FlatIndex::search → Top-K page texts
//! ```

mod config;
mod corpus;
mod error;
mod service;

pub use config::{RetrievalConfig, DEFAULT_NO_RESULTS_MARKER};
pub use corpus::Corpus;
pub use error::{Result, RetrievalError};
pub use service::{BuildStats, BuildTimings, PassageHit, RetrievalService};
