//! LingoCore: Page-level semantic retrieval for document Q&A
//!
//! A Rust/WASM implementation of the language-lesson retrieval backend.
//! A document is split into pages once, every page is embedded, and queries
//! are answered with the k closest page texts.
//!
//! # Architecture
//!
//! - `extract` - TextExtractor: document → ordered `PageRecord`s
//! - `embeddings` - Embedder seam: ONNX `EmbedModel` or `HashingEmbedder`
//! - `index` - FlatIndex: exact squared-L2 k-NN, ties to the lower handle
//! - `rag` - RetrievalService: build once, serve `search(query, k)`
//! - `wasm` - RetrievalCortex: browser bindings
//!
//! # Usage
//! ```rust,ignore
//! use lingocore::{HashingEmbedder, PlainTextExtractor, RetrievalConfig, RetrievalService};
//!
//! let service = RetrievalService::build(
//!     &PlainTextExtractor,
//!     "LanguagePDF.txt".as_ref(),
//!     HashingEmbedder::default(),
//!     RetrievalConfig::default(),
//! )?;
//!
//! let passages = service.search_default("How do you say hello in Spanish?")?;
//! ```

pub mod embeddings;
pub mod extract;
pub mod index;
pub mod rag;
pub mod wasm;

pub use embeddings::{EmbedConfig, EmbedModel, Embedder, HashingEmbedder, ModelError, OnnxModel};
pub use extract::{extract_pages, ExtractError, JsonPagesExtractor, PageRecord, PlainTextExtractor, TextExtractor};
pub use index::{FlatIndex, IndexError, IndexHandle, Neighbor, SearchResult};
pub use rag::{PassageHit, RetrievalConfig, RetrievalError, RetrievalService};
pub use wasm::RetrievalCortex;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("lingocore v{}", env!("CARGO_PKG_VERSION"))
}
