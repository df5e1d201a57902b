//! Browser bindings for the retrieval service
//!
//! ```javascript,ignore
//! const cortex = RetrievalCortex.withHashing(["Hello in Spanish is Hola.", "..."], 384);
//! cortex.search("How do you say hello in Spanish?");      // ["Hello in Spanish is Hola.", ...]
//! cortex.searchHits("hola", 1);                          // [{ handle, page_number, distance, content }]
//! ```

use wasm_bindgen::prelude::*;

use crate::embeddings::{EmbedConfig, EmbedModel, Embedder, HashingEmbedder};
use crate::extract::{JsonPagesExtractor, PageRecord};
use crate::rag::{RetrievalConfig, RetrievalService};

#[wasm_bindgen]
pub struct RetrievalCortex {
    inner: RetrievalService<Box<dyn Embedder>>,
}

#[wasm_bindgen]
impl RetrievalCortex {
    /// Build over an ONNX embedding model
    ///
    /// # Arguments
    /// * `model_bytes` - ONNX model bytes
    /// * `tokenizer_json` - Tokenizer JSON string
    /// * `pages` - Array of strings or `{ page_number, content }` objects
    /// * `config` - Optional `RetrievalConfig` object
    /// * `embed_config` - Optional `EmbedConfig` object, e.g. `{ model: "bge-small-en-v1.5", pooling: "Cls" }`
    #[wasm_bindgen(constructor)]
    pub fn new(
        model_bytes: &[u8],
        tokenizer_json: &str,
        pages: JsValue,
        config: JsValue,
        embed_config: JsValue,
    ) -> Result<RetrievalCortex, JsValue> {
        let embed_config = parse_embed_config(embed_config)?;
        let model = EmbedModel::from_bytes(model_bytes, tokenizer_json, embed_config)
            .map_err(|e| JsValue::from_str(&format!("Model load failed: {}", e)))?;
        Self::build(pages, config, Box::new(model))
    }

    /// Build over the model-free hashing embedder
    #[wasm_bindgen(js_name = withHashing)]
    pub fn with_hashing(pages: JsValue, dimensions: usize) -> Result<RetrievalCortex, JsValue> {
        Self::build(pages, JsValue::UNDEFINED, Box::new(HashingEmbedder::new(dimensions)))
    }

    /// Top-k page texts, closest first; k defaults to the configured value
    #[wasm_bindgen]
    pub fn search(&self, query: &str, k: Option<usize>) -> Result<js_sys::Array, JsValue> {
        let k = k.unwrap_or(self.inner.config().default_k);
        let passages = self
            .inner
            .search(query, k)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(passages.into_iter().map(JsValue::from).collect())
    }

    /// Top-k hits with page numbers and distances
    #[wasm_bindgen(js_name = searchHits)]
    pub fn search_hits(&self, query: &str, k: usize) -> Result<JsValue, JsValue> {
        let hits = self
            .inner
            .search_hits(query, k)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&hits)
            .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.inner.corpus().len()
    }

    #[wasm_bindgen(js_name = getDimensions)]
    pub fn get_dimensions(&self) -> usize {
        self.inner.index().dimension()
    }

    #[wasm_bindgen(js_name = getModelName)]
    pub fn get_model_name(&self) -> String {
        self.inner.embedder().model_id().to_string()
    }

    /// Returns { pages, empty_pages, dimensions, model_id, timings }
    #[wasm_bindgen(js_name = getBuildStats)]
    pub fn get_build_stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.stats())
            .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
    }
}

impl RetrievalCortex {
    fn build(
        pages: JsValue,
        config: JsValue,
        embedder: Box<dyn Embedder>,
    ) -> Result<RetrievalCortex, JsValue> {
        let pages = parse_pages(pages)?;
        let config = parse_config(config)?;

        let inner = RetrievalService::from_pages(pages, embedder, config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        web_sys::console::log_1(
            &format!(
                "[RetrievalCortex] Indexed {} pages ({}d, {})",
                inner.stats().pages,
                inner.stats().dimensions,
                inner.stats().model_id
            )
            .into(),
        );

        Ok(RetrievalCortex { inner })
    }
}

/// Pages go through the JSON adapter so page-number checks stay in one place
fn parse_pages(pages: JsValue) -> Result<Vec<PageRecord>, JsValue> {
    let json: String = js_sys::JSON::stringify(&pages)
        .map_err(|_| JsValue::from_str("Invalid pages input: not serializable"))?
        .into();

    JsonPagesExtractor
        .parse(&json)
        .map_err(|e| JsValue::from_str(&format!("Invalid pages input: {}", e)))
}

fn parse_embed_config(config: JsValue) -> Result<EmbedConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(EmbedConfig::default());
    }

    let json: String = js_sys::JSON::stringify(&config)
        .map_err(|_| JsValue::from_str("Invalid embed config: not serializable"))?
        .into();

    EmbedConfig::from_json(&json)
        .map_err(|e| JsValue::from_str(&format!("Invalid embed config: {}", e)))
}

fn parse_config(config: JsValue) -> Result<RetrievalConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(RetrievalConfig::default());
    }

    let config: RetrievalConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}
