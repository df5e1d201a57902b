// lingocore/src/embeddings/tokenize.rs
//
// Tokenization wrapper for BERT-style models

use std::sync::Arc;
use thiserror::Error;
use tokenizers::Tokenizer;

/// Tokenizer wrapper for embedding models
pub struct EmbedTokenizer {
    tokenizer: Arc<Tokenizer>,
    max_length: usize,
}

/// Tokenized input ready for model inference
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedInput {
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub token_type_ids: Vec<i64>,
}

impl TokenizedInput {
    fn truncate(&mut self, max_length: usize) {
        self.input_ids.truncate(max_length);
        self.attention_mask.truncate(max_length);
        self.token_type_ids.truncate(max_length);
    }

    fn pad_to(&mut self, len: usize) {
        self.input_ids.resize(len, 0);
        self.attention_mask.resize(len, 0);
        self.token_type_ids.resize(len, 0);
    }

    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}

/// Tokenizer errors
#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Failed to load tokenizer: {0}")]
    LoadFailed(String),

    #[error("Failed to encode text: {0}")]
    EncodeFailed(String),
}

impl EmbedTokenizer {
    /// Create tokenizer from tokenizer.json contents
    pub fn from_json(tokenizer_json: &str, max_length: usize) -> Result<Self, TokenizerError> {
        let tokenizer = Tokenizer::from_bytes(tokenizer_json.as_bytes())
            .map_err(|e| TokenizerError::LoadFailed(e.to_string()))?;

        Ok(Self {
            tokenizer: Arc::new(tokenizer),
            max_length,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Tokenize a single text
    pub fn encode(&self, text: &str) -> Result<TokenizedInput, TokenizerError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| TokenizerError::EncodeFailed(e.to_string()))?;

        let mut input = TokenizedInput {
            input_ids: encoding.get_ids().iter().map(|&id| id as i64).collect(),
            attention_mask: encoding.get_attention_mask().iter().map(|&m| m as i64).collect(),
            token_type_ids: encoding.get_type_ids().iter().map(|&id| id as i64).collect(),
        };

        if input.len() > self.max_length {
            input.truncate(self.max_length);
        }

        Ok(input)
    }

    /// Tokenize a batch of texts
    pub fn encode_batch(&self, texts: &[String]) -> Result<Vec<TokenizedInput>, TokenizerError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }
}

/// Pad batch to uniform length
///
/// Padding positions carry a zero attention mask so pooling ignores them.
pub fn pad_batch(inputs: Vec<TokenizedInput>) -> (Vec<TokenizedInput>, usize) {
    let max_len = inputs.iter().map(TokenizedInput::len).max().unwrap_or(0);

    let padded = inputs
        .into_iter()
        .map(|mut input| {
            input.pad_to(max_len);
            input
        })
        .collect();

    (padded, max_len)
}
