// lingocore/src/embeddings/model.rs
//
// ONNX model inference via tract

use crate::embeddings::config::{EmbedConfig, PoolingStrategy};
use crate::embeddings::tokenize::{pad_batch, EmbedTokenizer, TokenizedInput, TokenizerError};
use crate::embeddings::{l2_normalize, Embedder};
use ndarray::{Array2, Array3, Axis};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tract_onnx::prelude::*;

/// Type alias for the tract typed model
type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Loaded embedding model ready for inference
///
/// Load once and share: the plan is immutable and `run` only borrows it,
/// so concurrent queries need no lock.
pub struct EmbedModel {
    model: Arc<TractModel>,
    tokenizer: EmbedTokenizer,
    config: EmbedConfig,
    model_id: String,
    dimensions: usize,
    /// 3 for BERT exports with token_type_ids, 2 otherwise
    input_count: usize,
}

/// Model loading and inference errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model load failed: {0}")]
    LoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    #[error("Shape error: {0}")]
    ShapeError(String),

    #[error("Embedder returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("Embedder returned an empty vector")]
    EmptyOutput,
}

impl EmbedModel {
    /// Load model from ONNX bytes and tokenizer JSON
    pub fn from_bytes(
        model_bytes: &[u8],
        tokenizer_json: &str,
        config: EmbedConfig,
    ) -> Result<Self, ModelError> {
        let model = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model_bytes))
            .map_err(|e| ModelError::LoadFailed(e.to_string()))?
            .into_optimized()
            .map_err(|e| ModelError::LoadFailed(e.to_string()))?
            .into_runnable()
            .map_err(|e| ModelError::LoadFailed(e.to_string()))?;

        let input_count = model.model().inputs.len();
        if !(2..=3).contains(&input_count) {
            return Err(ModelError::LoadFailed(format!(
                "expected 2 or 3 model inputs, found {}",
                input_count
            )));
        }

        let tokenizer = EmbedTokenizer::from_json(tokenizer_json, config.model.max_length())?;

        Ok(Self {
            model: Arc::new(model),
            tokenizer,
            model_id: config.model.hf_model_id().to_string(),
            dimensions: config.effective_dim(),
            config,
            input_count,
        })
    }

    /// Load model and tokenizer from disk
    pub fn from_files(
        model_path: &Path,
        tokenizer_path: &Path,
        config: EmbedConfig,
    ) -> Result<Self, ModelError> {
        let model_bytes = std::fs::read(model_path)
            .map_err(|e| ModelError::LoadFailed(format!("{}: {}", model_path.display(), e)))?;
        let tokenizer_json = std::fs::read_to_string(tokenizer_path)
            .map_err(|e| ModelError::LoadFailed(format!("{}: {}", tokenizer_path.display(), e)))?;

        let model = Self::from_bytes(&model_bytes, &tokenizer_json, config)?;
        log::info!(
            "Loaded embedding model {} ({}d) from {}",
            model.model_id,
            model.dimensions,
            model_path.display()
        );
        Ok(model)
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Embed one batch in a single inference call
    fn embed_chunk(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        let encoded = self.tokenizer.encode_batch(texts)?;
        let (padded, seq_len) = pad_batch(encoded);

        let input_ids = build_input_tensor(&padded, seq_len, |t| &t.input_ids)?;
        let attention_mask = build_input_tensor(&padded, seq_len, |t| &t.attention_mask)?;
        let attention_mask_arr = build_attention_mask_array(&padded, seq_len)?;

        let mut inputs: TVec<TValue> = tvec![input_ids.into(), attention_mask.into()];
        if self.input_count == 3 {
            let token_type_ids = build_input_tensor(&padded, seq_len, |t| &t.token_type_ids)?;
            inputs.push(token_type_ids.into());
        }

        let outputs = self
            .model
            .run(inputs)
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        // BERT models output: (batch_size, seq_len, hidden_size)
        let output_tensor = outputs
            .first()
            .ok_or_else(|| ModelError::InferenceFailed("model produced no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| ModelError::ShapeError(e.to_string()))?;

        let output_3d = output_tensor
            .to_owned()
            .into_dimensionality::<ndarray::Ix3>()
            .map_err(|e| ModelError::ShapeError(format!("Failed to convert to 3D: {}", e)))?;

        let hidden_size = output_3d.shape()[2];
        if hidden_size != self.config.model.dimensions() {
            return Err(ModelError::ShapeError(format!(
                "{} produces {}d hidden states, expected {}",
                self.model_id,
                hidden_size,
                self.config.model.dimensions()
            )));
        }

        let mut embeddings = pool_embeddings(&output_3d, &attention_mask_arr, self.config.pooling);

        for embedding in embeddings.iter_mut() {
            embedding.truncate(self.dimensions);
            if self.config.normalize {
                l2_normalize(embedding);
            }
        }

        Ok(embeddings)
    }
}

impl Embedder for EmbedModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.config.batch_size.max(1)) {
            embeddings.extend(self.embed_chunk(batch)?);
        }
        Ok(embeddings)
    }
}

/// Build input tensor from tokenized inputs
fn build_input_tensor<F>(
    inputs: &[TokenizedInput],
    seq_len: usize,
    extractor: F,
) -> Result<Tensor, ModelError>
where
    F: Fn(&TokenizedInput) -> &[i64],
{
    let mut data = Vec::with_capacity(inputs.len() * seq_len);
    for input in inputs {
        data.extend_from_slice(extractor(input));
    }

    Tensor::from_shape(&[inputs.len(), seq_len], &data)
        .map_err(|e| ModelError::ShapeError(e.to_string()))
}

/// Build attention mask as ndarray for pooling calculations
fn build_attention_mask_array(
    inputs: &[TokenizedInput],
    seq_len: usize,
) -> Result<Array2<i64>, ModelError> {
    let mut data = Vec::with_capacity(inputs.len() * seq_len);
    for input in inputs {
        data.extend_from_slice(&input.attention_mask);
    }

    Array2::from_shape_vec((inputs.len(), seq_len), data)
        .map_err(|e| ModelError::ShapeError(e.to_string()))
}

/// Apply pooling strategy to token embeddings
fn pool_embeddings(
    output: &Array3<f32>,
    attention_mask: &Array2<i64>,
    pooling: PoolingStrategy,
) -> Vec<Vec<f32>> {
    let hidden_size = output.shape()[2];

    output
        .axis_iter(Axis(0))
        .zip(attention_mask.axis_iter(Axis(0)))
        .map(|(token_embeddings, mask)| match pooling {
            PoolingStrategy::Mean => {
                // sum(embeddings * mask) / sum(mask)
                let mut sum = vec![0.0f32; hidden_size];
                let mut count = 0.0f32;

                for (row, &m) in token_embeddings.axis_iter(Axis(0)).zip(mask.iter()) {
                    if m > 0 {
                        sum.iter_mut().zip(row.iter()).for_each(|(s, v)| *s += v);
                        count += 1.0;
                    }
                }

                if count > 0.0 {
                    sum.iter_mut().for_each(|v| *v /= count);
                }
                sum
            }
            // [CLS] token is at position 0
            PoolingStrategy::Cls => token_embeddings.row(0).to_vec(),
            PoolingStrategy::Max => {
                let mut max_vals = vec![f32::NEG_INFINITY; hidden_size];

                for (row, &m) in token_embeddings.axis_iter(Axis(0)).zip(mask.iter()) {
                    if m > 0 {
                        max_vals
                            .iter_mut()
                            .zip(row.iter())
                            .for_each(|(best, &v)| *best = best.max(v));
                    }
                }

                // Fully masked input: fall back to zeros rather than -inf
                max_vals
                    .iter_mut()
                    .filter(|v| v.is_infinite())
                    .for_each(|v| *v = 0.0);
                max_vals
            }
        })
        .collect()
}
