//! Candle-based inference backend for sentence classification.
//!
//! Pure-Rust ML runtime using candle. Provides [`SequenceClassifier`], a
//! single-label sequence classifier (softmax over the model's `id2label`
//! head) compatible with RoBERTa-style sentiment models.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{LayerNorm, Module, VarBuilder};
use candle_transformers::models::xlm_roberta::{
    Config as XLMRobertaConfig, XLMRobertaForSequenceClassification,
};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer};

/// Paths to downloaded model files from HuggingFace Hub.
pub struct ModelFiles {
    pub config_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub weights_path: PathBuf,
}

/// Download model files from HuggingFace Hub.
///
/// Uses `hf_hub::api::sync::Api` which caches at `~/.cache/huggingface/hub/`.
/// Designed to be called from `spawn_blocking` since it performs synchronous I/O.
pub fn download_model(repo_id: &str, _cache_dir: Option<&Path>) -> Result<ModelFiles> {
    let api = hf_hub::api::sync::Api::new().context("Failed to initialize HuggingFace Hub API")?;
    let repo = api.model(repo_id.to_string());

    let config_path = repo
        .get("config.json")
        .context("Failed to download config.json")?;
    let tokenizer_path = repo
        .get("tokenizer.json")
        .context("Failed to download tokenizer.json")?;
    let weights_path = repo
        .get("model.safetensors")
        .context("Failed to download model.safetensors")?;

    Ok(ModelFiles {
        config_path,
        tokenizer_path,
        weights_path,
    })
}

/// Select the best available compute device.
///
/// Tries Metal (macOS) or CUDA if the corresponding feature is enabled.
/// Probes layer-norm support since RoBERTa requires it — falls back to CPU
/// if the GPU backend lacks the kernel.
pub fn select_device() -> Device {
    #[cfg(target_os = "macos")]
    {
        if let Ok(device) = Device::new_metal(0) {
            if probe_layer_norm(&device) {
                tracing::info!("Using Metal GPU for inference");
                return device;
            }
            tracing::warn!("Metal GPU available but layer-norm not supported, falling back to CPU");
        }
    }
    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            if probe_layer_norm(&device) {
                tracing::info!("Using CUDA GPU for inference");
                return device;
            }
            tracing::warn!("CUDA GPU available but layer-norm not supported, falling back to CPU");
        }
    }
    tracing::info!("Using CPU for inference");
    Device::Cpu
}

/// Probe whether a device supports layer-norm (required by RoBERTa).
fn probe_layer_norm(device: &Device) -> bool {
    (|| -> candle_core::Result<()> {
        let weight = Tensor::ones(4, DType::F32, device)?;
        let bias = Tensor::zeros(4, DType::F32, device)?;
        let ln = LayerNorm::new(weight, bias, 1e-5);
        let input = Tensor::randn(0f32, 1.0, (1, 4), device)?;
        let _ = ln.forward(&input)?;
        Ok(())
    })()
    .is_ok()
}

/// Single-label sequence classifier using RoBERTa/XLM-RoBERTa.
///
/// Classifies text into exactly one of the model's labels via softmax.
/// Compatible with RoBERTa-based sentiment models whose `config.json`
/// carries an `id2label` mapping.
pub struct SequenceClassifier {
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
    num_labels: usize,
    labels: Vec<String>,
}

impl SequenceClassifier {
    /// Load a sequence classifier from downloaded model files.
    ///
    /// Parses `id2label` from config.json to determine label names and count.
    pub fn new(files: &ModelFiles, device: Device) -> Result<Self> {
        let config_str = std::fs::read_to_string(&files.config_path)
            .context("Failed to read classifier config")?;
        let config: XLMRobertaConfig =
            serde_json::from_str(&config_str).context("Failed to parse RoBERTa config")?;

        // Parse id2label from config.json for label names
        let config_json: serde_json::Value =
            serde_json::from_str(&config_str).context("Failed to parse config as JSON")?;
        let id2label = config_json
            .get("id2label")
            .and_then(|v| v.as_object())
            .context("config.json missing id2label mapping")?;

        // Build ordered label list from id2label: {"0": "negative", "1": "neutral", ...}
        let mut label_entries: Vec<(usize, String)> = id2label
            .iter()
            .filter_map(|(k, v)| {
                let idx: usize = k.parse().ok()?;
                let label = v.as_str()?.to_string();
                Some((idx, label))
            })
            .collect();
        label_entries.sort_by_key(|(idx, _)| *idx);
        let labels: Vec<String> = label_entries.into_iter().map(|(_, label)| label).collect();
        let num_labels = labels.len();

        if num_labels == 0 {
            anyhow::bail!("id2label is empty — cannot determine label count");
        }

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load classifier tokenizer: {}", e))?;

        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        // SAFETY: mmap'd safetensors file — safe as long as the file is not modified
        // while the model is in use.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&files.weights_path], DType::F32, &device)
                .context("Failed to load classifier weights")?
        };
        let model = XLMRobertaForSequenceClassification::new(num_labels, &config, vb)
            .context("Failed to construct classifier model")?;

        Ok(Self {
            model,
            tokenizer,
            device,
            num_labels,
            labels,
        })
    }

    /// Classify texts, returning the full softmax distribution per input.
    ///
    /// Returns one `Vec<(label, probability)>` per text; probabilities sum
    /// to 1 over the label set.
    pub fn classify(&self, texts: &[String]) -> Result<Vec<Vec<(String, f32)>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let str_refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let encodings = self
            .tokenizer
            .encode_batch(str_refs, true)
            .map_err(|e| anyhow::anyhow!("Classifier tokenization failed: {}", e))?;

        let batch_size = encodings.len();
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        let input_ids: Vec<u32> = encodings
            .iter()
            .flat_map(|e| e.get_ids().to_vec())
            .collect();
        let attention_mask: Vec<u32> = encodings
            .iter()
            .flat_map(|e| e.get_attention_mask().to_vec())
            .collect();

        let input_ids = Tensor::from_vec(input_ids, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(attention_mask, (batch_size, max_len), &self.device)?;
        // RoBERTa doesn't use token_type_ids — pass zeros
        let token_type_ids = input_ids.zeros_like()?;

        // Forward pass -> [batch, num_labels] logits
        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)?;

        // Softmax over labels: sentiment is single-label classification
        let probs = candle_nn::ops::softmax(&logits, 1)?;
        let probs_vec = probs.to_vec2::<f32>()?;

        let results: Vec<Vec<(String, f32)>> = probs_vec
            .into_iter()
            .map(|row| {
                self.labels
                    .iter()
                    .zip(row)
                    .map(|(label, score)| (label.clone(), score))
                    .collect()
            })
            .collect();

        Ok(results)
    }

    /// Get the number of classification labels.
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }
}
