//! Sentence sentiment classification service.
//!
//! The extractor asks one question per sentence: what is the emotional
//! coloring, and with what confidence? The local implementation runs a
//! RoBERTa sentiment model through candle with a small result cache; if the
//! model cannot be loaded the service reports unavailable and every classify
//! call errors, which the extractor degrades to "neutral" locally — a
//! classifier failure must never abort extraction.

use std::sync::Arc;

use async_trait::async_trait;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::inference::{download_model, select_device, SequenceClassifier};
use crate::FabulaError;

/// Maximum input length (chars) handed to the model, mirroring the
/// classifier's sequence budget.
pub const MAX_INPUT_CHARS: usize = 512;

const SENTIMENT_MODEL_REPO: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";
const CACHE_CAPACITY: u64 = 4096;

/// A sentiment label with its confidence in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: String,
    pub confidence: f32,
}

/// Service trait for sentence sentiment classification.
#[async_trait]
pub trait SentimentService: Send + Sync {
    /// Classify one text, returning the winning label and its confidence.
    ///
    /// Implementations must truncate input to their own budget; callers may
    /// pass whole sentences.
    async fn classify(&self, text: &str) -> Result<SentimentScore, FabulaError>;

    /// Whether the sentiment model is loaded and available.
    fn is_available(&self) -> bool;
}

/// Local sentiment service using a candle RoBERTa classifier.
pub struct LocalSentimentService {
    classifier: Option<Arc<SequenceClassifier>>,
    cache: Cache<String, SentimentScore>,
    available: bool,
}

impl LocalSentimentService {
    /// Create a new local sentiment service.
    ///
    /// Downloads and loads the sentiment model eagerly. If model loading
    /// fails, the service will be unavailable but won't error (graceful
    /// degradation).
    pub fn new() -> Self {
        let cache = Cache::new(CACHE_CAPACITY);

        let files = match download_model(SENTIMENT_MODEL_REPO, None) {
            Ok(files) => files,
            Err(e) => {
                warn!(
                    "Failed to download sentiment model: {}. Emotion labels will degrade to neutral.",
                    e
                );
                return Self {
                    classifier: None,
                    cache,
                    available: false,
                };
            }
        };

        let device = select_device();

        match SequenceClassifier::new(&files, device) {
            Ok(classifier) => {
                info!(
                    "Sentiment classifier loaded ({}, {} labels via candle)",
                    SENTIMENT_MODEL_REPO,
                    classifier.num_labels()
                );
                Self {
                    classifier: Some(Arc::new(classifier)),
                    cache,
                    available: true,
                }
            }
            Err(e) => {
                warn!(
                    "Failed to load sentiment model: {}. Emotion labels will degrade to neutral.",
                    e
                );
                Self {
                    classifier: None,
                    cache,
                    available: false,
                }
            }
        }
    }
}

impl Default for LocalSentimentService {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the winning (label, probability) pair from a softmax distribution.
fn best_label(scores: Vec<(String, f32)>) -> Option<SentimentScore> {
    scores
        .into_iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(label, confidence)| SentimentScore { label, confidence })
}

#[async_trait]
impl SentimentService for LocalSentimentService {
    async fn classify(&self, text: &str) -> Result<SentimentScore, FabulaError> {
        let truncated: String = text.chars().take(MAX_INPUT_CHARS).collect();

        if let Some(cached) = self.cache.get(&truncated) {
            return Ok(cached);
        }

        let classifier = self
            .classifier
            .as_ref()
            .ok_or_else(|| FabulaError::Model("Sentiment model not loaded".to_string()))?
            .clone();

        let input = truncated.clone();
        let result = tokio::task::spawn_blocking(move || {
            let texts = vec![input];
            classifier.classify(&texts)
        })
        .await
        .map_err(|e| FabulaError::Model(format!("Task join error: {}", e)))?
        .map_err(|e| FabulaError::Model(format!("Sentiment classification error: {}", e)))?;

        let scores = result
            .into_iter()
            .next()
            .ok_or_else(|| FabulaError::Model("Empty classification result".to_string()))?;

        let score = best_label(scores)
            .ok_or_else(|| FabulaError::Model("Classifier produced no labels".to_string()))?;

        self.cache.insert(truncated, score.clone());
        Ok(score)
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// No-op sentiment service: classify always errors, extraction degrades to
/// neutral.
#[derive(Default)]
pub struct NoopSentimentService;

impl NoopSentimentService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentimentService for NoopSentimentService {
    async fn classify(&self, _text: &str) -> Result<SentimentScore, FabulaError> {
        Err(FabulaError::Model(
            "Sentiment service is not available (noop)".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
