//! Coreference collaborator interface.
//!
//! The clustering model itself is external; this trait covers the two
//! operations the pipeline consumes. Some models expose a pre-resolved text
//! accessor — that is modeled as an explicit capability flag, not an
//! exception-driven probe. When the capability is present the pipeline
//! prefers it; otherwise it runs the manual span-surgery resolver over the
//! clusters (the two paths must be drop-in equivalent).

use std::path::Path;

use async_trait::async_trait;

use crate::models::MentionCluster;
use crate::FabulaError;

/// Service trait for the coreference collaborator.
#[async_trait]
pub trait CorefService: Send + Sync {
    /// Mention clusters for the document, primary mention first per cluster.
    async fn clusters(&self, text: &str) -> Result<Vec<MentionCluster>, FabulaError>;

    /// Whether this model exposes a native resolved-text accessor.
    fn supports_resolved_text(&self) -> bool {
        false
    }

    /// Native resolved text, when [`supports_resolved_text`] is true.
    ///
    /// [`supports_resolved_text`]: CorefService::supports_resolved_text
    async fn resolved_text(&self, _text: &str) -> Result<String, FabulaError> {
        Err(FabulaError::Model(
            "Coreference model does not expose a resolved-text accessor".to_string(),
        ))
    }
}

/// Coreference clusters preloaded from an external model's JSON sidecar.
///
/// The sidecar format is the model's native dump: an array of clusters, each
/// an array of `[start, end]` character-offset pairs.
#[derive(Debug)]
pub struct StaticCorefService {
    clusters: Vec<MentionCluster>,
}

impl StaticCorefService {
    pub fn new(clusters: Vec<MentionCluster>) -> Self {
        Self { clusters }
    }

    /// Load clusters from a JSON sidecar file.
    pub fn from_json_file(path: &Path) -> Result<Self, FabulaError> {
        let raw = std::fs::read_to_string(path)?;
        let clusters: Vec<MentionCluster> = serde_json::from_str(&raw)?;
        Ok(Self { clusters })
    }
}

#[async_trait]
impl CorefService for StaticCorefService {
    async fn clusters(&self, _text: &str) -> Result<Vec<MentionCluster>, FabulaError> {
        Ok(self.clusters.clone())
    }
}

/// No-op coreference: no clusters, so resolution is the identity transform.
#[derive(Default)]
pub struct NoopCorefService;

impl NoopCorefService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CorefService for NoopCorefService {
    async fn clusters(&self, _text: &str) -> Result<Vec<MentionCluster>, FabulaError> {
        Ok(Vec::new())
    }
}
