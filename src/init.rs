//! Shared initialization logic for CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::narrative::{Lexicon, Pipeline};
use crate::services::{
    CorefService, HeuristicParser, LocalSentimentService, NoopSentimentService, OntologyService,
    ParserService, SentimentService, WordListOntology,
};
use crate::FabulaError;

/// Default NRC lexicon file name under the data path.
pub const NRC_LEXICON_FILE: &str = "NRC-Emotion-Lexicon.txt";

/// Startup options gathered from global CLI flags.
#[derive(Debug, Default)]
pub struct InitOptions {
    pub data_path: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_model: bool,
}

/// Extra ontology table carried in the same overlay file as the lexicon.
#[derive(Debug, Default, Deserialize)]
struct OntologyOverlay {
    animate_nouns: Option<Vec<String>>,
}

/// Application context holding the collaborator services.
pub struct AppContext {
    pub parser: Arc<dyn ParserService>,
    pub sentiment: Arc<dyn SentimentService>,
    pub ontology: Arc<dyn OntologyService>,
    pub lexicon: Lexicon,
    pub data_path: PathBuf,
}

impl AppContext {
    /// Initialize the application context.
    ///
    /// Data path priority: explicit path > FABULA_DATA_PATH env > ./.fabula
    /// (if it exists) > ~/.fabula
    pub async fn new(options: InitOptions) -> Result<Self, FabulaError> {
        let data_path = resolve_data_path(options.data_path);
        info!("Using data path: {}", data_path.display());

        let (lexicon, animate_overlay) = match &options.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let lexicon = Lexicon::from_overlay_str(&raw)?;
                let overlay: OntologyOverlay = toml::from_str(&raw)?;
                info!("Lexicon overlay loaded from {}", path.display());
                (lexicon, overlay)
            }
            None => (Lexicon::default(), OntologyOverlay::default()),
        };

        let mut ontology = WordListOntology::new();
        if let Some(words) = animate_overlay.animate_nouns {
            ontology.extend(words);
        }

        let parser = HeuristicParser::with_lexicon(&lexicon);
        warn!(
            "Parser backend '{}' is rule-based; extraction accuracy is reduced \
             outside simple declarative sentences",
            parser.name()
        );

        let sentiment: Arc<dyn SentimentService> = if options.no_model {
            info!("Sentiment model disabled (--no-model); emotions will be neutral");
            Arc::new(NoopSentimentService::new())
        } else {
            let service = tokio::task::spawn_blocking(LocalSentimentService::new)
                .await
                .map_err(|e| FabulaError::Model(format!("Task join error: {}", e)))?;
            Arc::new(service)
        };

        Ok(Self {
            parser: Arc::new(parser),
            sentiment,
            ontology: Arc::new(ontology),
            lexicon,
            data_path,
        })
    }

    /// Build a pipeline around a per-invocation coreference service.
    pub fn pipeline(&self, coref: Arc<dyn CorefService>) -> Pipeline {
        Pipeline::new(
            self.parser.clone(),
            coref,
            self.sentiment.clone(),
            self.ontology.clone(),
            self.lexicon.clone(),
        )
    }

    /// Default location of the NRC emotion lexicon file.
    pub fn nrc_lexicon_path(&self) -> PathBuf {
        self.data_path.join(NRC_LEXICON_FILE)
    }
}

fn resolve_data_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var("FABULA_DATA_PATH").ok().map(PathBuf::from))
        .or_else(|| {
            let local_path = Path::new(".fabula");
            if local_path.exists() && local_path.is_dir() {
                Some(local_path.to_path_buf())
            } else {
                None
            }
        })
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".fabula"))
                .unwrap_or_else(|| PathBuf::from(".fabula"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_path_wins() {
        let path = resolve_data_path(Some(PathBuf::from("/tmp/custom")));
        assert_eq!(path, PathBuf::from("/tmp/custom"));
    }

    #[tokio::test]
    async fn test_no_model_context_is_degraded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = AppContext::new(InitOptions {
            data_path: Some(dir.path().to_path_buf()),
            config: None,
            no_model: true,
        })
        .await
        .expect("init");

        assert!(!ctx.sentiment.is_available());
        assert_eq!(ctx.parser.name(), "heuristic");
        assert_eq!(ctx.nrc_lexicon_path(), dir.path().join(NRC_LEXICON_FILE));
    }

    #[tokio::test]
    async fn test_config_overlay_feeds_lexicon_and_ontology() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("fabula.toml");
        std::fs::write(
            &config,
            "speech_verbs = [\"bellow\"]\nanimate_nouns = [\"golem\"]\n",
        )
        .expect("write config");

        let ctx = AppContext::new(InitOptions {
            data_path: Some(dir.path().to_path_buf()),
            config: Some(config),
            no_model: true,
        })
        .await
        .expect("init");

        assert!(ctx.lexicon.is_speech_verb("bellow"));
        assert!(ctx.ontology.is_animate("golem"));
    }
}
