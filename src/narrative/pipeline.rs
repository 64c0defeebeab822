//! The extraction pipeline driver.
//!
//! Runs the fixed stage order: coreference resolution, parsing, then a
//! strictly sequential sentence loop (events of sentence N are extracted
//! before sentence N+1 starts — the actor memory depends on it). Events are
//! tagged with their sentence index as they are appended.

use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{ActorMemory, Timeline};
use crate::narrative::extractor::EventExtractor;
use crate::narrative::lexicon::Lexicon;
use crate::narrative::resolver::resolve_clusters;
use crate::services::{CorefService, OntologyService, ParserService, SentimentService};
use crate::FabulaError;

/// Wires the collaborator services into the fixed extraction stage order.
pub struct Pipeline {
    parser: Arc<dyn ParserService>,
    coref: Arc<dyn CorefService>,
    sentiment: Arc<dyn SentimentService>,
    ontology: Arc<dyn OntologyService>,
    lexicon: Lexicon,
}

impl Pipeline {
    pub fn new(
        parser: Arc<dyn ParserService>,
        coref: Arc<dyn CorefService>,
        sentiment: Arc<dyn SentimentService>,
        ontology: Arc<dyn OntologyService>,
        lexicon: Lexicon,
    ) -> Self {
        Self {
            parser,
            coref,
            sentiment,
            ontology,
            lexicon,
        }
    }

    /// Normalize referring mentions to their primary mention text.
    ///
    /// Prefers the coreference model's native resolved-text accessor when it
    /// advertises one; otherwise fetches clusters and applies the manual
    /// span-surgery resolver. The two paths must produce the same text.
    pub async fn resolve(&self, text: &str) -> Result<String, FabulaError> {
        if self.coref.supports_resolved_text() {
            debug!("using coreference model's native resolved text");
            return self.coref.resolved_text(text).await;
        }
        let clusters = self.coref.clusters(text).await?;
        debug!(clusters = clusters.len(), "resolving mention clusters manually");
        resolve_clusters(text, &clusters)
    }

    /// Run the full pipeline over one document.
    pub async fn run(&self, text: &str) -> Result<Timeline, FabulaError> {
        let resolved = self.resolve(text).await?;
        let sentences = self.parser.parse(&resolved).await?;
        info!(
            sentences = sentences.len(),
            parser = self.parser.name(),
            "extracting events"
        );

        let extractor =
            EventExtractor::new(&self.lexicon, self.ontology.as_ref(), self.sentiment.as_ref());

        let mut memory = ActorMemory::default();
        let mut timeline = Timeline::default();
        for (index, sentence) in sentences.iter().enumerate() {
            let mut events = extractor.extract_sentence(sentence, &mut memory).await;
            for event in &mut events {
                event.sentence_index = index;
            }
            debug!(
                sentence = index,
                events = events.len(),
                "sentence processed"
            );
            timeline.events.extend(events);
        }

        info!(events = timeline.events.len(), "extraction complete");
        Ok(timeline)
    }
}
