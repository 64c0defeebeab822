//! Narrative analysis: coreference resolution, event extraction, dialogue
//! attribution and scene segmentation.

pub mod dialogue;
pub mod extractor;
pub mod lexicon;
pub mod pipeline;
pub mod resolver;
pub mod segment;

pub use extractor::EventExtractor;
pub use lexicon::Lexicon;
pub use pipeline::Pipeline;
pub use resolver::resolve_clusters;
pub use segment::split_scenes;
