//! Heuristic word tables for event extraction.
//!
//! Every closed word set the extractor consults lives here as a named,
//! injectable table rather than a scattered literal, so the heuristics stay
//! tunable and testable independent of the algorithm. Defaults match the
//! shipped behavior; a TOML overlay file can extend or replace each table.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::FabulaError;

/// All word tables used by actor validity, proxy resolution, memory updates
/// and dialogue attachment.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Non-referential pronouns and fillers that can never be actors.
    pub stop_actors: HashSet<String>,
    /// Body-part nouns that stand in for their possessor (proxy actions).
    pub body_parts: HashSet<String>,
    /// Personified non-human agents (wind, river, shadow, ...).
    pub atmospheric_agents: HashSet<String>,
    /// Verbs of speech; also drive dialogue attachment.
    pub speech_verbs: HashSet<String>,
    /// Human-typical non-speech verbs; with speech verbs they form the
    /// acting-human evidence set.
    pub human_verbs: HashSet<String>,
    /// First/second-person pronoun to character name mapping.
    pub actor_names: HashMap<String, String>,
    /// The closed pronoun set that is always a valid actor.
    pub agent_pronouns: HashSet<String>,
}

fn set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            stop_actors: set(&[
                "it",
                "that",
                "this",
                "what",
                "who",
                "which",
                "there",
                "here",
                "scene",
                "moment",
                "way",
                "idea",
                "something",
                "anything",
                "nothing",
                "everything",
                "lot",
                "kind",
                "sort",
                "part",
                "side",
                "series",
                "line",
                "door",
                "item",
            ]),
            body_parts: set(&[
                "hand",
                "finger",
                "eyes",
                "eye",
                "gaze",
                "face",
                "breath",
                "voice",
                "expression",
                "head",
                "heart",
                "mouth",
                "lips",
                "fist",
                "glance",
                "look",
                "arm",
                "leg",
                "shoulders",
                "shoulder",
            ]),
            atmospheric_agents: set(&[
                "rain", "wind", "mist", "fog", "shadow", "sun", "moon", "river", "storm",
                "silence", "darkness", "light", "smoke",
            ]),
            speech_verbs: set(&[
                "say",
                "ask",
                "shout",
                "whisper",
                "mutter",
                "tell",
                "speak",
                "reply",
                "command",
                "snap",
                "hiss",
                "call",
                "scream",
                "cry",
                "interrupt",
                "warn",
            ]),
            human_verbs: set(&[
                "think", "know", "decide", "hope", "laugh", "smile", "stare", "look", "walk",
                "run", "grab", "hold", "take", "reach", "sit", "stand", "swallow", "roll",
            ]),
            actor_names: HashMap::new(),
            agent_pronouns: set(&["he", "she", "they", "you", "we"]),
        }
    }
}

impl Lexicon {
    pub fn is_stop_actor(&self, word: &str) -> bool {
        self.stop_actors.contains(&word.to_lowercase())
    }

    pub fn is_body_part(&self, lemma: &str) -> bool {
        self.body_parts.contains(&lemma.to_lowercase())
    }

    pub fn is_atmospheric(&self, word: &str) -> bool {
        self.atmospheric_agents.contains(&word.to_lowercase())
    }

    pub fn is_speech_verb(&self, lemma: &str) -> bool {
        self.speech_verbs.contains(&lemma.to_lowercase())
    }

    /// Whether a predicate lemma is human-typical (speech verbs included).
    pub fn is_acting_human_verb(&self, lemma: &str) -> bool {
        let lemma = lemma.to_lowercase();
        self.speech_verbs.contains(&lemma) || self.human_verbs.contains(&lemma)
    }

    pub fn is_agent_pronoun(&self, word: &str) -> bool {
        self.agent_pronouns.contains(&word.to_lowercase())
    }

    /// Mapped character name for a first/second-person pronoun, if configured.
    pub fn mapped_name(&self, word: &str) -> Option<&str> {
        self.actor_names.get(&word.to_lowercase()).map(|s| s.as_str())
    }

    /// Load a TOML overlay and merge it over the defaults.
    ///
    /// Each table in the file *extends* the corresponding default table;
    /// `actor_names` entries override on key collision.
    pub fn from_overlay_file(path: &Path) -> Result<Self, FabulaError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_overlay_str(&raw)
    }

    pub fn from_overlay_str(raw: &str) -> Result<Self, FabulaError> {
        let overlay: LexiconOverlay = toml::from_str(raw)?;
        let mut lexicon = Self::default();
        lexicon.apply(overlay);
        Ok(lexicon)
    }

    fn apply(&mut self, overlay: LexiconOverlay) {
        let lower = |words: Vec<String>| words.into_iter().map(|w| w.to_lowercase());
        if let Some(words) = overlay.stop_actors {
            self.stop_actors.extend(lower(words));
        }
        if let Some(words) = overlay.body_parts {
            self.body_parts.extend(lower(words));
        }
        if let Some(words) = overlay.atmospheric_agents {
            self.atmospheric_agents.extend(lower(words));
        }
        if let Some(words) = overlay.speech_verbs {
            self.speech_verbs.extend(lower(words));
        }
        if let Some(words) = overlay.human_verbs {
            self.human_verbs.extend(lower(words));
        }
        if let Some(names) = overlay.actor_names {
            for (pronoun, name) in names {
                self.actor_names.insert(pronoun.to_lowercase(), name);
            }
        }
    }
}

/// On-disk overlay shape; every table is optional.
#[derive(Debug, Default, Deserialize)]
pub struct LexiconOverlay {
    pub stop_actors: Option<Vec<String>>,
    pub body_parts: Option<Vec<String>>,
    pub atmospheric_agents: Option<Vec<String>>,
    pub speech_verbs: Option<Vec<String>>,
    pub human_verbs: Option<Vec<String>>,
    pub actor_names: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_known_tables() {
        let lex = Lexicon::default();
        assert!(lex.is_stop_actor("it"));
        assert!(lex.is_stop_actor("Moment"));
        assert!(lex.is_body_part("hand"));
        assert!(lex.is_atmospheric("wind"));
        assert!(lex.is_speech_verb("whisper"));
        assert!(lex.is_acting_human_verb("laugh"));
        assert!(lex.is_acting_human_verb("say"));
        assert!(lex.is_agent_pronoun("she"));
        assert!(!lex.is_acting_human_verb("snort"));
    }

    #[test]
    fn test_overlay_extends_tables() {
        let lex = Lexicon::from_overlay_str(
            r#"
            atmospheric_agents = ["Tide"]
            speech_verbs = ["bellow"]

            [actor_names]
            you = "Julian"
            i = "Silas"
            "#,
        )
        .expect("overlay should parse");

        assert!(lex.is_atmospheric("tide"));
        assert!(lex.is_atmospheric("wind")); // defaults kept
        assert!(lex.is_speech_verb("bellow"));
        assert_eq!(lex.mapped_name("You"), Some("Julian"));
        assert_eq!(lex.mapped_name("i"), Some("Silas"));
        assert_eq!(lex.mapped_name("we"), None);
    }

    #[test]
    fn test_bad_overlay_is_config_error() {
        let err = Lexicon::from_overlay_str("stop_actors = 3").unwrap_err();
        assert!(matches!(err, FabulaError::Config(_)));
    }

    #[test]
    fn test_overlay_file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, "body_parts = [\"tail\"]\n").expect("write");
        let lex = Lexicon::from_overlay_file(&path).expect("load");
        assert!(lex.is_body_part("tail"));
    }
}
