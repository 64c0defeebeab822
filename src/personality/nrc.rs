//! NRC emotion lexicon loader.
//!
//! The NRC word-emotion association file is tab-separated,
//! `word<TAB>emotion<TAB>association`, one association per line. Only lines
//! with association `1` contribute; empty lines, `#` comments and malformed
//! lines are skipped rather than treated as errors (the published file has
//! stray lines).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use crate::FabulaError;

/// Word-to-emotions mapping loaded from an NRC association file.
#[derive(Debug, Clone, Default)]
pub struct NrcLexicon {
    map: HashMap<String, HashSet<String>>,
}

impl NrcLexicon {
    pub fn from_file(path: &Path) -> Result<Self, FabulaError> {
        let raw = std::fs::read_to_string(path)?;
        let lexicon = Self::from_str_contents(&raw);
        info!(words = lexicon.len(), path = %path.display(), "NRC lexicon loaded");
        Ok(lexicon)
    }

    pub fn from_str_contents(raw: &str) -> Self {
        let mut map: HashMap<String, HashSet<String>> = HashMap::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split('\t').collect();
            let [word, emotion, association] = parts[..] else {
                continue;
            };
            if association == "1" {
                map.entry(word.to_string())
                    .or_default()
                    .insert(emotion.to_string());
            }
        }
        Self { map }
    }

    /// Emotions associated with a (lowercased) word, if any.
    pub fn emotions(&self, word: &str) -> Option<&HashSet<String>> {
        self.map.get(word)
    }

    /// Number of distinct words with at least one association.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
