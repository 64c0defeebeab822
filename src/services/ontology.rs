//! Lexical-ontology service: animacy lookup.
//!
//! The extractor needs exactly one ontology operation: whether a noun lemma's
//! hypernym closure intersects {person, animal, creature, living_thing}. The
//! trait keeps that membership test injectable; the default implementation
//! serves it from a closed word table, which is the always-available
//! lower-accuracy tier (a real WordNet-backed service can implement the same
//! trait).

use std::collections::HashSet;

/// Service trait for the animacy membership test.
pub trait OntologyService: Send + Sync {
    /// Whether the noun lemma denotes a person, animal, creature or other
    /// living thing.
    fn is_animate(&self, lemma: &str) -> bool;

    /// Whether a real ontology backs this service.
    fn is_available(&self) -> bool;
}

/// Word-table ontology: a fixed set of animate noun lemmas.
pub struct WordListOntology {
    animate: HashSet<String>,
}

const ANIMATE_NOUNS: &[&str] = &[
    // people
    "person", "man", "woman", "boy", "girl", "child", "baby", "kid", "thief", "hunter",
    "traveler", "stranger", "soldier", "guard", "king", "queen", "prince", "princess", "knight",
    "friend", "enemy", "neighbor", "merchant", "farmer", "sailor", "captain", "doctor", "priest",
    "witch", "wizard", "warrior", "servant", "master", "lady", "lord", "lad", "elder", "youth",
    "mother", "father", "son", "daughter", "brother", "sister", "uncle", "aunt", "people",
    "crowd", "group", "figure", "rider", "messenger", "beggar", "prisoner", "guide", "healer",
    // animals
    "animal", "horse", "cat", "dog", "fox", "wolf", "bear", "bird", "vulture", "crow", "raven",
    "owl", "eagle", "hawk", "snake", "rat", "mouse", "lion", "tiger", "deer", "goat", "sheep",
    "cow", "bull", "pig", "rabbit", "hare", "fish", "frog", "spider", "insect", "bee", "hound",
    "mare", "stallion", "pony", "mule", "donkey", "camel", "creature", "beast",
];

impl Default for WordListOntology {
    fn default() -> Self {
        Self {
            animate: ANIMATE_NOUNS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl WordListOntology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the table with additional animate lemmas (config overlay).
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, words: I) {
        self.animate.extend(words.into_iter().map(|w| w.to_lowercase()));
    }
}

impl OntologyService for WordListOntology {
    fn is_animate(&self, lemma: &str) -> bool {
        self.animate.contains(&lemma.to_lowercase())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// No-op ontology for tests: nothing is animate.
#[derive(Default)]
pub struct NoopOntology;

impl NoopOntology {
    pub fn new() -> Self {
        Self
    }
}

impl OntologyService for NoopOntology {
    fn is_animate(&self, _lemma: &str) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_covers_people_and_animals() {
        let ontology = WordListOntology::new();
        assert!(ontology.is_animate("thief"));
        assert!(ontology.is_animate("Horse"));
        assert!(ontology.is_animate("vulture"));
        assert!(!ontology.is_animate("bridge"));
        assert!(!ontology.is_animate("sword"));
        assert!(ontology.is_available());
    }

    #[test]
    fn test_extend_adds_lemmas() {
        let mut ontology = WordListOntology::new();
        assert!(!ontology.is_animate("dragon"));
        ontology.extend(vec!["Dragon".to_string()]);
        assert!(ontology.is_animate("dragon"));
    }

    #[test]
    fn test_noop_is_never_animate() {
        let ontology = NoopOntology::new();
        assert!(!ontology.is_animate("man"));
        assert!(!ontology.is_available());
    }
}
