//! Parser contract types.
//!
//! These are the structures every [`ParserService`](crate::services::parser::ParserService)
//! implementation must produce. The extractor consumes exactly this surface:
//! per-token lemma, coarse part of speech, optional named-entity kind, and a
//! dependency edge (relation + head index). Nothing richer is required —
//! the extraction heuristics target one subject and one predicate per clause.

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tags, aligned with the UD tag set subset the
/// extraction heuristics actually consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pos {
    Noun,
    ProperNoun,
    Pronoun,
    Verb,
    /// Auxiliary/copular verb (be, seem, modals).
    Aux,
    Adjective,
    Adverb,
    /// Preposition (UD: ADP).
    Adposition,
    Determiner,
    Punct,
    Other,
}

/// Dependency relations the extractor consumes.
///
/// Parsers produce more relations than these; anything the heuristics do not
/// inspect collapses to [`DepRel::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepRel {
    /// Nominal subject (nsubj).
    Subject,
    /// Passive nominal subject (nsubjpass).
    PassiveSubject,
    /// Direct object (dobj).
    DirectObject,
    /// Clausal attribute (attr), e.g. the complement of "became".
    Attribute,
    /// Prepositional modifier (prep).
    Preposition,
    /// Object of a preposition (pobj).
    PrepObject,
    /// Possessive modifier (poss).
    Possessive,
    /// Adjectival complement of a copula (acomp).
    AdjComplement,
    /// Auxiliary verb attached to a main verb.
    Aux,
    /// Sentence root.
    Root,
    Other,
}

/// Named-entity kinds relevant to actor validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Person,
    Organization,
    /// Nationality / religious / political group (NORP).
    Group,
    Animal,
    Location,
    Other,
}

impl EntityKind {
    /// Whether this entity kind counts as an agent for actor validity.
    pub fn is_agentive(self) -> bool {
        matches!(
            self,
            EntityKind::Person | EntityKind::Organization | EntityKind::Group | EntityKind::Animal
        )
    }
}

/// One analyzed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Surface text as it appears in the sentence.
    pub text: String,
    /// Base/lemma form, lowercased by convention.
    pub lemma: String,
    pub pos: Pos,
    /// Named-entity kind, if the tagger assigned one.
    pub entity: Option<EntityKind>,
    /// Dependency relation to the head token.
    pub dep: DepRel,
    /// Index of the head token within the sentence. The root points to itself.
    pub head: usize,
}

/// One syntactically analyzed sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    /// Full sentence text (dialogue scanning works on this).
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Iterate over the syntactic children of the token at `head_idx`.
    ///
    /// Children are yielded in token order, which the target-derivation
    /// heuristic depends on (later matches overwrite earlier ones).
    pub fn children(&self, head_idx: usize) -> impl Iterator<Item = (usize, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(i, t)| t.head == head_idx && *i != head_idx)
    }

    /// Find the first child of `head_idx` matching one of `rels`.
    pub fn child_with_rel(&self, head_idx: usize, rels: &[DepRel]) -> Option<(usize, &Token)> {
        self.children(head_idx)
            .find(|(_, t)| rels.contains(&t.dep))
    }
}
