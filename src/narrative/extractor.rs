//! Heuristic event extraction from parsed sentences.
//!
//! One pass per sentence over its predicates. Each predicate with a
//! recoverable, valid actor yields one [`Event`]; everything that fails the
//! ladder is silently skipped — extraction favors precision over recall.
//! After the predicate pass, quoted dialogue in the sentence is attributed
//! to one of the extracted events (or to the remembered last actor).

use tracing::debug;

use crate::models::{ActorMemory, DepRel, EntityKind, Event, Pos, Sentence, Token};
use crate::narrative::dialogue::extract_dialogue;
use crate::narrative::lexicon::Lexicon;
use crate::services::{OntologyService, SentimentService};

/// Minimum classifier confidence for a non-neutral emotion label
/// (exclusive: a score of exactly the threshold stays neutral).
pub const CONFIDENCE_THRESHOLD: f32 = 0.65;

/// Per-sentence event extractor.
///
/// Borrows its collaborators; construct one per pipeline run.
pub struct EventExtractor<'a> {
    lexicon: &'a Lexicon,
    ontology: &'a dyn OntologyService,
    sentiment: &'a dyn SentimentService,
}

impl<'a> EventExtractor<'a> {
    pub fn new(
        lexicon: &'a Lexicon,
        ontology: &'a dyn OntologyService,
        sentiment: &'a dyn SentimentService,
    ) -> Self {
        Self {
            lexicon,
            ontology,
            sentiment,
        }
    }

    /// Extract the events of one sentence, updating the cross-sentence actor
    /// memory as a side effect.
    ///
    /// `sentence_index` is left at its default; the pipeline driver assigns
    /// it when appending to the timeline.
    pub async fn extract_sentence(
        &self,
        sentence: &Sentence,
        memory: &mut ActorMemory,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        // Sentiment is a sentence-level property: classified at most once per
        // sentence, lazily, and shared by every event in it.
        let mut sentence_emotion: Option<String> = None;

        for (p_idx, predicate) in sentence.tokens.iter().enumerate() {
            let is_predicate = predicate.pos == Pos::Verb
                || (predicate.pos == Pos::Aux && predicate.dep == DepRel::Root);
            if !is_predicate {
                continue;
            }

            let Some((subj_idx, subject)) =
                sentence.child_with_rel(p_idx, &[DepRel::Subject, DepRel::PassiveSubject])
            else {
                continue;
            };

            // Body-part proxy: "Silas's hand pointed..." acts for Silas.
            // A body part with no recoverable possessor is not an actor.
            let (actor_token, proxy_part) = if self.lexicon.is_body_part(&subject.lemma) {
                match sentence.child_with_rel(subj_idx, &[DepRel::Possessive]) {
                    Some((_, owner)) => (owner, Some(subject.text.as_str())),
                    None => continue,
                }
            } else {
                (subject, None)
            };

            if !self.is_valid_actor(actor_token, &predicate.lemma) {
                debug!(
                    actor = %actor_token.text,
                    predicate = %predicate.lemma,
                    "skipping predicate: subject is not a valid actor"
                );
                continue;
            }

            let actor = self.actor_name(actor_token);
            // Atmospheric agents act but never claim later orphaned dialogue.
            // The memory refresh happens before action derivation, so a valid
            // actor counts even when its predicate is rejected below.
            if !self.lexicon.is_atmospheric(&actor) {
                memory.last_actor = Some(actor.clone());
            }

            let mut action = self.derive_action(sentence, p_idx, predicate);
            if !action.chars().any(|c| c.is_alphabetic()) {
                continue;
            }
            if let Some(part) = proxy_part {
                action = format!("{action} with {part}");
            }

            let mut event = Event::new(actor, action);
            event.is_speech = event
                .action
                .split_whitespace()
                .next()
                .is_some_and(|first| self.lexicon.is_speech_verb(first));
            if let Some(target) = self.derive_target(sentence, p_idx) {
                event.target = target;
            }
            event.emotion = self.emotion_for(&sentence.text, &mut sentence_emotion).await;
            events.push(event);
        }

        if let Some(dialogue) = extract_dialogue(&sentence.text) {
            self.attach_dialogue(dialogue, &mut events, memory);
        }

        events
    }

    /// Actor validity: the candidate must be nominal and not a stop word,
    /// plus pass at least one positive-evidence rule.
    fn is_valid_actor(&self, token: &Token, predicate_lemma: &str) -> bool {
        if self.lexicon.is_stop_actor(&token.text) {
            return false;
        }
        if !matches!(token.pos, Pos::Noun | Pos::ProperNoun | Pos::Pronoun) {
            return false;
        }
        self.lexicon.mapped_name(&token.text).is_some()
            || self.lexicon.is_agent_pronoun(&token.text)
            || token.entity.is_some_and(EntityKind::is_agentive)
            || self.lexicon.is_atmospheric(&token.lemma)
            || self.ontology.is_animate(&token.lemma)
            // An unknown noun doing a human-typical thing is weak evidence
            // of agency
            || self.lexicon.is_acting_human_verb(predicate_lemma)
    }

    /// Canonical actor name: configured mapping first, else strip punctuation
    /// and title-case.
    fn actor_name(&self, token: &Token) -> String {
        if let Some(name) = self.lexicon.mapped_name(&token.text) {
            return name.to_string();
        }
        let stripped: String = token
            .text
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        title_case(&stripped)
    }

    /// The action phrase: the predicate lemma, or `be <complement>` for a
    /// copular root.
    fn derive_action(&self, sentence: &Sentence, p_idx: usize, predicate: &Token) -> String {
        if predicate.pos == Pos::Aux {
            if let Some((_, acomp)) = sentence.child_with_rel(p_idx, &[DepRel::AdjComplement]) {
                return format!("be {}", acomp.lemma);
            }
        }
        predicate.lemma.clone()
    }

    /// The event target: a direct object or attribute if present, but any
    /// later prepositional phrase on the predicate overrides it (children are
    /// walked in token order, so the last match wins).
    fn derive_target(&self, sentence: &Sentence, p_idx: usize) -> Option<String> {
        let mut target = None;
        for (child_idx, child) in sentence.children(p_idx) {
            match child.dep {
                DepRel::DirectObject | DepRel::Attribute => {
                    target = Some(child.text.clone());
                }
                DepRel::Preposition => {
                    if let Some((_, pobj)) =
                        sentence.child_with_rel(child_idx, &[DepRel::PrepObject])
                    {
                        target = Some(format!("{} {}", child.text, pobj.text));
                    }
                }
                _ => {}
            }
        }
        target
    }

    /// Attribute quoted dialogue, in strict preference order: the sentence's
    /// first speech event, then its first non-atmospheric-actor event, then a
    /// synthesized "speak" event for the remembered last actor (prepended, as
    /// the speech precedes whatever else the sentence describes).
    /// Unattributable dialogue is dropped.
    fn attach_dialogue(&self, dialogue: String, events: &mut Vec<Event>, memory: &ActorMemory) {
        if let Some(event) = events.iter_mut().find(|e| e.is_speech) {
            event.dialogue = Some(dialogue);
        } else if let Some(event) = events
            .iter_mut()
            .find(|e| !self.lexicon.is_atmospheric(&e.actor))
        {
            event.dialogue = Some(dialogue);
        } else if let Some(speaker) = memory.last_actor.clone() {
            let mut event = Event::new(speaker, "speak");
            event.is_speech = true;
            event.dialogue = Some(dialogue);
            events.insert(0, event);
        } else {
            debug!("dropping dialogue with no attributable speaker");
        }
    }

    async fn emotion_for(&self, text: &str, cache: &mut Option<String>) -> String {
        if let Some(emotion) = cache {
            return emotion.clone();
        }
        let emotion = match self.sentiment.classify(text).await {
            Ok(score) if score.confidence > CONFIDENCE_THRESHOLD => score.label.to_lowercase(),
            Ok(_) => "neutral".to_string(),
            Err(e) => {
                debug!("sentiment unavailable, defaulting to neutral: {e}");
                "neutral".to_string()
            }
        };
        *cache = Some(emotion.clone());
        emotion
    }
}

/// Uppercase the first letter, lowercase the rest.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
