//! Syntactic parser service.
//!
//! The real dependency parser is an external collaborator; this module
//! defines its contract ([`ParserService`]) and ships [`HeuristicParser`],
//! the always-available lower-accuracy tier: a rule- and lexicon-based
//! tagger that targets exactly the simple declarative and quoted-dialogue
//! patterns the extractor is specified for. Outside those patterns it makes
//! no correctness promises — predicates without a recoverable subject are
//! simply skipped downstream, so mis-parses degrade recall, not safety.
//!
//! Proper-noun detection doubles as a pattern-based person guess
//! (capitalized token, not a known function/content word), which stands in
//! for the external named-entity tagger at this tier.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::models::{DepRel, EntityKind, Pos, Sentence, Token};
use crate::narrative::lexicon::Lexicon;
use crate::FabulaError;

/// Service trait for the syntactic/dependency parser collaborator.
#[async_trait]
pub trait ParserService: Send + Sync {
    /// Split text into sentences and analyze each one.
    async fn parse(&self, text: &str) -> Result<Vec<Sentence>, FabulaError>;

    /// Human-readable backend name, for startup logging.
    fn name(&self) -> &'static str;
}

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "another", "both", "either", "neither", "one",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "with", "from", "into", "onto", "to", "under", "over", "toward",
    "towards", "through", "across", "behind", "near", "beside", "above", "below", "along",
    "around", "upon", "against", "between", "beyond", "within", "without", "during", "before",
    "after", "like",
];

const BE_FORMS: &[&str] = &["is", "was", "are", "were", "am", "be", "been", "being"];

const OTHER_AUX: &[&str] = &[
    "seem", "seems", "seemed", "will", "would", "can", "could", "should", "may", "might", "must",
    "shall", "do", "does", "did", "have", "has", "had",
];

const PERSONAL_PRONOUNS: &[&str] = &[
    "he", "she", "it", "they", "you", "we", "i", "him", "her", "them", "me", "us", "who", "whom",
    "himself", "herself", "itself", "themselves", "myself", "yourself", "ourselves",
];

const POSSESSIVE_PRONOUNS: &[&str] = &["his", "its", "their", "my", "your", "our", "her"];

const FILLER_WORDS: &[&str] = &[
    "and", "but", "or", "nor", "so", "yet", "if", "then", "than", "as", "because", "while",
    "when", "where", "not", "even", "just", "still", "also", "too", "very", "there", "here",
    "now", "however", "meanwhile", "nearby", "soon", "later", "once", "out", "up", "down",
    "off", "away", "back", "overhead",
];

const ADJECTIVES: &[&str] = &[
    "happy", "sad", "angry", "ready", "old", "young", "ancient", "grumpy", "silent", "quiet",
    "loud", "dark", "bright", "narrow", "wide", "tall", "short", "small", "large", "hidden",
    "strange", "gnarled", "mossy", "wooden", "stray", "sharp", "steady", "impatient",
    "indifferent", "afraid", "calm", "cold", "warm", "hot", "empty", "full", "heavy", "dead",
    "alive", "free", "safe", "dangerous", "tired", "weary", "pale", "thin", "thick", "strong",
    "weak", "wild", "gentle", "cruel", "kind", "proud", "humble", "rich", "poor", "clever",
    "foolish", "brave", "true", "wrong", "certain", "sure", "glad", "sorry", "alone", "perfect",
    "rising", "local",
];

/// Irregular past/participle forms mapped to their lemma.
const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("said", "say"),
    ("drew", "draw"),
    ("stood", "stand"),
    ("sat", "sit"),
    ("ran", "run"),
    ("took", "take"),
    ("told", "tell"),
    ("held", "hold"),
    ("knew", "know"),
    ("thought", "think"),
    ("spoke", "speak"),
    ("threw", "throw"),
    ("saw", "see"),
    ("came", "come"),
    ("went", "go"),
    ("got", "get"),
    ("gave", "give"),
    ("made", "make"),
    ("found", "find"),
    ("left", "leave"),
    ("felt", "feel"),
    ("kept", "keep"),
    ("began", "begin"),
    ("brought", "bring"),
    ("rose", "rise"),
    ("fell", "fall"),
    ("flew", "fly"),
    ("broke", "break"),
    ("caught", "catch"),
    ("fought", "fight"),
    ("heard", "hear"),
    ("led", "lead"),
    ("met", "meet"),
    ("paid", "pay"),
    ("rode", "ride"),
    ("sang", "sing"),
    ("slept", "sleep"),
    ("swam", "swim"),
    ("woke", "wake"),
    ("won", "win"),
    ("wrote", "write"),
    ("bit", "bite"),
    ("blew", "blow"),
    ("chose", "choose"),
    ("crept", "creep"),
    ("drank", "drink"),
    ("drove", "drive"),
    ("ate", "eat"),
    ("froze", "freeze"),
    ("grew", "grow"),
    ("hid", "hide"),
    ("hung", "hang"),
    ("lay", "lie"),
    ("lost", "lose"),
    ("meant", "mean"),
    ("sent", "send"),
    ("shook", "shake"),
    ("shot", "shoot"),
    ("sprang", "spring"),
    ("stole", "steal"),
    ("struck", "strike"),
    ("swept", "sweep"),
    ("swung", "swing"),
    ("taught", "teach"),
    ("tore", "tear"),
    ("understood", "understand"),
    ("wore", "wear"),
];

/// Verb lemmas recognized beyond the extraction lexicon's speech/human sets.
const EXTRA_VERBS: &[&str] = &[
    "point", "wait", "nod", "turn", "open", "close", "move", "push", "pull", "step", "climb",
    "jump", "watch", "follow", "lean", "obey", "circle", "wink", "shift", "dash", "ignore",
    "roar", "howl", "crawl", "snort", "chuckle", "soak", "draw", "live", "die", "fight", "stay",
    "remain", "rest", "pause", "breathe", "listen", "glance", "frown", "grin", "gasp", "sigh",
    "tremble", "shiver", "stumble", "rush", "hurry", "race", "chase", "hunt", "search", "find",
    "carry", "bring", "drop", "lift", "raise", "lower", "place", "touch", "feel", "press",
    "squeeze", "strike", "hit", "block", "dodge", "hide", "escape", "flee", "return", "arrive",
    "enter", "leave", "depart", "approach", "retreat", "charge", "halt", "kneel", "bow", "rise",
    "fall", "land", "fly", "soar", "dive", "swim", "float", "drift", "wave", "shake", "bend",
    "twist", "spin", "slide", "slip", "trip", "crash", "burst", "shatter", "crack", "break",
    "cut", "grip", "clutch", "release", "toss", "fling", "hurl", "catch", "snatch", "seize",
    "drag", "shove", "nudge", "tap", "pat", "stroke", "brush", "wipe", "pour", "spill", "drink",
    "eat", "bite", "chew", "taste", "smell", "sniff", "cough", "yawn", "sleep", "dream", "wake",
    "remember", "forget", "realize", "understand", "believe", "doubt", "wonder", "imagine",
    "notice", "observe", "examine", "study", "consider", "plan", "prepare", "begin", "start",
    "continue", "finish", "end", "stop", "try", "attempt", "manage", "fail", "succeed", "win",
    "lose", "give", "offer", "accept", "refuse", "deny", "admit", "promise", "threaten", "beg",
    "plead", "pray", "thank", "greet", "see", "hear", "say", "go", "come", "get", "make",
    "scream", "want", "need", "love", "hate", "fear",
];

/// Rule- and lexicon-based parser: the always-available fallback tier.
pub struct HeuristicParser {
    determiners: HashSet<&'static str>,
    prepositions: HashSet<&'static str>,
    be_forms: HashSet<&'static str>,
    other_aux: HashSet<&'static str>,
    pronouns: HashSet<&'static str>,
    possessives: HashSet<&'static str>,
    fillers: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    irregular_verbs: HashMap<&'static str, &'static str>,
    verb_lemmas: HashSet<String>,
}

impl Default for HeuristicParser {
    fn default() -> Self {
        let mut verb_lemmas: HashSet<String> =
            EXTRA_VERBS.iter().map(|v| v.to_string()).collect();
        let lexicon = Lexicon::default();
        verb_lemmas.extend(lexicon.speech_verbs.iter().cloned());
        verb_lemmas.extend(lexicon.human_verbs.iter().cloned());

        Self {
            determiners: DETERMINERS.iter().copied().collect(),
            prepositions: PREPOSITIONS.iter().copied().collect(),
            be_forms: BE_FORMS.iter().copied().collect(),
            other_aux: OTHER_AUX.iter().copied().collect(),
            pronouns: PERSONAL_PRONOUNS.iter().copied().collect(),
            possessives: POSSESSIVE_PRONOUNS.iter().copied().collect(),
            fillers: FILLER_WORDS.iter().copied().collect(),
            adjectives: ADJECTIVES.iter().copied().collect(),
            irregular_verbs: IRREGULAR_VERBS.iter().copied().collect(),
            verb_lemmas,
        }
    }
}

impl HeuristicParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parser whose verb recognition includes a configured lexicon's
    /// speech and human verb tables.
    pub fn with_lexicon(lexicon: &Lexicon) -> Self {
        let mut parser = Self::default();
        parser.verb_lemmas.extend(lexicon.speech_verbs.iter().cloned());
        parser.verb_lemmas.extend(lexicon.human_verbs.iter().cloned());
        parser
    }

    /// Split text into sentences at terminal punctuation outside quotes.
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();
        let mut in_quote = false;

        for c in text.chars() {
            match c {
                '"' => in_quote = !in_quote,
                '“' => in_quote = true,
                '”' => in_quote = false,
                _ => {}
            }
            current.push(c);
            if matches!(c, '.' | '!' | '?') && !in_quote {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
            }
        }
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
        sentences
    }

    /// Split a sentence into word and punctuation tokens.
    ///
    /// Apostrophes stay word-internal ("don't") except for a trailing
    /// possessive `'s`, which becomes its own token.
    fn tokenize(&self, sentence: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut word = String::new();

        let flush = |word: &mut String, tokens: &mut Vec<String>| {
            if word.is_empty() {
                return;
            }
            for suffix in ["'s", "’s"] {
                if word.len() > suffix.len() && word.ends_with(suffix) {
                    let stem = word[..word.len() - suffix.len()].to_string();
                    tokens.push(stem);
                    tokens.push("'s".to_string());
                    word.clear();
                    return;
                }
            }
            tokens.push(std::mem::take(word));
        };

        for c in sentence.chars() {
            if c.is_alphanumeric() || c == '\'' || c == '’' || c == '-' {
                word.push(c);
            } else {
                flush(&mut word, &mut tokens);
                if !c.is_whitespace() {
                    tokens.push(c.to_string());
                }
            }
        }
        flush(&mut word, &mut tokens);
        tokens
    }

    /// Look up a verb lemma for a surface form, if it is plausibly a verb.
    fn verb_lemma(&self, lower: &str) -> Option<String> {
        if let Some(&lemma) = self.irregular_verbs.get(lower) {
            return Some(lemma.to_string());
        }
        if self.verb_lemmas.contains(lower) {
            return Some(lower.to_string());
        }

        let try_stem = |stem: &str| -> Option<String> {
            if self.verb_lemmas.contains(stem) {
                return Some(stem.to_string());
            }
            // e-drop: "moved" -> "move", "circling" -> "circle"
            let with_e = format!("{stem}e");
            if self.verb_lemmas.contains(&with_e) {
                return Some(with_e);
            }
            // doubled final consonant: "grabbed" -> "grab"
            let chars: Vec<char> = stem.chars().collect();
            if chars.len() >= 2 && chars[chars.len() - 1] == chars[chars.len() - 2] {
                let undoubled: String = chars[..chars.len() - 1].iter().collect();
                if self.verb_lemmas.contains(&undoubled) {
                    return Some(undoubled);
                }
            }
            None
        };

        for suffix in ["ed", "ing", "es", "s"] {
            if let Some(stem) = lower.strip_suffix(suffix) {
                if stem.len() >= 2 {
                    if let Some(lemma) = try_stem(stem) {
                        return Some(lemma);
                    }
                }
            }
        }

        // Generic past-tense guess for verbs outside the lemma tables
        if let Some(stem) = lower.strip_suffix("ed") {
            if stem.len() >= 3 {
                return Some(stem.to_string());
            }
        }
        None
    }

    /// Strip a plural suffix from a common-noun surface form.
    fn noun_lemma(&self, lower: &str) -> String {
        if let Some(stem) = lower.strip_suffix("ies") {
            if stem.len() >= 2 {
                return format!("{stem}y");
            }
        }
        if lower.ends_with("ss") {
            return lower.to_string();
        }
        for suffix in ["ches", "shes", "xes", "sses", "zes"] {
            if let Some(stem) = lower.strip_suffix(suffix) {
                let kept = &lower[..stem.len() + suffix.len() - 2];
                return kept.to_string();
            }
        }
        if let Some(stem) = lower.strip_suffix('s') {
            if stem.len() >= 2 {
                return stem.to_string();
            }
        }
        lower.to_string()
    }

    fn is_punct(&self, token: &str) -> bool {
        !token.chars().any(|c| c.is_alphanumeric())
    }

    /// Assign part-of-speech tags, lemmas and entity guesses.
    fn tag(&self, words: &[String]) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::with_capacity(words.len());
        let mut prev_word_pos: Option<Pos> = None;
        let mut prev_word_possessive = false;
        let mut word_index = 0usize;

        for text in words {
            let lower = text.to_lowercase();
            let capitalized = text.chars().next().is_some_and(|c| c.is_uppercase());

            let (pos, lemma, entity) = if self.is_punct(text) {
                (Pos::Punct, lower.clone(), None)
            } else if lower == "'s" {
                // Possessive clitic, split off by the tokenizer
                (Pos::Other, lower.clone(), None)
            } else if self.determiners.contains(lower.as_str()) {
                (Pos::Determiner, lower.clone(), None)
            } else if self.prepositions.contains(lower.as_str()) {
                (Pos::Adposition, lower.clone(), None)
            } else if self.be_forms.contains(lower.as_str()) {
                (Pos::Aux, "be".to_string(), None)
            } else if self.other_aux.contains(lower.as_str()) {
                (Pos::Aux, lower.clone(), None)
            } else if self.possessives.contains(lower.as_str())
                || self.pronouns.contains(lower.as_str())
            {
                (Pos::Pronoun, lower.clone(), None)
            } else if self.fillers.contains(lower.as_str()) {
                (Pos::Other, lower.clone(), None)
            } else if lower.len() > 3 && lower.ends_with("ly") {
                (Pos::Adverb, lower.clone(), None)
            } else if self.adjectives.contains(lower.as_str()) {
                (Pos::Adjective, lower.clone(), None)
            } else if word_index == 0 && capitalized {
                // Sentence-initially, a known verb beats the proper-noun guess
                match self.verb_lemma(&lower) {
                    Some(lemma) => (Pos::Verb, lemma, None),
                    None => (Pos::ProperNoun, lower.clone(), Some(EntityKind::Person)),
                }
            } else if capitalized {
                (Pos::ProperNoun, lower.clone(), Some(EntityKind::Person))
            } else {
                // A determiner, possessive or preposition in front of the word
                // forces a nominal reading ("the point", "his draw")
                let nominal_context = prev_word_pos == Some(Pos::Determiner)
                    || prev_word_pos == Some(Pos::Adposition)
                    || prev_word_possessive;
                match self.verb_lemma(&lower) {
                    Some(lemma) if !nominal_context => (Pos::Verb, lemma, None),
                    None if prev_word_pos == Some(Pos::Aux) => {
                        // Unknown word right after a copula: acomp guess
                        (Pos::Adjective, lower.clone(), None)
                    }
                    _ => (Pos::Noun, self.noun_lemma(&lower), None),
                }
            };

            if pos != Pos::Punct {
                prev_word_possessive =
                    pos == Pos::Pronoun && self.possessives.contains(lower.as_str());
                prev_word_pos = Some(pos);
                word_index += 1;
            }

            tokens.push(Token {
                text: text.clone(),
                lemma,
                pos,
                entity,
                dep: DepRel::Other,
                head: 0,
            });
        }
        tokens
    }

    /// Assign dependency edges over tagged tokens.
    fn attach(&self, tokens: &mut [Token]) {
        let n = tokens.len();
        let predicates: Vec<usize> = (0..n)
            .filter(|&i| matches!(tokens[i].pos, Pos::Verb | Pos::Aux))
            .collect();

        let root = predicates
            .iter()
            .copied()
            .find(|&i| tokens[i].pos == Pos::Verb)
            .or_else(|| predicates.first().copied())
            .unwrap_or(0);

        for t in tokens.iter_mut() {
            t.head = root;
        }
        tokens[root].dep = DepRel::Root;
        tokens[root].head = root;

        self.attach_possessives(tokens);

        for (k, &p) in predicates.iter().enumerate() {
            let clause_end = predicates.get(k + 1).copied().unwrap_or(n);
            self.attach_subject(tokens, p);
            self.attach_objects(tokens, p, clause_end);
        }
    }

    fn attach_possessives(&self, tokens: &mut [Token]) {
        let n = tokens.len();
        for i in 0..n {
            let lower = tokens[i].text.to_lowercase();
            let is_poss_pronoun =
                tokens[i].pos == Pos::Pronoun && self.possessives.contains(lower.as_str());
            // Post-coreference possessive: a name directly before a common noun
            // ("Moneesh hand pointed...")
            let is_name_compound = tokens[i].pos == Pos::ProperNoun
                && tokens.get(i + 1).is_some_and(|t| t.pos == Pos::Noun);

            if is_poss_pronoun || is_name_compound {
                // Head is the next noun within a short window (one adjective may intervene)
                for j in i + 1..(i + 3).min(n) {
                    match tokens[j].pos {
                        Pos::Noun | Pos::ProperNoun => {
                            tokens[i].dep = DepRel::Possessive;
                            tokens[i].head = j;
                            break;
                        }
                        Pos::Adjective | Pos::Adverb => continue,
                        _ => break,
                    }
                }
            } else if tokens[i].text == "'s" && i > 0 && is_clitic_owner_at(tokens, i - 1) {
                for j in i + 1..(i + 3).min(n) {
                    match tokens[j].pos {
                        Pos::Noun | Pos::ProperNoun => {
                            tokens[i - 1].dep = DepRel::Possessive;
                            tokens[i - 1].head = j;
                            break;
                        }
                        Pos::Adjective | Pos::Adverb => continue,
                        _ => break,
                    }
                }
            }
        }
    }

    fn attach_subject(&self, tokens: &mut [Token], p: usize) {
        let mut j = p;
        while j > 0 {
            j -= 1;
            match tokens[j].pos {
                Pos::Verb | Pos::Aux => return,
                Pos::Punct => {
                    // A comma or quote between candidate and predicate breaks
                    // the subject relation; the extractor's orphan-dialogue
                    // fallback covers what this loses.
                    if matches!(tokens[j].text.as_str(), "," | ";" | ":" | "\"" | "“" | "”") {
                        return;
                    }
                }
                Pos::Noun | Pos::ProperNoun | Pos::Pronoun => {
                    if tokens[j].dep == DepRel::Other {
                        tokens[j].dep = DepRel::Subject;
                        tokens[j].head = p;
                        return;
                    }
                    if tokens[j].dep != DepRel::Possessive {
                        // Already claimed by an earlier predicate
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn attach_objects(&self, tokens: &mut [Token], p: usize, clause_end: usize) {
        let mut current_prep: Option<usize> = None;
        let mut prep_filled = false;
        let mut saw_direct_object = false;
        let mut saw_prep = false;
        let mut last_object: Option<usize> = None;

        for j in p + 1..clause_end {
            match tokens[j].pos {
                Pos::Punct => {
                    if matches!(tokens[j].text.as_str(), "," | ";" | ":" | "\"" | "“" | "”") {
                        return;
                    }
                }
                Pos::Adposition => {
                    if !saw_prep {
                        // First preposition hangs off the predicate
                        tokens[j].dep = DepRel::Preposition;
                        tokens[j].head = p;
                        current_prep = Some(j);
                        prep_filled = false;
                        saw_prep = true;
                    } else if let Some(obj) = last_object {
                        // Later prepositions modify the previous object, not
                        // the predicate ("the center of the bridge")
                        tokens[j].dep = DepRel::Preposition;
                        tokens[j].head = obj;
                        current_prep = Some(j);
                        prep_filled = false;
                    } else {
                        current_prep = None;
                    }
                }
                Pos::Noun | Pos::ProperNoun | Pos::Pronoun => {
                    if tokens[j].dep != DepRel::Other {
                        continue;
                    }
                    if let Some(prep) = current_prep {
                        if !prep_filled {
                            tokens[j].dep = DepRel::PrepObject;
                            tokens[j].head = prep;
                            prep_filled = true;
                            last_object = Some(j);
                        }
                    } else if !saw_direct_object && !saw_prep {
                        tokens[j].dep = DepRel::DirectObject;
                        tokens[j].head = p;
                        saw_direct_object = true;
                        last_object = Some(j);
                    }
                }
                Pos::Adjective => {
                    if tokens[p].pos == Pos::Aux && tokens[j].dep == DepRel::Other {
                        tokens[j].dep = DepRel::AdjComplement;
                        tokens[j].head = p;
                    }
                }
                _ => {}
            }
        }
    }

    fn parse_sentence(&self, text: &str) -> Sentence {
        let words = self.tokenize(text);
        let mut tokens = self.tag(&words);
        if !tokens.is_empty() {
            self.attach(&mut tokens);
        }
        Sentence {
            text: text.to_string(),
            tokens,
        }
    }
}

fn is_clitic_owner_at(tokens: &[Token], i: usize) -> bool {
    matches!(tokens[i].pos, Pos::Noun | Pos::ProperNoun)
}

#[async_trait]
impl ParserService for HeuristicParser {
    async fn parse(&self, text: &str) -> Result<Vec<Sentence>, FabulaError> {
        Ok(self
            .split_sentences(text)
            .iter()
            .map(|s| self.parse_sentence(s))
            .collect())
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_one(text: &str) -> Sentence {
        HeuristicParser::new().parse_sentence(text)
    }

    fn find<'a>(sent: &'a Sentence, text: &str) -> (usize, &'a Token) {
        sent.tokens
            .iter()
            .enumerate()
            .find(|(_, t)| t.text == text)
            .unwrap_or_else(|| panic!("token '{text}' not found"))
    }

    #[test]
    fn test_simple_declarative() {
        let sent = parse_one("Silas drew his sword.");

        let (verb_idx, verb) = find(&sent, "drew");
        assert_eq!(verb.pos, Pos::Verb);
        assert_eq!(verb.lemma, "draw");
        assert_eq!(verb.dep, DepRel::Root);

        let (_, subj) = find(&sent, "Silas");
        assert_eq!(subj.pos, Pos::ProperNoun);
        assert_eq!(subj.dep, DepRel::Subject);
        assert_eq!(subj.head, verb_idx);
        assert_eq!(subj.entity, Some(EntityKind::Person));

        let (sword_idx, obj) = find(&sent, "sword");
        assert_eq!(obj.dep, DepRel::DirectObject);
        assert_eq!(obj.head, verb_idx);

        let (_, poss) = find(&sent, "his");
        assert_eq!(poss.dep, DepRel::Possessive);
        assert_eq!(poss.head, sword_idx);
    }

    #[test]
    fn test_prepositional_target() {
        let sent = parse_one("The cat pointed toward the bridge.");

        let (verb_idx, verb) = find(&sent, "pointed");
        assert_eq!(verb.lemma, "point");

        let (prep_idx, prep) = find(&sent, "toward");
        assert_eq!(prep.dep, DepRel::Preposition);
        assert_eq!(prep.head, verb_idx);

        let (_, pobj) = find(&sent, "bridge");
        assert_eq!(pobj.dep, DepRel::PrepObject);
        assert_eq!(pobj.head, prep_idx);
    }

    #[test]
    fn test_nested_preposition_stays_off_predicate() {
        let sent = parse_one("The cat pointed toward the center of the bridge.");

        let (center_idx, center) = find(&sent, "center");
        assert_eq!(center.dep, DepRel::PrepObject);

        // "of" modifies "center", not the verb, so the extractor keeps
        // "toward center" as the target
        let (_, of) = find(&sent, "of");
        assert_eq!(of.dep, DepRel::Preposition);
        assert_eq!(of.head, center_idx);
    }

    #[test]
    fn test_copular_adjective_complement() {
        let sent = parse_one("Silas was happy.");

        let (aux_idx, aux) = find(&sent, "was");
        assert_eq!(aux.pos, Pos::Aux);
        assert_eq!(aux.lemma, "be");
        assert_eq!(aux.dep, DepRel::Root);

        let (_, acomp) = find(&sent, "happy");
        assert_eq!(acomp.dep, DepRel::AdjComplement);
        assert_eq!(acomp.head, aux_idx);
    }

    #[test]
    fn test_name_before_noun_is_possessive() {
        // Coreference rewrites "His hand" into "Moneesh hand"
        let sent = parse_one("Moneesh hand pointed toward the bridge.");

        let (hand_idx, hand) = find(&sent, "hand");
        assert_eq!(hand.dep, DepRel::Subject);

        let (_, owner) = find(&sent, "Moneesh");
        assert_eq!(owner.dep, DepRel::Possessive);
        assert_eq!(owner.head, hand_idx);
    }

    #[test]
    fn test_clitic_possessive() {
        let sent = parse_one("Moneesh's hand trembled.");
        let (hand_idx, hand) = find(&sent, "hand");
        assert_eq!(hand.dep, DepRel::Subject);
        let (_, owner) = find(&sent, "Moneesh");
        assert_eq!(owner.dep, DepRel::Possessive);
        assert_eq!(owner.head, hand_idx);
    }

    #[test]
    fn test_dialogue_sentence_keeps_trailing_speaker() {
        let sent = parse_one("\"Steady,\" Silas said.");

        let (verb_idx, verb) = find(&sent, "said");
        assert_eq!(verb.lemma, "say");

        let (_, subj) = find(&sent, "Silas");
        assert_eq!(subj.dep, DepRel::Subject);
        assert_eq!(subj.head, verb_idx);
    }

    #[test]
    fn test_subject_search_stops_at_comma() {
        // "overhead" must not become the subject of "screaming"
        let sent = parse_one("A vulture circled overhead, screaming a command.");
        let (_, vulture) = find(&sent, "vulture");
        assert_eq!(vulture.dep, DepRel::Subject);

        let (scream_idx, _) = find(&sent, "screaming");
        assert!(sent
            .child_with_rel(scream_idx, &[DepRel::Subject, DepRel::PassiveSubject])
            .is_none());
    }

    #[test]
    fn test_sentence_split_ignores_quoted_terminators() {
        let parser = HeuristicParser::new();
        let sentences =
            parser.split_sentences("Silas drew his sword. \"Is it ready?\" he asked. The end.");
        assert_eq!(
            sentences,
            vec![
                "Silas drew his sword.",
                "\"Is it ready?\" he asked.",
                "The end.",
            ]
        );
    }

    #[test]
    fn test_verb_morphology() {
        let parser = HeuristicParser::new();
        assert_eq!(parser.verb_lemma("said"), Some("say".to_string()));
        assert_eq!(parser.verb_lemma("pointed"), Some("point".to_string()));
        assert_eq!(parser.verb_lemma("grabbed"), Some("grab".to_string()));
        assert_eq!(parser.verb_lemma("smiled"), Some("smile".to_string()));
        assert_eq!(parser.verb_lemma("running"), Some("run".to_string()));
        assert_eq!(parser.verb_lemma("hisses"), Some("hiss".to_string()));
        assert_eq!(parser.verb_lemma("sword"), None);
        assert_eq!(parser.verb_lemma("mist"), None);
    }

    #[test]
    fn test_noun_singularization() {
        let parser = HeuristicParser::new();
        assert_eq!(parser.noun_lemma("eyes"), "eye");
        assert_eq!(parser.noun_lemma("travelers"), "traveler");
        assert_eq!(parser.noun_lemma("grass"), "grass");
        assert_eq!(parser.noun_lemma("torches"), "torch");
        assert_eq!(parser.noun_lemma("stories"), "story");
        assert_eq!(parser.noun_lemma("mist"), "mist");
    }

    #[tokio::test]
    async fn test_parse_splits_and_tags() {
        let parser = HeuristicParser::new();
        let sentences = parser
            .parse("Silas drew his sword. The wind obeyed.")
            .await
            .expect("parse");
        assert_eq!(sentences.len(), 2);
        let (_, wind) = sentences[1]
            .tokens
            .iter()
            .enumerate()
            .find(|(_, t)| t.text == "wind")
            .expect("wind token");
        assert_eq!(wind.dep, DepRel::Subject);
    }
}
