//! Scene mood scoring against the NRC lexicon.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::personality::nrc::NrcLexicon;

const POSITIVE: &[&str] = &["joy", "trust"];
const NEGATIVE: &[&str] = &["anger", "fear", "sadness", "disgust"];
const HIGH_AROUSAL: &[&str] = &["anger", "fear"];
const LOW_AROUSAL: &[&str] = &["sadness"];

/// Scene mood: valence in `[-1, 1]`, arousal in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub valence: f32,
    pub arousal: f32,
}

impl Mood {
    /// The fallback when a scene has no emotion-bearing words at all.
    pub const NEUTRAL: Mood = Mood {
        valence: 0.0,
        arousal: 0.3,
    };
}

/// Score one scene's mood from NRC emotion-word counts.
///
/// Valence is the signed share of positive vs negative associations; arousal
/// starts at the neutral baseline and shifts up for anger/fear words and down
/// for sadness words, capped at 1. Both rounded to 2 decimals.
pub fn infer_scene_mood(text: &str, lexicon: &NrcLexicon) -> Mood {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let lowered = text.to_lowercase();
    for word in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if let Some(emotions) = lexicon.emotions(word) {
            for emotion in emotions {
                *counts.entry(match_known(emotion)).or_insert(0) += 1;
            }
        }
    }

    if counts.is_empty() {
        return Mood::NEUTRAL;
    }

    let sum = |set: &[&str]| -> f32 {
        set.iter()
            .map(|e| counts.get(e).copied().unwrap_or(0) as f32)
            .sum()
    };

    let pos = sum(POSITIVE);
    let neg = sum(NEGATIVE);
    let valence = (pos - neg) / (pos + neg).max(1.0);

    let high = sum(HIGH_AROUSAL);
    let low = sum(LOW_AROUSAL);
    let arousal = (0.3 + 0.4 * high - 0.2 * low).min(1.0);

    Mood {
        valence: round2(valence),
        arousal: round2(arousal),
    }
}

/// Intern an emotion name onto the static sets where possible, so counting
/// keys borrow instead of allocate.
fn match_known(emotion: &str) -> &'static str {
    for set in [POSITIVE, NEGATIVE, HIGH_AROUSAL, LOW_AROUSAL] {
        if let Some(&known) = set.iter().find(|&&e| e == emotion) {
            return known;
        }
    }
    ""
}

fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lexicon() -> NrcLexicon {
        NrcLexicon::from_str_contents(
            "storm\tfear\t1\n\
             storm\tanger\t1\n\
             grave\tsadness\t1\n\
             cheer\tjoy\t1\n\
             friend\ttrust\t1\n",
        )
    }

    #[test]
    fn test_neutral_fallback() {
        let mood = infer_scene_mood("the bridge was wooden", &lexicon());
        assert_eq!(mood, Mood::NEUTRAL);
    }

    #[test]
    fn test_positive_scene() {
        let mood = infer_scene_mood("A cheer went up among friend and friend.", &lexicon());
        assert_eq!(mood.valence, 1.0);
        assert_eq!(mood.arousal, 0.3);
    }

    #[test]
    fn test_negative_high_arousal_scene() {
        // "storm" counts for fear and anger: valence -1, arousal 0.3 + 0.4*2
        let mood = infer_scene_mood("The storm broke.", &lexicon());
        assert_eq!(mood.valence, -1.0);
        assert_eq!(mood.arousal, 1.0);
    }

    #[test]
    fn test_sadness_lowers_arousal() {
        let mood = infer_scene_mood("A grave silence.", &lexicon());
        assert_eq!(mood.valence, -1.0);
        assert_eq!(mood.arousal, 0.1);
    }

    #[test]
    fn test_mixed_valence_is_a_ratio() {
        // one positive (cheer/joy), one negative (grave/sadness)
        let mood = infer_scene_mood("A cheer at the grave.", &lexicon());
        assert_eq!(mood.valence, 0.0);
    }
}
