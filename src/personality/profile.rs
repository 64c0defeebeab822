//! Stable character personality from surface dialogue style.

use serde::{Deserialize, Serialize};

/// 4-axis personality estimate, each axis in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub dominance: f32,
    pub extraversion: f32,
    pub agreeableness: f32,
    pub age_factor: f32,
}

const DOMINANT_WORDS: &[&str] = &["must", "now", "never", "listen"];
const POLITE_WORDS: &[&str] = &["please", "sorry", "thank"];
const YOUNG_WORDS: &[&str] = &["son", "child", "kid"];
const OLD_WORDS: &[&str] = &["old", "father", "sir"];

/// Infer a personality profile from a character's text.
///
/// Keyword and length heuristics: commands raise dominance, verbosity and
/// exclamations raise extraversion, polite words raise agreeableness, and
/// address terms shift the age factor. Each axis is clamped to 1 and rounded
/// to 2 decimals.
pub fn infer_personality(text: &str) -> Personality {
    let lower = text.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    let length = text.split_whitespace().count() as f32;

    let mut dominance: f32 = 0.5;
    if contains_any(DOMINANT_WORDS) {
        dominance += 0.2;
    }

    let exclamations = text.matches('!').count() as f32;
    let extraversion = (length / 20.0).min(1.0) + (exclamations * 0.1).min(0.2);

    let mut agreeableness: f32 = 0.5;
    if contains_any(POLITE_WORDS) {
        agreeableness += 0.3;
    }

    let mut age_factor: f32 = 0.5;
    if contains_any(YOUNG_WORDS) {
        age_factor = 0.2;
    }
    if contains_any(OLD_WORDS) {
        age_factor = 0.8;
    }

    Personality {
        dominance: round2(dominance.min(1.0)),
        extraversion: round2(extraversion.min(1.0)),
        agreeableness: round2(agreeableness.min(1.0)),
        age_factor: round2(age_factor.min(1.0)),
    }
}

fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_baseline() {
        let p = infer_personality("A quiet remark.");
        assert_eq!(p.dominance, 0.5);
        assert_eq!(p.agreeableness, 0.5);
        assert_eq!(p.age_factor, 0.5);
        assert_eq!(p.extraversion, 0.15);
    }

    #[test]
    fn test_commands_raise_dominance() {
        let p = infer_personality("You must listen now.");
        assert_eq!(p.dominance, 0.7);
    }

    #[test]
    fn test_exclamations_raise_extraversion_capped() {
        let p = infer_personality("Go now! Go now! Go now! Go now!");
        // 8 words / 20 = 0.4, plus the exclamation bonus capped at 0.2
        assert_eq!(p.extraversion, 0.6);
    }

    #[test]
    fn test_polite_words_raise_agreeableness() {
        let p = infer_personality("Thank you, and sorry for the trouble.");
        assert_eq!(p.agreeableness, 0.8);
    }

    #[test]
    fn test_age_terms_old_wins_over_young() {
        assert_eq!(infer_personality("my child").age_factor, 0.2);
        assert_eq!(infer_personality("the old father").age_factor, 0.8);
        // both present: the old-term rule is applied last
        assert_eq!(infer_personality("old son").age_factor, 0.8);
    }

    #[test]
    fn test_long_text_extraversion_clamped() {
        let text = "word ".repeat(50);
        assert_eq!(infer_personality(&text).extraversion, 1.0);
    }
}
