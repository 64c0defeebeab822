//! Quoted-dialogue scanning.
//!
//! Finds quoted speech inside a sentence. Both straight (`"…"`) and curly
//! (`“…”`) quote pairs are recognized, in any mix; when several quoted spans
//! occur in one sentence the longest capture wins (ties go to the first).

fn is_opening_quote(c: char) -> bool {
    c == '"' || c == '“'
}

fn is_closing_quote(c: char) -> bool {
    c == '"' || c == '”'
}

/// Extract the dialogue content of a sentence, if any.
///
/// Scans left to right, pairing each opening quote with the nearest closing
/// quote after it (shortest match, non-overlapping). Trailing commas and
/// whitespace are trimmed from the capture — the quote-internal comma of
/// `"Steady," he said.` is a punctuation convention, not speech. Terminal
/// `.`, `?` and `!` are kept; they are part of what was said.
pub fn extract_dialogue(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut captures: Vec<String> = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        if is_opening_quote(chars[i]) {
            if let Some(close) = (i + 1..chars.len()).find(|&j| is_closing_quote(chars[j])) {
                captures.push(chars[i + 1..close].iter().collect());
                i = close + 1;
                continue;
            }
        }
        i += 1;
    }

    captures
        .into_iter()
        .max_by_key(|c| c.chars().count())
        .map(|c| c.trim_end_matches([',', ' ']).to_string())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_straight_quotes() {
        assert_eq!(
            extract_dialogue("\"Is the money ready?\" he asked."),
            Some("Is the money ready?".to_string())
        );
    }

    #[test]
    fn test_curly_quotes() {
        assert_eq!(
            extract_dialogue("“Steady,” a voice called."),
            Some("Steady".to_string())
        );
    }

    #[test]
    fn test_mixed_quote_styles() {
        assert_eq!(
            extract_dialogue("“Run!\" she shouted."),
            Some("Run!".to_string())
        );
    }

    #[test]
    fn test_trailing_comma_trimmed() {
        assert_eq!(
            extract_dialogue("\"Steady,\" he said."),
            Some("Steady".to_string())
        );
    }

    #[test]
    fn test_terminal_question_mark_kept() {
        assert_eq!(
            extract_dialogue("\"Ready?\""),
            Some("Ready?".to_string())
        );
    }

    #[test]
    fn test_longest_capture_wins() {
        assert_eq!(
            extract_dialogue("\"No,\" he said. \"Not until the moon rises.\""),
            Some("Not until the moon rises.".to_string())
        );
    }

    #[test]
    fn test_no_quotes() {
        assert_eq!(extract_dialogue("Silas drew his sword."), None);
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(extract_dialogue("\"Half a thought"), None);
    }

    #[test]
    fn test_empty_quotes() {
        assert_eq!(extract_dialogue("He said \"\" and left."), None);
    }
}
