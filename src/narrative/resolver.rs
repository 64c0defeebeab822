//! Mention-cluster resolution by span-offset surgery.
//!
//! Rewrites every non-primary mention in each cluster to the cluster's
//! primary mention text, so that later pipeline stages see stable referent
//! names ("he" → "Silas") instead of pronouns and partial names.
//!
//! This is the manual fallback path; when the coreference collaborator
//! advertises a native resolved-text capability the pipeline prefers that
//! (see [`CorefService`](crate::services::coref::CorefService)). The two must
//! be drop-in equivalent.

use crate::models::{MentionCluster, MentionSpan};
use crate::FabulaError;

/// One pending replacement: span plus the primary text to splice in.
struct Replacement {
    start: usize,
    end: usize,
    text: String,
}

/// Rewrite all non-primary mentions to their cluster's primary mention text.
///
/// Replacements are applied in **descending start-offset order**: mutating a
/// span never invalidates the stored offsets of spans not yet processed,
/// because those all live strictly to its left. This ordering is the core
/// correctness requirement of the whole procedure.
///
/// A replacement whose original slice equals the primary text
/// case-insensitively is skipped (no churn on exact name repeats).
///
/// # Errors
///
/// Returns [`FabulaError::ClusterOutOfBounds`] when a span exceeds the text
/// length or is inverted, and [`FabulaError::Validation`] when replacement
/// spans overlap each other. Both are contract violations by the upstream
/// model; clamping them would corrupt offsets invisibly.
pub fn resolve_clusters(text: &str, clusters: &[MentionCluster]) -> Result<String, FabulaError> {
    let chars: Vec<char> = text.chars().collect();

    let mut replacements = Vec::new();
    for cluster in clusters {
        let Some(primary) = cluster.primary() else {
            continue;
        };
        check_span(primary, chars.len())?;
        let primary_text: String = chars[primary.start..primary.end].iter().collect();

        for &span in cluster.referring() {
            check_span(span, chars.len())?;
            replacements.push(Replacement {
                start: span.start,
                end: span.end,
                text: primary_text.clone(),
            });
        }
    }

    // End-of-text toward the beginning.
    replacements.sort_by(|a, b| b.start.cmp(&a.start));

    let mut resolved = chars;
    // Start offset of the previously applied (rightmost processed) span; a
    // span reaching past it overlaps, and splicing it would shift the text
    // under offsets already consumed.
    let mut right_edge = resolved.len();
    for rep in replacements {
        if rep.end > right_edge {
            return Err(FabulaError::Validation(format!(
                "overlapping mention spans at [{}, {})",
                rep.start, rep.end
            )));
        }
        right_edge = rep.start;
        let original: String = resolved[rep.start..rep.end].iter().collect();
        if original.to_lowercase() == rep.text.to_lowercase() {
            continue;
        }
        resolved.splice(rep.start..rep.end, rep.text.chars());
    }

    Ok(resolved.into_iter().collect())
}

fn check_span(span: MentionSpan, len: usize) -> Result<(), FabulaError> {
    if span.end > len || span.start > span.end {
        return Err(FabulaError::ClusterOutOfBounds {
            start: span.start,
            end: span.end,
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cluster(spans: &[(usize, usize)]) -> MentionCluster {
        MentionCluster(spans.iter().map(|&(s, e)| MentionSpan::new(s, e)).collect())
    }

    #[test]
    fn test_empty_clusters_is_identity() {
        let text = "Silas drew his sword.";
        assert_eq!(resolve_clusters(text, &[]).unwrap(), text);
    }

    #[test]
    fn test_pronoun_replaced_with_primary() {
        //            0123456789012345678901234567890
        let text = "Silas stood there. He waited.";
        // "Silas" [0,5), "He" [19,21)
        let result = resolve_clusters(text, &[cluster(&[(0, 5), (19, 21)])]).unwrap();
        assert_eq!(result, "Silas stood there. Silas waited.");
    }

    #[test]
    fn test_multiple_replacements_right_to_left() {
        let text = "Silas saw her. He nodded. He left.";
        // "Silas" [0,5), "He" [15,17), "He" [26,28)
        let result = resolve_clusters(text, &[cluster(&[(0, 5), (15, 17), (26, 28)])]).unwrap();
        assert_eq!(result, "Silas saw her. Silas nodded. Silas left.");
    }

    #[test]
    fn test_case_insensitive_repeat_is_skipped() {
        let text = "Silas waited and then silas left.";
        // "silas" at [22,27) matches "Silas" case-insensitively: no replacement
        let result = resolve_clusters(text, &[cluster(&[(0, 5), (22, 27)])]).unwrap();
        assert_eq!(result, text);
    }

    #[test]
    fn test_single_span_cluster_is_noop() {
        let text = "The old woman laughed.";
        let result = resolve_clusters(text, &[cluster(&[(4, 13)])]).unwrap();
        assert_eq!(result, text);
    }

    #[test]
    fn test_adjacent_spans_do_not_interfere() {
        //          0123456789
        let text = "ab cd ef x y";
        // Two clusters with spans touching at a boundary
        let clusters = vec![cluster(&[(0, 2), (9, 10)]), cluster(&[(3, 5), (11, 12)])];
        let result = resolve_clusters(text, &clusters).unwrap();
        assert_eq!(result, "ab cd ef ab cd");
    }

    #[test]
    fn test_cluster_order_independence() {
        let text = "Silas met Mira. He bowed. She smiled.";
        // "Silas"[0,5)+"He"[16,18), "Mira"[10,14)+"She"[26,29)
        let a = cluster(&[(0, 5), (16, 18)]);
        let b = cluster(&[(10, 14), (26, 29)]);
        let forward = resolve_clusters(text, &[a.clone(), b.clone()]).unwrap();
        let reversed = resolve_clusters(text, &[b, a]).unwrap();
        assert_eq!(forward, reversed);
        assert_eq!(forward, "Silas met Mira. Silas bowed. Mira smiled.");
    }

    #[test]
    fn test_out_of_bounds_span_is_fatal() {
        let text = "short";
        let err = resolve_clusters(text, &[cluster(&[(0, 2), (3, 99)])]).unwrap_err();
        assert!(matches!(
            err,
            FabulaError::ClusterOutOfBounds { end: 99, len: 5, .. }
        ));
    }

    #[test]
    fn test_inverted_span_is_fatal() {
        let text = "short text";
        let err = resolve_clusters(text, &[cluster(&[(5, 2)])]).unwrap_err();
        assert!(matches!(err, FabulaError::ClusterOutOfBounds { .. }));
    }

    #[test]
    fn test_overlapping_spans_across_clusters_are_fatal() {
        let text = "Silas met Mira and He nodded.";
        // "He"[19,21) and [19,24) collide; in-bounds, but not disjoint
        let a = cluster(&[(0, 5), (19, 21)]);
        let b = cluster(&[(10, 14), (19, 24)]);
        let err = resolve_clusters(text, &[a, b]).unwrap_err();
        assert!(matches!(err, FabulaError::Validation(_)));
    }

    #[test]
    fn test_offsets_are_chars_not_bytes() {
        // "café" is 4 chars but 5 bytes; spans are char offsets
        let text = "café saw him";
        // "café" [0,4), "him" [9,12)
        let result = resolve_clusters(text, &[cluster(&[(0, 4), (9, 12)])]).unwrap();
        assert_eq!(result, "café saw café");
    }

    #[test]
    fn test_longer_replacement_shifts_only_left_spans() {
        let text = "The boy ran. He fell. He cried.";
        // "The boy" [0,7), "He" [13,15), "He" [22,24)
        let result = resolve_clusters(text, &[cluster(&[(0, 7), (13, 15), (22, 24)])]).unwrap();
        assert_eq!(result, "The boy ran. The boy fell. The boy cried.");
    }

    // -- Property-based tests --

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_empty_clusters_identity(text in ".{0,200}") {
                prop_assert_eq!(resolve_clusters(&text, &[]).unwrap(), text);
            }

            #[test]
            fn prop_chars_outside_spans_untouched(
                prefix in "[a-z ]{0,30}",
                primary in "[A-Z][a-z]{1,8}",
                middle in "[a-z ]{1,30}",
                mention in "[a-z]{1,8}",
                suffix in "[a-z ]{0,30}",
            ) {
                // Layout: <primary><middle><mention><suffix>, prefix prepended
                let text = format!("{prefix}{primary}{middle}{mention}{suffix}");
                let p_start = prefix.chars().count();
                let p_end = p_start + primary.chars().count();
                let m_start = p_end + middle.chars().count();
                let m_end = m_start + mention.chars().count();

                let clusters = vec![MentionCluster(vec![
                    MentionSpan::new(p_start, p_end),
                    MentionSpan::new(m_start, m_end),
                ])];
                let resolved = resolve_clusters(&text, &clusters).unwrap();
                let resolved_chars: Vec<char> = resolved.chars().collect();
                let original_chars: Vec<char> = text.chars().collect();

                // Everything before the mention span is byte-for-byte identical
                prop_assert_eq!(&resolved_chars[..m_start], &original_chars[..m_start]);
                // Everything after it survives at the (possibly shifted) tail
                let tail_len = original_chars.len() - m_end;
                prop_assert_eq!(
                    &resolved_chars[resolved_chars.len() - tail_len..],
                    &original_chars[m_end..]
                );
            }

            #[test]
            fn prop_out_of_bounds_always_errors(
                text in "[a-z]{0,20}",
                over in 1usize..50,
            ) {
                let len = text.chars().count();
                let clusters = vec![MentionCluster(vec![
                    MentionSpan::new(0, len.min(1)),
                    MentionSpan::new(len, len + over),
                ])];
                prop_assert!(resolve_clusters(&text, &clusters).is_err());
            }
        }
    }
}
