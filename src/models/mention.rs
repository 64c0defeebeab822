//! Coreference mention types.
//!
//! A mention cluster groups character-offset spans believed to refer to the
//! same entity. By upstream convention the span at index 0 is the antecedent
//! (the "primary" mention, usually a full name); spans at index 1+ are
//! pronouns or partial names that resolve to the primary's surface text.

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` span of **character** offsets into a document.
///
/// Character (not byte) offsets, matching the coreference model's convention.
/// Serialized as a `[start, end]` pair — the wire shape of cluster sidecar
/// files produced by the upstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(usize, usize)", from = "(usize, usize)")]
pub struct MentionSpan {
    pub start: usize,
    pub end: usize,
}

impl MentionSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for MentionSpan {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<MentionSpan> for (usize, usize) {
    fn from(span: MentionSpan) -> Self {
        (span.start, span.end)
    }
}

/// An ordered group of co-referring mention spans; index 0 is primary.
///
/// Spans within a cluster must not overlap. Clusters partition (but need not
/// cover) the mention spans of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentionCluster(pub Vec<MentionSpan>);

impl MentionCluster {
    /// The primary (antecedent) span, if the cluster is non-empty.
    pub fn primary(&self) -> Option<MentionSpan> {
        self.0.first().copied()
    }

    /// Spans that should be rewritten to the primary's surface text.
    pub fn referring(&self) -> &[MentionSpan] {
        if self.0.is_empty() {
            &[]
        } else {
            &self.0[1..]
        }
    }
}
