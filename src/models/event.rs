//! Timeline event records.

use serde::{Deserialize, Serialize};

/// Sentinel target meaning "no explicit object of the action".
pub const SCENE_TARGET: &str = "scene";

/// A single extracted narrative event.
///
/// Events are append-only: the extractor creates them, the pipeline driver
/// tags them with their sentence index, and nothing mutates them afterwards.
/// The `is_speech` flag is internal bookkeeping for dialogue attachment and
/// is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub actor: String,
    pub action: String,
    /// Explicit object of the action, or [`SCENE_TARGET`].
    pub target: String,
    /// Sentiment label ("positive" / "negative" / "neutral").
    pub emotion: String,
    pub dialogue: Option<String>,
    /// Record kind; always `"action"` for extracted events.
    #[serde(rename = "type")]
    pub kind: String,
    /// Index of the originating sentence, assigned by the pipeline driver.
    pub sentence_index: usize,
    /// Whether `action` starts with a speech verb. Bookkeeping only.
    #[serde(skip)]
    pub is_speech: bool,
}

impl Event {
    /// Create an event with the default target, kind and emotion filled in.
    pub fn new(actor: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            target: SCENE_TARGET.to_string(),
            emotion: "neutral".to_string(),
            dialogue: None,
            kind: "action".to_string(),
            sentence_index: 0,
            is_speech: false,
        }
    }
}

/// The accumulated event sequence for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub events: Vec<Event>,
}

/// Cross-sentence context carried through the extraction loop.
///
/// A single-writer scalar threaded by `&mut` through strictly sequential
/// sentence processing — never global, never shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ActorMemory {
    /// Most recent non-atmospheric actor, used to claim orphaned dialogue.
    pub last_actor: Option<String>,
}
