//! Character personality and scene mood scoring.
//!
//! Lexicon-driven heuristics over raw scene text, independent of the event
//! pipeline: an NRC emotion lexicon gives per-scene valence/arousal, and
//! surface style features give a stable 4-axis personality estimate.

pub mod emotion;
pub mod nrc;
pub mod profile;

pub use emotion::{infer_scene_mood, Mood};
pub use nrc::NrcLexicon;
pub use profile::{infer_personality, Personality};
