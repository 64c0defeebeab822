//! Image-prompt templating over extracted events.
//!
//! One prompt string per event, in event order: the actor/action core, the
//! target when it is an explicit object, an emotion-conditioned lighting
//! phrase, and a fixed quality suffix.

use crate::models::{event::SCENE_TARGET, Event};

const LIGHTING_POSITIVE: &str = "warm golden hour lighting, soft shadows";
const LIGHTING_NEGATIVE: &str = "dramatic chiaroscuro lighting, cool tones, misty";
const LIGHTING_NEUTRAL: &str = "cinematic lighting";
const QUALITY_SUFFIX: &str = "highly detailed, 8k, photorealistic, masterpiece";

/// Render one prompt per event, one-to-one and in order.
pub fn generate_prompts(events: &[Event]) -> Vec<String> {
    events.iter().map(generate_prompt).collect()
}

fn generate_prompt(event: &Event) -> String {
    let mut description = format!("{} {}", event.actor, event.action);
    if event.target != SCENE_TARGET {
        description.push(' ');
        description.push_str(&event.target);
    }

    let lighting = match event.emotion.as_str() {
        "positive" => LIGHTING_POSITIVE,
        "negative" => LIGHTING_NEGATIVE,
        _ => LIGHTING_NEUTRAL,
    };

    format!("{description}, {lighting}, {QUALITY_SUFFIX}")
}
