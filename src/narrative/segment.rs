//! Scene segmentation.
//!
//! Stories are split into scenes at blank lines (one or more empty lines
//! between paragraphs). Each scene keeps its internal line breaks; leading
//! and trailing whitespace is trimmed.

/// Split a story into scenes at blank-line boundaries.
///
/// Consecutive blank lines collapse into one boundary; a story with no blank
/// lines is a single scene. Whitespace-only input yields no scenes.
pub fn split_scenes(text: &str) -> Vec<String> {
    let mut scenes = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut current, &mut scenes);
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    flush(&mut current, &mut scenes);
    scenes
}

fn flush(current: &mut String, scenes: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        scenes.push(trimmed.to_string());
    }
    current.clear();
}
