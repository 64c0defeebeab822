//! CLI command handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::cli::output::{
    output_json_list, print_success, print_table, print_timeline, OutputMode,
};
use crate::init::AppContext;
use crate::models::Event;
use crate::narrative::split_scenes;
use crate::personality::{infer_personality, infer_scene_mood, Mood, NrcLexicon, Personality};
use crate::prompt::generate_prompts;
use crate::services::{CorefService, NoopCorefService, StaticCorefService};

pub async fn handle_extract(
    ctx: &AppContext,
    story: &Path,
    clusters: Option<&Path>,
    out: Option<&Path>,
    prompts_out: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(story)
        .with_context(|| format!("Failed to read story file {}", story.display()))?;

    let coref: Arc<dyn CorefService> = match clusters {
        Some(path) => Arc::new(
            StaticCorefService::from_json_file(path)
                .with_context(|| format!("Failed to load clusters sidecar {}", path.display()))?,
        ),
        None => Arc::new(NoopCorefService::new()),
    };

    let spinner = (mode == OutputMode::Human).then(|| progress_spinner("Extracting events..."));
    let timeline = ctx.pipeline(coref).run(&text).await?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if let Some(path) = out {
        write_json(path, &timeline.events)?;
        if mode == OutputMode::Human {
            print_success(&format!("Events written to {}", path.display()));
        }
    }
    if let Some(path) = prompts_out {
        let prompts = generate_prompts(&timeline.events);
        write_json(path, &prompts)?;
        if mode == OutputMode::Human {
            print_success(&format!("Prompts written to {}", path.display()));
        }
    }

    match mode {
        OutputMode::Json => output_json_list(&timeline.events),
        OutputMode::Human => print_timeline(&timeline),
    }
    Ok(())
}

pub fn handle_prompts(events_path: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(events_path)
        .with_context(|| format!("Failed to read events file {}", events_path.display()))?;
    let events: Vec<Event> =
        serde_json::from_str(&raw).context("Events file is not a JSON array of events")?;

    let prompts = generate_prompts(&events);
    match mode {
        OutputMode::Json => output_json_list(&prompts),
        OutputMode::Human => {
            for (i, prompt) in prompts.iter().enumerate() {
                println!("{:>3}. {}", i, prompt);
            }
        }
    }
    Ok(())
}

/// One row of the scene report.
#[derive(Debug, Serialize)]
struct SceneReport {
    index: usize,
    text: String,
    mood: Mood,
    personality: Personality,
}

pub fn handle_scenes(
    ctx: &AppContext,
    story: &Path,
    nrc: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(story)
        .with_context(|| format!("Failed to read story file {}", story.display()))?;

    let nrc_path = nrc
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ctx.nrc_lexicon_path());
    let lexicon = if nrc_path.exists() {
        NrcLexicon::from_file(&nrc_path)?
    } else {
        tracing::warn!(
            "NRC lexicon not found at {}; scene moods will be neutral",
            nrc_path.display()
        );
        NrcLexicon::default()
    };

    let reports: Vec<SceneReport> = split_scenes(&text)
        .into_iter()
        .enumerate()
        .map(|(index, scene)| SceneReport {
            index,
            mood: infer_scene_mood(&scene, &lexicon),
            personality: infer_personality(&scene),
            text: scene,
        })
        .collect();

    match mode {
        OutputMode::Json => output_json_list(&reports),
        OutputMode::Human => {
            let rows = reports
                .iter()
                .map(|r| {
                    vec![
                        r.index.to_string(),
                        format!("{:.2}", r.mood.valence),
                        format!("{:.2}", r.mood.arousal),
                        format!("{:.2}", r.personality.dominance),
                        format!("{:.2}", r.personality.extraversion),
                        format!("{:.2}", r.personality.agreeableness),
                        format!("{:.2}", r.personality.age_factor),
                        preview(&r.text),
                    ]
                })
                .collect();
            print_table(
                &["SCENE", "VAL", "ARO", "DOM", "EXT", "AGR", "AGE", "TEXT"],
                rows,
            );
        }
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn progress_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn preview(text: &str) -> String {
    const MAX: usize = 48;
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= MAX {
        flat
    } else {
        let cut: String = flat.chars().take(MAX).collect();
        format!("{cut}…")
    }
}
