//! Output formatting infrastructure for CLI commands.

use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table,
};
use serde::Serialize;

use crate::models::Timeline;

/// Output mode for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

/// Print a list of items as a JSON array.
pub fn output_json_list<T: Serialize>(items: &[T]) {
    match serde_json::to_string_pretty(items) {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Failed to serialize to JSON: {}", e)),
    }
}

/// Print the extracted timeline as a table.
pub fn print_timeline(timeline: &Timeline) {
    if timeline.events.is_empty() {
        println!("{}", "No events extracted.".dimmed());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["TIME", "ACTOR", "ACTION", "TARGET", "EMOTION", "DIALOGUE"]);

    for event in &timeline.events {
        table.add_row(vec![
            Cell::new(event.sentence_index),
            Cell::new(&event.actor),
            Cell::new(&event.action),
            Cell::new(&event.target),
            emotion_cell(&event.emotion),
            Cell::new(event.dialogue.as_deref().unwrap_or("")),
        ]);
    }

    println!("{table}");
    println!(
        "{}",
        format!("{} event(s)", timeline.events.len()).dimmed()
    );
}

fn emotion_cell(emotion: &str) -> Cell {
    match emotion {
        "positive" => Cell::new(emotion).fg(Color::Green),
        "negative" => Cell::new(emotion).fg(Color::Red),
        _ => Cell::new(emotion).fg(Color::DarkGrey),
    }
}

/// Print a formatted table with headers and rows.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("{}", "No results found.".dimmed());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(headers);

    for row in rows {
        table.add_row(row);
    }

    println!("{table}");
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", "OK".green().bold(), msg);
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
