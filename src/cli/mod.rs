//! CLI interface for Fabula.

pub mod handlers;
pub mod output;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::init::AppContext;
use output::OutputMode;

/// Fabula - structured event timelines from narrative prose
#[derive(Parser)]
#[command(name = "fabula", version, about, long_about = None)]
pub struct Cli {
    /// Override data directory (default: ~/.fabula)
    #[arg(long, env = "FABULA_DATA_PATH", global = true)]
    pub data_path: Option<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    /// Lexicon overlay file (TOML; extends the built-in word tables)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip loading the sentiment model (emotions degrade to neutral)
    #[arg(long, global = true)]
    pub no_model: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the event timeline from a story file
    Extract {
        /// Path to the story text file
        story: PathBuf,

        /// Coreference clusters sidecar (JSON array of [start, end] char-span clusters)
        #[arg(long)]
        clusters: Option<PathBuf>,

        /// Write the events JSON array to this file
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write the image prompts JSON array to this file
        #[arg(long)]
        prompts_out: Option<PathBuf>,
    },

    /// Render image prompts from an events JSON file
    Prompts {
        /// Path to the events JSON (as written by `extract --out`)
        events: PathBuf,
    },

    /// Per-scene personality and mood report
    Scenes {
        /// Path to the story text file
        story: PathBuf,

        /// NRC emotion lexicon file (default: <data path>/NRC-Emotion-Lexicon.txt)
        #[arg(long)]
        nrc: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, elvish, powershell)
        shell: clap_complete::Shell,
    },
}

/// Dispatch a parsed command.
pub async fn execute(cmd: &Commands, ctx: &AppContext, mode: OutputMode) -> anyhow::Result<()> {
    match cmd {
        Commands::Extract {
            story,
            clusters,
            out,
            prompts_out,
        } => {
            handlers::handle_extract(
                ctx,
                story,
                clusters.as_deref(),
                out.as_deref(),
                prompts_out.as_deref(),
                mode,
            )
            .await
        }
        Commands::Prompts { events } => handlers::handle_prompts(events, mode),
        Commands::Scenes { story, nrc } => handlers::handle_scenes(ctx, story, nrc.as_deref(), mode),
        Commands::Completions { shell } => {
            print_completions(*shell);
            Ok(())
        }
    }
}

pub fn print_completions(shell: clap_complete::Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "fabula", &mut std::io::stdout());
}
