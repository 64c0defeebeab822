//! Fabula - structured event timelines from narrative prose
//!
//! Usage:
//!   fabula extract story.txt                 Extract the event timeline
//!   fabula extract story.txt --clusters c.json --out events.json
//!   fabula prompts events.json               Render image prompts
//!   fabula scenes story.txt                  Per-scene mood report
//!   fabula --help                            Show all commands

use anyhow::Result;
use clap::Parser;

use fabula::cli::output::OutputMode;
use fabula::cli::{Cli, Commands};
use fabula::init::{AppContext, InitOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr (stdout is reserved for command output)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("fabula=info".parse()?),
        )
        .init();

    let mode = OutputMode::from_json_flag(cli.json);

    match &cli.command {
        // No services needed for completions
        Commands::Completions { shell } => fabula::cli::print_completions(*shell),
        cmd => {
            let ctx = AppContext::new(InitOptions {
                data_path: cli.data_path.clone(),
                config: cli.config.clone(),
                no_model: cli.no_model,
            })
            .await?;
            fabula::cli::execute(cmd, &ctx, mode).await?;
        }
    }

    Ok(())
}
