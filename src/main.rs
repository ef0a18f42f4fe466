//! meeting-mind - Structured AI insights for meeting transcripts
//!
//! Entry point for the meeting-mind server and CLI.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meeting_mind::cli::{Cli, Commands};
use meeting_mind::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        meeting_mind::cli::completions::print(*shell);
        return Ok(());
    }

    // Load configuration only for runtime commands.
    let settings = Settings::load()?;

    // Initialize logging
    let default_level = if cli.verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match cli.command {
        Commands::Serve { host, port } => {
            meeting_mind::cli::commands::serve(&settings, host, port).await?;
        }
        Commands::Themes { json } => {
            meeting_mind::cli::commands::list_themes(json)?;
        }
        Commands::Analyze { file, theme } => {
            meeting_mind::cli::commands::analyze_transcript(&settings, &file, &theme).await?;
        }
        Commands::Config(config_cmd) => {
            meeting_mind::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
