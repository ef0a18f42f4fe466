//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// meeting-mind - Structured AI insights for meeting transcripts
#[derive(Parser, Debug)]
#[command(name = "meeting-mind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Interface to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the meeting themes and their dimensions
    Themes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a single transcript from a file ("-" reads stdin)
    Analyze {
        /// Transcript file
        file: PathBuf,

        /// Theme id (unknown ids fall back to general)
        #[arg(short, long, default_value = crate::api::DEFAULT_ANALYSIS_THEME)]
        theme: String,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
