//! meeting-mind - Structured AI insights for meeting transcripts
//!
//! Builds theme-aware prompts, forwards them to an LLM and salvages JSON
//! out of the model's reply.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod llm;
pub mod prompts;
pub mod themes;

use thiserror::Error;

/// Main error type for meeting-mind
#[derive(Error, Debug)]
pub enum MeetingMindError {
    #[error("{task} needs at least {required} history entries, got {actual}")]
    InsufficientHistory {
        task: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Model call failed: {0:#}")]
    ModelCall(anyhow::Error),

    #[error("Could not parse model response: {0}")]
    ResponseParse(String),
}

pub type Result<T> = std::result::Result<T, MeetingMindError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "meeting-mind";
