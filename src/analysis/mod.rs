//! Analysis module for meeting-mind
//!
//! Ties the theme catalog, prompt builder and model together, and turns
//! model replies back into JSON.

mod extract;
mod gaps;
mod service;

pub use extract::{extract_json, extract_json_with, ExtractionStrategy};
pub use gaps::has_gaps;
pub use service::{
    Analyzer, GapAnalysis, GapOutcome, ThemeDetection, TopicOutcome, TranscriptAnalysis,
};
