//! Prompt construction for meeting-mind
//!
//! Every analytical task turns a theme and caller-supplied transcripts into a
//! single instruction string asking the model for a specific JSON shape.

mod builder;
mod history;

pub use builder::{
    build_analysis_prompt, build_gap_analysis_prompt, build_theme_detection_prompt,
    build_topic_classification_prompt, DETECTION_SAMPLE_SIZE, MIN_DETECTION_ENTRIES,
    MIN_GAP_ENTRIES, MIN_TOPIC_ENTRIES,
};
pub use history::{deserialize_text, HistoryEntry};
