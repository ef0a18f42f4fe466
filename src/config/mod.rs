//! Configuration module for meeting-mind
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::Settings;
