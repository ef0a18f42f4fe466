//! Theme catalog for meeting-mind
//!
//! A theme selects which evaluation dimensions apply to a meeting.

mod catalog;

pub use catalog::{
    all, find, lookup, Dimension, DimensionMap, ScoreFormat, ThemeDefinition, DEFAULT_THEME_ID,
};
