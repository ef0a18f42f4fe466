//! Transcript history entries sent by the client

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One statement from the meeting history.
///
/// Clients send `{ "transcript": "..." }` objects, but bare strings are
/// accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawHistoryEntry")]
pub struct HistoryEntry {
    pub transcript: String,
}

impl HistoryEntry {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHistoryEntry {
    Text(String),
    Object {
        #[serde(default)]
        transcript: Value,
    },
}

impl From<RawHistoryEntry> for HistoryEntry {
    fn from(raw: RawHistoryEntry) -> Self {
        match raw {
            RawHistoryEntry::Text(transcript) => Self { transcript },
            RawHistoryEntry::Object { transcript } => Self {
                transcript: text_of(transcript),
            },
        }
    }
}

/// Deserialize any JSON value as prompt text.
///
/// Strings pass through, `null` becomes empty and other values keep their
/// JSON rendering.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(text_of)
}

fn text_of(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
