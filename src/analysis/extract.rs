//! JSON salvage for free-text model replies

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MeetingMindError, Result};

/// How a JSON object is located inside a model reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Slice from the first `{` to the last `}`.
    #[default]
    Legacy,
    /// First brace-balanced span that parses, respecting string quoting.
    Balanced,
}

impl std::str::FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "balanced" => Ok(Self::Balanced),
            other => Err(format!(
                "Unknown json extraction strategy '{}'. Supported: legacy, balanced",
                other
            )),
        }
    }
}

/// Recover the JSON object from a model reply using the legacy heuristic.
pub fn extract_json(raw: &str) -> Result<Value> {
    extract_json_with(raw, ExtractionStrategy::Legacy)
}

/// Recover the JSON object from a model reply.
pub fn extract_json_with(raw: &str, strategy: ExtractionStrategy) -> Result<Value> {
    let cleaned = strip_code_fences(raw);

    let slice = match strategy {
        ExtractionStrategy::Legacy => outer_braces(&cleaned),
        ExtractionStrategy::Balanced => return balanced_object(&cleaned),
    }
    .ok_or_else(|| MeetingMindError::ResponseParse("no JSON object found in reply".to_string()))?;

    serde_json::from_str(slice).map_err(|e| MeetingMindError::ResponseParse(e.to_string()))
}

fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json\n", "").replace("```", "")
}

fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start > end {
        return None;
    }
    Some(&text[start..=end])
}

fn balanced_object(text: &str) -> Result<Value> {
    let mut last_error = None;

    for (start, _) in text.match_indices('{') {
        let Some(end) = balanced_end(&text[start..]) else {
            continue;
        };
        match serde_json::from_str(&text[start..start + end]) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e.to_string()),
        }
    }

    Err(MeetingMindError::ResponseParse(
        last_error.unwrap_or_else(|| "no JSON object found in reply".to_string()),
    ))
}

/// Byte length of the brace-balanced span starting at `text[0] == '{'`.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
