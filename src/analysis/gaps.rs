use serde_json::Value;

/// A gap analysis reply flags gaps when `missing_perspectives` is a
/// non-empty array. Anything else counts as no gaps.
pub fn has_gaps(analysis: &Value) -> bool {
    analysis
        .get("missing_perspectives")
        .and_then(Value::as_array)
        .is_some_and(|missing| !missing.is_empty())
}
