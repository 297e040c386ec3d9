//! Lenient extraction of the JSON object from a generator reply.
//!
//! Language-model generators do not always return bare JSON. Accepted forms,
//! tried in order: the whole text, a fenced ```json block, the span from the
//! first `{` to the last `}`.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::FormatError;

/// Fenced JSON block
static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").unwrap());

/// Pull a JSON object out of `text`.
pub fn extract_payload(text: &str) -> Result<Value, FormatError> {
    if let Some(value) = parse_object(text.trim()) {
        return Ok(value);
    }

    if let Some(value) = FENCED_JSON
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|body| parse_object(body.as_str()))
    {
        return Ok(value);
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => parse_object(&text[start..=end])
            .ok_or_else(|| FormatError::Malformed("no parsable JSON object in reply".to_string())),
        _ => Err(FormatError::Malformed("reply contains no JSON object".to_string())),
    }
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}
