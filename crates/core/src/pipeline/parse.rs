//! Tolerant extraction of JSON payloads from oracle text output.
//!
//! The oracle wraps its answers in markdown fences, prose, or both. Two
//! extraction modes cover the pipeline's needs: a strict-ish array mode for
//! per-ticket batch results and a scavenging scalar mode for the overall
//! score object. Neither mode panics; callers get a parsed value or an
//! explicit failure/absence signal.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON in oracle response: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON array, got {0}")]
    NotAnArray(&'static str),
}

/// Leading/trailing markdown code fence, case-insensitive.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^```(?:json)?\s*|\s*```$").unwrap());

/// First brace-delimited object in a blob of text, non-greedy.
static FIRST_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*?\}").unwrap());

/// Strip an optional code fence around the payload.
fn strip_code_fence(raw: &str) -> String {
    CODE_FENCE.replace_all(raw.trim(), "").trim().to_string()
}

/// Array mode: unfence the payload and parse it as a JSON array.
///
/// Parse failures surface to the caller, which degrades the whole batch to
/// its sentinel record.
pub fn extract_array(raw: &str) -> Result<Vec<serde_json::Value>, ParseError> {
    let cleaned = strip_code_fence(raw);
    let value: serde_json::Value =
        serde_json::from_str(&cleaned).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    match value {
        serde_json::Value::Array(items) => Ok(items),
        serde_json::Value::Object(_) => Err(ParseError::NotAnArray("an object")),
        _ => Err(ParseError::NotAnArray("a scalar")),
    }
}

/// Scalar mode: scan the raw text for the first `{...}` substring and parse
/// it. Surrounding prose is ignored. No match, or a match that is not valid
/// JSON, yields `None` rather than an error.
pub fn extract_object(raw: &str) -> Option<serde_json::Value> {
    let matched = FIRST_OBJECT.find(raw)?;
    serde_json::from_str(matched.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_array_plain() {
        let items = extract_array(r#"[{"ticket_number": "T-1"}]"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extract_array_strips_json_fence() {
        let raw = "```json\n[{\"ticket_number\": \"T-1\"}, {\"ticket_number\": \"T-2\"}]\n```";
        let items = extract_array(raw).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_extract_array_fence_is_case_insensitive() {
        let raw = "```JSON\n[]\n```";
        assert!(extract_array(raw).unwrap().is_empty());
    }

    #[test]
    fn test_extract_array_bare_fence() {
        let raw = "```\n[1, 2, 3]\n```";
        assert_eq!(extract_array(raw).unwrap().len(), 3);
    }

    #[test]
    fn test_extract_array_rejects_object() {
        let result = extract_array(r#"{"ticket_number": "T-1"}"#);
        assert!(matches!(result, Err(ParseError::NotAnArray(_))));
    }

    #[test]
    fn test_extract_array_rejects_prose() {
        let result = extract_array("Sorry, I cannot score these tickets.");
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_extract_object_ignores_surrounding_prose() {
        let raw = "Here is the score you asked for:\n{\"overall_score\": 7}\nLet me know!";
        let value = extract_object(raw).unwrap();
        assert_eq!(value, json!({"overall_score": 7}));
    }

    #[test]
    fn test_extract_object_takes_first_match() {
        let raw = r#"{"overall_score": 3} {"overall_score": 9}"#;
        let value = extract_object(raw).unwrap();
        assert_eq!(value["overall_score"], 3);
    }

    #[test]
    fn test_extract_object_no_match_is_none() {
        assert!(extract_object("no braces here").is_none());
    }

    #[test]
    fn test_extract_object_unparseable_match_is_none() {
        assert!(extract_object("{not json}").is_none());
    }
}
