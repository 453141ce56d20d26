use crate::error::{RenderError, Result};
use crate::ir::{OutputValue, Payload};
use once_cell::sync::Lazy;
use regex::Regex;

// type := [^(]+ , value := [^)]* , output := type "(" value ")"
static OUTPUT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^(]+)\(([^)]*)\)$").unwrap());

pub fn parse_payload(input: &str) -> Result<Payload> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RenderError::MalformedPayload("empty payload".to_string()));
    }
    let payload: Payload = serde_json::from_str(trimmed)?;
    log::debug!(
        "parsed payload: {} branches, {} leaves, {} edges, {} highlights",
        payload.branches.len(),
        payload.leaves.len(),
        payload.edges.len(),
        payload.highlights.len()
    );
    Ok(payload)
}

/// Splits `type(value)` into its two segments. Anything else, including a
/// value that itself contains parentheses, falls back to plain text.
pub fn parse_output(text: &str) -> OutputValue {
    match OUTPUT_RE.captures(text) {
        Some(caps) => OutputValue::Typed {
            typ: caps[1].to_string(),
            value: caps[2].to_string(),
        },
        None => OutputValue::Plain(text.to_string()),
    }
}
