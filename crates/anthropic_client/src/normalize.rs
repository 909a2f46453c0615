//! Reply normalization.
//!
//! A successful reply is expected to carry `content: [{type, ...}, ...]`. The
//! text of the first `"text"` part is the answer. When that shape is missing,
//! the reply is stringified instead of failing: only transport and status
//! problems are errors, a reply we cannot read is degraded output.

use log::warn;
use serde_json::Value;

pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "<empty upstream response>";

/// Extract the answer text from a raw reply body. Never fails.
pub fn normalize_response(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match first_text_part(&value) {
            Some(text) => text.to_string(),
            None => {
                warn!(
                    "Upstream reply has no text content part; returning it stringified ({} bytes)",
                    body.len()
                );
                stringify(&value)
            }
        },
        Err(e) => {
            warn!(
                "Upstream reply is not JSON ({}); returning raw body ({} bytes)",
                e,
                body.len()
            );
            if body.trim().is_empty() {
                EMPTY_RESPONSE_PLACEHOLDER.to_string()
            } else {
                body.to_string()
            }
        }
    }
}

/// First `{"type":"text","text":...}` entry of the `content` array.
pub fn first_text_part(value: &Value) -> Option<&str> {
    value
        .get("content")?
        .as_array()?
        .iter()
        .find(|part| part.get("type").and_then(Value::as_str) == Some("text"))?
        .get("text")?
        .as_str()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_RESPONSE_PLACEHOLDER.to_string(),
        Value::String(s) if s.trim().is_empty() => EMPTY_RESPONSE_PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
