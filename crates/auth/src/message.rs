//! Best-effort extraction of a human-readable message from an error body.

use serde_json::Value as JsonValue;

/// Used when neither the body nor the caller's fallback has anything to say.
pub const UNKNOWN_DIRECTORY_ERROR: &str = "Unexpected response from user service";

const MESSAGE_KEYS: [&str; 2] = ["message", "error"];

/// Pull a message out of a (usually JSON) error body.
///
/// Prefers a non-blank string `message` field, then `error`, then `fallback`.
/// Unparsable or non-object bodies degrade silently to the fallback.
pub fn extract_error_message(body: Option<&str>, fallback: &str) -> String {
    body.and_then(message_from_body)
        .or_else(|| non_blank(fallback))
        .unwrap_or_else(|| UNKNOWN_DIRECTORY_ERROR.to_string())
}

fn message_from_body(body: &str) -> Option<String> {
    let JsonValue::Object(map) = serde_json::from_str::<JsonValue>(body).ok()? else {
        return None;
    };

    MESSAGE_KEYS
        .iter()
        .filter_map(|key| map.get(*key).and_then(JsonValue::as_str))
        .find_map(non_blank)
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
