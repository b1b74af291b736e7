//! HTTP status and error payload helpers

use serde_json::Value;

/// Whether an HTTP status code is in the 2xx range
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Extract the human-readable message from a vendor error payload
///
/// Returns `None` when the body is not JSON or carries no recognizable
/// message, in which case callers fall back to the raw body.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    // OpenAI, Anthropic and Gemini: { "error": { "message": "..." } }
    if let Some(message) = json
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }

    // DashScope and generic: { "code": "...", "message": "..." }
    if let Some(message) = json.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    // Bare string: { "error": "..." }
    json.get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Strip the query string from a URL for logging
///
/// Some vendors take the credential as a query parameter.
pub fn redact_url(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{}?[REDACTED]", base),
        None => url.to_string(),
    }
}
