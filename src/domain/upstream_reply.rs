use serde_json::Value;

const MAX_RAW_MESSAGE_CHARS: usize = 300;

const MESSAGE_POINTERS: &[&str] = &["/error/message", "/error", "/message", "/detail", "/title"];

/// Outcome of one call to an external provider, reduced to what the
/// services need: a parsed body or a status plus a readable message.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    Ok(Value),
    Error { status: u16, message: String },
}

impl UpstreamReply {
    pub fn from_response_parts(status: u16, body: &str) -> Self {
        if (200..300).contains(&status) {
            match serde_json::from_str(body) {
                Ok(value) => Self::Ok(value),
                Err(_) => Self::Ok(Value::String(body.to_string())),
            }
        } else {
            Self::Error {
                status,
                message: extract_error_message(body),
            }
        }
    }
}

/// Tries the usual error fields in order, falling back to the raw body.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(document) = serde_json::from_str::<Value>(body) {
        let found = MESSAGE_POINTERS
            .iter()
            .filter_map(|pointer| document.pointer(pointer))
            .find_map(|value| value.as_str().filter(|s| !s.is_empty()));
        if let Some(message) = found {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "unknown error".to_string();
    }
    trimmed.chars().take(MAX_RAW_MESSAGE_CHARS).collect()
}
