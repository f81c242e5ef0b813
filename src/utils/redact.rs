use crate::constants::limits::BASE64_LOG_THRESHOLD;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const DEFAULT_REDACTION: &str = "[REDACTED]";
const INLINE_REDACTION: &str = "***REDACTED***";

static INLINE_REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\b(Bearer)\s+([A-Za-z0-9._~+/=-]{8,})").expect("inline redaction regex"),
            "$1 ***REDACTED***",
        ),
        (
            Regex::new(r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b")
                .expect("inline redaction regex"),
            INLINE_REDACTION,
        ),
        (
            Regex::new(
                r#"(?i)("?(?:access_token|client_?secret|api[_-]?key)"?\s*[:=]\s*"?)([^\s",}]+)"#,
            )
            .expect("inline redaction regex"),
            "${1}***REDACTED***",
        ),
    ]
});

static BASE64_BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/\r\n]+={0,2}$").expect("base64 regex"));

pub fn truncate_utf8_prefix(value: &str, max_bytes: usize) -> String {
    if max_bytes == 0 {
        return String::new();
    }
    if value.len() <= max_bytes {
        return value.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}

pub fn is_sensitive_key(key: &str) -> bool {
    let normalized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if normalized.is_empty() {
        return false;
    }
    normalized.contains("secret")
        || normalized.contains("token")
        || normalized.contains("password")
        || normalized == "authorization"
        || normalized == "apikey"
}

fn looks_like_base64_blob(value: &str) -> bool {
    value.len() >= BASE64_LOG_THRESHOLD && BASE64_BODY.is_match(value)
}

pub fn redact_text(value: &str, max_bytes: usize) -> String {
    let mut out = value.to_string();
    for (re, replacement) in INLINE_REDACTION_PATTERNS.iter() {
        if re.is_match(&out) {
            out = re.replace_all(&out, *replacement).to_string();
        }
    }
    if out.len() <= max_bytes {
        return out;
    }
    format!("{}...", truncate_utf8_prefix(&out, max_bytes))
}

/// Masks secrets and collapses encoded document images so that log lines
/// stay readable and never carry credentials.
pub fn redact_value(value: &Value, max_bytes: usize) -> Value {
    match value {
        Value::String(text) if looks_like_base64_blob(text) => {
            Value::String(format!("[base64:{} chars]", text.len()))
        }
        Value::String(text) => Value::String(redact_text(text, max_bytes)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_value(item, max_bytes))
                .collect(),
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, entry) in map {
                if is_sensitive_key(key) && !entry.is_null() {
                    out.insert(key.clone(), Value::String(DEFAULT_REDACTION.to_string()));
                } else {
                    out.insert(key.clone(), redact_value(entry, max_bytes));
                }
            }
            Value::Object(out)
        }
        _ => value.clone(),
    }
}
