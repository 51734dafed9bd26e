//! Response parser — provider-native success/error JSON into normalized
//! text.
//!
//! Order matters: an explicit error envelope is checked first (providers
//! return one inside an HTTP 200), then the known success path. Anything
//! else is an unexpected format, reported with a truncated serialization of
//! the body.

use serde_json::Value;

use switchboard_core::{utils, QueryError};

use crate::registry::ProviderKind;

/// Max characters of a body serialization quoted in a schema diagnostic.
const SCHEMA_EXCERPT_CHARS: usize = 200;

/// Extract the assistant's text from `body`, or a diagnostic error.
pub fn parse(provider: ProviderKind, body: &Value) -> Result<String, QueryError> {
    if let Some(message) = error_envelope(provider, body) {
        return Err(QueryError::Api {
            provider: provider.display_name().to_string(),
            message,
        });
    }

    success_text(provider, body).ok_or_else(|| QueryError::Schema {
        provider: provider.display_name().to_string(),
        excerpt: utils::excerpt(&body.to_string(), SCHEMA_EXCERPT_CHARS),
    })
}

/// The provider-typical error envelope, if present.
fn error_envelope(provider: ProviderKind, body: &Value) -> Option<String> {
    match provider {
        // {"error": {"type": ..., "message": ...}}
        ProviderKind::Anthropic => body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(String::from),

        // {"error": {"code": 429, "message": ..., "status": ...}}
        ProviderKind::Gemini => body.get("error").map(|error| {
            error
                .get("message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| {
                    error
                        .get("code")
                        .map(|code| format!("error code {code}"))
                        .unwrap_or_else(|| "unknown error".to_string())
                })
        }),

        // {"error": {"message": ..., "type": ...}}
        ProviderKind::OpenAi | ProviderKind::DeepSeek => body.get("error").map(|error| {
            error
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| error.get("type").and_then(Value::as_str))
                .unwrap_or("unknown error")
                .to_string()
        }),

        // {"error": "..."} at top level
        ProviderKind::Ollama => body
            .get("error")
            .and_then(Value::as_str)
            .map(String::from),
    }
}

/// The provider's success path, if the body matches it.
fn success_text(provider: ProviderKind, body: &Value) -> Option<String> {
    match provider {
        // {"content": [{"type": "text", "text": ...}, ...]}
        ProviderKind::Anthropic => body
            .pointer("/content/0/text")
            .and_then(Value::as_str)
            .map(String::from),

        // {"candidates": [{"content": {"parts": [{"text": ...}]}}]} — some
        // endpoints return a bare top-level {"text": ...} instead; accept
        // both, nested shape first.
        ProviderKind::Gemini => body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .or_else(|| body.get("text").and_then(Value::as_str))
            .map(String::from),

        // {"choices": [{"message": {"content": ...}}]}
        ProviderKind::OpenAi | ProviderKind::DeepSeek => body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(String::from),

        // {"message": {"role": "assistant", "content": ...}}
        ProviderKind::Ollama => body
            .pointer("/message/content")
            .and_then(Value::as_str)
            .map(String::from),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
