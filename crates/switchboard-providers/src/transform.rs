//! Message transformer — provider-neutral messages into each provider's
//! expected wire shape.
//!
//! The rules differ per provider and are load-bearing wire contracts:
//!
//! - Anthropic: system turns are dropped (the API takes instructions via a
//!   separate `system` field, not the messages array); assistant stays
//!   `"assistant"`, everything else becomes `"user"`.
//! - Gemini: assistant becomes `"model"`, everything else `"user"`; content
//!   is wrapped as a single-part `{parts: [{text}]}` structure.
//! - OpenAI and DeepSeek: identity — the message list passes through
//!   unchanged, system messages included.
//! - Ollama: identity in role terms, but re-emits only `{role, content}`,
//!   dropping `is_context` and anything else.

use serde_json::{json, Value};

use switchboard_core::{Message, Role};

use crate::registry::ProviderKind;

/// Map an ordered message list into `provider`'s wire messages.
///
/// An empty input is valid and produces an empty list; supplying at least
/// one message for a meaningful request is the caller's business.
pub fn transform(provider: ProviderKind, messages: &[Message]) -> Vec<Value> {
    match provider {
        ProviderKind::Anthropic => messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| {
                let role = match m.role {
                    Role::Assistant => "assistant",
                    _ => "user",
                };
                json!({ "role": role, "content": m.content })
            })
            .collect(),

        ProviderKind::Gemini => messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::Assistant => "model",
                    _ => "user",
                };
                json!({ "role": role, "parts": [{ "text": m.content }] })
            })
            .collect(),

        ProviderKind::OpenAi | ProviderKind::DeepSeek => messages
            .iter()
            .map(|m| serde_json::to_value(m).expect("message serialization is infallible"))
            .collect(),

        ProviderKind::Ollama => messages
            .iter()
            .map(|m| json!({ "role": m.role, "content": m.content }))
            .collect(),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
