//! Request builder — transformed messages + resolved config into the final
//! JSON request body.
//!
//! The generic step is the same for every provider: set the model, place the
//! messages under the provider's container field, copy the additional
//! parameters. Provider quirks run as a post-build mutation, after the
//! generic merge.

use serde_json::{json, Map, Value};

use switchboard_core::Message;

use crate::registry::{ProviderKind, HEADER_ONLY_PARAMS};
use crate::resolve::ResolvedConfig;
use crate::transform::transform;

/// Field name holding the message array in `provider`'s request body.
pub fn message_container(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::Gemini => "contents",
        _ => "messages",
    }
}

/// Build the full request body for one query.
pub fn build(resolved: &ResolvedConfig, messages: &[Message]) -> Value {
    let wire_messages = transform(resolved.provider, messages);

    let mut body = Map::new();
    body.insert("model".to_string(), json!(resolved.model));
    body.insert(
        message_container(resolved.provider).to_string(),
        Value::Array(wire_messages),
    );

    // Additional parameters, minus protocol metadata reserved for headers.
    for (key, value) in &resolved.parameters {
        if HEADER_ONLY_PARAMS.contains(&key.as_str()) {
            continue;
        }
        body.insert(key.clone(), value.clone());
    }

    let mut body = Value::Object(body);
    apply_provider_quirks(resolved.provider, &mut body);
    body
}

/// Post-build per-provider mutation.
fn apply_provider_quirks(provider: ProviderKind, body: &mut Value) {
    if provider == ProviderKind::Ollama {
        // The Ollama chat endpoint streams unless told otherwise.
        body["stream"] = json!(false);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CredentialStore, ALL_PROVIDERS};
    use crate::resolve::resolve;
    use switchboard_core::config::{Config, ProviderSettings};

    struct FakeCreds;

    impl CredentialStore for FakeCreds {
        fn api_key(&self, _provider: ProviderKind) -> Option<String> {
            Some("test-key".to_string())
        }
    }

    fn resolved_for(provider: ProviderKind) -> ResolvedConfig {
        let config = Config {
            provider: provider.id().to_string(),
            ..Config::default()
        };
        resolve(&config, None, &FakeCreds).unwrap()
    }

    #[test]
    fn every_body_has_model_and_container() {
        let messages = vec![Message::user("hi")];
        for kind in ALL_PROVIDERS {
            let body = build(&resolved_for(*kind), &messages);

            assert!(body["model"].is_string(), "{kind:?}");
            let container = message_container(*kind);
            assert!(body[container].is_array(), "{kind:?}");
            assert_eq!(body[container].as_array().unwrap().len(), 1, "{kind:?}");
        }
    }

    #[test]
    fn contents_only_for_gemini() {
        for kind in ALL_PROVIDERS {
            let expected = if *kind == ProviderKind::Gemini {
                "contents"
            } else {
                "messages"
            };
            assert_eq!(message_container(*kind), expected, "{kind:?}");
        }
    }

    #[test]
    fn parameters_copied_into_body() {
        let body = build(&resolved_for(ProviderKind::OpenAi), &[Message::user("q")]);
        assert_eq!(body["temperature"], json!(0.7));
    }

    #[test]
    fn header_only_params_never_reach_body() {
        let body = build(&resolved_for(ProviderKind::Anthropic), &[Message::user("q")]);
        assert!(body.get("anthropic_version").is_none());
        // the body-level default still lands
        assert_eq!(body["max_tokens"], json!(4096));
    }

    #[test]
    fn caller_parameter_overrides_land_in_body() {
        let mut config = Config {
            provider: "deepseek".to_string(),
            ..Config::default()
        };
        let mut settings = ProviderSettings::default();
        settings
            .parameters
            .insert("temperature".to_string(), json!(0.1));
        config
            .provider_settings
            .insert("deepseek".to_string(), settings);

        let resolved = resolve(&config, None, &FakeCreds).unwrap();
        let body = build(&resolved, &[Message::user("q")]);
        assert_eq!(body["temperature"], json!(0.1));
    }

    #[test]
    fn ollama_disables_streaming() {
        let body = build(&resolved_for(ProviderKind::Ollama), &[Message::user("q")]);
        assert_eq!(body["stream"], json!(false));
    }

    #[test]
    fn non_ollama_bodies_have_no_stream_flag() {
        let body = build(&resolved_for(ProviderKind::OpenAi), &[Message::user("q")]);
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn empty_message_list_builds_empty_container() {
        let body = build(&resolved_for(ProviderKind::Gemini), &[]);
        assert_eq!(body["contents"], json!([]));
    }
}
