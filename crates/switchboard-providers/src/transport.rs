//! Transport — the HTTP exchange with each provider, plus classification of
//! the raw outcome.
//!
//! Auth differs per provider and is a wire contract:
//!
//! - OpenAI, DeepSeek — `Authorization: Bearer <key>`
//! - Anthropic — `x-api-key` header + `anthropic-version` header
//! - Gemini — key as a `?key=` URL query parameter
//! - Ollama — no credential (local network)
//!
//! Classification happens in a fixed priority order: connection failure,
//! then empty body, then undecodable body, then HTTP status >= 400, then
//! success. The status check comes after the body checks, so an error
//! status with a JSON envelope reports the envelope message rather than a
//! bare code.
//!
//! No retries and no cancellation; the client carries a fixed overall
//! timeout.

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error};

use switchboard_core::{utils, QueryError};

use crate::registry::ProviderKind;
use crate::resolve::ResolvedConfig;

/// Fallback protocol version if the resolved config somehow lacks one.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Max characters of a raw body quoted in a decode diagnostic.
const DECODE_EXCERPT_CHARS: usize = 100;

// ─────────────────────────────────────────────
// Handler
// ─────────────────────────────────────────────

/// Executes one HTTP exchange per call.
///
/// Holds only the shared, connection-pooled client; everything request-
/// specific arrives through the [`ResolvedConfig`].
pub struct Handler {
    client: reqwest::Client,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");
        Handler { client }
    }

    /// Use a caller-supplied client (custom timeouts, proxies).
    pub fn with_client(client: reqwest::Client) -> Self {
        Handler { client }
    }

    /// The full URL for this call. Gemini appends the model segment and the
    /// key query parameter; every other provider posts to the base URL.
    fn endpoint_url(resolved: &ResolvedConfig) -> String {
        match resolved.provider {
            ProviderKind::Gemini => format!(
                "{}/{}:generateContent?key={}",
                resolved.base_url.trim_end_matches('/'),
                resolved.model,
                resolved.api_key.as_deref().unwrap_or_default(),
            ),
            _ => resolved.base_url.clone(),
        }
    }

    /// POST `body` and classify the raw outcome.
    ///
    /// `Ok` carries the decoded body still in provider-native shape; the
    /// response parser takes it from there.
    pub async fn send(&self, resolved: &ResolvedConfig, body: &Value) -> Result<Value, QueryError> {
        let provider = resolved.provider;
        let url = Self::endpoint_url(resolved);

        if resolved.debug {
            debug!(
                provider = provider.display_name(),
                model = %resolved.model,
                body = %body,
                "outbound request"
            );
        }

        let key = resolved.api_key.as_deref().unwrap_or_default();
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        let request = match provider {
            ProviderKind::OpenAi | ProviderKind::DeepSeek => request.bearer_auth(key),
            ProviderKind::Anthropic => request
                .header("x-api-key", key)
                .header("anthropic-version", anthropic_version(resolved)),
            // Gemini carries its key in the URL; Ollama has none.
            ProviderKind::Gemini | ProviderKind::Ollama => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(provider = provider.display_name(), error = %e, "HTTP request failed");
                return Err(QueryError::Transport {
                    provider: provider.display_name().to_string(),
                    detail: e.to_string(),
                });
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(|e| QueryError::Transport {
            provider: provider.display_name().to_string(),
            detail: e.to_string(),
        })?;

        if text.trim().is_empty() {
            return Err(QueryError::EmptyResponse {
                provider: provider.display_name().to_string(),
            });
        }

        let decoded: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => {
                return Err(QueryError::Decode {
                    provider: provider.display_name().to_string(),
                    excerpt: utils::excerpt(&text, DECODE_EXCERPT_CHARS),
                });
            }
        };

        if status.as_u16() >= 400 {
            error!(
                provider = provider.display_name(),
                status = status.as_u16(),
                "API error"
            );
            return Err(QueryError::Http {
                provider: provider.display_name().to_string(),
                status: status.as_u16(),
                message: envelope_message(&decoded),
            });
        }

        if resolved.debug {
            debug!(
                provider = provider.display_name(),
                body = %decoded,
                "inbound response"
            );
        }

        Ok(decoded)
    }
}

/// The `anthropic-version` header value, from the resolved header-only
/// parameter.
fn anthropic_version(resolved: &ResolvedConfig) -> String {
    resolved
        .parameters
        .get("anthropic_version")
        .and_then(Value::as_str)
        .unwrap_or(ANTHROPIC_VERSION)
        .to_string()
}

/// Best-effort message extraction from an error-status body.
///
/// Providers wrap errors differently (`{"error": {"message": ...}}`,
/// `{"error": "..."}`, `{"message": "..."}`); try the typical envelopes in
/// order.
fn envelope_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .or_else(|| body.get("message").and_then(Value::as_str))
        .unwrap_or("unknown error")
        .to_string()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolved(provider: ProviderKind, base_url: &str) -> ResolvedConfig {
        let mut parameters = serde_json::Map::new();
        if provider == ProviderKind::Anthropic {
            parameters.insert("anthropic_version".to_string(), json!("2023-06-01"));
        }
        ResolvedConfig {
            provider,
            api_key: if provider == ProviderKind::Ollama {
                None
            } else {
                Some("test-key-123".to_string())
            },
            model: provider.defaults().default_model.to_string(),
            base_url: base_url.to_string(),
            parameters,
            debug: false,
        }
    }

    // ── auth ──

    #[tokio::test]
    async fn openai_sends_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer test-key-123"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::OpenAi, &server.uri());
        let body = Handler::new().send(&config, &json!({})).await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn anthropic_sends_key_and_version_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-api-key", "test-key-123"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::Anthropic, &server.uri());
        assert!(Handler::new().send(&config, &json!({})).await.is_ok());
    }

    #[tokio::test]
    async fn gemini_sends_key_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gemini-2.0-flash:generateContent"))
            .and(query_param("key", "test-key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::Gemini, &server.uri());
        assert!(Handler::new().send(&config, &json!({})).await.is_ok());
    }

    #[tokio::test]
    async fn ollama_sends_no_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::Ollama, &server.uri());
        let sent = Handler::new()
            .send(&config, &json!({"stream": false}))
            .await
            .unwrap();
        assert_eq!(sent["ok"], true);

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
        assert!(requests[0].headers.get("x-api-key").is_none());
    }

    // ── classification priority ──

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        // Nothing listens on port 1.
        let config = resolved(ProviderKind::DeepSeek, "http://127.0.0.1:1");
        let err = Handler::new().send(&config, &json!({})).await.unwrap_err();

        match err {
            QueryError::Transport { ref provider, .. } => assert_eq!(provider, "DeepSeek"),
            other => panic!("expected Transport, got {other:?}"),
        }
        assert!(err.to_string().starts_with("failed to connect to DeepSeek API - "));
    }

    #[tokio::test]
    async fn empty_body_reported_even_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::OpenAi, &server.uri());
        let err = Handler::new().send(&config, &json!({})).await.unwrap_err();
        assert_eq!(
            err,
            QueryError::EmptyResponse {
                provider: "OpenAI".to_string()
            }
        );
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error_with_excerpt() {
        let raw = "<html>Bad Gateway</html>".repeat(20);
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string(raw.clone()))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::Anthropic, &server.uri());
        let err = Handler::new().send(&config, &json!({})).await.unwrap_err();

        match err {
            QueryError::Decode { excerpt, .. } => {
                assert!(excerpt.chars().count() <= DECODE_EXCERPT_CHARS + 3);
                assert!(raw.starts_with(excerpt.trim_end_matches("...")));
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_status_with_envelope_extracts_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "rate limited", "type": "rate_limit_error" }
            })))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::OpenAi, &server.uri());
        let err = Handler::new().send(&config, &json!({})).await.unwrap_err();
        assert_eq!(
            err,
            QueryError::Http {
                provider: "OpenAI".to_string(),
                status: 429,
                message: "rate limited".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn error_status_without_envelope_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"weird": 1})))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::Gemini, &server.uri());
        let err = Handler::new().send(&config, &json!({})).await.unwrap_err();
        match err {
            QueryError::Http { status, message, .. } => {
                assert_eq!(status, 403);
                assert_eq!(message, "unknown error");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn string_error_envelope_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"error": "model \"nope\" not found"})),
            )
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::Ollama, &server.uri());
        let err = Handler::new().send(&config, &json!({})).await.unwrap_err();
        match err {
            QueryError::Http { message, .. } => {
                assert_eq!(message, "model \"nope\" not found");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_returns_provider_native_body() {
        let server = MockServer::start().await;
        let native = json!({
            "content": [{ "type": "text", "text": "hello" }],
            "stop_reason": "end_turn"
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(native.clone()))
            .mount(&server)
            .await;

        let config = resolved(ProviderKind::Anthropic, &server.uri());
        let body = Handler::new().send(&config, &json!({})).await.unwrap();
        assert_eq!(body, native);
    }
}
