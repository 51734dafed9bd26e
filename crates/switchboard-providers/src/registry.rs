//! Provider registry — the closed set of supported providers and their
//! static defaults.
//!
//! Providers are a closed enum rather than a string-keyed table: adding one
//! means adding a variant and giving every transform/build/auth/parse match
//! an arm for it.

use switchboard_core::QueryError;

// ─────────────────────────────────────────────
// ProviderKind
// ─────────────────────────────────────────────

/// One supported LLM HTTP API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    DeepSeek,
    Gemini,
    Ollama,
}

/// All providers, in registry order.
pub const ALL_PROVIDERS: &[ProviderKind] = &[
    ProviderKind::Anthropic,
    ProviderKind::OpenAi,
    ProviderKind::DeepSeek,
    ProviderKind::Gemini,
    ProviderKind::Ollama,
];

impl ProviderKind {
    /// Look up a provider by its id string (case-insensitive).
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.to_lowercase();
        ALL_PROVIDERS
            .iter()
            .copied()
            .find(|kind| kind.id() == id)
    }

    /// Like [`Self::from_id`], but yields the config error the resolver
    /// surfaces for unknown ids.
    pub fn parse_id(id: &str) -> Result<Self, QueryError> {
        Self::from_id(id).ok_or_else(|| QueryError::UnsupportedProvider(id.to_string()))
    }

    /// Stable id used in configuration and credential lookup.
    pub fn id(self) -> &'static str {
        self.defaults().id
    }

    /// Human-readable name used in logs and error messages.
    pub fn display_name(self) -> &'static str {
        self.defaults().display_name
    }

    /// Static defaults for this provider.
    pub fn defaults(self) -> &'static ProviderDefaults {
        match self {
            ProviderKind::Anthropic => &ANTHROPIC,
            ProviderKind::OpenAi => &OPENAI,
            ProviderKind::DeepSeek => &DEEPSEEK,
            ProviderKind::Gemini => &GEMINI,
            ProviderKind::Ollama => &OLLAMA,
        }
    }

    /// Whether a missing credential is a configuration error. Local-network
    /// providers run without one.
    pub fn requires_api_key(self) -> bool {
        self.defaults().requires_api_key
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ─────────────────────────────────────────────
// ProviderDefaults — static metadata for one provider
// ─────────────────────────────────────────────

/// Default parameter value in the static registry.
#[derive(Clone, Copy, Debug)]
pub enum ParamValue {
    Str(&'static str),
    Int(i64),
    Float(f64),
}

impl ParamValue {
    pub fn to_json(self) -> serde_json::Value {
        match self {
            ParamValue::Str(s) => serde_json::Value::String(s.to_string()),
            ParamValue::Int(n) => serde_json::Value::from(n),
            ParamValue::Float(x) => serde_json::Value::from(x),
        }
    }
}

/// Static defaults describing one provider.
///
/// Process-wide, read-only; the resolver copies what it needs per call.
#[derive(Debug)]
pub struct ProviderDefaults {
    /// Internal id (e.g. `"deepseek"`). Also the `provider_settings` key.
    pub id: &'static str,
    /// Human-readable name for logs and errors. E.g. `"DeepSeek"`.
    pub display_name: &'static str,
    /// Model used when neither the caller nor per-provider settings name one.
    pub default_model: &'static str,
    /// Full endpoint URL (Gemini's model segment and key are appended by the
    /// transport).
    pub base_url: &'static str,
    /// Environment variable the credential store reads.
    pub env_key: &'static str,
    /// Whether a request without a key is a configuration error.
    pub requires_api_key: bool,
    /// Additional request parameters, merged under caller overrides.
    pub parameters: &'static [(&'static str, ParamValue)],
}

/// Parameter keys consumed only by the transport (headers, never the body).
pub const HEADER_ONLY_PARAMS: &[&str] = &["anthropic_version"];

static ANTHROPIC: ProviderDefaults = ProviderDefaults {
    id: "anthropic",
    display_name: "Anthropic",
    default_model: "claude-sonnet-4-20250514",
    base_url: "https://api.anthropic.com/v1/messages",
    env_key: "ANTHROPIC_API_KEY",
    requires_api_key: true,
    parameters: &[
        ("max_tokens", ParamValue::Int(4096)),
        // Protocol metadata: sent as the anthropic-version header, never in
        // the body.
        ("anthropic_version", ParamValue::Str("2023-06-01")),
    ],
};

static OPENAI: ProviderDefaults = ProviderDefaults {
    id: "openai",
    display_name: "OpenAI",
    default_model: "gpt-4o",
    base_url: "https://api.openai.com/v1/chat/completions",
    env_key: "OPENAI_API_KEY",
    requires_api_key: true,
    parameters: &[("temperature", ParamValue::Float(0.7))],
};

static DEEPSEEK: ProviderDefaults = ProviderDefaults {
    id: "deepseek",
    display_name: "DeepSeek",
    default_model: "deepseek-chat",
    base_url: "https://api.deepseek.com/chat/completions",
    env_key: "DEEPSEEK_API_KEY",
    requires_api_key: true,
    parameters: &[("temperature", ParamValue::Float(0.7))],
};

static GEMINI: ProviderDefaults = ProviderDefaults {
    id: "gemini",
    display_name: "Gemini",
    default_model: "gemini-2.0-flash",
    base_url: "https://generativelanguage.googleapis.com/v1beta/models",
    env_key: "GEMINI_API_KEY",
    requires_api_key: true,
    parameters: &[],
};

static OLLAMA: ProviderDefaults = ProviderDefaults {
    id: "ollama",
    display_name: "Ollama",
    default_model: "llama3.2",
    base_url: "http://localhost:11434/api/chat",
    env_key: "OLLAMA_API_KEY",
    requires_api_key: false,
    parameters: &[],
};

// ─────────────────────────────────────────────
// Credential store
// ─────────────────────────────────────────────

/// Where API keys come from when the caller's config has none.
///
/// Keyed by provider; tests and embedders supply their own source.
pub trait CredentialStore: Send + Sync {
    fn api_key(&self, provider: ProviderKind) -> Option<String>;
}

/// Reads each provider's `env_key` environment variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvCredentialStore;

impl CredentialStore for EnvCredentialStore {
    fn api_key(&self, provider: ProviderKind) -> Option<String> {
        std::env::var(provider.defaults().env_key)
            .ok()
            .filter(|key| !key.is_empty())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn from_id_known_providers() {
        assert_eq!(ProviderKind::from_id("anthropic"), Some(ProviderKind::Anthropic));
        assert_eq!(ProviderKind::from_id("openai"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_id("deepseek"), Some(ProviderKind::DeepSeek));
        assert_eq!(ProviderKind::from_id("gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::from_id("ollama"), Some(ProviderKind::Ollama));
    }

    #[test]
    fn from_id_case_insensitive() {
        assert_eq!(ProviderKind::from_id("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_id("GEMINI"), Some(ProviderKind::Gemini));
    }

    #[test]
    fn from_id_unknown() {
        assert_eq!(ProviderKind::from_id("nonexistent"), None);
    }

    #[test]
    fn parse_id_yields_config_error() {
        let err = ProviderKind::parse_id("mistral").unwrap_err();
        assert_eq!(err, QueryError::UnsupportedProvider("mistral".to_string()));
    }

    #[test]
    fn ids_unique_and_match_kind() {
        let mut seen = HashMap::new();
        for kind in ALL_PROVIDERS {
            let id = kind.id();
            assert_eq!(ProviderKind::from_id(id), Some(*kind));
            assert!(seen.insert(id, kind).is_none(), "duplicate id {id}");
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn only_ollama_is_keyless() {
        for kind in ALL_PROVIDERS {
            let keyless = !kind.requires_api_key();
            assert_eq!(keyless, *kind == ProviderKind::Ollama, "{kind:?}");
        }
    }

    #[test]
    fn header_only_params_exist_in_registry() {
        for key in HEADER_ONLY_PARAMS {
            let defined = ALL_PROVIDERS.iter().any(|kind| {
                kind.defaults()
                    .parameters
                    .iter()
                    .any(|(name, _)| name == key)
            });
            assert!(defined, "{key} not defined by any provider");
        }
    }

    #[test]
    fn param_value_to_json() {
        assert_eq!(ParamValue::Int(4096).to_json(), serde_json::json!(4096));
        assert_eq!(ParamValue::Float(0.7).to_json(), serde_json::json!(0.7));
        assert_eq!(
            ParamValue::Str("2023-06-01").to_json(),
            serde_json::json!("2023-06-01")
        );
    }

    #[test]
    fn display_uses_display_name() {
        assert_eq!(ProviderKind::DeepSeek.to_string(), "DeepSeek");
    }
}
