//! Configuration schema.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! `#[serde(rename_all = "camelCase")]` handles the conversion.
//!
//! Every field may be omitted. The resolver in `switchboard-providers` fills
//! gaps from the provider registry's defaults at query time; this struct only
//! records what the caller actually chose.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provider used when neither the caller nor a per-call override names one.
pub const DEFAULT_PROVIDER: &str = "anthropic";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.switchboard/config.json` + env vars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Provider id ("anthropic", "openai", "deepseek", "gemini", "ollama").
    /// Empty means: use [`DEFAULT_PROVIDER`].
    pub provider: String,
    /// Model override. Wins over per-provider settings and registry defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Explicit API key. Wins over the credential store lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (proxies, self-hosted endpoints).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-provider overrides, keyed by provider id.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub provider_settings: HashMap<String, ProviderSettings>,
    pub features: Features,
}

/// Overrides scoped to one provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Additional request parameters (temperature, max tokens, ...). Merged
    /// key-by-key over registry defaults; caller wins.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub parameters: HashMap<String, serde_json::Value>,
}

/// Feature toggles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Features {
    /// When true, the raw outbound request and inbound response are emitted
    /// to the diagnostic log.
    pub debug: bool,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
