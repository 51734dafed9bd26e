//! Config resolver — merges caller configuration with registry defaults
//! into the per-call [`ResolvedConfig`].
//!
//! Resolution is a pure function over its inputs plus the read-only
//! registry: the caller's `Config` is never mutated, and every call builds a
//! fresh value, so resolved configs are never shared between queries.

use serde_json::{Map, Value};

use switchboard_core::config::{Config, DEFAULT_PROVIDER};
use switchboard_core::QueryError;

use crate::registry::{CredentialStore, ProviderKind};

// ─────────────────────────────────────────────
// ResolvedConfig
// ─────────────────────────────────────────────

/// The fully merged configuration used for exactly one query call.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub provider: ProviderKind,
    /// `None` only for providers that operate without a key.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Additional request parameters. Header-only protocol metadata keys
    /// stay in here too; the request builder excludes them from the body and
    /// the transport reads them for headers.
    pub parameters: Map<String, Value>,
    pub debug: bool,
}

// ─────────────────────────────────────────────
// resolve
// ─────────────────────────────────────────────

/// Merge `config` with the matched provider's defaults.
///
/// Provider id precedence: `provider_override` > `config.provider` >
/// [`DEFAULT_PROVIDER`]. Within the merge the caller always wins over
/// defaults; the top-level `model`/`base_url` fields win over the
/// per-provider settings bucket.
pub fn resolve(
    config: &Config,
    provider_override: Option<&str>,
    credentials: &dyn CredentialStore,
) -> Result<ResolvedConfig, QueryError> {
    let id = provider_override
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| {
            if config.provider.is_empty() {
                DEFAULT_PROVIDER
            } else {
                config.provider.as_str()
            }
        });
    let provider = ProviderKind::parse_id(id)?;
    let defaults = provider.defaults();
    let settings = config.provider_settings.get(provider.id());

    let model = config
        .model
        .clone()
        .or_else(|| settings.and_then(|s| s.model.clone()))
        .unwrap_or_else(|| defaults.default_model.to_string());

    let base_url = config
        .base_url
        .clone()
        .or_else(|| settings.and_then(|s| s.base_url.clone()))
        .unwrap_or_else(|| defaults.base_url.to_string());

    // Caller parameters first, then defaults fill whatever is missing.
    let mut parameters: Map<String, Value> = settings
        .map(|s| s.parameters.clone().into_iter().collect())
        .unwrap_or_default();
    for (key, value) in defaults.parameters {
        parameters
            .entry(key.to_string())
            .or_insert_with(|| value.to_json());
    }

    let api_key = config
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
        .or_else(|| credentials.api_key(provider));
    if api_key.is_none() && provider.requires_api_key() {
        return Err(QueryError::MissingApiKey(
            provider.display_name().to_string(),
        ));
    }

    Ok(ResolvedConfig {
        provider,
        api_key,
        model,
        base_url,
        parameters,
        debug: config.features.debug,
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
