//! Error taxonomy for the query pipeline.
//!
//! Every failure anywhere in a query — bad configuration, connection
//! trouble, HTTP status, undecodable or unrecognized payload — is one
//! `QueryError` variant. Internally the pipeline stays typed; only the
//! dispatcher's outer edge renders the flat `"Error: ..."` string callers
//! see.

use thiserror::Error;

/// Coarse classification of a [`QueryError`].
///
/// `Config` errors are non-retryable until the caller fixes their setup;
/// `Transport` errors are potentially transient; the rest are fatal for the
/// call that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    Http,
    Decode,
    Schema,
}

/// A failure at any stage of one query call.
///
/// `provider` fields carry the provider's display name ("Anthropic",
/// "Ollama", ...) so rendered messages read naturally.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum QueryError {
    /// The resolved provider id has no registry entry.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// No credential found and the provider requires one.
    #[error("missing api key for {0}")]
    MissingApiKey(String),

    /// DNS/connect/TLS or other client-level failure before a response.
    #[error("failed to connect to {provider} API - {detail}")]
    Transport { provider: String, detail: String },

    /// The response body was empty.
    #[error("empty response from {provider} API")]
    EmptyResponse { provider: String },

    /// The response body was not valid JSON. `excerpt` holds the raw text,
    /// truncated.
    #[error("invalid response from {provider} API: {excerpt}")]
    Decode { provider: String, excerpt: String },

    /// HTTP status >= 400, with the best message the error envelope gave up.
    #[error("{provider} API returned status {status}: {message}")]
    Http {
        provider: String,
        status: u16,
        message: String,
    },

    /// The provider reported an error envelope inside a 2xx response.
    #[error("{provider} API error: {message}")]
    Api { provider: String, message: String },

    /// JSON decoded but matched neither the success nor the error shape.
    /// `excerpt` holds a truncated serialization for diagnostics.
    #[error("unexpected response format from {provider} API: {excerpt}")]
    Schema { provider: String, excerpt: String },
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::UnsupportedProvider(_) | QueryError::MissingApiKey(_) => ErrorKind::Config,
            QueryError::Transport { .. } => ErrorKind::Transport,
            QueryError::Http { .. } => ErrorKind::Http,
            QueryError::EmptyResponse { .. } | QueryError::Decode { .. } => ErrorKind::Decode,
            QueryError::Api { .. } | QueryError::Schema { .. } => ErrorKind::Schema,
        }
    }

    /// Render for the public boundary: a single `"Error: ..."` string.
    pub fn render(&self) -> String {
        format!("Error: {self}")
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
