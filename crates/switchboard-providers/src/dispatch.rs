//! Dispatcher — the single entry point threading a call through resolve →
//! build → send → parse.
//!
//! Two layers: [`run_query`] is the typed pipeline that tests and embedders
//! compose with; [`query`] is the outward contract. Exactly one string comes
//! back from `query`: the answer, or an `"Error: ..."` message from whatever
//! stage failed. There is no partial success.

use tracing::{debug, info};

use switchboard_core::{Config, Message, QueryError};

use crate::parse::parse;
use crate::registry::{CredentialStore, EnvCredentialStore};
use crate::request;
use crate::resolve::resolve;
use crate::transport::Handler;

/// Run one query with explicit collaborators.
///
/// Fails fast on configuration errors before anything touches the network.
pub async fn run_query(
    messages: &[Message],
    config: &Config,
    provider_override: Option<&str>,
    credentials: &dyn CredentialStore,
    handler: &Handler,
) -> Result<String, QueryError> {
    let resolved = resolve(config, provider_override, credentials)?;

    info!(
        provider = resolved.provider.display_name(),
        model = %resolved.model,
        messages = messages.len(),
        "dispatching query"
    );

    let body = request::build(&resolved, messages);
    let raw = handler.send(&resolved, &body).await?;
    let answer = parse(resolved.provider, &raw)?;

    debug!(
        provider = resolved.provider.display_name(),
        chars = answer.len(),
        "query answered"
    );
    Ok(answer)
}

/// Run one query with the default collaborators (env credentials, fresh
/// handler) and flatten the outcome to a single string.
pub async fn query(messages: &[Message], config: &Config) -> String {
    let handler = Handler::new();
    match run_query(messages, config, None, &EnvCredentialStore, &handler).await {
        Ok(answer) => answer,
        Err(e) => e.render(),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
