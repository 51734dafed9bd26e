//! Provider layer for Switchboard.
//!
//! Five LLM HTTP APIs, five materially different wire protocols, one
//! contract. A query flows one way through this crate:
//!
//! resolve ([`resolve`]) → transform + build ([`transform`], [`request`]) →
//! send ([`transport`]) → parse ([`parse`]), threaded together by
//! [`dispatch::query`], which is the single public entry point most callers
//! need.
//!
//! # Architecture
//!
//! - [`registry`] — closed [`registry::ProviderKind`] enum + static defaults
//!   per provider, plus the credential store seam
//! - [`resolve`] — merges caller config with registry defaults into a
//!   per-call [`resolve::ResolvedConfig`]
//! - [`transform`] — provider-neutral messages → provider wire messages
//! - [`request`] — wire messages + resolved config → request body
//! - [`transport`] — HTTP POST, per-provider auth, raw outcome classification
//! - [`parse`] — provider-native success/error JSON → normalized text
//! - [`dispatch`] — the pipeline, with the flat-string edge contract

pub mod dispatch;
pub mod parse;
pub mod registry;
pub mod request;
pub mod resolve;
pub mod transform;
pub mod transport;

// Re-export the types callers touch most often
pub use dispatch::{query, run_query};
pub use registry::{CredentialStore, EnvCredentialStore, ProviderDefaults, ProviderKind};
pub use resolve::{resolve, ResolvedConfig};
pub use transport::Handler;
