//! Core layer for Switchboard.
//!
//! Everything here is provider-independent: the conversation model, the
//! user-facing configuration schema and loader, the error taxonomy, and a
//! few small utilities. Provider-specific behavior (wire shapes, auth,
//! parsing) lives in `switchboard-providers`.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

// Re-export the types callers touch most often
pub use config::{load_config, save_config, Config, Features, ProviderSettings};
pub use error::{ErrorKind, QueryError};
pub use types::{ChatHistory, HistoryMeta, Message, Role};
