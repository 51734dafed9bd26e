//! Switchboard CLI — entry point.
//!
//! # Commands
//!
//! - `switchboard chat [-m MESSAGE]` — one-shot query or interactive REPL
//! - `switchboard status` — show configuration and provider credentials

mod helpers;
mod repl;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

use switchboard_core::config::load_config;
use switchboard_providers::dispatch;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Switchboard — one conversation, five LLM providers
#[derive(Parser)]
#[command(name = "switchboard", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a query (single-shot with -m, interactive REPL otherwise)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Provider id override (anthropic, openai, deepseek, gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model id override
        #[arg(long)]
        model: Option<String>,

        /// System instruction prepended to the conversation
        #[arg(short, long)]
        system: Option<String>,

        /// Enable debug logging (raw requests and responses)
        #[arg(long, default_value_t = false)]
        debug: bool,
    },

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            message,
            provider,
            model,
            system,
            debug,
        } => {
            init_logging(debug);
            run_chat(message, provider, model, system, debug).await
        }
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(
    message: Option<String>,
    provider: Option<String>,
    model: Option<String>,
    system: Option<String>,
    debug: bool,
) -> Result<()> {
    let mut config = load_config(None);
    if let Some(provider) = provider {
        config.provider = provider;
    }
    if let Some(model) = model {
        config.model = Some(model);
    }
    if debug {
        config.features.debug = true;
    }

    match message {
        Some(text) => {
            // Single-shot mode
            let mut messages = Vec::new();
            if let Some(instruction) = system {
                messages.push(switchboard_core::Message::system(instruction));
            }
            messages.push(switchboard_core::Message::user(text));

            let answer = dispatch::query(&messages, &config).await;
            helpers::print_response(&answer);
        }
        None => {
            // Interactive REPL mode
            repl::run(config, system).await?;
        }
    }

    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("switchboard_core=debug,switchboard_providers=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
