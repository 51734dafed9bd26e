//! Interactive REPL — a readline loop around one [`ChatHistory`].
//!
//! Uses `rustyline` for line editing with persistent input history. The
//! conversation itself lives in a `ChatHistory`: every turn is appended in
//! order, and `/clear` resets the conversation while keeping the system
//! instruction.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use switchboard_core::config::{Config, DEFAULT_PROVIDER};
use switchboard_core::{ChatHistory, Message};
use switchboard_providers::{dispatch, ProviderKind};

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub async fn run(config: Config, system: Option<String>) -> Result<()> {
    let (provider_name, model_name) = banner_info(&config);
    helpers::print_banner(provider_name, &model_name);

    let mut history = match system {
        Some(instruction) => ChatHistory::with_system(instruction),
        None => ChatHistory::new(),
    };
    history.meta.model = Some(model_name);

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => break,
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye!");
            break;
        }

        if trimmed == "/clear" {
            history.clear();
            println!("(conversation cleared)");
            continue;
        }

        let _ = editor.add_history_entry(&input);

        debug!(input = trimmed, turns = history.len(), "processing input");
        history.push(Message::user(trimmed));
        helpers::print_thinking();

        let answer = dispatch::query(history.messages(), &config).await;
        helpers::clear_thinking();
        helpers::print_response(&answer);

        if answer.starts_with("Error: ") {
            // Keep the history free of failed exchanges so a retry resends
            // a clean conversation.
            history.pop();
        } else {
            history.push(Message::assistant(answer));
        }
    }

    save_history(&mut editor);

    Ok(())
}

/// Provider display name and model shown in the banner.
fn banner_info(config: &Config) -> (&'static str, String) {
    let id = if config.provider.is_empty() {
        DEFAULT_PROVIDER
    } else {
        &config.provider
    };
    match ProviderKind::from_id(id) {
        Some(kind) => {
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| kind.defaults().default_model.to_string());
            (kind.display_name(), model)
        }
        None => ("unknown provider", config.model.clone().unwrap_or_default()),
    }
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save input history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the input history file.
fn history_path() -> std::path::PathBuf {
    switchboard_core::utils::get_data_path()
        .join("history")
        .join("cli_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("/quit"));
        assert!(is_exit_command(":q"));
        assert!(!is_exit_command("hello"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".switchboard"));
        assert!(path.to_string_lossy().contains("cli_history"));
    }

    #[test]
    fn banner_info_falls_back_to_default_provider() {
        let (provider, model) = banner_info(&Config::default());
        assert_eq!(provider, "Anthropic");
        assert_eq!(model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn banner_info_honors_overrides() {
        let config = Config {
            provider: "ollama".to_string(),
            model: Some("qwen2.5".to_string()),
            ..Config::default()
        };
        let (provider, model) = banner_info(&config);
        assert_eq!(provider, "Ollama");
        assert_eq!(model, "qwen2.5");
    }
}
