//! Small shared helpers — path resolution and diagnostic truncation.

use std::path::PathBuf;

/// Get the Switchboard data directory (e.g. `~/.switchboard/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".switchboard")
}

/// Truncate a string to at most `max_chars` characters for diagnostics.
/// Unicode-safe; appends "..." only when something was cut.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
