//! `switchboard status` — show configuration and provider credentials.

use anyhow::Result;
use colored::Colorize;

use switchboard_core::config::{get_config_path, load_config, DEFAULT_PROVIDER};
use switchboard_providers::registry::{CredentialStore, EnvCredentialStore, ALL_PROVIDERS};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "Switchboard Status".cyan().bold());
    println!();

    // Config file
    let config_exists = config_path.exists();
    println!(
        "  {:<12} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".dimmed().to_string()
        }
    );

    // Active selection
    let provider = if config.provider.is_empty() {
        format!("{DEFAULT_PROVIDER} (default)")
    } else {
        config.provider.clone()
    };
    println!("  {:<12} {}", "Provider:".bold(), provider);
    if let Some(model) = &config.model {
        println!("  {:<12} {}", "Model:".bold(), model);
    }
    if config.features.debug {
        println!("  {:<12} {}", "Debug:".bold(), "on".yellow());
    }

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    let credentials = EnvCredentialStore;
    for kind in ALL_PROVIDERS {
        let defaults = kind.defaults();
        let status = if !kind.requires_api_key() {
            format!("{} (no key needed)", "✓".green())
        } else if config.api_key.is_some() || credentials.api_key(*kind).is_some() {
            format!("{} (key set)", "✓".green())
        } else {
            format!("· set {}", defaults.env_key).dimmed().to_string()
        };
        println!(
            "    {:<12} {:<28} {}",
            defaults.display_name, defaults.default_model, status
        );
    }

    println!();

    Ok(())
}
