//! Shared CLI helpers — response printing and the REPL banner.

use colored::Colorize;

/// Print an answer (or an "Error: ..." outcome) to stdout.
pub fn print_response(response: &str) {
    println!();
    if response.starts_with("Error: ") {
        println!("{}", response.red());
    } else {
        println!("{}", "Switchboard".cyan().bold());
        println!("{response}");
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner(provider: &str, model: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "Switchboard".cyan().bold(), version.dimmed());
    println!(
        "{}",
        format!("{provider} · {model} — type a message, \"/clear\" to reset, \"exit\" to quit.")
            .dimmed()
    );
    println!();
}

/// Print a waiting placeholder while the query is in flight.
pub fn print_thinking() {
    eprint!("{}", "… waiting".dimmed());
}

/// Clear the waiting placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}
