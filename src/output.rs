//! Text and JSON output formatting for CLI commands.

use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Print a single item: its `Display` form as text, or pretty JSON.
pub fn print_item<T: Serialize + std::fmt::Display>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", item);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("✓ {}", msg),
        OutputFormat::Json => println!("{}", serde_json::json!({ "ok": true, "message": msg })),
    }
}
