//! Output formatting utilities for the CLI
//!
//! Replies are printed as the server sent them, with colors.

use colored::*;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::ShellCommand;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Body exactly as received
    #[default]
    Raw,
    /// JSON bodies re-indented, anything else as received
    Pretty,
}

/// Format a reply body
pub fn format_reply(body: &str, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Raw => body.cyan().to_string(),
        OutputFormat::Pretty => match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| body.to_string())
                .cyan()
                .to_string(),
            Err(_) => body.cyan().to_string(),
        },
    }
}

/// Format error message
pub fn format_error(message: &str) -> String {
    format!("error: {}", message).red().bold().to_string()
}

/// Format success message
pub fn format_success(message: &str) -> String {
    message.green().to_string()
}

/// Format the command table shown by `help`
pub fn format_help(commands: &[ShellCommand]) -> String {
    #[derive(Tabled)]
    struct CommandRow {
        #[tabled(rename = "Command")]
        usage: String,
        #[tabled(rename = "Description")]
        help: String,
    }

    let rows: Vec<CommandRow> = commands
        .iter()
        .map(|command| CommandRow {
            usage: command.usage().cyan().to_string(),
            help: command.help().to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!("{}\n{}", "Commands:".bold(), table)
}
