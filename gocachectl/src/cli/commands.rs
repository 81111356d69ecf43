//! Process arguments and shell command definitions

use clap::Parser;
use std::path::PathBuf;

/// First positional argument that switches to one-shot mode.
pub const ONE_SHOT_TOKEN: &str = "exit";

/// GoCache interactive client
#[derive(Parser, Debug)]
#[command(name = "gocachectl")]
#[command(version, about = "GoCache interactive client", long_about = None)]
pub struct Cli {
    /// Host name for the GoCache server [default: localhost:8081]
    #[arg(short = 's', long)]
    pub host: Option<String>,

    /// Username for HTTP basic authentication
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for HTTP basic authentication
    #[arg(short, long)]
    pub password: Option<String>,

    /// Output format for reply bodies (overrides config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path (default: ~/.config/gocache/cli.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Don't load config file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// `exit <command> [args...]` runs one command instead of the shell.
    /// Flags may follow the command; put values starting with `-` after `--`
    #[arg(allow_negative_numbers = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Reply bodies exactly as received
    Raw,
    /// Re-indent JSON reply bodies
    Pretty,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Pretty => "pretty",
        }
    }
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Raw => crate::format::OutputFormat::Raw,
            OutputFormat::Pretty => crate::format::OutputFormat::Pretty,
        }
    }
}

/// Commands understood by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Login,
    Host,
    Keys,
    Key,
    Set,
    Remove,
    Help,
    Clear,
    Exit,
}

impl ShellCommand {
    /// Registration order, also the order `help` lists them in.
    pub const ALL: [ShellCommand; 9] = [
        ShellCommand::Login,
        ShellCommand::Host,
        ShellCommand::Keys,
        ShellCommand::Key,
        ShellCommand::Set,
        ShellCommand::Remove,
        ShellCommand::Help,
        ShellCommand::Clear,
        ShellCommand::Exit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShellCommand::Login => "login",
            ShellCommand::Host => "host",
            ShellCommand::Keys => "keys",
            ShellCommand::Key => "key",
            ShellCommand::Set => "set",
            ShellCommand::Remove => "remove",
            ShellCommand::Help => "help",
            ShellCommand::Clear => "clear",
            ShellCommand::Exit => "exit",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            ShellCommand::Key => "key <key> [internal-key]",
            ShellCommand::Set => "set <type> <key> <value>",
            ShellCommand::Remove => "remove <key>",
            other => other.name(),
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            ShellCommand::Login => "set username and password for HTTP basic authentication",
            ShellCommand::Host => "set hostname and port of the cache server",
            ShellCommand::Keys => "list all keys in the cache",
            ShellCommand::Key => "get a value, or one entry of a list or dictionary",
            ShellCommand::Set => "store a JSON value as string, list or dictionary",
            ShellCommand::Remove => "delete a key",
            ShellCommand::Help => "display help",
            ShellCommand::Clear => "clear the screen",
            ShellCommand::Exit => "exit the program",
        }
    }

    /// Look up a command by the name typed at the prompt.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}
