//! Shell command definitions and handlers
//!
//! This module organizes the CLI into logical submodules:
//! - [`commands`] - Process arguments and shell command definitions
//! - [`handlers`] - Command execution handlers
//! - [`shell`] - The command router and its interactive loop
//! - [`tokenize`] - Splitting input lines into arguments

mod commands;
mod handlers;
mod shell;
mod tokenize;

pub use commands::*;
pub use handlers::*;
pub use shell::*;
pub use tokenize::split_line;
