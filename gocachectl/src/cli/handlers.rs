//! Command execution handlers

use crossterm::{
    cursor::MoveTo,
    terminal::{Clear, ClearType},
};
use gocache_core::{CacheRequest, Result};
use std::io::Write;

use crate::client::{CacheClient, Reply};
use crate::format::{format_help, format_reply, format_success, OutputFormat};
use crate::prompt::Prompt;

use super::commands::ShellCommand;

/// Handle login command
pub fn handle_login<W: Write>(
    client: &mut CacheClient,
    prompt: &mut dyn Prompt,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Let's login")?;
    out.flush()?;
    client.set_login(prompt)
}

/// Handle host command
pub fn handle_host<W: Write>(
    client: &mut CacheClient,
    prompt: &mut dyn Prompt,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Enter hostname and port")?;
    out.flush()?;
    let host = client.set_host(prompt)?;
    writeln!(out, "{}", format_success(&format!("Hostname set to {}", host)))?;
    Ok(())
}

/// Handle keys command
pub async fn handle_keys<W: Write>(
    client: &CacheClient,
    args: &[String],
    out: &mut W,
    format: &OutputFormat,
) -> Result<()> {
    CacheRequest::keys(args)?;
    let reply = client.list_keys().await?;
    print_reply(out, &reply, format)
}

/// Handle key command
pub async fn handle_key<W: Write>(
    client: &CacheClient,
    args: &[String],
    out: &mut W,
    format: &OutputFormat,
) -> Result<()> {
    let reply = client.get_value(args).await?;
    print_reply(out, &reply, format)
}

/// Handle set command
pub async fn handle_set<W: Write>(
    client: &CacheClient,
    args: &[String],
    out: &mut W,
    format: &OutputFormat,
) -> Result<()> {
    let reply = client.set_value(args).await?;
    print_reply(out, &reply, format)
}

/// Handle remove command
pub async fn handle_remove<W: Write>(
    client: &CacheClient,
    args: &[String],
    out: &mut W,
    format: &OutputFormat,
) -> Result<()> {
    let reply = client.remove_key(args).await?;
    print_reply(out, &reply, format)
}

/// Handle help command
pub fn handle_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", format_help(&ShellCommand::ALL))?;
    Ok(())
}

/// Handle clear command
pub fn handle_clear<W: Write>(out: &mut W) -> Result<()> {
    crossterm::execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

fn print_reply<W: Write>(out: &mut W, reply: &Reply, format: &OutputFormat) -> Result<()> {
    writeln!(out, "{}", format_reply(&reply.body, format))?;
    Ok(())
}
