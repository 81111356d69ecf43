//! Command router
//!
//! The [`Shell`] owns the cache client and routes each input line to a
//! handler. It runs either as a read-eval-print loop or once over process
//! arguments. Command failures are printed and never end the session.

use gocache_core::{CacheError, Result};
use std::io::Write;
use tracing::debug;

use crate::client::CacheClient;
use crate::format::{format_error, OutputFormat};
use crate::prompt::Prompt;

use super::commands::ShellCommand;
use super::handlers::*;
use super::tokenize::split_line;

/// Printed when the interactive loop starts.
pub const BANNER: &str = "GoCache interactive client";

/// Shown before each interactive input line.
pub const PROMPT: &str = ">>> ";

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive front end over a [`CacheClient`].
pub struct Shell<P: Prompt, W: Write> {
    client: CacheClient,
    prompt: P,
    out: W,
    format: OutputFormat,
}

impl<P: Prompt, W: Write> Shell<P, W> {
    pub fn new(client: CacheClient, prompt: P, out: W, format: OutputFormat) -> Self {
        Self {
            client,
            prompt,
            out,
            format,
        }
    }

    pub fn client(&self) -> &CacheClient {
        &self.client
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read and run commands until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Only failures of the prompt or the output sink end the loop.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{}", BANNER)?;

        loop {
            self.out.flush()?;
            let Some(line) = self.prompt.read_line(PROMPT)? else {
                break;
            };

            let args = match split_line(&line) {
                Ok(args) => args,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };

            match self.execute(&args).await {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => self.report(&e)?,
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Run a single command given as separate arguments.
    ///
    /// Returns `false` if the command reported an error.
    pub async fn process(&mut self, args: &[String]) -> Result<bool> {
        let succeeded = match self.execute(args).await {
            Ok(_) => true,
            Err(e) => {
                self.report(&e)?;
                false
            }
        };

        self.out.flush()?;
        Ok(succeeded)
    }

    /// Dispatch one tokenized command line.
    pub async fn execute(&mut self, args: &[String]) -> Result<Flow> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Flow::Continue);
        };

        let command = ShellCommand::from_name(name)
            .ok_or_else(|| CacheError::UnknownCommand(name.clone()))?;
        debug!(command = command.name(), args = rest.len(), "dispatching command");

        match command {
            ShellCommand::Login => handle_login(&mut self.client, &mut self.prompt, &mut self.out)?,
            ShellCommand::Host => handle_host(&mut self.client, &mut self.prompt, &mut self.out)?,
            ShellCommand::Keys => {
                handle_keys(&self.client, rest, &mut self.out, &self.format).await?
            }
            ShellCommand::Key => {
                handle_key(&self.client, rest, &mut self.out, &self.format).await?
            }
            ShellCommand::Set => {
                handle_set(&self.client, rest, &mut self.out, &self.format).await?
            }
            ShellCommand::Remove => {
                handle_remove(&self.client, rest, &mut self.out, &self.format).await?
            }
            ShellCommand::Help => handle_help(&mut self.out)?,
            ShellCommand::Clear => handle_clear(&mut self.out)?,
            ShellCommand::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    fn report(&mut self, error: &CacheError) -> Result<()> {
        debug!(usage = error.is_usage(), %error, "command failed");
        writeln!(self.out, "{}", format_error(&error.to_string()))?;
        Ok(())
    }
}
