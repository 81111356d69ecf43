//! Line and secret input.
//!
//! Commands never touch the terminal directly. They ask a [`Prompt`] for
//! input, which keeps the cache client free of any terminal library and lets
//! tests script the answers.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of user input for interactive commands.
pub trait Prompt {
    /// Show `prompt` and read one line without its line ending.
    ///
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Show `prompt` and read one line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;
}

/// [`Prompt`] over the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        // Piped input has no echo to suppress
        if !io::stdin().is_terminal() {
            return self.read_line(prompt)?.ok_or_else(input_closed);
        }

        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let secret = {
            let _raw = RawMode::enable()?;
            read_masked()
        };

        writeln!(stdout)?;
        secret
    }
}

/// Raw mode for the lifetime of the guard.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Collect key presses until Enter. Nothing is echoed.
fn read_masked() -> io::Result<String> {
    let mut secret = String::new();

    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };

        if kind == KeyEventKind::Release {
            continue;
        }

        match code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(
                    io::ErrorKind::Interrupted,
                    "password entry cancelled",
                ));
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                if secret.is_empty() {
                    return Err(input_closed());
                }
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}

pub(crate) fn input_closed() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(&['\n', '\r'][..])
}
