//! GoCache CLI
//!
//! Interactive client for a GoCache server. Starts a shell by default;
//! `gocachectl exit <command> [args...]` runs one command and exits.

use anyhow::{Context, Result};
use clap::Parser;
use gocachectl::cli::{Cli, OutputFormat, Shell, ONE_SHOT_TOKEN};
use gocachectl::client::CacheClient;
use gocachectl::config::CliConfig;
use gocachectl::prompt::TerminalPrompt;
use gocachectl::session::Session;
use std::time::Duration;
use tracing::{debug, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layers only fill unset values: CLI args → env → file → defaults
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.verbose);
    debug!(?config, "configuration loaded");

    let output_format = match config.output_format.as_str() {
        "pretty" => OutputFormat::Pretty,
        _ => OutputFormat::Raw,
    };

    let session = Session::new(&config.host, &config.username, &config.password);
    let client = CacheClient::with_config(
        session,
        config.timeout,
        config.retry_count,
        Duration::from_millis(config.retry_wait_ms),
    )
    .context("Failed to create cache client")?;

    let mut shell = Shell::new(
        client,
        TerminalPrompt::new(),
        std::io::stdout(),
        (&output_format).into(),
    );

    match cli.args.split_first() {
        Some((first, command)) if first == ONE_SHOT_TOKEN => {
            if !shell.process(command).await? {
                std::process::exit(1);
            }
        }
        Some((first, _)) => {
            warn!(
                argument = %first,
                "ignoring positional arguments, use `{} <command>` to run a single command",
                ONE_SHOT_TOKEN
            );
            shell.run().await?;
        }
        None => shell.run().await?,
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<CliConfig> {
    let mut builder = CliConfig::builder();

    if let Some(ref host) = cli.host {
        builder = builder.with_host(host)?;
    }
    if let Some(ref username) = cli.username {
        builder = builder.with_username(username);
    }
    if let Some(ref password) = cli.password {
        builder = builder.with_password(password);
    }
    if let Some(ref format) = cli.format {
        builder = builder.with_output_format(format.as_str())?;
    }
    if cli.verbose {
        builder = builder.with_verbose(true);
    }

    builder = builder.with_env_overrides();

    if !cli.no_config {
        builder = builder.with_config_file(cli.config.as_deref())?;
    }

    builder.build()
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
