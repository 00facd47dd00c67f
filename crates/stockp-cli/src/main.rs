mod cli;
mod error;
mod output;

use std::env;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use stockp_core::config::{FORECAST_WINDOW_ENV, ROW_LIMIT_ENV, TIMEOUT_MS_ENV};
use stockp_core::{PipelineConfig, ReqwestHttpClient, SnapshotBuilder};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let config = pipeline_config(&cli, |name| env::var(name).ok())?;
    debug!(
        cache_dir = %config.cache_dir.display(),
        row_limit = config.row_limit,
        forecast_window = config.forecast_window,
        "configuration resolved"
    );

    let builder = SnapshotBuilder::from_config(&config, Arc::new(ReqwestHttpClient::new()))?;
    let snapshot = builder.build().await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Snapshot(args) => output::render_json(&mut out, &snapshot, args.pretty)?,
        Command::Table(args) => output::render_table(&mut out, &snapshot, args.rows)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Environment configuration with command-line overrides on top. A flag
/// replaces its variable outright, so a bad environment value it overrides is
/// never parsed. Validation runs once, on the merged result.
fn pipeline_config<F>(cli: &Cli, lookup: F) -> Result<PipelineConfig, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = PipelineConfig::default();
    config.apply_env(|name| {
        let overridden = match name {
            ROW_LIMIT_ENV => cli.limit.is_some(),
            FORECAST_WINDOW_ENV => cli.window.is_some(),
            TIMEOUT_MS_ENV => cli.timeout_ms.is_some(),
            _ => false,
        };
        if overridden {
            None
        } else {
            lookup(name)
        }
    })?;

    if let Some(cache_dir) = &cli.cache_dir {
        config.cache_dir = cache_dir.clone();
    }
    if let Some(limit) = cli.limit {
        config.row_limit = limit;
    }
    if let Some(window) = cli.window {
        config.forecast_window = window;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    config.validate()?;
    Ok(config)
}
