//! CLI argument definitions for stockp.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `snapshot` | Build the snapshot and print it as JSON |
//! | `table` | Build the snapshot and print forecasts and latest rows |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--cache-dir` | `$STOCKP_CACHE_DIR` | Directory holding cached history pages |
//! | `--limit` | `30` | Entities kept per symbol |
//! | `--window` | `3` | Entries averaged by the forecast |
//! | `--timeout-ms` | `10000` | Per-request timeout for remote fetches |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Closing price collector and forecaster.
#[derive(Debug, Parser)]
#[command(
    name = "stockp",
    author,
    version,
    about = "Collects closing prices and forecasts the next close"
)]
pub struct Cli {
    /// Directory holding one cached history page per ticker.
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Maximum number of rows kept per symbol.
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Number of newest closes averaged by the forecast.
    #[arg(long, global = true)]
    pub window: Option<usize>,

    /// Per-request timeout for remote fetches in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the snapshot once and print `limit`, `prices` and `forecasts` as JSON.
    ///
    /// # Examples
    ///
    ///   stockp snapshot
    ///   stockp snapshot --pretty --limit 10
    Snapshot(SnapshotArgs),

    /// Print each symbol's forecast and its newest rows.
    ///
    /// # Examples
    ///
    ///   stockp table
    ///   stockp table --rows 3
    Table(TableArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Rows printed per symbol.
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
}
