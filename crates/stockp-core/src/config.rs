//! Pipeline configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STOCKP_CACHE_DIR` | `$STOCKP_HOME/cache` | Directory holding cached history pages |
//! | `STOCKP_HOME` | `$HOME/.stockp` | Root directory for stockp data |
//! | `STOCKP_ROW_LIMIT` | `30` | Entities kept per symbol |
//! | `STOCKP_FORECAST_WINDOW` | `3` | Entries averaged by the forecast |
//! | `STOCKP_TIMEOUT_MS` | `10000` | Per-request timeout for remote fetches |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::downloader::TickerSource;
use crate::forecast::DEFAULT_FORECAST_WINDOW;
use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::parser::DEFAULT_ROW_LIMIT;
use crate::{CoreError, Label, Ticker};

/// A labelled symbol and where its history comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSymbol {
    pub label: Label,
    pub source: TickerSource,
}

impl TrackedSymbol {
    pub fn new(label: Label, source: TickerSource) -> Self {
        Self { label, source }
    }
}

/// History page URL for `ticker`.
pub fn history_url(ticker: &Ticker) -> String {
    format!("https://finance.yahoo.com/quote/{ticker}/history?p={ticker}")
}

/// The fixed symbol set, in rendering order.
pub fn default_symbols() -> Vec<TrackedSymbol> {
    [
        (Label::Corn, "CORN"),
        (Label::Gasoline, "UGA"),
        (Label::Nasdaq, "NDAQ"),
    ]
    .into_iter()
    .map(|(label, ticker)| {
        let ticker = Ticker::from_static(ticker);
        let url = history_url(&ticker);
        TrackedSymbol::new(label, TickerSource::new(ticker, url))
    })
    .collect()
}

/// Settings for one snapshot build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory holding one cached page per ticker.
    pub cache_dir: PathBuf,
    /// Maximum number of entities kept per symbol.
    pub row_limit: usize,
    /// Number of newest entries averaged by the forecast.
    pub forecast_window: usize,
    /// Per-request timeout for remote fetches.
    pub timeout_ms: u64,
    pub symbols: Vec<TrackedSymbol>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_dir: resolve_cache_dir(),
            row_limit: DEFAULT_ROW_LIMIT,
            forecast_window: DEFAULT_FORECAST_WINDOW,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            symbols: default_symbols(),
        }
    }
}

/// Environment variable overriding [`PipelineConfig::row_limit`].
pub const ROW_LIMIT_ENV: &str = "STOCKP_ROW_LIMIT";
/// Environment variable overriding [`PipelineConfig::forecast_window`].
pub const FORECAST_WINDOW_ENV: &str = "STOCKP_FORECAST_WINDOW";
/// Environment variable overriding [`PipelineConfig::timeout_ms`].
pub const TIMEOUT_MS_ENV: &str = "STOCKP_TIMEOUT_MS";

impl PipelineConfig {
    /// Defaults with `STOCKP_*` environment overrides applied, validated.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = Self::default();
        config.apply_env(|name| env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides looked up by variable name. Values are parsed but not
    /// validated, so callers can layer further overrides before `validate`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(row_limit) = env_override(&lookup, ROW_LIMIT_ENV)? {
            self.row_limit = row_limit;
        }
        if let Some(window) = env_override(&lookup, FORECAST_WINDOW_ENV)? {
            self.forecast_window = window;
        }
        if let Some(timeout_ms) = env_override(&lookup, TIMEOUT_MS_ENV)? {
            self.timeout_ms = timeout_ms;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.row_limit == 0 {
            return Err(CoreError::Config(String::from(
                "row limit must be greater than zero",
            )));
        }
        if self.forecast_window == 0 {
            return Err(CoreError::Config(String::from(
                "forecast window must be greater than zero",
            )));
        }
        if self.timeout_ms == 0 {
            return Err(CoreError::Config(String::from(
                "timeout must be greater than zero",
            )));
        }
        if self.symbols.is_empty() {
            return Err(CoreError::Config(String::from(
                "at least one symbol must be tracked",
            )));
        }
        Ok(())
    }
}

fn env_override<T, F>(lookup: &F, name: &str) -> Result<Option<T>, CoreError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CoreError::Config(format!("{name} has an invalid value: '{value}'"))),
        _ => Ok(None),
    }
}

fn resolve_cache_dir() -> PathBuf {
    if let Some(path) = env::var_os("STOCKP_CACHE_DIR") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    resolve_stockp_home().join("cache")
}

fn resolve_stockp_home() -> PathBuf {
    if let Some(path) = env::var_os("STOCKP_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".stockp");
    }

    PathBuf::from(".stockp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_symbols_are_ordered_and_point_at_history_pages() {
        let symbols = default_symbols();
        let labels: Vec<_> = symbols.iter().map(|symbol| symbol.label).collect();
        assert_eq!(labels, Label::ALL);
        assert_eq!(
            symbols[1].source.url,
            "https://finance.yahoo.com/quote/UGA/history?p=UGA"
        );
        assert_eq!(symbols[2].source.ticker.as_str(), "NDAQ");
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let config = PipelineConfig {
            row_limit: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            forecast_window: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_symbol_list() {
        let config = PipelineConfig {
            symbols: Vec::new(),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.row_limit, 30);
        assert_eq!(config.forecast_window, 3);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn apply_env_overrides_without_validating() {
        let mut config = PipelineConfig::default();
        config
            .apply_env(|name| match name {
                ROW_LIMIT_ENV => Some(String::from(" 0 ")),
                TIMEOUT_MS_ENV => Some(String::from("2500")),
                _ => None,
            })
            .expect("values parse");

        assert_eq!(config.row_limit, 0);
        assert_eq!(config.timeout_ms, 2_500);
        assert_eq!(config.forecast_window, DEFAULT_FORECAST_WINDOW);
        assert!(config.validate().is_err());
    }

    #[test]
    fn apply_env_rejects_unparseable_values() {
        let mut config = PipelineConfig::default();
        let error = config
            .apply_env(|name| (name == FORECAST_WINDOW_ENV).then(|| String::from("three")))
            .expect_err("must fail");
        assert!(error.to_string().contains(FORECAST_WINDOW_ENV));
    }
}
