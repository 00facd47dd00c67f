//! # stockp core
//!
//! Collects closing-price history for a fixed set of tickers and forecasts
//! the next close as a trailing mean.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | On-disk cache of raw history pages |
//! | [`config`] | Pipeline configuration and the tracked symbol set |
//! | [`domain`] | Domain models (Stock, Ticker, Label) |
//! | [`downloader`] | Concurrent, order-preserving batch fetch |
//! | [`error`] | Core error types |
//! | [`fetcher`] | Cache-aware single document fetch |
//! | [`forecast`] | Trailing-mean forecaster |
//! | [`http_client`] | HTTP client abstraction |
//! | [`parser`] | Row-limited, fault-tolerant table parser |
//! | [`snapshot`] | Once-built snapshot of series and forecasts |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ SnapshotBuilder  │
//! └────────┬─────────┘
//!          │ one batch
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Downloader       │────▶│ CachedFetcher    │──▶ cache dir / HttpClient
//! │ (task per source)│     └──────────────────┘
//! └────────┬─────────┘
//!          │ documents, input order
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ TableParser      │────▶│ TrailingMean     │
//! │ (Vec<Stock>)     │     │ (forecast)       │
//! └────────┬─────────┘     └────────┬─────────┘
//!          └────────────┬───────────┘
//!                       ▼
//!                  ┌──────────┐
//!                  │ Snapshot │
//!                  └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use stockp_core::{PipelineConfig, ReqwestHttpClient, SnapshotBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), stockp_core::CoreError> {
//!     let config = PipelineConfig::from_env()?;
//!     let builder = SnapshotBuilder::from_config(&config, Arc::new(ReqwestHttpClient::new()))?;
//!     let snapshot = builder.build().await?;
//!
//!     for (label, forecast) in snapshot.forecasts() {
//!         println!("{label}: {forecast:.2}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod domain;
pub mod downloader;
pub mod error;
pub mod fetcher;
pub mod forecast;
pub mod http_client;
pub mod parser;
pub mod snapshot;

#[cfg(test)]
mod test_support;

pub use cache::DocumentCache;
pub use config::{default_symbols, history_url, PipelineConfig, TrackedSymbol};
pub use domain::{Label, Stock, Ticker, STOCK_COLUMNS};
pub use downloader::{Downloader, TickerSource};
pub use error::{CoreError, CoreErrorKind, RecordError};
pub use fetcher::{CachedFetcher, Document, DocumentFetcher, DocumentRef};
pub use forecast::{Forecaster, Priced, TrailingMean, DEFAULT_FORECAST_WINDOW};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, DEFAULT_TIMEOUT_MS,
};
pub use parser::{FromCells, TableParser, DEFAULT_ROW_LIMIT};
pub use snapshot::{Snapshot, SnapshotBuilder, SymbolSlot};
