//! Once-built snapshot of every tracked symbol's series and forecast.
//!
//! [`SnapshotBuilder::build`] downloads all documents in one batch, parses each
//! into a capped newest-first series and forecasts it. The resulting
//! [`Snapshot`] is immutable; share it behind an `Arc` for concurrent readers.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::{PipelineConfig, TrackedSymbol};
use crate::downloader::{Downloader, TickerSource};
use crate::fetcher::CachedFetcher;
use crate::forecast::{Forecaster, TrailingMean};
use crate::http_client::HttpClient;
use crate::parser::TableParser;
use crate::{CoreError, DocumentCache, Label, Stock, Ticker};

/// One tracked symbol with its parsed series and forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSlot {
    pub label: Label,
    pub ticker: Ticker,
    /// Newest first.
    pub stocks: Vec<Stock>,
    pub forecast: f64,
}

impl SymbolSlot {
    pub fn closes(&self) -> Vec<f64> {
        self.stocks.iter().map(Stock::close).collect()
    }

    /// Closing prices as a JSON array, newest first.
    pub fn price_series(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.closes())
    }
}

/// Immutable result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    limit: usize,
    prices: Vec<(Label, String)>,
    forecasts: Vec<(Label, f64)>,
    #[serde(skip)]
    slots: Vec<SymbolSlot>,
}

impl Snapshot {
    pub fn from_slots(limit: usize, slots: Vec<SymbolSlot>) -> Result<Self, CoreError> {
        let prices = slots
            .iter()
            .map(|slot| slot.price_series().map(|series| (slot.label, series)))
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        let forecasts = slots.iter().map(|slot| (slot.label, slot.forecast)).collect();

        Ok(Self {
            limit,
            prices,
            forecasts,
            slots,
        })
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// `(label, JSON array of closing prices)` in symbol order.
    pub fn prices(&self) -> &[(Label, String)] {
        &self.prices
    }

    /// `(label, forecast)` in symbol order.
    pub fn forecasts(&self) -> &[(Label, f64)] {
        &self.forecasts
    }

    pub fn slots(&self) -> &[SymbolSlot] {
        &self.slots
    }

    /// Everything the rendering layer consumes.
    pub fn parts(&self) -> (usize, &[(Label, String)], &[(Label, f64)]) {
        (self.limit, &self.prices, &self.forecasts)
    }
}

/// Wires downloader, parser and forecaster into a snapshot build.
#[derive(Clone)]
pub struct SnapshotBuilder {
    downloader: Downloader,
    parser: TableParser,
    forecaster: Arc<dyn Forecaster>,
    symbols: Vec<TrackedSymbol>,
}

impl SnapshotBuilder {
    pub fn new(downloader: Downloader, symbols: Vec<TrackedSymbol>) -> Self {
        Self {
            downloader,
            parser: TableParser::default(),
            forecaster: Arc::new(TrailingMean::default()),
            symbols,
        }
    }

    /// Builder for `config`, fetching through the given HTTP client.
    pub fn from_config(
        config: &PipelineConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let fetcher = CachedFetcher::new(http_client, config.timeout_ms);
        let downloader = Downloader::new(
            Arc::new(fetcher),
            DocumentCache::new(config.cache_dir.clone()),
        );

        Ok(Self::new(downloader, config.symbols.clone())
            .with_parser(TableParser::new(config.row_limit))
            .with_forecaster(Arc::new(TrailingMean::new(config.forecast_window)?)))
    }

    pub fn with_parser(mut self, parser: TableParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_forecaster(mut self, forecaster: Arc<dyn Forecaster>) -> Self {
        self.forecaster = forecaster;
        self
    }

    pub fn symbols(&self) -> &[TrackedSymbol] {
        &self.symbols
    }

    /// Run the pipeline once. Any fetch, source or forecast failure aborts the
    /// build; no partial snapshot is returned.
    pub async fn build(&self) -> Result<Snapshot, CoreError> {
        let sources: Vec<TickerSource> = self
            .symbols
            .iter()
            .map(|symbol| symbol.source.clone())
            .collect();
        let documents = self.downloader.download(&sources).await?;

        let mut slots = Vec::with_capacity(documents.len());
        for (symbol, document) in self.symbols.iter().zip(&documents) {
            let stocks: Vec<Stock> = self.parser.parse(document);
            let forecast = self.forecaster.forecast(&stocks)?;
            info!(
                label = %symbol.label,
                ticker = %symbol.source.ticker,
                rows = stocks.len(),
                forecast,
                "symbol series ready"
            );

            slots.push(SymbolSlot {
                label: symbol.label,
                ticker: symbol.source.ticker.clone(),
                stocks,
                forecast,
            });
        }

        Snapshot::from_slots(self.parser.limit(), slots)
    }
}
