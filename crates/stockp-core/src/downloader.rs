//! Concurrent fan-out of document fetches.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::cache::DocumentCache;
use crate::fetcher::{Document, DocumentFetcher, DocumentRef};
use crate::{CoreError, Ticker};

/// A ticker and the URL its history page is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerSource {
    pub ticker: Ticker,
    pub url: String,
}

impl TickerSource {
    pub fn new(ticker: Ticker, url: impl Into<String>) -> Self {
        Self {
            ticker,
            url: url.into(),
        }
    }

    /// Build a source from a bare history URL, taking the ticker from its
    /// trailing `p=` value.
    pub fn from_url(url: impl Into<String>) -> Result<Self, CoreError> {
        let url = url.into();
        let ticker = Ticker::from_url(&url)?;
        Ok(Self { ticker, url })
    }
}

/// Fetches a batch of documents concurrently, one task per source.
#[derive(Clone)]
pub struct Downloader {
    fetcher: Arc<dyn DocumentFetcher>,
    cache: DocumentCache,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, cache: DocumentCache) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Document references for `sources`, in input order.
    pub fn documents(&self, sources: &[TickerSource]) -> Vec<DocumentRef> {
        sources
            .iter()
            .map(|source| self.cache.document(&source.ticker, source.url.as_str()))
            .collect()
    }

    /// Fetch every source and return the documents in input order.
    ///
    /// The first failure observed aborts the batch; in-flight fetches are
    /// cancelled when the task set is dropped.
    pub async fn download(&self, sources: &[TickerSource]) -> Result<Vec<Document>, CoreError> {
        let documents = self.documents(sources);
        let workers = documents.len();
        let started = Instant::now();
        debug!(workers, "starting download batch");

        let mut tasks = JoinSet::new();
        for (index, document) in documents.into_iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            tasks.spawn(async move {
                let result = fetcher.fetch(&document).await;
                (index, document.url, result)
            });
        }

        let mut slots: Vec<Option<Document>> = vec![None; workers];
        while let Some(joined) = tasks.join_next().await {
            let (index, url, result) = joined.map_err(|join_error| {
                CoreError::fetch_failed("<worker>", format!("fetch worker failed: {join_error}"))
            })?;

            match result {
                Ok(document) => slots[index] = Some(document),
                Err(failure) => {
                    error!(%url, error = %failure, "download batch aborted");
                    return Err(failure);
                }
            }
        }

        debug!(
            workers,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "download batch completed"
        );

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| CoreError::fetch_failed("<worker>", "fetch worker returned no result"))
    }
}
