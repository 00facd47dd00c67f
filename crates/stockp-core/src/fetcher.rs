//! Cache-aware document fetcher.
//!
//! A [`DocumentRef`] names a cache-local path and the URL it is populated
//! from. [`CachedFetcher`] serves the local file when it exists and only
//! touches the network on a miss, persisting the response before parsing it.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info};

use crate::cache::DocumentCache;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::CoreError;

/// Logical document: where it is cached and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub path: PathBuf,
    pub url: String,
}

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Markup that decoded successfully and is ready for table parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    markup: String,
}

impl Document {
    /// Decode raw document bytes. Non UTF-8 input is rejected.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self, CoreError> {
        let path = path.into();
        match String::from_utf8(bytes) {
            Ok(markup) => Ok(Self { path, markup }),
            Err(error) => Err(CoreError::parse_source_invalid(path, error.to_string())),
        }
    }

    pub fn from_markup(path: impl Into<PathBuf>, markup: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            markup: markup.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Build the HTML tree. The tree is not `Send`, so it is produced on
    /// demand by whoever parses rows instead of being carried across tasks.
    pub fn html(&self) -> Html {
        Html::parse_document(&self.markup)
    }
}

/// Fetch capability used by the downloader.
pub trait DocumentFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        document: &'a DocumentRef,
    ) -> Pin<Box<dyn Future<Output = Result<Document, CoreError>> + Send + 'a>>;
}

/// Fetcher that reads through the on-disk cache before going remote.
#[derive(Clone)]
pub struct CachedFetcher {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl CachedFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            timeout_ms,
        }
    }

    async fn fetch_document(&self, document: &DocumentRef) -> Result<Document, CoreError> {
        let cached = DocumentCache::load(&document.path)
            .await
            .map_err(|error| CoreError::parse_source_invalid(&document.path, error.to_string()))?;

        if let Some(bytes) = cached {
            debug!(path = %document.path.display(), "serving document from cache");
            return Document::from_bytes(document.path.clone(), bytes);
        }

        info!(url = %document.url, "fetching data remotely");
        let request = HttpRequest::get(document.url.as_str())
            .with_header("accept-language", "en-US,en;q=0.9")
            .with_timeout_ms(self.timeout_ms);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| CoreError::fetch_failed(&document.url, error.message()))?;

        if !response.is_success() {
            return Err(CoreError::fetch_failed(
                &document.url,
                format!("unexpected HTTP status {}", response.status),
            ));
        }

        DocumentCache::store(&document.path, &response.body)
            .await
            .map_err(|error| {
                CoreError::fetch_failed(
                    &document.url,
                    format!(
                        "cannot write cache file '{}': {error}",
                        document.path.display()
                    ),
                )
            })?;

        Document::from_bytes(document.path.clone(), response.body)
    }
}

impl Default for CachedFetcher {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), DEFAULT_TIMEOUT_MS)
    }
}

impl DocumentFetcher for CachedFetcher {
    fn fetch<'a>(
        &'a self,
        document: &'a DocumentRef,
    ) -> Pin<Box<dyn Future<Output = Result<Document, CoreError>> + Send + 'a>> {
        Box::pin(self.fetch_document(document))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use crate::test_support::LogCapture;
    use crate::CoreErrorKind;

    struct StaticClient {
        calls: AtomicUsize,
        response: Result<HttpResponse, HttpError>,
    }

    impl StaticClient {
        fn new(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response,
            })
        }
    }

    impl HttpClient for StaticClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn miss_fetches_and_persists_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = StaticClient::new(Ok(HttpResponse::ok("<tbody></tbody>")));
        let fetcher = CachedFetcher::new(client.clone(), 1_000);
        let document = DocumentRef::new(dir.path().join("corn.html"), "https://example.test/corn");

        let fetched = fetcher.fetch(&document).await.expect("fetch");
        assert_eq!(fetched.markup(), "<tbody></tbody>");
        assert_eq!(
            std::fs::read_to_string(&document.path).expect("cache file"),
            "<tbody></tbody>"
        );

        fetcher.fetch(&document).await.expect("second fetch");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_fetch_is_logged_at_info_with_url_and_cache_hit_is_not() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let dir = tempfile::tempdir().expect("tempdir");
        let fetcher =
            CachedFetcher::new(StaticClient::new(Ok(HttpResponse::ok("<tbody></tbody>"))), 1_000);
        let document = DocumentRef::new(
            dir.path().join("corn.html"),
            "https://example.test/quote/CORN/history?p=CORN",
        );

        fetcher.fetch(&document).await.expect("miss");
        fetcher.fetch(&document).await.expect("hit");

        let infos = logs.lines_at("INFO");
        assert_eq!(infos.len(), 1, "captured: {}", logs.contents());
        assert!(infos[0].contains("fetching data remotely"));
        assert!(infos[0].contains("url=https://example.test/quote/CORN/history?p=CORN"));
    }

    #[tokio::test]
    async fn transport_error_is_fetch_failed_and_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = StaticClient::new(Err(HttpError::new("connection refused")));
        let fetcher = CachedFetcher::new(client, 1_000);
        let document = DocumentRef::new(dir.path().join("uga.html"), "https://example.test/uga");

        let error = fetcher.fetch(&document).await.expect_err("must fail");
        assert_eq!(error.kind(), CoreErrorKind::FetchFailed);
        assert!(!document.path.exists());
    }

    #[tokio::test]
    async fn error_status_is_fetch_failed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = StaticClient::new(Ok(HttpResponse {
            status: 503,
            body: b"unavailable".to_vec(),
        }));
        let fetcher = CachedFetcher::new(client, 1_000);
        let document = DocumentRef::new(dir.path().join("ndaq.html"), "https://example.test/ndaq");

        let error = fetcher.fetch(&document).await.expect_err("must fail");
        assert!(error.to_string().contains("503"));
        assert!(!document.path.exists());
    }

    #[tokio::test]
    async fn undecodable_cache_file_is_parse_source_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("corn.html");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("write");
        let fetcher = CachedFetcher::new(StaticClient::new(Ok(HttpResponse::ok(""))), 1_000);

        let error = fetcher
            .fetch(&DocumentRef::new(path, "https://example.test/corn"))
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), CoreErrorKind::ParseSourceInvalid);
    }
}
