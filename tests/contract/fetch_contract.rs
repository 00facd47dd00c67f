//! Contract tests for the cache-aware fetcher.
//!
//! A present cache file must be served without touching the network; a miss
//! goes remote exactly once and persists the body.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stockp_core::{
    CachedFetcher, CoreErrorKind, DocumentCache, DocumentFetcher, DocumentRef, HttpClient,
    HttpError, HttpRequest, HttpResponse, Ticker,
};

const FIXTURE: &str = include_str!("../fixtures/history.html");

/// Records every request and answers with a fixed body.
struct CountingClient {
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
    body: &'static str,
}

impl CountingClient {
    fn new(body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            body,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpClient for CountingClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("lock").push(request);
        let body = self.body;
        Box::pin(async move { Ok(HttpResponse::ok(body)) })
    }
}

fn corn_document(cache: &DocumentCache) -> DocumentRef {
    let ticker = Ticker::parse("CORN").expect("ticker");
    cache.document(&ticker, "https://example.test/quote/CORN/history?p=CORN")
}

#[tokio::test]
async fn existing_cache_file_is_served_without_network_access() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DocumentCache::new(dir.path());
    let document = corn_document(&cache);
    std::fs::write(&document.path, FIXTURE).expect("seed cache");

    let client = CountingClient::new("<html>remote</html>");
    let fetcher = CachedFetcher::new(client.clone(), 1_000);

    let fetched = fetcher.fetch(&document).await.expect("fetch");
    assert_eq!(fetched.markup(), FIXTURE);
    assert_eq!(fetched.path(), document.path.as_path());
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn cache_miss_goes_remote_once_then_reads_local_copy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DocumentCache::new(dir.path().join("nested"));
    let document = corn_document(&cache);

    let client = CountingClient::new(FIXTURE);
    let fetcher = CachedFetcher::new(client.clone(), 2_500);

    let first = fetcher.fetch(&document).await.expect("first fetch");
    let second = fetcher.fetch(&document).await.expect("second fetch");

    assert_eq!(first, second);
    assert_eq!(client.calls(), 1);
    assert_eq!(
        std::fs::read_to_string(&document.path).expect("cache file"),
        FIXTURE
    );

    let requests = client.requests.lock().expect("lock");
    assert_eq!(requests[0].url, document.url);
    assert_eq!(requests[0].timeout_ms, 2_500);
    assert!(requests[0].headers.contains_key("accept-language"));
}

#[tokio::test]
async fn cache_write_leaves_no_staging_files_behind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DocumentCache::new(dir.path());
    let document = corn_document(&cache);
    let fetcher = CachedFetcher::new(CountingClient::new(FIXTURE), 1_000);

    fetcher.fetch(&document).await.expect("fetch");

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["corn.html"]);
}

#[tokio::test]
async fn unreadable_cache_path_is_parse_source_invalid() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DocumentCache::new(dir.path());
    let document = corn_document(&cache);
    std::fs::create_dir(&document.path).expect("directory in place of file");

    let client = CountingClient::new(FIXTURE);
    let fetcher = CachedFetcher::new(client.clone(), 1_000);

    let error = fetcher.fetch(&document).await.expect_err("must fail");
    assert_eq!(error.kind(), CoreErrorKind::ParseSourceInvalid);
    assert_eq!(client.calls(), 0);
}
