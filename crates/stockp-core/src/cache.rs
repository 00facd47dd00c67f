//! On-disk cache of raw history documents.
//!
//! One file per ticker, `<cache_dir>/<lowercased-ticker>.html`. Presence of
//! the file is the only hit signal; entries never expire.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::fetcher::DocumentRef;
use crate::Ticker;

/// Cache directory handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCache {
    root: PathBuf,
}

impl DocumentCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, ticker: &Ticker) -> PathBuf {
        self.root.join(ticker.cache_file_name())
    }

    /// Document reference pairing the cache path of `ticker` with its source URL.
    pub fn document(&self, ticker: &Ticker, url: impl Into<String>) -> DocumentRef {
        DocumentRef::new(self.path_for(ticker), url)
    }

    /// Read a cached document. A missing file is a miss, not an error.
    pub async fn load(path: &Path) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Write `bytes` to `path` through a temporary sibling and a rename, so a
    /// reader never observes a partially written document.
    pub async fn store(path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let staging = staging_path(path);
        if let Err(error) = tokio::fs::write(&staging, bytes).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(error);
        }

        if let Err(error) = tokio::fs::rename(&staging, path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(error);
        }

        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
    path.with_file_name(name)
}
