//! Local filesystem fetcher implementation
//!
//! Serves snapshots from a mirrored directory tree:
//!
//! ```text
//! <root>/newest                 decimal timestamp of the latest snapshot
//! <root>/<timestamp>/pool.bin
//! <root>/<timestamp>/groups/<c>.bin
//! ...
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::traits::Fetcher;
use crate::error::SourceError;

/// Configuration for [`LocalFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFetcherConfig {
    /// Directory holding the `newest` marker and one directory per snapshot.
    pub root: PathBuf,
    /// File name of the latest-timestamp marker (default: `newest`).
    pub newest_marker: String,
}

impl LocalFetcherConfig {
    /// Create a configuration rooted at `root` with default names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            newest_marker: "newest".to_string(),
        }
    }

    /// Set the latest-timestamp marker file name.
    pub fn with_newest_marker(mut self, name: impl Into<String>) -> Self {
        self.newest_marker = name.into();
        self
    }
}

/// A fetcher reading snapshots from the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    config: LocalFetcherConfig,
}

impl LocalFetcher {
    /// Create a fetcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(LocalFetcherConfig::new(root))
    }

    pub fn with_config(config: LocalFetcherConfig) -> Self {
        Self { config }
    }

    /// Root directory of the mirror.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Path of `resource` in the snapshot at `timestamp`.
    pub fn resource_path(&self, resource: &str, timestamp: u64) -> PathBuf {
        self.config
            .root
            .join(timestamp.to_string())
            .join(resource)
    }

    async fn read(path: &Path) -> Result<Vec<u8>, SourceError> {
        tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.display().to_string())
            } else {
                SourceError::FileSystemError(format!("{}: {}", path.display(), e))
            }
        })
    }
}

#[async_trait]
impl Fetcher for LocalFetcher {
    async fn latest_timestamp(&self) -> Result<u64, SourceError> {
        let path = self.config.root.join(&self.config.newest_marker);
        let raw = Self::read(&path).await?;
        let text = String::from_utf8_lossy(&raw);
        let timestamp = text
            .trim()
            .parse::<u64>()
            .map_err(|_| SourceError::InvalidTimestamp(text.trim().to_string()))?;
        debug!(path = %path.display(), timestamp, "Resolved latest snapshot");
        Ok(timestamp)
    }

    async fn fetch(&self, resource: &str, timestamp: u64) -> Result<Bytes, SourceError> {
        let path = self.resource_path(resource, timestamp);
        let data = Self::read(&path).await?;
        debug!(
            resource = %resource,
            timestamp,
            bytes = data.len(),
            "Fetched snapshot resource"
        );
        Ok(Bytes::from(data))
    }
}
