//! Fetcher trait definition
//!
//! Provides a unified async interface for retrieving raw snapshot documents.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SourceError;

/// Retrieves raw snapshot documents.
///
/// Snapshots are published under a monotonically increasing timestamp; each
/// snapshot holds a fixed set of named resources (see
/// [`resources`](super::resources)). Implementations only move bytes: all
/// decoding happens in [`schema`](crate::schema).
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Timestamp of the newest published snapshot.
    async fn latest_timestamp(&self) -> Result<u64, SourceError>;

    /// Fetch one resource of the snapshot published at `timestamp`.
    ///
    /// # Errors
    /// Returns `SourceError` if the resource does not exist or cannot be read.
    async fn fetch(&self, resource: &str, timestamp: u64) -> Result<Bytes, SourceError>;
}

/// A boxed Fetcher for dynamic dispatch
pub type BoxedFetcher = Box<dyn Fetcher>;

#[async_trait]
impl Fetcher for BoxedFetcher {
    async fn latest_timestamp(&self) -> Result<u64, SourceError> {
        (**self).latest_timestamp().await
    }

    async fn fetch(&self, resource: &str, timestamp: u64) -> Result<Bytes, SourceError> {
        (**self).fetch(resource, timestamp).await
    }
}
