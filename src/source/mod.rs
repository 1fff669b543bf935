//! Fetcher abstractions for retrieving snapshot documents
//!
//! This module provides a unified interface for retrieving the raw bytes of
//! snapshot documents, plus a local filesystem implementation.

mod local;
mod traits;

pub use local::{LocalFetcher, LocalFetcherConfig};
pub use traits::{BoxedFetcher, Fetcher};

/// Resource names within one snapshot.
pub mod resources {
    use crate::schema::PublicKey;

    pub const SEARCH: &str = "search.bin";
    pub const POOL: &str = "pool.bin";
    pub const NON_POOL_VOTERS: &str = "non_pool_voters.bin";
    pub const OVERVIEW: &str = "overview.bin";

    /// Voter-metrics group resource holding `pubkey`.
    pub fn group(pubkey: &PublicKey) -> String {
        format!("groups/{}.bin", pubkey.group_key())
    }
}
