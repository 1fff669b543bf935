//! Fetch-then-decode loaders for snapshot documents.

use tracing::debug;

use crate::error::{DecodeError, ReaderError};
use crate::schema::{
    decode_non_pool_voters, decode_overview_details, decode_pool_details, decode_search,
    decode_voter_metrics_group, NonPoolVoters, OverviewDetails, PoolDetails, PublicKey,
    SearchIndex, VoterMetricsGroup,
};
use crate::source::{resources, Fetcher};

/// Fetch `resource` and decode it, naming the resource in decode errors.
async fn fetch_and_decode<F, T>(
    fetcher: &F,
    resource: &str,
    timestamp: u64,
    decode: fn(&[u8]) -> Result<T, DecodeError>,
) -> Result<T, ReaderError>
where
    F: Fetcher + ?Sized,
{
    let bytes = fetcher.fetch(resource, timestamp).await?;
    debug!(resource = %resource, timestamp, bytes = bytes.len(), "Decoding resource");
    decode(&bytes).map_err(|source| ReaderError::Decode {
        resource: resource.to_string(),
        source,
    })
}

/// Load the search index of the snapshot at `timestamp`.
pub async fn load_search<F: Fetcher + ?Sized>(
    fetcher: &F,
    timestamp: u64,
) -> Result<SearchIndex, ReaderError> {
    fetch_and_decode(fetcher, resources::SEARCH, timestamp, decode_search).await
}

/// Load the pool details of the snapshot at `timestamp`.
pub async fn load_pool_details<F: Fetcher + ?Sized>(
    fetcher: &F,
    timestamp: u64,
) -> Result<PoolDetails, ReaderError> {
    fetch_and_decode(fetcher, resources::POOL, timestamp, decode_pool_details).await
}

/// Load the non-pool voters of the snapshot at `timestamp`.
pub async fn load_non_pool_voters<F: Fetcher + ?Sized>(
    fetcher: &F,
    timestamp: u64,
) -> Result<NonPoolVoters, ReaderError> {
    fetch_and_decode(
        fetcher,
        resources::NON_POOL_VOTERS,
        timestamp,
        decode_non_pool_voters,
    )
    .await
}

/// Load the overview of the snapshot at `timestamp`.
pub async fn load_overview_details<F: Fetcher + ?Sized>(
    fetcher: &F,
    timestamp: u64,
) -> Result<OverviewDetails, ReaderError> {
    fetch_and_decode(
        fetcher,
        resources::OVERVIEW,
        timestamp,
        decode_overview_details,
    )
    .await
}

/// Load the voter-metrics group that `pubkey` is published in.
pub async fn load_voter_metrics_group<F: Fetcher + ?Sized>(
    fetcher: &F,
    timestamp: u64,
    pubkey: &PublicKey,
) -> Result<VoterMetricsGroup, ReaderError> {
    let resource = resources::group(pubkey);
    fetch_and_decode(fetcher, &resource, timestamp, decode_voter_metrics_group).await
}
