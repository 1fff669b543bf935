//! Reader for published validator-pool snapshots
//!
//! This library decodes the compact binary documents a stake pool publishes
//! for each snapshot (search index, pool details, non-pool voters, overview
//! and per-group voter metrics) into typed records, and renders them as JSON.

pub mod api;
pub mod codec;
pub mod convert;
pub mod error;
pub mod reader;
pub mod schema;
pub mod sink;
pub mod source;

// Re-export main types
pub use api::{
    all_validators, award_winners, load_non_pool_voters, load_overview_details,
    load_pool_details, load_search, load_voter_metrics_group, save, top_validators,
    validator_report, AwardWinner, RankedValidator, ReportOptions, ValidatorEntry,
    ValidatorReport,
};
pub use codec::{base58, BaseCodec, BASE58_ALPHABET};
pub use convert::ToJson;
pub use error::{CodecError, DecodeError, ReaderError, SinkError, SourceError};
pub use reader::StreamCursor;
pub use schema::{
    decode_non_pool_voters, decode_overview_details, decode_pool_details, decode_search,
    decode_voter_metrics_group, DocumentKind, LeaderboardKind, NonPoolVoters,
    NoneligibilityReason, OverviewDetails, PoolDetails, PublicKey, SearchIndex,
    VoterMetricsGroup,
};
pub use sink::{JsonFileSink, JsonSinkOptions, RecordSink};
pub use source::{BoxedFetcher, Fetcher, LocalFetcher, LocalFetcherConfig};
