//! Entry points decoding whole snapshot documents.
//!
//! Each decoder reads the version byte, validates it for its document kind
//! and threads it through every version-dependent nested decoder. Decoding is
//! all-or-nothing: the first failure aborts the whole document. Bytes left
//! after the last field are ignored.

use tracing::debug;

use crate::error::DecodeError;
use crate::reader::StreamCursor;

use super::records::*;
use super::types::*;
use super::version::{DocumentKind, VOTE_INCLUSION_VERSION};

/// Read and validate the leading version byte.
fn read_version(cursor: &mut StreamCursor<'_>, kind: DocumentKind) -> Result<u8, DecodeError> {
    let version = cursor.read_u8()?;
    kind.check_version(version)?;
    debug!(kind = %kind, version, bytes = cursor.len(), "Decoding document");
    Ok(version)
}

fn finish(cursor: &StreamCursor<'_>, kind: DocumentKind) {
    if !cursor.is_exhausted() {
        debug!(
            kind = %kind,
            trailing = cursor.remaining(),
            "Ignoring trailing bytes after document"
        );
    }
}

/// Decode `search.bin`.
pub fn decode_search(buf: &[u8]) -> Result<SearchIndex, DecodeError> {
    let mut cursor = StreamCursor::new(buf);
    let version = read_version(&mut cursor, DocumentKind::Search)?;
    let voters = decode_map(&mut cursor, decode_pubkey, |c| {
        c.read_optional(|c| c.read_string())
    })?;
    finish(&cursor, DocumentKind::Search);
    Ok(SearchIndex { version, voters })
}

/// Decode a voter-metrics group (`groups/<c>.bin`).
pub fn decode_voter_metrics_group(buf: &[u8]) -> Result<VoterMetricsGroup, DecodeError> {
    let mut cursor = StreamCursor::new(buf);
    let version = read_version(&mut cursor, DocumentKind::VoterMetricsGroup)?;
    let voters = decode_map(&mut cursor, decode_pubkey, decode_vote_account_metrics)?;
    finish(&cursor, DocumentKind::VoterMetricsGroup);
    Ok(VoterMetricsGroup { version, voters })
}

/// Decode `non_pool_voters.bin`.
pub fn decode_non_pool_voters(buf: &[u8]) -> Result<NonPoolVoters, DecodeError> {
    let mut cursor = StreamCursor::new(buf);
    let version = read_version(&mut cursor, DocumentKind::NonPoolVoters)?;
    let voters = decode_map(&mut cursor, decode_pubkey, |c| {
        decode_non_pool_voter_details(c, version)
    })?;
    finish(&cursor, DocumentKind::NonPoolVoters);
    Ok(NonPoolVoters { version, voters })
}

/// Decode `overview.bin`.
pub fn decode_overview_details(buf: &[u8]) -> Result<OverviewDetails, DecodeError> {
    let mut cursor = StreamCursor::new(buf);
    let version = read_version(&mut cursor, DocumentKind::OverviewDetails)?;
    let overview = OverviewDetails {
        version,
        price: cursor.read_f32()?,
        epoch: cursor.read_u64()?,
        epoch_start: cursor.read_u64()?,
        epoch_duration: cursor.read_u64()?,
        pool_stake: decode_stake(&mut cursor)?,
        reserve: cursor.read_u64()?,
        apy: cursor.read_f32()?,
    };
    finish(&cursor, DocumentKind::OverviewDetails);
    Ok(overview)
}

/// Decode `pool.bin`.
///
/// Before version 1 the vote-inclusion leaderboard and both weight vectors
/// are not on the wire and come back empty/zero; before version 2 every
/// voter's normalized score is zero.
pub fn decode_pool_details(buf: &[u8]) -> Result<PoolDetails, DecodeError> {
    let mut cursor = StreamCursor::new(buf);
    let version = read_version(&mut cursor, DocumentKind::PoolDetails)?;
    let has_vote_inclusion = version >= VOTE_INCLUSION_VERSION;
    let c = &mut cursor;

    let pool_validator_count = c.read_u64()?;
    let best_skip_rate = decode_leaderboard_f64(c)?;
    let best_cu = decode_leaderboard_f64(c)?;
    let best_latency = decode_leaderboard_f64(c)?;
    let best_llv = decode_leaderboard_f64(c)?;
    let best_cv = decode_leaderboard_f64(c)?;
    let best_vote_inclusion = if has_vote_inclusion {
        decode_leaderboard_f64(c)?
    } else {
        Vec::new()
    };
    let best_apy = decode_leaderboard_f32(c)?;
    let best_pool_extra_lamports = decode_leaderboard_f64(c)?;
    let best_city_concentration = decode_leaderboard_f64(c)?;
    let best_country_concentration = decode_leaderboard_f64(c)?;
    let best_overall = decode_leaderboard_f64(c)?;

    let compare_by_current = decode_comparative_metrics(c, version)?;
    let compare_by_target = decode_comparative_metrics(c, version)?;

    let pool_voters = decode_map(c, decode_pubkey, |c| decode_pool_voter_details(c, version))?;

    let (inclusion_weights, ranking_weights) = if has_vote_inclusion {
        (decode_metric_weights(c)?, decode_metric_weights(c)?)
    } else {
        (MetricWeights::default(), MetricWeights::default())
    };

    finish(&cursor, DocumentKind::PoolDetails);
    Ok(PoolDetails {
        version,
        pool_validator_count,
        best_skip_rate,
        best_cu,
        best_latency,
        best_llv,
        best_cv,
        best_vote_inclusion,
        best_apy,
        best_pool_extra_lamports,
        best_city_concentration,
        best_country_concentration,
        best_overall,
        compare_by_current,
        compare_by_target,
        pool_voters,
        inclusion_weights,
        ranking_weights,
    })
}
