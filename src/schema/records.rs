//! Decoders for the records nested inside snapshot documents.
//!
//! Decoders whose layout changed over time take the enclosing document's
//! version and branch on it; the rest are version-independent.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::DecodeError;
use crate::reader::StreamCursor;

use super::pubkey::{PublicKey, PUBKEY_LEN};
use super::reason::decode_noneligibility_reason;
use super::types::*;
use super::version::{NORMALIZED_SCORE_VERSION, VOTE_INCLUSION_VERSION};

/// Decode a raw 32-byte public key.
#[inline]
pub fn decode_pubkey(cursor: &mut StreamCursor<'_>) -> Result<PublicKey, DecodeError> {
    cursor.read_array::<PUBKEY_LEN>().map(PublicKey::new)
}

/// Decode a `u64`-counted map into an insertion-ordered `IndexMap`.
///
/// A repeated key keeps its first position and takes the later value.
pub fn decode_map<'a, K, V>(
    cursor: &mut StreamCursor<'a>,
    mut key: impl FnMut(&mut StreamCursor<'a>) -> Result<K, DecodeError>,
    mut value: impl FnMut(&mut StreamCursor<'a>) -> Result<V, DecodeError>,
) -> Result<IndexMap<K, V>, DecodeError>
where
    K: Hash + Eq,
{
    let count = cursor.read_u64()?;
    let mut map = IndexMap::with_capacity(cursor.capacity_hint(count));
    for _ in 0..count {
        let k = key(cursor)?;
        let v = value(cursor)?;
        map.insert(k, v);
    }
    Ok(map)
}

pub fn decode_stake(cursor: &mut StreamCursor<'_>) -> Result<Stake, DecodeError> {
    Ok(Stake {
        active: cursor.read_u64()?,
        activating: cursor.read_u64()?,
        deactivating: cursor.read_u64()?,
    })
}

/// Decode a score; `vote_inclusion` is only present from version 1.
pub fn decode_score(cursor: &mut StreamCursor<'_>, version: u8) -> Result<Score, DecodeError> {
    Ok(Score {
        skip_rate: cursor.read_f64()?,
        prior_skip_rate: cursor.read_f64()?,
        subsequent_skip_rate: cursor.read_f64()?,
        cu: cursor.read_f64()?,
        latency: cursor.read_f64()?,
        llv: cursor.read_f64()?,
        cv: cursor.read_f64()?,
        vote_inclusion: if version >= VOTE_INCLUSION_VERSION {
            cursor.read_f64()?
        } else {
            0.0
        },
        apy: cursor.read_f32()?,
        pool_extra_lamports: cursor.read_f64()?,
        city_concentration: cursor.read_f64()?,
        country_concentration: cursor.read_f64()?,
    })
}

pub fn decode_metric_weights(cursor: &mut StreamCursor<'_>) -> Result<MetricWeights, DecodeError> {
    Ok(MetricWeights {
        skip_rate_weight: cursor.read_f64()?,
        prior_skip_rate_weight: cursor.read_f64()?,
        subsequent_skip_rate_weight: cursor.read_f64()?,
        cu_weight: cursor.read_f64()?,
        latency_weight: cursor.read_f64()?,
        llv_weight: cursor.read_f64()?,
        cv_weight: cursor.read_f64()?,
        vote_inclusion_weight: cursor.read_f64()?,
        apy_weight: cursor.read_f64()?,
        city_concentration_weight: cursor.read_f64()?,
        country_concentration_weight: cursor.read_f64()?,
    })
}

pub fn decode_comparative_metrics(
    cursor: &mut StreamCursor<'_>,
    version: u8,
) -> Result<ComparativeMetrics, DecodeError> {
    Ok(ComparativeMetrics {
        pool_raw: decode_score(cursor, version)?,
        other_raw: decode_score(cursor, version)?,
    })
}

/// Decode voter details; `normalized_score` is only present from version 2.
pub fn decode_voter_details(
    cursor: &mut StreamCursor<'_>,
    version: u8,
) -> Result<VoterDetails, DecodeError> {
    let name = cursor.read_optional(|c| c.read_string())?;
    let icon_url = cursor.read_optional(|c| c.read_string())?;
    let details = cursor.read_optional(|c| c.read_string())?;
    let website_url = cursor.read_optional(|c| c.read_string())?;
    let city = cursor.read_optional(|c| c.read_string())?;
    let country = cursor.read_optional(|c| c.read_string())?;
    let stake = decode_stake(cursor)?;
    let target_pool_stake = cursor.read_u64()?;
    let raw_score = decode_score(cursor, version)?;
    let normalized_score = if version >= NORMALIZED_SCORE_VERSION {
        decode_score(cursor, version)?
    } else {
        Score::default()
    };
    let total_score = cursor.read_f64()?;

    Ok(VoterDetails {
        name,
        icon_url,
        details,
        website_url,
        city,
        country,
        stake,
        target_pool_stake,
        raw_score,
        normalized_score,
        total_score,
    })
}

pub fn decode_pool_voter_details(
    cursor: &mut StreamCursor<'_>,
    version: u8,
) -> Result<PoolVoterDetails, DecodeError> {
    Ok(PoolVoterDetails {
        details: decode_voter_details(cursor, version)?,
        pool_stake: decode_stake(cursor)?,
        noneligibility_reasons: cursor.read_vec(decode_noneligibility_reason)?,
    })
}

pub fn decode_non_pool_voter_details(
    cursor: &mut StreamCursor<'_>,
    version: u8,
) -> Result<NonPoolVoterDetails, DecodeError> {
    Ok(NonPoolVoterDetails {
        details: decode_voter_details(cursor, version)?,
        noneligibility_reasons: cursor.read_vec(decode_noneligibility_reason)?,
    })
}

/// Decode a leaderboard with double-precision metrics.
pub fn decode_leaderboard_f64(
    cursor: &mut StreamCursor<'_>,
) -> Result<Leaderboard<f64>, DecodeError> {
    cursor.read_vec(|c| {
        Ok(LeaderboardEntry {
            pubkey: decode_pubkey(c)?,
            metric: c.read_f64()?,
            rank: c.read_u64()?,
        })
    })
}

/// Decode a leaderboard with single-precision metrics.
pub fn decode_leaderboard_f32(
    cursor: &mut StreamCursor<'_>,
) -> Result<Leaderboard<f32>, DecodeError> {
    cursor.read_vec(|c| {
        Ok(LeaderboardEntry {
            pubkey: decode_pubkey(c)?,
            metric: c.read_f32()?,
            rank: c.read_u64()?,
        })
    })
}

pub fn decode_leader_data(cursor: &mut StreamCursor<'_>) -> Result<LeaderData, DecodeError> {
    Ok(LeaderData {
        leader_slots: cursor.read_u64()?,
        leader_groups: cursor.read_u64()?,
        blocks: cursor.read_u64()?,
        prior_skips: cursor.read_u64()?,
        subsequent_skips: cursor.read_u64()?,
        total_cu: cursor.read_u64()?,
        total_vote_tx: cursor.read_u64()?,
    })
}

pub fn decode_voter_data(cursor: &mut StreamCursor<'_>) -> Result<VoterData, DecodeError> {
    Ok(VoterData {
        commission: cursor.read_u8()?,
        vote_credits: cursor.read_u64()?,
        total_fork_slots_voted_on: cursor.read_u64()?,
        total_fork_slot_vote_latency: cursor.read_u64()?,
        total_low_latency_fork_slots: cursor.read_u64()?,
        total_successful_vote_tx: cursor.read_u64()?,
        total_consensus_vote_tx: cursor.read_u64()?,
        delinquency_fraction: cursor.read_f64()?,
        apy: cursor.read_f32()?,
        shared_identity_vote_accounts: cursor.read_vec(decode_pubkey)?,
        geo_concentration: cursor.read_optional(|c| {
            Ok(GeoConcentration {
                city: c.read_f64()?,
                country: c.read_f64()?,
            })
        })?,
    })
}

pub fn decode_pool_data(cursor: &mut StreamCursor<'_>) -> Result<PoolData, DecodeError> {
    Ok(PoolData {
        extra_lamports: cursor.read_u64()?,
        pool_lamports: cursor.read_u64()?,
    })
}

/// Decode the three epoch-keyed maps of one vote account.
pub fn decode_vote_account_metrics(
    cursor: &mut StreamCursor<'_>,
) -> Result<VoteAccountMetrics, DecodeError> {
    Ok(VoteAccountMetrics {
        leader_data: decode_map(cursor, |c| c.read_u64(), decode_leader_data)?,
        voter_data: decode_map(cursor, |c| c.read_u64(), decode_voter_data)?,
        pool_data: decode_map(cursor, |c| c.read_u64(), decode_pool_data)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::encode_u64;

    fn push_f64s(buf: &mut Vec<u8>, values: &[f64]) {
        for v in values {
            buf.extend_from_slice(&v.to_le_bytes());
        }
    }

    /// Score bytes with every f64 set to `x` and apy set to `apy`.
    fn score_bytes(x: f64, apy: f32, with_vote_inclusion: bool) -> Vec<u8> {
        let mut buf = Vec::new();
        push_f64s(&mut buf, &[x; 7]);
        if with_vote_inclusion {
            push_f64s(&mut buf, &[x]);
        }
        buf.extend_from_slice(&apy.to_le_bytes());
        push_f64s(&mut buf, &[x; 3]);
        buf
    }

    #[test]
    fn test_decode_score_v0_skips_vote_inclusion() {
        let bytes = score_bytes(0.5, 7.0, false);
        let mut cursor = StreamCursor::new(&bytes);
        let score = decode_score(&mut cursor, 0).unwrap();
        assert_eq!(score.vote_inclusion, 0.0);
        assert_eq!(score.apy, 7.0);
        assert_eq!(score.country_concentration, 0.5);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_decode_score_v1_reads_vote_inclusion() {
        let bytes = score_bytes(0.25, 3.0, true);
        let mut cursor = StreamCursor::new(&bytes);
        let score = decode_score(&mut cursor, 1).unwrap();
        assert_eq!(score.vote_inclusion, 0.25);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_decode_voter_details_optional_strings() {
        let mut buf = vec![1, 3, b'a', b'b', b'c', 0, 0, 0, 1, 2, b'N', b'L', 0];
        buf.extend(encode_u64(1_000_000_000_000));
        buf.extend([0, 0]);
        buf.extend(encode_u64(42));
        buf.extend(score_bytes(1.0, 2.0, true));
        buf.extend_from_slice(&9.5f64.to_le_bytes());

        let mut cursor = StreamCursor::new(&buf);
        let details = decode_voter_details(&mut cursor, 1).unwrap();
        assert_eq!(details.name.as_deref(), Some("abc"));
        assert_eq!(details.icon_url, None);
        assert_eq!(details.city.as_deref(), Some("NL"));
        assert_eq!(details.country, None);
        assert_eq!(details.stake.active, 1_000_000_000_000);
        assert_eq!(details.target_pool_stake, 42);
        assert_eq!(details.raw_score.skip_rate, 1.0);
        assert_eq!(details.normalized_score, Score::default());
        assert_eq!(details.total_score, 9.5);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_decode_map_keeps_stream_order() {
        // 3 entries: 9 -> 1, 2 -> 2, 9 -> 3
        let buf = [3, 9, 1, 2, 2, 9, 3];
        let mut cursor = StreamCursor::new(&buf);
        let map = decode_map(&mut cursor, |c| c.read_u64(), |c| c.read_u8()).unwrap();
        let entries: Vec<_> = map.into_iter().collect();
        assert_eq!(entries, vec![(9, 3), (2, 2)]);
    }

    #[test]
    fn test_decode_voter_data_with_geo() {
        let mut buf = vec![10];
        buf.extend([5, 6, 7, 8, 9, 10]);
        push_f64s(&mut buf, &[0.01]);
        buf.extend_from_slice(&6.5f32.to_le_bytes());
        buf.push(1);
        buf.extend_from_slice(&[0xAB; 32]);
        buf.push(1);
        push_f64s(&mut buf, &[0.1, 0.2]);

        let mut cursor = StreamCursor::new(&buf);
        let voter = decode_voter_data(&mut cursor).unwrap();
        assert_eq!(voter.commission, 10);
        assert_eq!(voter.total_consensus_vote_tx, 10);
        assert_eq!(voter.shared_identity_vote_accounts, vec![PublicKey::new([0xAB; 32])]);
        assert_eq!(
            voter.geo_concentration,
            Some(GeoConcentration {
                city: 0.1,
                country: 0.2
            })
        );
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_decode_leaderboard_f32() {
        let mut buf = vec![1];
        buf.extend_from_slice(&[7u8; 32]);
        buf.extend_from_slice(&1.25f32.to_le_bytes());
        buf.push(1);
        let mut cursor = StreamCursor::new(&buf);
        let board = decode_leaderboard_f32(&mut cursor).unwrap();
        assert_eq!(
            board,
            vec![LeaderboardEntry {
                pubkey: PublicKey::new([7; 32]),
                metric: 1.25,
                rank: 1
            }]
        );
    }
}
