//! End-to-end decoding of whole snapshot documents.

mod common;

use common::{key, DocBuilder};
use xshin_reader::{
    decode_non_pool_voters, decode_overview_details, decode_pool_details, decode_search,
    decode_voter_metrics_group, DecodeError, DocumentKind, LeaderboardKind, NoneligibilityReason,
    ToJson,
};
use xshin_reader::schema::{MetricWeights, Score};

// ============================================================================
// Pool details
// ============================================================================

#[test]
fn test_minimal_pool_details_v2() {
    let mut buf = vec![0x02, 0x05];
    buf.extend([0x00; 11]);
    buf.extend(vec![0u8; 4 * (11 * 8 + 4)]);
    buf.push(0x00);
    buf.extend(vec![0u8; 22 * 8]);

    let pool = decode_pool_details(&buf).unwrap();
    assert_eq!(pool.version, 2);
    assert_eq!(pool.pool_validator_count, 5);
    for kind in LeaderboardKind::ALL {
        assert!(pool.leaderboard(kind).is_empty(), "{} not empty", kind.name());
    }
    assert!(pool.pool_voters.is_empty());
    assert_eq!(pool.ranking_weights.apy_weight, 0.0);
}

#[test]
fn test_pool_details_v0_defaults_gated_fields() {
    let voter = key(7);
    let mut buf = common::pool_details(0, &[(voter, 0.42)]);
    // Anything after the document is ignored
    buf.extend([0xFF; 64]);

    let pool = decode_pool_details(&buf).unwrap();
    assert_eq!(pool.version, 0);
    assert!(pool.best_vote_inclusion.is_empty());
    assert_eq!(pool.inclusion_weights, MetricWeights::default());
    assert_eq!(pool.ranking_weights, MetricWeights::default());

    let details = &pool.pool_voters[&voter].details;
    assert_eq!(details.total_score, 0.42);
    assert_eq!(details.raw_score.vote_inclusion, 0.0);
    assert_eq!(details.raw_score.skip_rate, 0.25);
    assert_eq!(details.normalized_score, Score::default());
}

#[test]
fn test_pool_details_v1_has_no_normalized_score() {
    let voter = key(3);
    let pool = decode_pool_details(&common::pool_details(1, &[(voter, 0.9)])).unwrap();
    let details = &pool.pool_voters[&voter].details;
    assert_eq!(details.raw_score.vote_inclusion, 0.25);
    assert_eq!(details.normalized_score.skip_rate, 0.0);
    assert_eq!(details.total_score, 0.9);
}

#[test]
fn test_pool_details_v2_normalized_score() {
    let voter = key(4);
    let pool = decode_pool_details(&common::pool_details(2, &[(voter, 0.1)])).unwrap();
    let voter = &pool.pool_voters[&voter];
    assert_eq!(voter.details.normalized_score.llv, 0.75);
    assert_eq!(voter.details.stake.active, 1_000);
    assert_eq!(voter.details.target_pool_stake, 500);
    assert_eq!(voter.pool_stake.active, 10);
}

#[test]
fn test_pool_details_unsupported_version() {
    assert_eq!(
        decode_pool_details(&[3]),
        Err(DecodeError::UnsupportedVersion {
            kind: DocumentKind::PoolDetails,
            version: 3
        })
    );
}

#[test]
fn test_pool_details_truncated_anywhere_fails() {
    let buf = common::pool_details(2, &[(key(1), 0.5), (key(2), 0.6)]);
    for cut in 0..buf.len() {
        let err = decode_pool_details(&buf[..cut]).unwrap_err();
        assert!(
            matches!(err, DecodeError::OutOfBounds { .. }),
            "cut at {} gave {:?}",
            cut,
            err
        );
    }
}

#[test]
fn test_pool_details_leaderboard_ranks() {
    let leader = key(9);
    let mut b = DocBuilder::new(2).u64(1);
    // skip rate, cu, latency, llv
    for _ in 0..4 {
        b = b.u64(0);
    }
    b = b.u64(1).pubkey(&leader).f64(0.97).u64(1); // cv
    b = b.u64(0); // vote inclusion
    b = b.u64(1).pubkey(&leader).f32(7.25).u64(2); // apy
    for _ in 0..4 {
        b = b.u64(0);
    }
    for _ in 0..4 {
        b = b.score(0.0, 0.0, 2);
    }
    let buf = b.u64(0).f64s(0.0, 22).build();

    let pool = decode_pool_details(&buf).unwrap();
    assert_eq!(pool.best_cv.len(), 1);
    assert_eq!(pool.best_cv[0].pubkey, leader);
    assert_eq!(pool.best_cv[0].rank, 1);
    let apy = pool.leaderboard(LeaderboardKind::Apy);
    assert_eq!(apy[0].metric, 7.25);
    assert_eq!(apy[0].rank, 2);
}

// ============================================================================
// Non-pool voters
// ============================================================================

#[test]
fn test_non_pool_voters_reasons() {
    let voter = key(5);
    let voters = decode_non_pool_voters(&common::non_pool_voters(2, &[(voter, 0.3)])).unwrap();
    let details = &voters.voters[&voter];
    assert_eq!(
        details.noneligibility_reasons,
        vec![NoneligibilityReason::InSuperminority]
    );
    assert_eq!(details.details.total_score, 0.3);
}

#[test]
fn test_non_pool_voters_invalid_reason() {
    let buf = DocBuilder::new(2)
        .u64(1)
        .pubkey(&key(1))
        .voter_details(0.0, 2)
        .u64(1)
        .u64(10)
        .build();
    assert_eq!(
        decode_non_pool_voters(&buf),
        Err(DecodeError::InvalidVariant(10))
    );
}

#[test]
fn test_non_pool_voters_reason_payloads() {
    let buf = DocBuilder::new(1)
        .u64(1)
        .pubkey(&key(1))
        .voter_details(0.0, 1)
        .u64(3)
        .u64(0)
        .string("bad actor")
        .u64(2)
        .u64(2)
        .u64(600)
        .u64(601)
        .u64(6)
        .u8(12)
        .build();

    let voters = decode_non_pool_voters(&buf).unwrap();
    let reasons = &voters.voters[&key(1)].noneligibility_reasons;
    assert_eq!(
        reasons,
        &vec![
            NoneligibilityReason::Blacklisted("bad actor".to_string()),
            NoneligibilityReason::NotLeaderInEpochs(vec![600, 601]),
            NoneligibilityReason::CommissionTooHigh(12),
        ]
    );
    assert_eq!(reasons[1].to_string(), "Not leader in recent epochs (600, 601)");
}

// ============================================================================
// Search, overview, voter metrics
// ============================================================================

#[test]
fn test_search_preserves_order() {
    let buf = common::search(&[(key(3), Some("third")), (key(1), None), (key(2), Some("b"))]);
    let search = decode_search(&buf).unwrap();
    let keys: Vec<_> = search.voters.keys().copied().collect();
    assert_eq!(keys, vec![key(3), key(1), key(2)]);

    let json = search.to_json().to_string();
    let third = key(3).to_base58();
    let first = key(1).to_base58();
    assert!(json.find(&third).unwrap() < json.find(&first).unwrap());
}

#[test]
fn test_search_invalid_presence_flag() {
    let buf = DocBuilder::new(0).u64(1).pubkey(&key(1)).u8(2).build();
    assert!(matches!(
        decode_search(&buf),
        Err(DecodeError::InvalidEncoding(_))
    ));
}

#[test]
fn test_overview_details() {
    let buf = DocBuilder::new(0)
        .f32(151.5)
        .u64(700)
        .u64(1_700_000_000_000)
        .u64(172_800_000)
        .stake(5_000_000_000, 1, 2)
        .u64(42)
        .f32(7.5)
        .build();

    let overview = decode_overview_details(&buf).unwrap();
    assert_eq!(overview.price, 151.5);
    assert_eq!(overview.epoch, 700);
    assert_eq!(overview.epoch_start, 1_700_000_000_000);
    assert_eq!(overview.pool_stake.active, 5_000_000_000);
    assert_eq!(overview.reserve, 42);
    assert_eq!(overview.apy, 7.5);
}

#[test]
fn test_voter_metrics_group() {
    let buf = common::voter_metrics_group(&[(key(1), 650), (key(2), 651)]);
    let group = decode_voter_metrics_group(&buf).unwrap();
    assert_eq!(group.voters.len(), 2);

    let metrics = &group.voters[&key(2)];
    let leader = &metrics.leader_data[&651];
    assert_eq!(leader.leader_slots, 1);
    assert_eq!(leader.total_vote_tx, 7);
    assert!(metrics.voter_data.is_empty());
    assert!(metrics.pool_data.is_empty());
}

#[test]
fn test_voter_metrics_group_voter_data() {
    let buf = DocBuilder::new(0)
        .u64(1)
        .pubkey(&key(1))
        .u64(0)
        .u64(1)
        .u64(700)
        .u8(5)
        .u64(430_000)
        .u64(1)
        .u64(2)
        .u64(3)
        .u64(4)
        .u64(5)
        .f64(0.01)
        .f32(6.75)
        .u64(1)
        .pubkey(&key(8))
        .bool(true)
        .f64(0.1)
        .f64(0.2)
        .u64(1)
        .u64(700)
        .u64(99)
        .u64(1_000)
        .build();

    let group = decode_voter_metrics_group(&buf).unwrap();
    let metrics = &group.voters[&key(1)];
    let voter = &metrics.voter_data[&700];
    assert_eq!(voter.commission, 5);
    assert_eq!(voter.vote_credits, 430_000);
    assert_eq!(voter.shared_identity_vote_accounts, vec![key(8)]);
    let geo = voter.geo_concentration.unwrap();
    assert_eq!((geo.city, geo.country), (0.1, 0.2));
    assert_eq!(metrics.pool_data[&700].pool_lamports, 1_000);
}
