//! Decoded snapshot records.
//!
//! Every record is an immutable value produced by one decode pass. Maps keep
//! the order in which entries appeared in the stream.

use indexmap::IndexMap;

use super::pubkey::PublicKey;
use super::reason::NoneligibilityReason;

/// Stake split by activation state, in lamports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stake {
    pub active: u64,
    pub activating: u64,
    pub deactivating: u64,
}

/// Per-validator performance metrics.
///
/// The same shape carries raw measurements and their normalized
/// counterparts. `vote_inclusion` is only on the wire from version 1 and
/// reads as 0.0 before that.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Score {
    pub skip_rate: f64,
    pub prior_skip_rate: f64,
    pub subsequent_skip_rate: f64,
    /// Compute units per block
    pub cu: f64,
    pub latency: f64,
    /// Low-latency vote fraction
    pub llv: f64,
    /// Consensus vote fraction
    pub cv: f64,
    pub vote_inclusion: f64,
    pub apy: f32,
    pub pool_extra_lamports: f64,
    pub city_concentration: f64,
    pub country_concentration: f64,
}

/// Weights applied to each score component.
///
/// Absent before version 1, where every weight reads as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricWeights {
    pub skip_rate_weight: f64,
    pub prior_skip_rate_weight: f64,
    pub subsequent_skip_rate_weight: f64,
    pub cu_weight: f64,
    pub latency_weight: f64,
    pub llv_weight: f64,
    pub cv_weight: f64,
    pub vote_inclusion_weight: f64,
    pub apy_weight: f64,
    pub city_concentration_weight: f64,
    pub country_concentration_weight: f64,
}

/// Pool-wide raw scores compared against everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComparativeMetrics {
    pub pool_raw: Score,
    pub other_raw: Score,
}

/// Descriptive and scoring information for one vote account.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoterDetails {
    pub name: Option<String>,
    pub icon_url: Option<String>,
    pub details: Option<String>,
    pub website_url: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub stake: Stake,
    pub target_pool_stake: u64,
    pub raw_score: Score,
    /// All zero before version 2
    pub normalized_score: Score,
    pub total_score: f64,
}

/// A vote account delegated to by the pool.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoolVoterDetails {
    pub details: VoterDetails,
    pub pool_stake: Stake,
    pub noneligibility_reasons: Vec<NoneligibilityReason>,
}

/// A vote account outside the pool.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NonPoolVoterDetails {
    pub details: VoterDetails,
    pub noneligibility_reasons: Vec<NoneligibilityReason>,
}

/// One row of a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderboardEntry<M> {
    pub pubkey: PublicKey,
    pub metric: M,
    pub rank: u64,
}

/// Best-first ranking of vote accounts by one metric.
pub type Leaderboard<M> = Vec<LeaderboardEntry<M>>;

/// Block production during one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeaderData {
    pub leader_slots: u64,
    pub leader_groups: u64,
    pub blocks: u64,
    pub prior_skips: u64,
    pub subsequent_skips: u64,
    pub total_cu: u64,
    pub total_vote_tx: u64,
}

/// Share of stake in the validator's city and country.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoConcentration {
    pub city: f64,
    pub country: f64,
}

/// Voting performance during one epoch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoterData {
    pub commission: u8,
    pub vote_credits: u64,
    pub total_fork_slots_voted_on: u64,
    pub total_fork_slot_vote_latency: u64,
    pub total_low_latency_fork_slots: u64,
    pub total_successful_vote_tx: u64,
    pub total_consensus_vote_tx: u64,
    pub delinquency_fraction: f64,
    pub apy: f32,
    pub shared_identity_vote_accounts: Vec<PublicKey>,
    pub geo_concentration: Option<GeoConcentration>,
}

/// Pool economics during one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolData {
    pub extra_lamports: u64,
    pub pool_lamports: u64,
}

/// Epoch-keyed history for one vote account.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoteAccountMetrics {
    pub leader_data: IndexMap<u64, LeaderData>,
    pub voter_data: IndexMap<u64, VoterData>,
    pub pool_data: IndexMap<u64, PoolData>,
}

// ============================================================================
// Top-level documents
// ============================================================================

/// `search.bin`: every known vote account and its display name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchIndex {
    pub version: u8,
    pub voters: IndexMap<PublicKey, Option<String>>,
}

/// `groups/<c>.bin`: metrics for the vote accounts sharded into one group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoterMetricsGroup {
    pub version: u8,
    pub voters: IndexMap<PublicKey, VoteAccountMetrics>,
}

/// `non_pool_voters.bin`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NonPoolVoters {
    pub version: u8,
    pub voters: IndexMap<PublicKey, NonPoolVoterDetails>,
}

/// `overview.bin`: pool-wide summary for the current epoch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverviewDetails {
    pub version: u8,
    pub price: f32,
    pub epoch: u64,
    pub epoch_start: u64,
    pub epoch_duration: u64,
    pub pool_stake: Stake,
    pub reserve: u64,
    pub apy: f32,
}

/// `pool.bin`: leaderboards, comparisons and every pool voter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoolDetails {
    pub version: u8,
    pub pool_validator_count: u64,
    pub best_skip_rate: Leaderboard<f64>,
    pub best_cu: Leaderboard<f64>,
    pub best_latency: Leaderboard<f64>,
    pub best_llv: Leaderboard<f64>,
    pub best_cv: Leaderboard<f64>,
    /// Empty before version 1
    pub best_vote_inclusion: Leaderboard<f64>,
    pub best_apy: Leaderboard<f32>,
    pub best_pool_extra_lamports: Leaderboard<f64>,
    pub best_city_concentration: Leaderboard<f64>,
    pub best_country_concentration: Leaderboard<f64>,
    pub best_overall: Leaderboard<f64>,
    pub compare_by_current: ComparativeMetrics,
    pub compare_by_target: ComparativeMetrics,
    pub pool_voters: IndexMap<PublicKey, PoolVoterDetails>,
    /// All zero before version 1
    pub inclusion_weights: MetricWeights,
    /// All zero before version 1
    pub ranking_weights: MetricWeights,
}

/// Names the eleven leaderboards of [`PoolDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderboardKind {
    SkipRate,
    Cu,
    Latency,
    Llv,
    Cv,
    VoteInclusion,
    Apy,
    PoolExtraLamports,
    CityConcentration,
    CountryConcentration,
    Overall,
}

impl LeaderboardKind {
    /// Every leaderboard, in wire order.
    pub const ALL: [LeaderboardKind; 11] = [
        LeaderboardKind::SkipRate,
        LeaderboardKind::Cu,
        LeaderboardKind::Latency,
        LeaderboardKind::Llv,
        LeaderboardKind::Cv,
        LeaderboardKind::VoteInclusion,
        LeaderboardKind::Apy,
        LeaderboardKind::PoolExtraLamports,
        LeaderboardKind::CityConcentration,
        LeaderboardKind::CountryConcentration,
        LeaderboardKind::Overall,
    ];

    /// Field name of the leaderboard, e.g. `best_skip_rate`.
    pub fn name(&self) -> &'static str {
        match self {
            LeaderboardKind::SkipRate => "best_skip_rate",
            LeaderboardKind::Cu => "best_cu",
            LeaderboardKind::Latency => "best_latency",
            LeaderboardKind::Llv => "best_llv",
            LeaderboardKind::Cv => "best_cv",
            LeaderboardKind::VoteInclusion => "best_vote_inclusion",
            LeaderboardKind::Apy => "best_apy",
            LeaderboardKind::PoolExtraLamports => "best_pool_extra_lamports",
            LeaderboardKind::CityConcentration => "best_city_concentration",
            LeaderboardKind::CountryConcentration => "best_country_concentration",
            LeaderboardKind::Overall => "best_overall",
        }
    }

    /// Parse a leaderboard from its field name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl PoolDetails {
    /// Entries of one leaderboard with the metric widened to `f64`.
    pub fn leaderboard(&self, kind: LeaderboardKind) -> Leaderboard<f64> {
        let board = match kind {
            LeaderboardKind::SkipRate => &self.best_skip_rate,
            LeaderboardKind::Cu => &self.best_cu,
            LeaderboardKind::Latency => &self.best_latency,
            LeaderboardKind::Llv => &self.best_llv,
            LeaderboardKind::Cv => &self.best_cv,
            LeaderboardKind::VoteInclusion => &self.best_vote_inclusion,
            LeaderboardKind::Apy => {
                return self
                    .best_apy
                    .iter()
                    .map(|entry| LeaderboardEntry {
                        pubkey: entry.pubkey,
                        metric: entry.metric as f64,
                        rank: entry.rank,
                    })
                    .collect()
            }
            LeaderboardKind::PoolExtraLamports => &self.best_pool_extra_lamports,
            LeaderboardKind::CityConcentration => &self.best_city_concentration,
            LeaderboardKind::CountryConcentration => &self.best_country_concentration,
            LeaderboardKind::Overall => &self.best_overall,
        };
        board.clone()
    }
}
