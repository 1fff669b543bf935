//! Queries over decoded snapshots.
//!
//! The pure functions here join and rank already-decoded documents;
//! [`validator_report`] additionally drives a [`Fetcher`] to load what it
//! needs from the latest snapshot.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::convert::ToJson;
use crate::error::ReaderError;
use crate::schema::{
    LeaderboardKind, NonPoolVoterDetails, NonPoolVoters, PoolDetails, PoolVoterDetails, PublicKey,
    Stake, VoteAccountMetrics,
};
use crate::sink::RecordSink;
use crate::source::Fetcher;

use super::load::{
    load_non_pool_voters, load_pool_details, load_search, load_voter_metrics_group,
};
use super::options::ReportOptions;

/// A vote account with the score it is ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedValidator {
    pub pubkey: PublicKey,
    pub total_score: f64,
    /// Whether the account is in the pool (non-pool accounts carry zero pool stake)
    pub in_pool: bool,
    pub validator: PoolVoterDetails,
}

/// A leaderboard entry joined with the pool voter it names.
#[derive(Debug, Clone, PartialEq)]
pub struct AwardWinner {
    pub pubkey: PublicKey,
    pub metric: f64,
    pub rank: u64,
    pub validator: PoolVoterDetails,
}

/// Where a looked-up vote account was found.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorEntry {
    Pool(PoolVoterDetails),
    NonPool(NonPoolVoterDetails),
}

/// Everything the latest snapshot says about one vote account.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorReport {
    pub timestamp: u64,
    pub pubkey: PublicKey,
    pub validator: ValidatorEntry,
    pub metrics: Option<VoteAccountMetrics>,
    pub search_name: Option<String>,
}

fn ranked(pubkey: PublicKey, validator: PoolVoterDetails, in_pool: bool) -> RankedValidator {
    RankedValidator {
        pubkey,
        total_score: validator.details.total_score,
        in_pool,
        validator,
    }
}

/// Highest total score first; ties keep their input order.
fn sort_by_score(validators: &mut [RankedValidator]) {
    validators.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
}

/// Pool voters ranked by total score, truncated to `limit`.
pub fn top_validators(pool: &PoolDetails, limit: usize) -> Vec<RankedValidator> {
    let mut validators = all_validators(pool, None);
    validators.truncate(limit);
    validators
}

/// Pool voters, plus non-pool voters not already in the pool, ranked by
/// total score.
pub fn all_validators(pool: &PoolDetails, non_pool: Option<&NonPoolVoters>) -> Vec<RankedValidator> {
    let mut validators: Vec<RankedValidator> = pool
        .pool_voters
        .iter()
        .map(|(pubkey, voter)| ranked(*pubkey, voter.clone(), true))
        .collect();

    if let Some(non_pool) = non_pool {
        for (pubkey, voter) in &non_pool.voters {
            if pool.pool_voters.contains_key(pubkey) {
                continue;
            }
            let as_pool = PoolVoterDetails {
                details: voter.details.clone(),
                pool_stake: Stake::default(),
                noneligibility_reasons: voter.noneligibility_reasons.clone(),
            };
            validators.push(ranked(*pubkey, as_pool, false));
        }
    }

    sort_by_score(&mut validators);
    validators
}

/// Entries of the leaderboard named `category` (e.g. `best_llv`) that are
/// pool voters, in leaderboard order.
///
/// # Errors
/// `ReaderError::UnknownCategory` if `category` names no leaderboard.
pub fn award_winners(pool: &PoolDetails, category: &str) -> Result<Vec<AwardWinner>, ReaderError> {
    let kind = LeaderboardKind::from_name(category)
        .ok_or_else(|| ReaderError::UnknownCategory(category.to_string()))?;

    Ok(pool
        .leaderboard(kind)
        .into_iter()
        .filter_map(|entry| {
            pool.pool_voters
                .get(&entry.pubkey)
                .map(|validator| AwardWinner {
                    pubkey: entry.pubkey,
                    metric: entry.metric,
                    rank: entry.rank,
                    validator: validator.clone(),
                })
        })
        .collect())
}

/// Look up `pubkey` in the latest snapshot.
///
/// Pool voters are searched first, then non-pool voters. Metrics and the
/// display name are attached when `options` asks for them and the account
/// appears in those documents.
///
/// # Errors
/// - `ReaderError::NotFound` if neither voter document lists the account
/// - any fetch or decode failure of a document that had to be loaded
pub async fn validator_report<F: Fetcher + ?Sized>(
    fetcher: &F,
    pubkey: &PublicKey,
    options: &ReportOptions,
) -> Result<ValidatorReport, ReaderError> {
    let timestamp = fetcher.latest_timestamp().await?;
    debug!(pubkey = %pubkey, timestamp, "Building validator report");

    let pool = load_pool_details(fetcher, timestamp).await?;
    let validator = match pool.pool_voters.get(pubkey) {
        Some(voter) => ValidatorEntry::Pool(voter.clone()),
        None => {
            let mut non_pool = load_non_pool_voters(fetcher, timestamp).await?;
            let voter = non_pool
                .voters
                .swap_remove(pubkey)
                .ok_or_else(|| ReaderError::NotFound(pubkey.to_string()))?;
            ValidatorEntry::NonPool(voter)
        }
    };

    let metrics = if options.include_metrics {
        let mut group = load_voter_metrics_group(fetcher, timestamp, pubkey).await?;
        group.voters.swap_remove(pubkey)
    } else {
        None
    };

    let search_name = if options.include_search_name {
        let mut search = load_search(fetcher, timestamp).await?;
        search.voters.swap_remove(pubkey).flatten()
    } else {
        None
    };

    Ok(ValidatorReport {
        timestamp,
        pubkey: *pubkey,
        validator,
        metrics,
        search_name,
    })
}

/// Render `record` and hand it to `sink` under `name`.
pub async fn save<S, T>(sink: &S, name: &str, record: &T) -> Result<(), ReaderError>
where
    S: RecordSink + ?Sized,
    T: ToJson + ?Sized,
{
    sink.write(name, &record.to_json()).await?;
    Ok(())
}

// ============================================================================
// JSON rendering
// ============================================================================

impl ToJson for RankedValidator {
    fn to_json(&self) -> Value {
        json!({
            "pubkey": self.pubkey.to_json(),
            "total_score": self.total_score,
            "in_pool": self.in_pool,
            "validator": self.validator.to_json(),
        })
    }
}

impl ToJson for AwardWinner {
    fn to_json(&self) -> Value {
        json!({
            "pubkey": self.pubkey.to_json(),
            "metric": self.metric,
            "ranking": self.rank,
            "validator": self.validator.to_json(),
        })
    }
}

impl ToJson for ValidatorEntry {
    fn to_json(&self) -> Value {
        match self {
            ValidatorEntry::Pool(voter) => voter.to_json(),
            ValidatorEntry::NonPool(voter) => voter.to_json(),
        }
    }
}

impl ToJson for ValidatorReport {
    fn to_json(&self) -> Value {
        let mut validator = match self.validator.to_json() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Some(metrics) = &self.metrics {
            validator.insert("metrics".to_string(), metrics.to_json());
        }
        if let Some(name) = &self.search_name {
            validator.insert("search_name".to_string(), Value::String(name.clone()));
        }
        json!({
            "timestamp": self.timestamp,
            "pubkey": self.pubkey.to_json(),
            "validator": Value::Object(validator),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LeaderboardEntry, VoterDetails};

    fn key(byte: u8) -> PublicKey {
        PublicKey::new([byte; 32])
    }

    fn pool_voter(total_score: f64) -> PoolVoterDetails {
        PoolVoterDetails {
            details: VoterDetails {
                total_score,
                ..Default::default()
            },
            pool_stake: Stake {
                active: 10,
                ..Default::default()
            },
            noneligibility_reasons: Vec::new(),
        }
    }

    fn sample_pool() -> PoolDetails {
        let mut pool = PoolDetails::default();
        pool.pool_voters.insert(key(1), pool_voter(0.5));
        pool.pool_voters.insert(key(2), pool_voter(0.9));
        pool.pool_voters.insert(key(3), pool_voter(0.7));
        pool.best_llv = vec![
            LeaderboardEntry {
                pubkey: key(2),
                metric: 0.99,
                rank: 1,
            },
            LeaderboardEntry {
                pubkey: key(9),
                metric: 0.98,
                rank: 2,
            },
            LeaderboardEntry {
                pubkey: key(1),
                metric: 0.97,
                rank: 3,
            },
        ];
        pool
    }

    #[test]
    fn test_top_validators_sorted_and_limited() {
        let top = top_validators(&sample_pool(), 2);
        let keys: Vec<_> = top.iter().map(|v| v.pubkey).collect();
        assert_eq!(keys, vec![key(2), key(3)]);
        assert!(top.iter().all(|v| v.in_pool));
    }

    #[test]
    fn test_all_validators_merges_non_pool() {
        let pool = sample_pool();
        let mut non_pool = NonPoolVoters::default();
        non_pool.voters.insert(
            key(4),
            NonPoolVoterDetails {
                details: VoterDetails {
                    total_score: 0.8,
                    ..Default::default()
                },
                noneligibility_reasons: Vec::new(),
            },
        );
        // Already in the pool: must not be duplicated
        non_pool.voters.insert(key(1), NonPoolVoterDetails::default());

        let all = all_validators(&pool, Some(&non_pool));
        let keys: Vec<_> = all.iter().map(|v| v.pubkey).collect();
        assert_eq!(keys, vec![key(2), key(4), key(3), key(1)]);
        let outsider = &all[1];
        assert!(!outsider.in_pool);
        assert_eq!(outsider.validator.pool_stake, Stake::default());
    }

    #[test]
    fn test_award_winners_skips_non_pool_entries() {
        let winners = award_winners(&sample_pool(), "best_llv").unwrap();
        let ranks: Vec<_> = winners.iter().map(|w| (w.pubkey, w.rank)).collect();
        assert_eq!(ranks, vec![(key(2), 1), (key(1), 3)]);
        assert_eq!(winners[0].metric, 0.99);
    }

    #[test]
    fn test_award_winners_unknown_category() {
        assert!(matches!(
            award_winners(&sample_pool(), "best_vibes"),
            Err(ReaderError::UnknownCategory(c)) if c == "best_vibes"
        ));
    }

    #[test]
    fn test_report_json_attaches_extras() {
        let report = ValidatorReport {
            timestamp: 1,
            pubkey: key(1),
            validator: ValidatorEntry::Pool(pool_voter(0.5)),
            metrics: Some(VoteAccountMetrics::default()),
            search_name: Some("node".to_string()),
        };
        let json = report.to_json();
        assert_eq!(json["validator"]["search_name"], json!("node"));
        assert!(json["validator"]["metrics"]["leader_data"].is_object());
        assert_eq!(json["validator"]["pool_stake"]["active"], json!(10));
    }
}
