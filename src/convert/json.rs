//! Rendering decoded records as `serde_json::Value` trees.
//!
//! The layout is what downstream tooling consumes:
//! - `u64` counters stay exact JSON integers
//! - maps become objects keyed by base58 public key or decimal epoch, in
//!   stream order
//! - absent optional fields are `null`
//! - noneligibility reasons render as their summary text
//! - non-finite floats become `null`

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::schema::*;

/// Conversion of a decoded record into JSON.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

fn float(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Render an `f32` through its exact `f64` value, as a JS runtime would.
fn float32(value: f32) -> Value {
    float(value as f64)
}

fn optional_string(value: &Option<String>) -> Value {
    value.as_ref().map_or(Value::Null, |s| Value::String(s.clone()))
}

/// Render a map as a JSON object; keys are rendered with `Display`.
fn object<K: std::fmt::Display, V>(map: &IndexMap<K, V>, f: impl Fn(&V) -> Value) -> Value {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        out.insert(key.to_string(), f(value));
    }
    Value::Object(out)
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToJson::to_json)
    }
}

impl ToJson for PublicKey {
    fn to_json(&self) -> Value {
        Value::String(self.to_base58())
    }
}

impl ToJson for Stake {
    fn to_json(&self) -> Value {
        json!({
            "active": self.active,
            "activating": self.activating,
            "deactivating": self.deactivating,
        })
    }
}

impl ToJson for Score {
    fn to_json(&self) -> Value {
        json!({
            "skip_rate": float(self.skip_rate),
            "prior_skip_rate": float(self.prior_skip_rate),
            "subsequent_skip_rate": float(self.subsequent_skip_rate),
            "cu": float(self.cu),
            "latency": float(self.latency),
            "llv": float(self.llv),
            "cv": float(self.cv),
            "vote_inclusion": float(self.vote_inclusion),
            "apy": float32(self.apy),
            "pool_extra_lamports": float(self.pool_extra_lamports),
            "city_concentration": float(self.city_concentration),
            "country_concentration": float(self.country_concentration),
        })
    }
}

impl ToJson for MetricWeights {
    fn to_json(&self) -> Value {
        json!({
            "skip_rate_weight": float(self.skip_rate_weight),
            "prior_skip_rate_weight": float(self.prior_skip_rate_weight),
            "subsequent_skip_rate_weight": float(self.subsequent_skip_rate_weight),
            "cu_weight": float(self.cu_weight),
            "latency_weight": float(self.latency_weight),
            "llv_weight": float(self.llv_weight),
            "cv_weight": float(self.cv_weight),
            "vote_inclusion_weight": float(self.vote_inclusion_weight),
            "apy_weight": float(self.apy_weight),
            "city_concentration_weight": float(self.city_concentration_weight),
            "country_concentration_weight": float(self.country_concentration_weight),
        })
    }
}

impl ToJson for ComparativeMetrics {
    fn to_json(&self) -> Value {
        json!({
            "pool_raw": self.pool_raw.to_json(),
            "other_raw": self.other_raw.to_json(),
        })
    }
}

impl ToJson for NoneligibilityReason {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToJson for VoterDetails {
    fn to_json(&self) -> Value {
        json!({
            "name": optional_string(&self.name),
            "icon_url": optional_string(&self.icon_url),
            "details": optional_string(&self.details),
            "website_url": optional_string(&self.website_url),
            "city": optional_string(&self.city),
            "country": optional_string(&self.country),
            "stake": self.stake.to_json(),
            "target_pool_stake": self.target_pool_stake,
            "raw_score": self.raw_score.to_json(),
            "normalized_score": self.normalized_score.to_json(),
            "total_score": float(self.total_score),
        })
    }
}

impl ToJson for PoolVoterDetails {
    fn to_json(&self) -> Value {
        json!({
            "details": self.details.to_json(),
            "pool_stake": self.pool_stake.to_json(),
            "noneligibility_reasons": self.noneligibility_reasons.to_json(),
        })
    }
}

impl ToJson for NonPoolVoterDetails {
    fn to_json(&self) -> Value {
        json!({
            "details": self.details.to_json(),
            "noneligibility_reasons": self.noneligibility_reasons.to_json(),
        })
    }
}

impl ToJson for LeaderboardEntry<f64> {
    fn to_json(&self) -> Value {
        json!({
            "pubkey": self.pubkey.to_json(),
            "metric": float(self.metric),
            "ranking": self.rank,
        })
    }
}

impl ToJson for LeaderboardEntry<f32> {
    fn to_json(&self) -> Value {
        json!({
            "pubkey": self.pubkey.to_json(),
            "metric": float32(self.metric),
            "ranking": self.rank,
        })
    }
}

impl ToJson for LeaderData {
    fn to_json(&self) -> Value {
        json!({
            "leader_slots": self.leader_slots,
            "leader_groups": self.leader_groups,
            "blocks": self.blocks,
            "prior_skips": self.prior_skips,
            "subsequent_skips": self.subsequent_skips,
            "total_cu": self.total_cu,
            "total_vote_tx": self.total_vote_tx,
        })
    }
}

impl ToJson for VoterData {
    fn to_json(&self) -> Value {
        let (city, country) = match self.geo_concentration {
            Some(geo) => (float(geo.city), float(geo.country)),
            None => (Value::Null, Value::Null),
        };
        json!({
            "commission": self.commission,
            "vote_credits": self.vote_credits,
            "total_fork_slots_voted_on": self.total_fork_slots_voted_on,
            "total_fork_slot_vote_latency": self.total_fork_slot_vote_latency,
            "total_low_latency_fork_slots": self.total_low_latency_fork_slots,
            "total_successful_vote_tx": self.total_successful_vote_tx,
            "total_consensus_vote_tx": self.total_consensus_vote_tx,
            "delinquency_fraction": float(self.delinquency_fraction),
            "apy": float32(self.apy),
            "shared_identity_vote_accounts": self.shared_identity_vote_accounts.to_json(),
            "geo_concentration_city": city,
            "geo_concentration_country": country,
        })
    }
}

impl ToJson for PoolData {
    fn to_json(&self) -> Value {
        json!({
            "extra_lamports": self.extra_lamports,
            "pool_lamports": self.pool_lamports,
        })
    }
}

impl ToJson for VoteAccountMetrics {
    fn to_json(&self) -> Value {
        json!({
            "leader_data": object(&self.leader_data, ToJson::to_json),
            "voter_data": object(&self.voter_data, ToJson::to_json),
            "pool_data": object(&self.pool_data, ToJson::to_json),
        })
    }
}

impl ToJson for SearchIndex {
    fn to_json(&self) -> Value {
        json!({ "voters": object(&self.voters, optional_string) })
    }
}

impl ToJson for VoterMetricsGroup {
    fn to_json(&self) -> Value {
        json!({ "voters": object(&self.voters, ToJson::to_json) })
    }
}

impl ToJson for NonPoolVoters {
    fn to_json(&self) -> Value {
        json!({ "voters": object(&self.voters, ToJson::to_json) })
    }
}

impl ToJson for OverviewDetails {
    fn to_json(&self) -> Value {
        json!({
            "price": float32(self.price),
            "epoch": self.epoch,
            "epoch_start": self.epoch_start,
            "epoch_duration": self.epoch_duration,
            "pool_stake": self.pool_stake.to_json(),
            "reserve": self.reserve,
            "apy": float32(self.apy),
        })
    }
}

impl ToJson for PoolDetails {
    fn to_json(&self) -> Value {
        json!({
            "pool_validator_count": self.pool_validator_count,
            "best_skip_rate": self.best_skip_rate.to_json(),
            "best_cu": self.best_cu.to_json(),
            "best_latency": self.best_latency.to_json(),
            "best_llv": self.best_llv.to_json(),
            "best_cv": self.best_cv.to_json(),
            "best_vote_inclusion": self.best_vote_inclusion.to_json(),
            "best_apy": self.best_apy.to_json(),
            "best_pool_extra_lamports": self.best_pool_extra_lamports.to_json(),
            "best_city_concentration": self.best_city_concentration.to_json(),
            "best_country_concentration": self.best_country_concentration.to_json(),
            "best_overall": self.best_overall.to_json(),
            "compare_by_current": self.compare_by_current.to_json(),
            "compare_by_target": self.compare_by_target.to_json(),
            "pool_voters": object(&self.pool_voters, ToJson::to_json),
            "inclusion_weights": self.inclusion_weights.to_json(),
            "ranking_weights": self.ranking_weights.to_json(),
        })
    }
}
