//! Shared helpers for building snapshot documents in tests.

#![allow(dead_code)]

use xshin_reader::reader::{encode_u32, encode_u64};
use xshin_reader::PublicKey;

/// Incremental writer for snapshot wire bytes.
#[derive(Debug, Default, Clone)]
pub struct DocBuilder {
    buf: Vec<u8>,
}

impl DocBuilder {
    pub fn new(version: u8) -> Self {
        Self { buf: vec![version] }
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.buf.push(value);
        self
    }

    pub fn bool(self, value: bool) -> Self {
        self.u8(value as u8)
    }

    pub fn u64(mut self, value: u64) -> Self {
        self.buf.extend(encode_u64(value));
        self
    }

    pub fn f32(mut self, value: f32) -> Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f64(mut self, value: f64) -> Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f64s(mut self, value: f64, count: usize) -> Self {
        for _ in 0..count {
            self = self.f64(value);
        }
        self
    }

    pub fn string(mut self, value: &str) -> Self {
        self.buf.extend(encode_u32(value.len() as u32));
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    pub fn optional_string(self, value: Option<&str>) -> Self {
        match value {
            Some(s) => self.bool(true).string(s),
            None => self.bool(false),
        }
    }

    pub fn pubkey(mut self, key: &PublicKey) -> Self {
        self.buf.extend_from_slice(key.as_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// A score with every double set to `value`; vote inclusion is written
    /// only when `version >= 1`.
    pub fn score(self, value: f64, apy: f32, version: u8) -> Self {
        let doubles = if version >= 1 { 8 } else { 7 };
        self.f64s(value, doubles).f32(apy).f64s(value, 3)
    }

    pub fn stake(self, active: u64, activating: u64, deactivating: u64) -> Self {
        self.u64(active).u64(activating).u64(deactivating)
    }

    /// Voter details without any descriptive strings.
    pub fn voter_details(self, total_score: f64, version: u8) -> Self {
        let mut b = self;
        for _ in 0..6 {
            b = b.bool(false);
        }
        b = b.stake(1_000, 0, 0).u64(500).score(0.25, 6.5, version);
        if version >= 2 {
            b = b.score(0.75, 6.5, version);
        }
        b.f64(total_score)
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

pub fn key(byte: u8) -> PublicKey {
    PublicKey::new([byte; 32])
}

/// A pool-details document with empty leaderboards, zero comparison
/// snapshots and the given pool voters.
pub fn pool_details(version: u8, voters: &[(PublicKey, f64)]) -> Vec<u8> {
    let leaderboards = if version >= 1 { 11 } else { 10 };
    let mut b = DocBuilder::new(version).u64(voters.len() as u64);
    for _ in 0..leaderboards {
        b = b.u64(0);
    }
    for _ in 0..4 {
        b = b.score(0.0, 0.0, version);
    }
    b = b.u64(voters.len() as u64);
    for (pubkey, total_score) in voters {
        b = b
            .pubkey(pubkey)
            .voter_details(*total_score, version)
            .stake(10, 0, 0)
            .u64(0);
    }
    if version >= 1 {
        b = b.f64s(0.0, 22);
    }
    b.build()
}

/// A non-pool-voters document; every voter carries one `InSuperminority`
/// reason.
pub fn non_pool_voters(version: u8, voters: &[(PublicKey, f64)]) -> Vec<u8> {
    let mut b = DocBuilder::new(version).u64(voters.len() as u64);
    for (pubkey, total_score) in voters {
        b = b
            .pubkey(pubkey)
            .voter_details(*total_score, version)
            .u64(1)
            .u64(1);
    }
    b.build()
}

pub fn search(names: &[(PublicKey, Option<&str>)]) -> Vec<u8> {
    let mut b = DocBuilder::new(0).u64(names.len() as u64);
    for (pubkey, name) in names {
        b = b.pubkey(pubkey).optional_string(*name);
    }
    b.build()
}

/// A voter-metrics group holding one epoch of leader data per account.
pub fn voter_metrics_group(accounts: &[(PublicKey, u64)]) -> Vec<u8> {
    let mut b = DocBuilder::new(0).u64(accounts.len() as u64);
    for (pubkey, epoch) in accounts {
        b = b.pubkey(pubkey).u64(1).u64(*epoch);
        for value in 1..=7 {
            b = b.u64(value);
        }
        b = b.u64(0).u64(0);
    }
    b.build()
}
