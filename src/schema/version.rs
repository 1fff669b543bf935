//! Document kinds and the version ranges each decoder accepts.
//!
//! Every document opens with a one-byte version. Fields introduced in a
//! later version are only read when the document's version is at least the
//! one that introduced them; earlier documents get a zero default instead.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::DecodeError;

/// First version carrying `Score::vote_inclusion`, the vote-inclusion
/// leaderboard and the metric weight vectors.
pub const VOTE_INCLUSION_VERSION: u8 = 1;

/// First version carrying `VoterDetails::normalized_score`.
pub const NORMALIZED_SCORE_VERSION: u8 = 2;

/// The top-level documents of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Search,
    VoterMetricsGroup,
    NonPoolVoters,
    OverviewDetails,
    PoolDetails,
}

impl DocumentKind {
    /// Versions this crate knows how to decode.
    pub fn accepted_versions(&self) -> RangeInclusive<u8> {
        match self {
            DocumentKind::Search
            | DocumentKind::VoterMetricsGroup
            | DocumentKind::OverviewDetails => 0..=0,
            DocumentKind::NonPoolVoters | DocumentKind::PoolDetails => 0..=2,
        }
    }

    /// Validate a version byte read from the stream.
    ///
    /// # Errors
    /// `DecodeError::UnsupportedVersion` when outside [`accepted_versions`](Self::accepted_versions).
    pub fn check_version(&self, version: u8) -> Result<u8, DecodeError> {
        if self.accepted_versions().contains(&version) {
            Ok(version)
        } else {
            Err(DecodeError::UnsupportedVersion {
                kind: *self,
                version,
            })
        }
    }

    /// Human-readable name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Search => "search",
            DocumentKind::VoterMetricsGroup => "voter metrics group",
            DocumentKind::NonPoolVoters => "non-pool voters",
            DocumentKind::OverviewDetails => "overview details",
            DocumentKind::PoolDetails => "pool details",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
