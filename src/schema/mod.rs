//! Snapshot document schemas and decoders.
//!
//! This module defines the decoded record types, the closed
//! noneligibility-reason union, per-document version gating and the
//! decoders that compose the [`reader`](crate::reader) primitives into
//! whole documents.

mod documents;
mod pubkey;
mod reason;
pub mod records;
mod types;
mod version;

pub use documents::{
    decode_non_pool_voters, decode_overview_details, decode_pool_details, decode_search,
    decode_voter_metrics_group,
};
pub use pubkey::{PublicKey, PUBKEY_LEN};
pub use reason::{decode_noneligibility_reason, NoneligibilityReason};
pub use types::*;
pub use version::{DocumentKind, NORMALIZED_SCORE_VERSION, VOTE_INCLUSION_VERSION};
