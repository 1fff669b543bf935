//! Public API for loading snapshots and querying them.
//!
//! # Module Structure
//! - `options`: Report options (`ReportOptions`)
//! - `load`: Fetch-then-decode loaders, one per document
//! - `query`: Rankings, award winners and single-validator reports

pub mod load;
pub mod options;
pub mod query;

pub use load::{
    load_non_pool_voters, load_overview_details, load_pool_details, load_search,
    load_voter_metrics_group,
};
pub use options::ReportOptions;
pub use query::{
    all_validators, award_winners, save, top_validators, validator_report, AwardWinner,
    RankedValidator, ValidatorEntry, ValidatorReport,
};
