//! Why a vote account is not eligible for pool stake.
//!
//! On the wire a reason is a `u64` discriminant followed by the payload of
//! exactly one variant. The discriminant set 0-9 is closed: anything else is
//! rejected rather than mapped to a fallback.

use std::fmt;

use crate::error::DecodeError;
use crate::reader::StreamCursor;

/// A single noneligibility reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoneligibilityReason {
    /// 0: blacklisted, with the stated reason
    Blacklisted(String),
    /// 1
    InSuperminority,
    /// 2: epochs without leader slots
    NotLeaderInEpochs(Vec<u64>),
    /// 3
    LowCreditsInEpochs(Vec<u64>),
    /// 4
    ExcessiveDelinquencyInEpochs(Vec<u64>),
    /// 5
    SharedVoteAccounts,
    /// 6: the offending commission percentage
    CommissionTooHigh(u8),
    /// 7
    ApyTooLowInEpochs(Vec<u64>),
    /// 8
    InsufficientBranding,
    /// 9
    InsufficientNonPoolStake,
}

impl NoneligibilityReason {
    /// Wire discriminant of this variant.
    pub fn discriminant(&self) -> u64 {
        match self {
            NoneligibilityReason::Blacklisted(_) => 0,
            NoneligibilityReason::InSuperminority => 1,
            NoneligibilityReason::NotLeaderInEpochs(_) => 2,
            NoneligibilityReason::LowCreditsInEpochs(_) => 3,
            NoneligibilityReason::ExcessiveDelinquencyInEpochs(_) => 4,
            NoneligibilityReason::SharedVoteAccounts => 5,
            NoneligibilityReason::CommissionTooHigh(_) => 6,
            NoneligibilityReason::ApyTooLowInEpochs(_) => 7,
            NoneligibilityReason::InsufficientBranding => 8,
            NoneligibilityReason::InsufficientNonPoolStake => 9,
        }
    }

    /// Epoch list carried by the variant, if any.
    pub fn epochs(&self) -> Option<&[u64]> {
        match self {
            NoneligibilityReason::NotLeaderInEpochs(epochs)
            | NoneligibilityReason::LowCreditsInEpochs(epochs)
            | NoneligibilityReason::ExcessiveDelinquencyInEpochs(epochs)
            | NoneligibilityReason::ApyTooLowInEpochs(epochs) => Some(epochs),
            _ => None,
        }
    }
}

/// Decode one reason.
///
/// # Errors
/// `DecodeError::InvalidVariant` for a discriminant above 9.
pub fn decode_noneligibility_reason(
    cursor: &mut StreamCursor<'_>,
) -> Result<NoneligibilityReason, DecodeError> {
    let reason = match cursor.read_u64()? {
        0 => NoneligibilityReason::Blacklisted(cursor.read_string()?),
        1 => NoneligibilityReason::InSuperminority,
        2 => NoneligibilityReason::NotLeaderInEpochs(decode_epochs(cursor)?),
        3 => NoneligibilityReason::LowCreditsInEpochs(decode_epochs(cursor)?),
        4 => NoneligibilityReason::ExcessiveDelinquencyInEpochs(decode_epochs(cursor)?),
        5 => NoneligibilityReason::SharedVoteAccounts,
        6 => NoneligibilityReason::CommissionTooHigh(cursor.read_u8()?),
        7 => NoneligibilityReason::ApyTooLowInEpochs(decode_epochs(cursor)?),
        8 => NoneligibilityReason::InsufficientBranding,
        9 => NoneligibilityReason::InsufficientNonPoolStake,
        other => return Err(DecodeError::InvalidVariant(other)),
    };
    Ok(reason)
}

/// Count-prefixed list of epoch numbers.
fn decode_epochs(cursor: &mut StreamCursor<'_>) -> Result<Vec<u64>, DecodeError> {
    cursor.read_vec(|c| c.read_u64())
}

/// Write `label (e1, e2, ...)`.
fn write_epochs(f: &mut fmt::Formatter<'_>, label: &str, epochs: &[u64]) -> fmt::Result {
    write!(f, "{} (", label)?;
    for (i, epoch) in epochs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", epoch)?;
    }
    f.write_str(")")
}

impl fmt::Display for NoneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoneligibilityReason::Blacklisted(reason) => write!(f, "Blacklisted ({})", reason),
            NoneligibilityReason::InSuperminority => f.write_str("In superminority"),
            NoneligibilityReason::NotLeaderInEpochs(epochs) => {
                write_epochs(f, "Not leader in recent epochs", epochs)
            }
            NoneligibilityReason::LowCreditsInEpochs(epochs) => {
                write_epochs(f, "Low credits in recent epochs", epochs)
            }
            NoneligibilityReason::ExcessiveDelinquencyInEpochs(epochs) => {
                write_epochs(f, "Excessive delinquency in recent epochs", epochs)
            }
            NoneligibilityReason::SharedVoteAccounts => f.write_str("Shared vote accounts"),
            NoneligibilityReason::CommissionTooHigh(commission) => {
                write!(f, "Commission too high: {}", commission)
            }
            NoneligibilityReason::ApyTooLowInEpochs(epochs) => {
                write_epochs(f, "APY too low in recent epochs", epochs)
            }
            NoneligibilityReason::InsufficientBranding => f.write_str("Insufficient branding"),
            NoneligibilityReason::InsufficientNonPoolStake => {
                f.write_str("Insufficient non-pool stake")
            }
        }
    }
}
