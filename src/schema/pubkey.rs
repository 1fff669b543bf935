//! 32-byte public keys and their base58 text form.

use std::fmt;
use std::str::FromStr;

use crate::codec::base58;
use crate::error::CodecError;

/// Length in bytes of a public key.
pub const PUBKEY_LEN: usize = 32;

/// Opaque 32-byte identity (vote account or validator identity).
///
/// Equality, ordering and hashing are byte-wise. `Display` and `FromStr`
/// use base58, the canonical text form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PublicKey([u8; PUBKEY_LEN]);

impl PublicKey {
    /// Wrap raw key bytes.
    pub const fn new(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBKEY_LEN] {
        &self.0
    }

    /// Build a key from a slice that must be exactly 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        let array: [u8; PUBKEY_LEN] =
            bytes.try_into().map_err(|_| CodecError::InvalidLength {
                expected: PUBKEY_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }

    /// Base58 text form.
    pub fn to_base58(&self) -> String {
        base58().encode(&self.0)
    }

    /// Character selecting the voter-metrics group this key is published in.
    ///
    /// Groups are sharded by the last character of the base58 form.
    pub fn group_key(&self) -> char {
        // An encoding of 32 bytes is never empty
        self.to_base58().chars().last().unwrap_or('1')
    }
}

impl From<[u8; PUBKEY_LEN]> for PublicKey {
    fn from(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for PublicKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = base58().decode(s)?;
        Self::try_from_slice(&bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}
