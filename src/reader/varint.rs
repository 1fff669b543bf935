//! Tagged-width unsigned integers and zigzag signed integers.
//!
//! Unsigned integers are written with a one-byte prefix that either holds
//! the value itself or announces a wider little-endian payload:
//! - `0..=250` -> the value, 1 byte total
//! - `251` -> `u16` follows, 3 bytes total
//! - `252` -> `u32` follows, 5 bytes total
//! - `253` -> `u64` follows, 9 bytes total
//!
//! `u16` only recognises tag 251 and `u32` only tags 251/252; any other
//! leading byte is taken as the value. `u64` rejects 254 and 255.
//!
//! Signed 64-bit integers are zigzag mapped onto `u64`:
//! - 0 -> 0, 1 -> -1, 2 -> 1, 3 -> -2, ...
//!
//! All functions take a slice cursor and advance it past the bytes they
//! consume. Out-of-bounds offsets are relative to the slice start; the
//! [`StreamCursor`](super::StreamCursor) rebases them onto the document.

use crate::error::DecodeError;

/// Leading byte announcing a 2-byte little-endian payload.
pub const U16_TAG: u8 = 251;
/// Leading byte announcing a 4-byte little-endian payload.
pub const U32_TAG: u8 = 252;
/// Leading byte announcing an 8-byte little-endian payload.
pub const U64_TAG: u8 = 253;

// ============================================================================
// Decoding Functions
// ============================================================================

/// Take `N` bytes after a `skip`-byte prefix, advancing past both.
#[inline]
fn take_after<const N: usize>(data: &mut &[u8], skip: usize) -> Result<[u8; N], DecodeError> {
    let total = skip + N;
    if data.len() < total {
        return Err(DecodeError::out_of_bounds(0, total, data.len()));
    }
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&data[skip..total]);
    *data = &data[total..];
    Ok(bytes)
}

/// Read the leading byte without consuming it.
#[inline]
pub fn peek_tag(data: &[u8]) -> Result<u8, DecodeError> {
    data.first()
        .copied()
        .ok_or_else(|| DecodeError::out_of_bounds(0, 1, 0))
}

#[inline]
fn take_plain(data: &mut &[u8]) -> u8 {
    let byte = data[0];
    *data = &data[1..];
    byte
}

/// Decode a tagged-width `u16`.
#[inline]
pub fn decode_u16(data: &mut &[u8]) -> Result<u16, DecodeError> {
    match peek_tag(data)? {
        U16_TAG => Ok(u16::from_le_bytes(take_after::<2>(data, 1)?)),
        _ => Ok(take_plain(data) as u16),
    }
}

/// Decode a tagged-width `u32`.
#[inline]
pub fn decode_u32(data: &mut &[u8]) -> Result<u32, DecodeError> {
    match peek_tag(data)? {
        U16_TAG => Ok(u16::from_le_bytes(take_after::<2>(data, 1)?) as u32),
        U32_TAG => Ok(u32::from_le_bytes(take_after::<4>(data, 1)?)),
        _ => Ok(take_plain(data) as u32),
    }
}

/// Decode a tagged-width `u64`.
///
/// # Errors
/// - `DecodeError::OutOfBounds` if the tag announces more bytes than remain
/// - `DecodeError::InvalidEncoding` if the leading byte is 254 or 255
#[inline]
pub fn decode_u64(data: &mut &[u8]) -> Result<u64, DecodeError> {
    match peek_tag(data)? {
        U16_TAG => Ok(u16::from_le_bytes(take_after::<2>(data, 1)?) as u64),
        U32_TAG => Ok(u32::from_le_bytes(take_after::<4>(data, 1)?) as u64),
        U64_TAG => Ok(u64::from_le_bytes(take_after::<8>(data, 1)?)),
        tag @ (254 | 255) => Err(DecodeError::InvalidEncoding(format!(
            "Invalid u64 width tag: {}",
            tag
        ))),
        _ => Ok(take_plain(data) as u64),
    }
}

/// Decode a zigzag-encoded `i64`.
///
/// Odd raw values are negative: `-((raw + 1) >> 1)`; even raw values are
/// `raw >> 1`.
#[inline]
pub fn decode_i64(data: &mut &[u8]) -> Result<i64, DecodeError> {
    let raw = decode_u64(data)?;
    Ok(unzigzag(raw))
}

/// Map a raw zigzag value back onto its signed value.
#[inline]
pub fn unzigzag(raw: u64) -> i64 {
    // (raw >> 1) ^ -(raw & 1) equals -((raw + 1) >> 1) for odd raw without overflowing
    ((raw >> 1) as i64) ^ (-((raw & 1) as i64))
}

// ============================================================================
// Encoding Functions
// ============================================================================

/// Encode a `u64` using the narrowest tagged width.
pub fn encode_u64(value: u64) -> Vec<u8> {
    if value < U16_TAG as u64 {
        vec![value as u8]
    } else if value <= u16::MAX as u64 {
        let mut out = vec![U16_TAG];
        out.extend_from_slice(&(value as u16).to_le_bytes());
        out
    } else if value <= u32::MAX as u64 {
        let mut out = vec![U32_TAG];
        out.extend_from_slice(&(value as u32).to_le_bytes());
        out
    } else {
        let mut out = vec![U64_TAG];
        out.extend_from_slice(&value.to_le_bytes());
        out
    }
}

/// Encode a `u32` using the narrowest tagged width.
pub fn encode_u32(value: u32) -> Vec<u8> {
    encode_u64(value as u64)
}

/// Encode a `u16` using the narrowest tagged width.
pub fn encode_u16(value: u16) -> Vec<u8> {
    encode_u64(value as u64)
}

/// Encode an `i64` as zigzag followed by the tagged width.
pub fn encode_i64(value: i64) -> Vec<u8> {
    let zigzag = ((value << 1) ^ (value >> 63)) as u64;
    encode_u64(zigzag)
}
