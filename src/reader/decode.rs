//! Primitive decoders for the snapshot wire format.
//!
//! - Booleans are a single byte, 0x00 or 0x01
//! - Floats and doubles are little-endian IEEE 754
//! - Strings are a tagged-width `u32` length followed by UTF-8 bytes
//! - Fixed-size values (public keys) are raw bytes with no prefix
//!
//! Like the varint functions, every decoder advances the slice cursor by
//! exactly the bytes it consumed and leaves it untouched on failure.

use crate::error::DecodeError;

pub use super::varint::{decode_i64, decode_u16, decode_u32, decode_u64};

/// Decode a boolean value.
///
/// # Errors
/// `DecodeError::InvalidEncoding` if the byte is neither 0 nor 1.
#[inline]
pub fn decode_bool(data: &mut &[u8]) -> Result<bool, DecodeError> {
    let byte = *data
        .first()
        .ok_or_else(|| DecodeError::out_of_bounds(0, 1, 0))?;
    let value = match byte {
        0 => false,
        1 => true,
        _ => {
            return Err(DecodeError::InvalidEncoding(format!(
                "Invalid boolean value: {}, expected 0 or 1",
                byte
            )))
        }
    };
    *data = &data[1..];
    Ok(value)
}

/// Decode a single unsigned byte.
#[inline]
pub fn decode_u8(data: &mut &[u8]) -> Result<u8, DecodeError> {
    let [byte] = decode_fixed::<1>(data)?;
    Ok(byte)
}

/// Decode a 32-bit IEEE 754 floating-point number (little-endian).
#[inline]
pub fn decode_f32(data: &mut &[u8]) -> Result<f32, DecodeError> {
    Ok(f32::from_le_bytes(decode_fixed::<4>(data)?))
}

/// Decode a 64-bit IEEE 754 floating-point number (little-endian).
#[inline]
pub fn decode_f64(data: &mut &[u8]) -> Result<f64, DecodeError> {
    Ok(f64::from_le_bytes(decode_fixed::<8>(data)?))
}

/// Decode a fixed-size byte array into an owned array.
#[inline]
pub fn decode_fixed<const N: usize>(data: &mut &[u8]) -> Result<[u8; N], DecodeError> {
    let slice = decode_fixed_ref(data, N)?;
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(slice);
    Ok(bytes)
}

/// Decode a fixed-size byte range without copying (returns a slice reference).
#[inline]
pub fn decode_fixed_ref<'a>(data: &mut &'a [u8], size: usize) -> Result<&'a [u8], DecodeError> {
    if data.len() < size {
        return Err(DecodeError::out_of_bounds(0, size, data.len()));
    }
    let bytes = &data[..size];
    *data = &data[size..];
    Ok(bytes)
}

/// Decode a UTF-8 string without copying (returns a &str reference).
///
/// # Errors
/// - `DecodeError::OutOfBounds` if the declared length exceeds the buffer
/// - `DecodeError::InvalidEncoding` if the bytes are not valid UTF-8
#[inline]
pub fn decode_string_ref<'a>(data: &mut &'a [u8]) -> Result<&'a str, DecodeError> {
    let mut rest = *data;
    let len = super::varint::decode_u32(&mut rest)? as usize;
    let prefix = data.len() - rest.len();
    if rest.len() < len {
        // Report the offset of the payload, not of the length prefix
        return Err(DecodeError::out_of_bounds(prefix, len, rest.len()));
    }
    let text = std::str::from_utf8(&rest[..len])
        .map_err(|e| DecodeError::InvalidEncoding(format!("Invalid UTF-8: {}", e)))?;
    *data = &rest[len..];
    Ok(text)
}

/// Decode a UTF-8 string.
#[inline]
pub fn decode_string(data: &mut &[u8]) -> Result<String, DecodeError> {
    decode_string_ref(data).map(str::to_owned)
}
