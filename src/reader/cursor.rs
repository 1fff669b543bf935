//! Sequential read cursor over an immutable document buffer.
//!
//! `StreamCursor` owns nothing but an offset: the buffer is borrowed for the
//! lifetime of one decode call. Every read goes through the slice decoders in
//! [`decode`](super::decode) and advances the offset by exactly the bytes
//! consumed, so `offset() <= len()` holds after every call, failed or not.

use crate::error::DecodeError;

use super::decode;

/// Read pointer over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct StreamCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> StreamCursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current read offset from the start of the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Whether every byte has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Run a slice decoder at the current offset.
    ///
    /// On success the offset moves past the consumed bytes; on failure it is
    /// left unchanged and out-of-bounds offsets are rebased onto the buffer.
    #[inline]
    fn read_with<T>(
        &mut self,
        f: impl FnOnce(&mut &'a [u8]) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        let mut rest = &self.buf[self.offset..];
        match f(&mut rest) {
            Ok(value) => {
                self.offset = self.buf.len() - rest.len();
                Ok(value)
            }
            Err(DecodeError::OutOfBounds {
                offset,
                needed,
                available,
            }) => Err(DecodeError::OutOfBounds {
                offset: self.offset + offset,
                needed,
                available,
            }),
            Err(err) => Err(err),
        }
    }

    /// Look at the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Result<u8, DecodeError> {
        self.buf
            .get(self.offset)
            .copied()
            .ok_or_else(|| DecodeError::out_of_bounds(self.offset, 1, 0))
    }

    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        self.read_with(decode::decode_bool)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_with(decode::decode_u8)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_with(decode::decode_u16)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_with(decode::decode_u32)
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.read_with(decode::decode_u64)
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.read_with(decode::decode_i64)
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        self.read_with(decode::decode_f32)
    }

    #[inline]
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        self.read_with(decode::decode_f64)
    }

    /// Read a length-prefixed UTF-8 string, borrowing from the buffer.
    #[inline]
    pub fn read_str(&mut self) -> Result<&'a str, DecodeError> {
        self.read_with(decode::decode_string_ref)
    }

    /// Read a length-prefixed UTF-8 string into an owned `String`.
    #[inline]
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        self.read_str().map(str::to_owned)
    }

    /// Return a zero-copy view of the next `size` bytes.
    #[inline]
    pub fn read_slice(&mut self, size: usize) -> Result<&'a [u8], DecodeError> {
        self.read_with(|data| decode::decode_fixed_ref(data, size))
    }

    /// Read exactly `N` bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        self.read_with(decode::decode_fixed::<N>)
    }

    /// Read a presence flag and, if set, the value that follows it.
    ///
    /// When the flag is `false` no payload bytes are consumed.
    pub fn read_optional<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if self.read_bool()? {
            read(self).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read a `u64` count followed by that many elements.
    ///
    /// Capacity is bounded by the bytes left so a corrupt count cannot
    /// trigger a huge allocation before the truncation is detected.
    pub fn read_vec<T>(
        &mut self,
        mut read: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let count = self.read_u64()?;
        let mut items = Vec::with_capacity(self.capacity_hint(count));
        for _ in 0..count {
            items.push(read(self)?);
        }
        Ok(items)
    }

    /// Preallocation size for a collection of `count` elements.
    #[inline]
    pub(crate) fn capacity_hint(&self, count: u64) -> usize {
        usize::try_from(count)
            .unwrap_or(usize::MAX)
            .min(self.remaining())
    }
}
