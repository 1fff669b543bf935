//! Base-N text codec
//!
//! `BaseCodec` converts between byte strings and text in an arbitrary
//! positional alphabet, treating the input as one big-endian number. Leading
//! zero bytes are preserved as leading copies of the alphabet's first
//! character, so the conversion is lossless for every input.
//!
//! The crate uses a single instance, [`base58()`], to render and parse
//! 32-byte public keys.

use std::sync::OnceLock;

use crate::error::CodecError;

/// The Bitcoin/Solana base58 alphabet (no `0`, `O`, `I` or `l`).
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Lookup table entry for bytes outside the alphabet.
const NO_DIGIT: u8 = 255;

/// Positional text codec over an ASCII alphabet.
#[derive(Debug, Clone)]
pub struct BaseCodec {
    alphabet: Vec<u8>,
    /// Byte -> digit value, `NO_DIGIT` for unused entries
    digits: [u8; 256],
    /// Output digits per input byte when encoding: ln(256) / ln(base)
    encode_factor: f64,
    /// Output bytes per input digit when decoding: ln(base) / ln(256)
    decode_factor: f64,
}

impl BaseCodec {
    /// Build a codec from an alphabet, most significant meaning last.
    ///
    /// # Errors
    /// - `CodecError::AlphabetTooLong` if the alphabet has 255+ characters
    /// - `CodecError::AlphabetTooShort` if it has fewer than 2
    /// - `CodecError::NonAsciiAlphabet` for a character outside ASCII
    /// - `CodecError::AmbiguousAlphabet` if any character repeats
    ///
    /// # Examples
    /// ```
    /// use xshin_reader::codec::BaseCodec;
    ///
    /// let hex = BaseCodec::new("0123456789abcdef").unwrap();
    /// assert_eq!(hex.encode(&[0x01, 0x00]), "100");
    ///
    /// assert!(BaseCodec::new("abca").is_err());
    /// ```
    pub fn new(alphabet: &str) -> Result<Self, CodecError> {
        let len = alphabet.chars().count();
        if len >= 255 {
            return Err(CodecError::AlphabetTooLong(len));
        }
        if len < 2 {
            return Err(CodecError::AlphabetTooShort(len));
        }

        let mut digits = [NO_DIGIT; 256];
        for (value, ch) in alphabet.chars().enumerate() {
            if !ch.is_ascii() {
                return Err(CodecError::NonAsciiAlphabet(ch));
            }
            let slot = &mut digits[ch as usize];
            if *slot != NO_DIGIT {
                return Err(CodecError::AmbiguousAlphabet(ch));
            }
            *slot = value as u8;
        }

        let base = len as f64;
        Ok(Self {
            alphabet: alphabet.as_bytes().to_vec(),
            digits,
            encode_factor: 256f64.ln() / base.ln(),
            decode_factor: base.ln() / 256f64.ln(),
        })
    }

    /// Number of digits in the alphabet.
    #[inline]
    pub fn base(&self) -> u32 {
        self.alphabet.len() as u32
    }

    /// The character standing for a zero digit.
    #[inline]
    pub fn leader(&self) -> char {
        self.alphabet[0] as char
    }

    /// Encode bytes as text.
    ///
    /// Empty input encodes to the empty string.
    pub fn encode(&self, source: &[u8]) -> String {
        let zeroes = source.iter().take_while(|&&b| b == 0).count();
        let rest = &source[zeroes..];
        let base = self.base();

        let size = (rest.len() as f64 * self.encode_factor) as usize + 1;
        let mut buf = vec![0u8; size];
        let mut length = 0usize;

        for &byte in rest {
            let mut carry = byte as u32;
            let mut written = 0usize;
            for digit in buf.iter_mut().rev() {
                if carry == 0 && written >= length {
                    break;
                }
                carry += 256 * (*digit as u32);
                *digit = (carry % base) as u8;
                carry /= base;
                written += 1;
            }
            // Buffer size is an upper bound on the digit count
            debug_assert_eq!(carry, 0, "base conversion overflowed its buffer");
            length = written;
        }

        let significant = buf[size - length..]
            .iter()
            .skip_while(|&&d| d == 0)
            .map(|&d| self.alphabet[d as usize] as char);

        std::iter::repeat(self.leader())
            .take(zeroes)
            .chain(significant)
            .collect()
    }

    /// Decode text back to bytes.
    ///
    /// # Errors
    /// - `CodecError::InvalidCharacter` for a character outside the alphabet
    /// - `CodecError::InvalidEncoding` if the conversion leaves a carry
    pub fn decode(&self, source: &str) -> Result<Vec<u8>, CodecError> {
        let input = source.as_bytes();
        let leader = self.alphabet[0];
        let zeroes = input.iter().take_while(|&&b| b == leader).count();
        let rest = &input[zeroes..];
        let base = self.base();

        let size = (rest.len() as f64 * self.decode_factor) as usize + 1;
        let mut buf = vec![0u8; size];
        let mut length = 0usize;

        for (index, &byte) in rest.iter().enumerate() {
            let digit = self.digits[byte as usize];
            if digit == NO_DIGIT {
                let position = zeroes + index;
                return Err(CodecError::InvalidCharacter {
                    character: source[position..].chars().next().unwrap_or('\u{FFFD}'),
                    position,
                });
            }

            let mut carry = digit as u32;
            let mut written = 0usize;
            for slot in buf.iter_mut().rev() {
                if carry == 0 && written >= length {
                    break;
                }
                carry += base * (*slot as u32);
                *slot = (carry % 256) as u8;
                carry /= 256;
                written += 1;
            }
            if carry != 0 {
                return Err(CodecError::InvalidEncoding(
                    "Non-zero carry after base conversion".to_string(),
                ));
            }
            length = written;
        }

        let mut out = vec![0u8; zeroes];
        out.extend(buf[size - length..].iter().skip_while(|&&b| b == 0));
        Ok(out)
    }
}

/// The shared base58 codec.
pub fn base58() -> &'static BaseCodec {
    static BASE58: OnceLock<BaseCodec> = OnceLock::new();
    BASE58.get_or_init(|| {
        BaseCodec::new(BASE58_ALPHABET).expect("base58 alphabet is 58 unique ASCII characters")
    })
}
