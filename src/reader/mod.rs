//! Binary reader components
//!
//! This module provides the low-level reading functionality shared by all
//! snapshot documents: tagged-width integers, primitive decoders and the
//! sequential cursor the schema decoders are built on.

pub mod cursor;
pub mod decode;
pub mod varint;

pub use cursor::StreamCursor;
pub use decode::{
    decode_bool, decode_f32, decode_f64, decode_fixed, decode_fixed_ref, decode_string,
    decode_string_ref, decode_u8,
};
pub use varint::{
    decode_i64, decode_u16, decode_u32, decode_u64, encode_i64, encode_u16, encode_u32,
    encode_u64, unzigzag,
};
