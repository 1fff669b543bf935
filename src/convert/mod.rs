//! Conversion of decoded records into external representations.

mod json;

pub use json::ToJson;
