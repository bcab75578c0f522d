//! Decodes call data arguments against a resolved text signature
//!
//! The byte level work is done by `ethabi`; this module only prepares the
//! parameter types and the argument bytes.
use ethabi::param_type::ParamType;
use ethabi::token::Token;
use tracing::debug;

use crate::error::DecodeError;
use crate::selector::strip_hex_prefix;

pub mod param_types;

pub use param_types::{parse_signature, split_top_level, ParsedSignature};

/// Decodes hex encoded arguments (the call data after the selector) into one token per type
///
/// Data that is shorter than the layout of `types` requires is an error, as is
/// data that is not hex at all.
pub fn decode_arguments(types: &[ParamType], arguments_encoded: &str) -> Result<Vec<Token>, DecodeError> {
    let data = hex::decode(strip_hex_prefix(arguments_encoded))?;
    debug!(types = types.len(), bytes = data.len(), "decoding arguments");
    Ok(ethabi::decode(types, &data)?)
}

/// Parses `text_signature` and decodes `arguments_encoded` according to it
pub fn decode_with_signature(
    text_signature: &str,
    arguments_encoded: &str,
) -> Result<Vec<Token>, DecodeError> {
    let signature = parse_signature(text_signature)?;
    decode_arguments(&signature.types, arguments_encoded)
}
