//! Conversion of decoded ABI values into JSON safe values
//!
//! Integers become decimal strings so values above 2^53 survive a round trip
//! through JavaScript hosts. Byte sequences (including addresses) become
//! lowercase `0x` hex strings. Tuples become arrays.
use ethabi::Token;
use ethereum_types::U256;
use serde_json::Value;

/// Values that can be rendered as a JSON safe tree
pub trait JsonSafe {
    fn to_json_safe(&self) -> Value;
}

impl JsonSafe for Token {
    fn to_json_safe(&self) -> Value {
        match self {
            Token::Array(tokens) | Token::FixedArray(tokens) | Token::Tuple(tokens) => {
                Value::Array(tokens.iter().map(JsonSafe::to_json_safe).collect())
            }
            Token::Bytes(bytes) | Token::FixedBytes(bytes) => Value::String(bytes_to_hex(bytes)),
            Token::Address(address) => Value::String(bytes_to_hex(address.as_bytes())),
            Token::Uint(value) => Value::String(value.to_string()),
            Token::Int(value) => Value::String(signed_to_decimal(*value)),
            Token::Bool(value) => Value::Bool(*value),
            Token::String(value) => Value::String(value.clone()),
        }
    }
}

// Already normalized trees pass through unchanged
impl JsonSafe for Value {
    fn to_json_safe(&self) -> Value {
        match self {
            Value::Array(values) => Value::Array(values.iter().map(JsonSafe::to_json_safe).collect()),
            value => value.clone(),
        }
    }
}

/// Normalizes a full decoded parameter list into a JSON array
pub fn normalize_all(tokens: &[Token]) -> Value {
    Value::Array(tokens.iter().map(JsonSafe::to_json_safe).collect())
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Renders a 256 bit two's complement word as a signed decimal
fn signed_to_decimal(value: U256) -> String {
    if value.bit(255) {
        let magnitude = (!value).overflowing_add(U256::one()).0;
        format!("-{}", magnitude)
    } else {
        value.to_string()
    }
}
