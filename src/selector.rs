use std::fmt;

use serde_json::Value;

use crate::error::SelectorError;

/// Number of hex characters making up a function selector.
pub const SELECTOR_HEX_LEN: usize = 8;

/// The first 4 bytes of call data, identifying the called function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector([u8; 4]);

impl Selector {
    /// Raw selector bytes
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Lowercase hex without the `0x` prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Selector(bytes)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Returns the call data of a transaction if it has any
///
/// Anything other than an object with a string `data` field (plain value transfers,
/// malformed requests) has no call data to inspect.
pub fn call_data(transaction: &Value) -> Option<&str> {
    transaction.as_object()?.get("data")?.as_str()
}

/// Splits call data into the function selector and the encoded arguments
///
/// The returned argument slice is the hex text following the selector, still unparsed.
pub fn extract_selector(call_data: &str) -> Result<(Selector, &str), SelectorError> {
    let call_data = strip_hex_prefix(call_data);
    if call_data.len() < SELECTOR_HEX_LEN {
        return Err(SelectorError::TooShort {
            len: call_data.len(),
        });
    }
    if !call_data.is_char_boundary(SELECTOR_HEX_LEN) {
        let prefix: String = call_data.chars().take(SELECTOR_HEX_LEN).collect();
        return Err(SelectorError::InvalidHex(prefix));
    }
    let (selector_hex, arguments_encoded) = call_data.split_at(SELECTOR_HEX_LEN);

    let mut selector = [0u8; 4];
    hex::decode_to_slice(selector_hex, &mut selector)
        .map_err(|_| SelectorError::InvalidHex(selector_hex.to_string()))?;
    Ok((Selector(selector), arguments_encoded))
}

pub(crate) fn strip_hex_prefix(data: &str) -> &str {
    data.strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data)
}
