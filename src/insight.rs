use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `type` reported when the called function could not be determined
pub const UNKNOWN_INSIGHT_TYPE: &str = "unknown";

/// Reviewer facing summary of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Resolved text signature, or [`UNKNOWN_INSIGHT_TYPE`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Decoded arguments, present only when decoding succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Every registry candidate for the selector, best match first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
    /// Why the arguments could not be decoded against the resolved signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

impl Insight {
    pub fn unknown() -> Self {
        Insight {
            kind: UNKNOWN_INSIGHT_TYPE.to_string(),
            params: None,
            candidates: Vec::new(),
            decode_error: None,
        }
    }

    pub fn decoded(signature: impl Into<String>, params: Value, candidates: Vec<String>) -> Self {
        Insight {
            kind: signature.into(),
            params: Some(params),
            candidates,
            decode_error: None,
        }
    }

    /// The signature resolved but the call data did not fit it
    pub fn undecodable(
        signature: impl Into<String>,
        error: impl ToString,
        candidates: Vec<String>,
    ) -> Self {
        Insight {
            kind: signature.into(),
            params: None,
            candidates,
            decode_error: Some(error.to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == UNKNOWN_INSIGHT_TYPE
    }
}
