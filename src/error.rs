//! Error types for the insight pipeline.
//!
//! Only [`InsightError`] ever reaches the host: a transaction that cannot be
//! decoded or a selector the registry does not know both resolve to an
//! `unknown` insight instead.

/// Why a selector could not be read from call data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// Fewer than 8 hex characters after the optional `0x` prefix.
    #[error("call data too short for a selector: {len} hex characters")]
    TooShort {
        /// Number of hex characters that were available.
        len: usize,
    },

    /// The first 8 characters are not valid hex.
    #[error("selector is not valid hex: {0}")]
    InvalidHex(String),
}

/// Failures talking to the signature registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The request never produced a response.
    #[error("registry request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The registry answered with a non-success status.
    #[error("registry returned status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The request URL.
        url: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("unexpected registry response: {0}")]
    Body(String),

    /// The HTTP client could not be built.
    #[error("could not build registry client: {0}")]
    Client(String),
}

/// Failures turning a signature plus call data into typed arguments.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The text signature could not be parsed into ABI types.
    #[error("cannot parse signature `{signature}`: {reason}")]
    Signature {
        /// The offending text signature.
        signature: String,
        /// What went wrong.
        reason: String,
    },

    /// The argument data is not valid hex.
    #[error("argument data is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The argument data does not fit the declared parameter types.
    #[error("argument data does not match parameter types: {0}")]
    Abi(#[from] ethabi::Error),
}

/// Fatal pipeline failure, surfaced to the host.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// The signature registry was unreachable or answered with an error.
    #[error("unable to fetch function signatures: {0}")]
    Registry(#[from] RegistryError),
}
