//! Lookup of text signatures by selector
//!
//! The registry is an injected collaborator so the resolver never talks to the
//! network directly. [`FourByteDirectory`] is the HTTP implementation backed by
//! the public 4byte.directory API.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistryError;
use crate::selector::Selector;

/// Default endpoint of the public signature registry
pub const DEFAULT_REGISTRY_URL: &str = "https://www.4byte.directory/api/v1/signatures/";

/// One candidate registry entry for a selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Registry id
    pub id: u64,
    /// Creation timestamp (ISO-8601)
    pub created_at: String,
    /// Human readable signature, e.g. `transfer(address,uint256)`
    pub text_signature: String,
    /// The `0x` prefixed selector this record maps to
    pub hex_signature: String,
    /// Raw byte signature as returned by the registry
    #[serde(default)]
    pub bytes_signature: String,
}

/// Source of candidate signatures for a selector
#[async_trait]
pub trait SignatureRegistry: Send + Sync {
    /// Returns every record registered for `selector`, in no particular order
    async fn lookup(&self, selector: &Selector) -> Result<Vec<SignatureRecord>, RegistryError>;
}

#[derive(Debug, Deserialize)]
struct SignaturePage {
    results: Vec<SignatureRecord>,
}

/// Connection settings for [`FourByteDirectory`]
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Endpoint queried with `?hex_signature=0x<selector>`
    pub base_url: String,
    /// Per request timeout, unset by default since the host enforces the overall deadline
    pub timeout: Option<Duration>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: None,
        }
    }
}

/// HTTP client for a 4byte.directory compatible registry
#[derive(Debug, Clone)]
pub struct FourByteDirectory {
    http: reqwest::Client,
    base_url: String,
}

impl FourByteDirectory {
    /// Builds a client from the given settings
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RegistryError::Client(e.to_string()))?;
        Ok(FourByteDirectory {
            http,
            base_url: config.base_url,
        })
    }

    /// The full lookup url for a selector
    pub fn lookup_url(&self, selector: &Selector) -> String {
        format!("{}?hex_signature={}", self.base_url, selector)
    }
}

impl Default for FourByteDirectory {
    fn default() -> Self {
        FourByteDirectory {
            http: reqwest::Client::new(),
            base_url: DEFAULT_REGISTRY_URL.to_string(),
        }
    }
}

#[async_trait]
impl SignatureRegistry for FourByteDirectory {
    async fn lookup(&self, selector: &Selector) -> Result<Vec<SignatureRecord>, RegistryError> {
        let url = self.lookup_url(selector);
        debug!(%url, "querying signature registry");

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(RegistryError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(RegistryError::Transport)?;
        let records = parse_signature_page(&body)?;
        debug!(count = records.len(), %selector, "registry returned candidates");
        Ok(records)
    }
}

/// Parses a registry response body into its records
pub fn parse_signature_page(body: &str) -> Result<Vec<SignatureRecord>, RegistryError> {
    let page: SignaturePage =
        serde_json::from_str(body).map_err(|e| RegistryError::Body(e.to_string()))?;
    Ok(page.results)
}
