//! Transaction insights for wallets
//!
//! Given a transaction about to be signed, this crate works out which function
//! it probably calls and decodes the arguments, so a reviewer sees
//! `transfer(address,uint256)` with its recipient and amount instead of an
//! opaque hex blob.
//!
//! The pipeline has four steps:
//! 1. take the 4 byte selector off the call data ([`selector`])
//! 2. look the selector up in a signature registry and pick one candidate ([`resolver`])
//! 3. decode the remaining call data against that signature ([`decoder`])
//! 4. turn the decoded values into JSON safe values ([`normalizer`])
//!
//! ```rust
//! # use serde_json::json;
//! # use tx_insight::generate_insight;
//! #
//! #[tokio::main]
//! async fn main() {
//!    // A plain value transfer has no call data, so no lookup happens
//!    let tx = json!({ "to": "0x7c07f7abe10ce8e33dc6c5ad68fe033085256a84", "value": "0x1" });
//!    let insight = generate_insight(&tx).await.unwrap();
//!    assert!(insight.is_unknown());
//! }
//! ```
use serde_json::Value;
use tracing::warn;

pub mod decoder;
pub mod error;
pub mod insight;
pub mod normalizer;
pub mod registry;
pub mod resolver;
pub mod selector;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;
pub mod transaction_data;
mod utils;

pub use error::{DecodeError, InsightError, RegistryError, SelectorError};
pub use insight::{Insight, UNKNOWN_INSIGHT_TYPE};
pub use registry::{FourByteDirectory, RegistryConfig, SignatureRecord, SignatureRegistry};
pub use resolver::{EarliestCreated, LowestId, Resolution, SelectionStrategy, SignatureResolver};
pub use selector::Selector;
#[doc(hidden)]
pub use utils::{print_insight, print_parse_tree};

use decoder::decode_with_signature;
use normalizer::normalize_all;
use selector::{call_data, extract_selector};

/// The insight pipeline bound to a registry and a selection strategy
pub struct InsightPipeline<R: SignatureRegistry> {
    registry: R,
    strategy: Box<dyn SelectionStrategy>,
}

impl<R: SignatureRegistry> InsightPipeline<R> {
    /// Pipeline resolving collisions with [`EarliestCreated`]
    pub fn new(registry: R) -> Self {
        InsightPipeline {
            registry,
            strategy: Box::new(EarliestCreated),
        }
    }

    /// Replaces the strategy used to pick among colliding signatures
    pub fn with_strategy(mut self, strategy: impl SelectionStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// The underlying registry
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Produces the insight for one transaction
    ///
    /// Transactions without usable call data and selectors unknown to the
    /// registry yield an `unknown` insight. Call data that does not fit the
    /// resolved signature yields an insight carrying the signature and a
    /// `decode_error` instead of params. Only registry failures are errors.
    pub async fn on_transaction(&self, transaction: &Value) -> Result<Insight, InsightError> {
        let Some(data) = call_data(transaction) else {
            warn!("transaction has no call data");
            return Ok(Insight::unknown());
        };

        let (selector, arguments_encoded) = match extract_selector(data) {
            Ok(parts) => parts,
            Err(e) => {
                warn!(error = %e, "transaction call data has no selector");
                return Ok(Insight::unknown());
            }
        };

        let resolution = SignatureResolver::new(&self.registry, self.strategy.as_ref())
            .resolve(selector)
            .await?;
        let Some(signature) = resolution.text_signature() else {
            return Ok(Insight::unknown());
        };
        let candidates = resolution.candidate_signatures();

        match decode_with_signature(signature, arguments_encoded) {
            Ok(tokens) => Ok(Insight::decoded(signature, normalize_all(&tokens), candidates)),
            Err(e) => {
                warn!(%selector, %signature, error = %e, "call data does not match resolved signature");
                Ok(Insight::undecodable(signature, e, candidates))
            }
        }
    }
}

/// Produces the insight for `transaction` using the public 4byte.directory registry
pub async fn generate_insight(transaction: &Value) -> Result<Insight, InsightError> {
    InsightPipeline::new(FourByteDirectory::default())
        .on_transaction(transaction)
        .await
}
