//! Picks one text signature out of the registry candidates for a selector
//!
//! Many signatures hash to the same 4 bytes, so the registry usually answers
//! with several records. Which one wins is decided by a [`SelectionStrategy`].
//! None of the strategies is authoritative: the registry is community
//! submitted and an early malicious registration beats a later honest one
//! under [`EarliestCreated`]. The full ranked candidate list is therefore kept
//! in the [`Resolution`] so callers can show it.
use tracing::{debug, warn};

use crate::error::RegistryError;
use crate::registry::{SignatureRecord, SignatureRegistry};
use crate::selector::Selector;

/// Ranks candidate records, best match first
pub trait SelectionStrategy: Send + Sync {
    /// Reorders `candidates` in place so the preferred record comes first
    fn rank(&self, candidates: &mut [SignatureRecord]);
}

/// Oldest registration wins, compared lexicographically on the ISO-8601 timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestCreated;

impl SelectionStrategy for EarliestCreated {
    fn rank(&self, candidates: &mut [SignatureRecord]) {
        // Stable so equal timestamps keep registry order
        candidates.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }
}

/// Lowest registry id wins
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestId;

impl SelectionStrategy for LowestId {
    fn rank(&self, candidates: &mut [SignatureRecord]) {
        candidates.sort_by_key(|record| record.id);
    }
}

/// Outcome of resolving one selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The selector that was looked up
    pub selector: Selector,
    /// All registry candidates, ranked
    pub candidates: Vec<SignatureRecord>,
}

impl Resolution {
    /// The winning record, if the registry knew the selector at all
    pub fn chosen(&self) -> Option<&SignatureRecord> {
        self.candidates.first()
    }

    /// Text signature of the winning record
    pub fn text_signature(&self) -> Option<&str> {
        self.chosen().map(|record| record.text_signature.as_str())
    }

    /// Text signatures of every candidate, in rank order
    pub fn candidate_signatures(&self) -> Vec<String> {
        self.candidates
            .iter()
            .map(|record| record.text_signature.clone())
            .collect()
    }
}

/// Resolves selectors against a registry using a selection strategy
pub struct SignatureResolver<'a, R: SignatureRegistry + ?Sized> {
    registry: &'a R,
    strategy: &'a dyn SelectionStrategy,
}

impl<'a, R: SignatureRegistry + ?Sized> SignatureResolver<'a, R> {
    /// Resolver querying `registry` and ranking with `strategy`
    pub fn new(registry: &'a R, strategy: &'a dyn SelectionStrategy) -> Self {
        SignatureResolver { registry, strategy }
    }

    /// Looks up `selector` and ranks whatever the registry returns
    ///
    /// An empty candidate list is a normal outcome. Only registry failures are errors.
    pub async fn resolve(&self, selector: Selector) -> Result<Resolution, RegistryError> {
        let mut candidates = self.registry.lookup(&selector).await?;
        self.strategy.rank(&mut candidates);

        match candidates.first() {
            Some(chosen) => debug!(
                %selector,
                signature = %chosen.text_signature,
                candidates = candidates.len(),
                "resolved selector"
            ),
            None => warn!(%selector, "no function signature registered for selector"),
        }

        Ok(Resolution {
            selector,
            candidates,
        })
    }
}
