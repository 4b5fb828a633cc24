use thiserror::Error;

use crate::facet::{FacetKey, Precedence};

/// One problem detected while validating a built metamodel.
///
/// Failures are aggregated across the whole metamodel and surfaced to
/// developers at boot or test time; they are never thrown mid-request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error(
        "{count} facets contributed for '{key}' at precedence {precedence:?} \
         with differing semantics; the last-added one wins arbitrarily"
    )]
    TopRankConflict {
        key: FacetKey,
        precedence: Precedence,
        count: usize,
    },
}

/// Accumulator for validation problems across many holders.
#[derive(Debug, Default)]
pub struct ValidationFailures {
    failures: Vec<ValidationFailure>,
}

impl ValidationFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter()
    }
}
