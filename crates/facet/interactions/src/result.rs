use std::sync::Arc;

use facet_core::Facet;
use facet_types::{Consent, InteractionType, VetoReason};

/// One advisor's recorded veto, kept alongside the facet that raised it so
/// "why is this hidden/disabled/invalid" tooling can attribute every reason.
#[derive(Clone, Debug)]
pub struct InteractionVeto {
    pub reason: VetoReason,
    pub source: Arc<dyn Facet>,
}

/// Outcome of one aggregation pass over a holder's advisor facets.
///
/// Created fresh per check and discarded after; never persisted. The
/// headline verdict is simply "is the veto set non-empty" - every
/// contributing veto is retained, not just the first.
#[derive(Clone, Debug)]
pub struct InteractionResult {
    interaction_type: InteractionType,
    vetoes: Vec<InteractionVeto>,
}

impl InteractionResult {
    pub fn new(interaction_type: InteractionType) -> Self {
        Self {
            interaction_type,
            vetoes: Vec::new(),
        }
    }

    pub fn interaction_type(&self) -> InteractionType {
        self.interaction_type
    }

    /// Record one advisor's veto. Vetoing is monotonic: once recorded, a
    /// veto cannot be withdrawn from this result.
    pub fn advise(&mut self, reason: VetoReason, source: Arc<dyn Facet>) {
        self.vetoes.push(InteractionVeto { reason, source });
    }

    pub fn is_not_vetoing(&self) -> bool {
        self.vetoes.is_empty()
    }

    pub fn is_vetoing(&self) -> bool {
        !self.is_not_vetoing()
    }

    pub fn vetoes(&self) -> &[InteractionVeto] {
        &self.vetoes
    }

    /// All veto reasons combined into one display string, or `None` when
    /// nothing vetoed.
    pub fn reason(&self) -> Option<String> {
        if self.vetoes.is_empty() {
            return None;
        }
        Some(
            self.vetoes
                .iter()
                .map(|veto| veto.reason.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn to_consent(&self) -> Consent {
        match self.reason() {
            None => Consent::Allowed,
            Some(reason) => Consent::Vetoed(VetoReason::new(reason)),
        }
    }
}

/// Accumulates the results of several related checks, e.g. validating every
/// parameter of one action invocation.
#[derive(Clone, Debug, Default)]
pub struct InteractionResultSet {
    results: Vec<InteractionResult>,
}

impl InteractionResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: InteractionResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[InteractionResult] {
        &self.results
    }

    pub fn is_not_vetoing(&self) -> bool {
        self.results.iter().all(InteractionResult::is_not_vetoing)
    }

    pub fn is_vetoing(&self) -> bool {
        !self.is_not_vetoing()
    }

    /// The first vetoing result's combined reason; rendering surfaces show
    /// this one and can drill into the rest.
    pub fn reason(&self) -> Option<String> {
        self.results.iter().find_map(InteractionResult::reason)
    }

    pub fn to_consent(&self) -> Consent {
        match self.reason() {
            None => Consent::Allowed,
            Some(reason) => Consent::Vetoed(VetoReason::new(reason)),
        }
    }
}
