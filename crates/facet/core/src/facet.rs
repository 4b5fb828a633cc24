use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::advisor::{DisablingAdvisor, HidingAdvisor, ValidatingAdvisor};

/// Total order used to pick which of several competing facets of the same
/// type wins. `Fallback` loses to everything; `Overriding` beats everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Precedence {
    /// Hard-coded baseline installed when nothing else contributes.
    Fallback,
    /// Derived by the metamodel from indirect evidence.
    Inferred,
    /// Declared by the developer (annotation, layout file).
    Default,
    /// Explicit declaration that should beat ordinary defaults.
    High,
    /// Contributed in response to a domain event subscriber.
    Event,
    /// Administrative override; nothing ranks above it.
    Overriding,
}

impl Precedence {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Precedence::Fallback)
    }
}

/// Stable identifier of a facet type (the capability, not the concrete
/// implementation). All facets sharing a key compete in the same ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FacetKey(&'static str);

impl FacetKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for FacetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One behavioral contribution attached to a metamodel feature.
///
/// Facets are created once at metamodel-build time and are immutable
/// thereafter; all bookkeeping (who currently wins) lives in the holder's
/// rankings, not in the facet itself.
pub trait Facet: std::fmt::Debug + Send + Sync + 'static {
    /// The facet type this contribution competes under.
    fn key(&self) -> FacetKey;

    fn precedence(&self) -> Precedence {
        Precedence::Default
    }

    /// Derived by the metamodel rather than declared by the developer.
    fn is_inferred(&self) -> bool {
        false
    }

    /// Facets that must live on the per-member holder rather than the
    /// holder shared across all members of the declaring type.
    fn is_object_type_specific(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    /// Whether two facets are behaviorally interchangeable despite being
    /// distinct instances. Defaults to instance identity; facet types whose
    /// behavior is fully captured by their data should override this.
    fn semantic_equals(&self, other: &dyn Facet) -> bool {
        std::ptr::addr_eq(
            self.as_any() as *const dyn Any,
            other.as_any() as *const dyn Any,
        )
    }

    /// Advisor capability: consulted during visibility checks.
    fn hiding(&self) -> Option<&dyn HidingAdvisor> {
        None
    }

    /// Advisor capability: consulted during usability checks.
    fn disabling(&self) -> Option<&dyn DisablingAdvisor> {
        None
    }

    /// Advisor capability: consulted during validity checks.
    fn validating(&self) -> Option<&dyn ValidatingAdvisor> {
        None
    }
}
