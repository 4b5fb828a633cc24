use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::facet::{Facet, FacetKey};
use crate::holder::{FacetHolder, SimpleFacetHolder};
use crate::ranking::FacetRanking;

/// How a genuine same-precedence conflict between the shared and local side
/// is resolved.
///
/// `PreferLocal` is the historical behavior: the narrower-scope override
/// wins. That bias is a conservative compromise, not a principled
/// resolution; it is exposed as a strategy so callers with other needs can
/// flip it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    PreferLocal,
    PreferShared,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::PreferLocal
    }
}

/// Two backing stores presented as one logical holder.
///
/// The `shared` side is the per-type holder reused across every member of a
/// reflected type; the `local` side belongs to this member alone. Writes
/// route on `Facet::is_object_type_specific`; reads merge the two sides by
/// precedence, with the configured tie-break deciding genuine conflicts.
pub struct LayeredFacetHolder {
    shared: Arc<SimpleFacetHolder>,
    local: SimpleFacetHolder,
    tie_break: TieBreak,
}

impl LayeredFacetHolder {
    pub fn new(shared: Arc<SimpleFacetHolder>) -> Self {
        Self {
            shared,
            local: SimpleFacetHolder::new(),
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(shared: Arc<SimpleFacetHolder>, tie_break: TieBreak) -> Self {
        Self {
            shared,
            local: SimpleFacetHolder::new(),
            tie_break,
        }
    }

    pub fn shared(&self) -> &SimpleFacetHolder {
        &self.shared
    }

    pub fn local(&self) -> &SimpleFacetHolder {
        &self.local
    }

    fn merged_keys(&self) -> BTreeSet<FacetKey> {
        self.shared
            .facet_rankings()
            .into_iter()
            .chain(self.local.facet_rankings())
            .filter(|ranking| !ranking.is_empty())
            .map(|ranking| ranking.key())
            .collect()
    }

    fn merge(&self, shared: Arc<dyn Facet>, local: Arc<dyn Facet>) -> Arc<dyn Facet> {
        match local.precedence().cmp(&shared.precedence()) {
            Ordering::Greater => local,
            Ordering::Less => shared,
            Ordering::Equal => {
                if shared.semantic_equals(local.as_ref()) {
                    // interchangeable: either pick yields identical behavior
                    local
                } else {
                    match self.tie_break {
                        TieBreak::PreferLocal => local,
                        TieBreak::PreferShared => shared,
                    }
                }
            }
        }
    }
}

impl FacetHolder for LayeredFacetHolder {
    fn add_facet(&self, facet: Arc<dyn Facet>) {
        if facet.is_object_type_specific() {
            self.local.add_facet(facet);
        } else {
            self.shared.add_facet(facet);
        }
    }

    fn get_facet(&self, key: FacetKey) -> Option<Arc<dyn Facet>> {
        match (self.shared.get_facet(key), self.local.get_facet(key)) {
            (None, None) => None,
            (Some(shared), None) => Some(shared),
            (None, Some(local)) => Some(local),
            (Some(shared), Some(local)) => Some(self.merge(shared, local)),
        }
    }

    fn facet_count(&self) -> usize {
        if self.local.facet_count() == 0 {
            return self.shared.facet_count();
        }
        self.facets().len()
    }

    fn facets(&self) -> Vec<Arc<dyn Facet>> {
        if self.local.facet_count() == 0 {
            return self.shared.facets();
        }
        // resolve each type through get_facet so the merge rule is applied
        // uniformly rather than unioning raw winners
        self.merged_keys()
            .into_iter()
            .filter_map(|key| self.get_facet(key))
            .collect()
    }

    /// Combined ranking over both sides. Contributions of the side that
    /// loses ties are appended first, so the combined ranking's last-added
    /// tie-break agrees with `get_facet`.
    fn facet_ranking(&self, key: FacetKey) -> Option<FacetRanking> {
        let shared = self.shared.facet_ranking(key);
        let local = self.local.facet_ranking(key);
        match (shared, local) {
            (None, None) => None,
            (Some(ranking), None) | (None, Some(ranking)) => Some(ranking),
            (Some(shared), Some(local)) => {
                let (first, second) = match self.tie_break {
                    TieBreak::PreferLocal => (shared, local),
                    TieBreak::PreferShared => (local, shared),
                };
                let mut combined = FacetRanking::new(key);
                for facet in first.contributions() {
                    combined.add(Arc::clone(facet));
                }
                for facet in second.contributions() {
                    combined.add(Arc::clone(facet));
                }
                Some(combined)
            }
        }
    }

    fn facet_rankings(&self) -> Vec<FacetRanking> {
        if self.local.facet_count() == 0 {
            return self.shared.facet_rankings();
        }
        self.merged_keys()
            .into_iter()
            .filter_map(|key| self.facet_ranking(key))
            .collect()
    }

    fn purge_facets_if(&self, key: FacetKey, predicate: &dyn Fn(&dyn Facet) -> bool) {
        self.shared.purge_facets_if(key, predicate);
        self.local.purge_facets_if(key, predicate);
    }
}
