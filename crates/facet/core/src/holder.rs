use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::facet::{Facet, FacetKey};
use crate::ranking::FacetRanking;
use crate::validation::ValidationFailures;

/// The store of all facets for one metamodel feature.
///
/// Lookup methods answer from the current winners only; rankings keep the
/// full history of contributions. Absence is a normal, common case: asking
/// for a facet type nothing contributed to yields `None`, never an error.
pub trait FacetHolder: Send + Sync {
    /// Contribute a facet. Re-adding an instance already held is a no-op.
    fn add_facet(&self, facet: Arc<dyn Facet>);

    /// The winning facet for the given type, if any was contributed.
    fn get_facet(&self, key: FacetKey) -> Option<Arc<dyn Facet>>;

    fn contains_facet(&self, key: FacetKey) -> bool {
        self.get_facet(key).is_some()
    }

    /// Number of facet types that currently have a winner.
    fn facet_count(&self) -> usize;

    /// The winning facet of every populated type.
    fn facets(&self) -> Vec<Arc<dyn Facet>>;

    /// Full ranking for one facet type, including shadowed contributions.
    fn facet_ranking(&self, key: FacetKey) -> Option<FacetRanking>;

    fn facet_rankings(&self) -> Vec<FacetRanking>;

    /// Remove retained contributions of one type matching the predicate;
    /// used when a facet must functionally replace (not just shadow) an
    /// installed one, e.g. an explicit declaration superseding an inferred
    /// facet.
    fn purge_facets_if(&self, key: FacetKey, predicate: &dyn Fn(&dyn Facet) -> bool);

    /// Report ranking-level problems into the metamodel-wide accumulator.
    fn collect_validation_failures(&self, failures: &mut ValidationFailures) {
        for ranking in self.facet_rankings() {
            if let Some(conflict) = ranking.top_rank_conflict() {
                failures.add(conflict);
            }
        }
    }
}

struct HolderState {
    rankings: HashMap<FacetKey, FacetRanking>,
    /// Winner-per-type cache; `None` means stale, rebuilt on next read.
    snapshot: Option<HashMap<FacetKey, Arc<dyn Facet>>>,
}

impl HolderState {
    /// Rebuild the snapshot if stale and return it. Runs under the holder
    /// lock, so reads never observe a half-built snapshot.
    fn snapshot(&mut self) -> &HashMap<FacetKey, Arc<dyn Facet>> {
        if self.snapshot.is_none() {
            let snapshot = self
                .rankings
                .iter()
                .filter_map(|(key, ranking)| ranking.winner().map(|winner| (*key, winner)))
                .collect();
            self.snapshot = Some(snapshot);
        }
        self.snapshot.get_or_insert_with(HashMap::new)
    }
}

/// Concrete facet store backing one metamodel feature.
///
/// A single holder-scoped mutex guards both the rankings and the lazily
/// rebuilt snapshot. Writes only mark the snapshot stale; the rebuild
/// happens on the next read, inside the same lock. Lock hold time is bounded
/// by the number of distinct facet types on this feature, not by request
/// volume.
pub struct SimpleFacetHolder {
    state: Mutex<HolderState>,
}

impl SimpleFacetHolder {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HolderState {
                rankings: HashMap::new(),
                snapshot: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, HolderState> {
        // A poisoned lock only means some caller panicked mid-call; the
        // rankings stay authoritative and the snapshot is rebuilt lazily.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimpleFacetHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl FacetHolder for SimpleFacetHolder {
    fn add_facet(&self, facet: Arc<dyn Facet>) {
        let mut guard = self.state();
        let state = &mut *guard;
        let key = facet.key();
        let ranking = state
            .rankings
            .entry(key)
            .or_insert_with(|| FacetRanking::new(key));
        if ranking.add(facet) {
            state.snapshot = None;
        }
    }

    fn get_facet(&self, key: FacetKey) -> Option<Arc<dyn Facet>> {
        self.state().snapshot().get(&key).cloned()
    }

    fn facet_count(&self) -> usize {
        self.state().snapshot().len()
    }

    fn facets(&self) -> Vec<Arc<dyn Facet>> {
        self.state().snapshot().values().cloned().collect()
    }

    fn facet_ranking(&self, key: FacetKey) -> Option<FacetRanking> {
        self.state().rankings.get(&key).cloned()
    }

    fn facet_rankings(&self) -> Vec<FacetRanking> {
        self.state().rankings.values().cloned().collect()
    }

    fn purge_facets_if(&self, key: FacetKey, predicate: &dyn Fn(&dyn Facet) -> bool) {
        let mut guard = self.state();
        let state = &mut *guard;
        let Some(ranking) = state.rankings.get_mut(&key) else {
            return;
        };
        let removed_any = ranking.purge_if(predicate);
        let now_empty = ranking.is_empty();
        if removed_any {
            state.snapshot = None;
        }
        if now_empty {
            state.rankings.remove(&key);
        }
    }
}
