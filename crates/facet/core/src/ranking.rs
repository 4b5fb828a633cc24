use std::collections::BTreeMap;
use std::sync::Arc;

use crate::facet::{Facet, FacetKey, Precedence};
use crate::validation::ValidationFailure;

/// All competing contributions for one facet type, partitioned by precedence.
///
/// Insertion order within a precedence level is significant: among facets
/// sharing the top precedence, the most recently added one wins. The ranking
/// retains losers too, for diagnostics and metamodel validation.
#[derive(Clone, Debug)]
pub struct FacetRanking {
    key: FacetKey,
    levels: BTreeMap<Precedence, Vec<Arc<dyn Facet>>>,
}

impl FacetRanking {
    pub fn new(key: FacetKey) -> Self {
        Self {
            key,
            levels: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> FacetKey {
        self.key
    }

    /// Insert a contribution. Returns whether any holder snapshot built on
    /// this ranking must be invalidated: true when the new facet's precedence
    /// reaches or exceeds the current winner's (last-added wins on ties),
    /// false when it ranks strictly below and merely gets retained.
    ///
    /// Re-adding an instance already present is a no-op and never
    /// invalidates.
    ///
    /// # Panics
    ///
    /// Panics if the facet's key differs from this ranking's key; that is a
    /// metamodel-construction bug, caught as early as possible.
    pub fn add(&mut self, facet: Arc<dyn Facet>) -> bool {
        assert_eq!(
            facet.key(),
            self.key,
            "facet contributed to the ranking for '{}'",
            self.key
        );
        let precedence = facet.precedence();
        let already_present = self
            .levels
            .get(&precedence)
            .is_some_and(|level| level.iter().any(|existing| Arc::ptr_eq(existing, &facet)));
        if already_present {
            return false;
        }
        let invalidates = match self.top_precedence() {
            Some(top) => precedence >= top,
            None => true,
        };
        self.levels.entry(precedence).or_default().push(facet);
        invalidates
    }

    /// The single currently-winning contribution: highest precedence,
    /// most recently added among ties.
    pub fn winner(&self) -> Option<Arc<dyn Facet>> {
        self.levels
            .iter()
            .next_back()
            .and_then(|(_, level)| level.last().cloned())
    }

    pub fn top_precedence(&self) -> Option<Precedence> {
        self.levels.keys().next_back().copied()
    }

    /// All contributions sharing the top precedence, in insertion order.
    pub fn top_rank(&self) -> Vec<Arc<dyn Facet>> {
        self.levels
            .values()
            .next_back()
            .cloned()
            .unwrap_or_default()
    }

    /// Remove every retained contribution matching the predicate. Returns
    /// whether anything was removed (callers invalidate their snapshot then).
    pub fn purge_if(&mut self, predicate: &dyn Fn(&dyn Facet) -> bool) -> bool {
        let before = self.len();
        for level in self.levels.values_mut() {
            level.retain(|facet| !predicate(facet.as_ref()));
        }
        self.levels.retain(|_, level| !level.is_empty());
        self.len() != before
    }

    /// Every retained contribution, lowest precedence first, insertion order
    /// within each level.
    pub fn contributions(&self) -> impl Iterator<Item = &Arc<dyn Facet>> {
        self.levels.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Metamodel validation hook: report when several facets share the top
    /// precedence with genuinely differing semantics, i.e. the last-added
    /// tie-break is actually deciding something.
    pub fn top_rank_conflict(&self) -> Option<ValidationFailure> {
        let top = self.top_rank();
        let conflicting = top.iter().enumerate().any(|(i, facet)| {
            top[i + 1..]
                .iter()
                .any(|other| !facet.semantic_equals(other.as_ref()))
        });
        if conflicting {
            Some(ValidationFailure::TopRankConflict {
                key: self.key,
                precedence: self.top_precedence()?,
                count: top.len(),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::any::Any;

    #[derive(Debug)]
    struct TestFacet {
        key: FacetKey,
        precedence: Precedence,
        id: u32,
        /// Facets sharing a semantic group are behaviorally interchangeable.
        semantic_group: Option<u32>,
    }

    impl TestFacet {
        fn new(precedence: Precedence, id: u32) -> Arc<dyn Facet> {
            Arc::new(Self {
                key: FacetKey::new("test"),
                precedence,
                id,
                semantic_group: None,
            })
        }

        fn in_group(precedence: Precedence, id: u32, group: u32) -> Arc<dyn Facet> {
            Arc::new(Self {
                key: FacetKey::new("test"),
                precedence,
                id,
                semantic_group: Some(group),
            })
        }
    }

    impl Facet for TestFacet {
        fn key(&self) -> FacetKey {
            self.key
        }
        fn precedence(&self) -> Precedence {
            self.precedence
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn semantic_equals(&self, other: &dyn Facet) -> bool {
            match other.as_any().downcast_ref::<TestFacet>() {
                Some(other) => match (self.semantic_group, other.semantic_group) {
                    (Some(a), Some(b)) => a == b,
                    _ => std::ptr::eq(self, other),
                },
                None => false,
            }
        }
    }

    fn id_of(facet: &Arc<dyn Facet>) -> u32 {
        facet
            .as_any()
            .downcast_ref::<TestFacet>()
            .map(|f| f.id)
            .unwrap()
    }

    #[test]
    fn higher_precedence_wins_and_lower_is_retained() {
        let mut ranking = FacetRanking::new(FacetKey::new("test"));
        assert!(ranking.add(TestFacet::new(Precedence::Default, 1)));
        assert!(ranking.add(TestFacet::new(Precedence::High, 2)));
        // strictly lower than the current winner: retained, no invalidation
        assert!(!ranking.add(TestFacet::new(Precedence::Default, 3)));

        assert_eq!(id_of(&ranking.winner().unwrap()), 2);
        assert_eq!(ranking.len(), 3);
    }

    #[test]
    fn equal_precedence_tie_break_is_last_added() {
        let mut ranking = FacetRanking::new(FacetKey::new("test"));
        assert!(ranking.add(TestFacet::new(Precedence::Default, 1)));
        assert!(ranking.add(TestFacet::new(Precedence::Default, 2)));
        assert_eq!(id_of(&ranking.winner().unwrap()), 2);
    }

    #[test]
    fn re_adding_the_same_instance_is_a_no_op() {
        let mut ranking = FacetRanking::new(FacetKey::new("test"));
        let facet = TestFacet::new(Precedence::Default, 1);
        assert!(ranking.add(Arc::clone(&facet)));
        assert!(!ranking.add(facet));
        assert_eq!(ranking.len(), 1);
    }

    #[test]
    fn purge_supports_replacing_inferred_contributions() {
        #[derive(Debug)]
        struct Inferred;
        impl Facet for Inferred {
            fn key(&self) -> FacetKey {
                FacetKey::new("test")
            }
            fn is_inferred(&self) -> bool {
                true
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let mut ranking = FacetRanking::new(FacetKey::new("test"));
        ranking.add(Arc::new(Inferred));
        assert!(ranking.purge_if(&|facet| facet.is_inferred()));
        assert!(ranking.is_empty());
        assert!(!ranking.purge_if(&|facet| facet.is_inferred()));

        ranking.add(TestFacet::new(Precedence::Default, 7));
        assert_eq!(id_of(&ranking.winner().unwrap()), 7);
    }

    #[test]
    #[should_panic(expected = "facet contributed to the ranking")]
    fn mismatched_key_fails_fast() {
        #[derive(Debug)]
        struct OtherKey;
        impl Facet for OtherKey {
            fn key(&self) -> FacetKey {
                FacetKey::new("other")
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }
        FacetRanking::new(FacetKey::new("test")).add(Arc::new(OtherKey));
    }

    #[test]
    fn semantically_equal_top_rank_is_not_a_conflict() {
        let mut ranking = FacetRanking::new(FacetKey::new("test"));
        ranking.add(TestFacet::in_group(Precedence::Default, 1, 9));
        ranking.add(TestFacet::in_group(Precedence::Default, 2, 9));
        assert!(ranking.top_rank_conflict().is_none());
    }

    #[test]
    fn differing_top_rank_semantics_is_reported_for_validation() {
        let mut ranking = FacetRanking::new(FacetKey::new("test"));
        ranking.add(TestFacet::in_group(Precedence::Default, 1, 9));
        ranking.add(TestFacet::in_group(Precedence::Default, 2, 10));
        // the shadowed lower rank never conflicts
        ranking.add(TestFacet::in_group(Precedence::Fallback, 3, 11));

        match ranking.top_rank_conflict() {
            Some(ValidationFailure::TopRankConflict {
                precedence, count, ..
            }) => {
                assert_eq!(precedence, Precedence::Default);
                assert_eq!(count, 2);
            }
            None => panic!("expected a top-rank conflict"),
        }
    }

    fn precedence_strategy() -> impl Strategy<Value = Precedence> {
        prop_oneof![
            Just(Precedence::Fallback),
            Just(Precedence::Inferred),
            Just(Precedence::Default),
            Just(Precedence::High),
            Just(Precedence::Event),
            Just(Precedence::Overriding),
        ]
    }

    proptest! {
        #[test]
        fn property_winner_has_max_precedence_last_added_among_ties(
            precedences in proptest::collection::vec(precedence_strategy(), 1..24)
        ) {
            let mut ranking = FacetRanking::new(FacetKey::new("test"));
            for (id, precedence) in precedences.iter().enumerate() {
                ranking.add(TestFacet::new(*precedence, id as u32));
            }

            let max = precedences.iter().copied().max().unwrap();
            let expected_id = precedences
                .iter()
                .enumerate()
                .filter(|(_, p)| **p == max)
                .map(|(id, _)| id as u32)
                .last()
                .unwrap();

            let winner = ranking.winner().unwrap();
            prop_assert_eq!(winner.precedence(), max);
            prop_assert_eq!(id_of(&winner), expected_id);
        }
    }
}
