//! Type filters and facility selection.
//!
//! Both sets are plain UI state. Selected types decide which candidates are
//! visible; selected facilities only drive marker highlighting and never
//! affect ranking or filtering.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Facility, FacilityId};

/// The sorted set of normalized type labels present in `candidates`.
pub fn type_universe(candidates: &[Facility]) -> BTreeSet<String> {
    candidates.iter().map(Facility::display_label).collect()
}

/// Candidates whose normalized type label is selected, in input order.
///
/// An empty selection shows nothing. A selection covering every label in
/// `candidates` returns the whole list unchanged.
pub fn visible_facilities(
    candidates: &[Facility],
    selected_types: &BTreeSet<String>,
) -> Vec<Facility> {
    if selected_types.is_empty() {
        return Vec::new();
    }

    if type_universe(candidates).is_subset(selected_types) {
        return candidates.to_vec();
    }

    candidates
        .iter()
        .filter(|facility| selected_types.contains(&facility.display_label()))
        .cloned()
        .collect()
}

/// Selected type labels and selected facility IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub selected_types: BTreeSet<String>,
    pub selected_facilities: BTreeSet<FacilityId>,
}

impl FilterState {
    /// State with every label of `candidates` selected and no facility selected.
    pub fn for_candidates(candidates: &[Facility]) -> Self {
        Self {
            selected_types: type_universe(candidates),
            selected_facilities: BTreeSet::new(),
        }
    }

    /// Add or remove one type label. Returns whether it is now selected.
    pub fn toggle_type(&mut self, label: &str) -> bool {
        if self.selected_types.remove(label) {
            false
        } else {
            self.selected_types.insert(label.to_string());
            true
        }
    }

    pub fn select_all(&mut self, universe: &BTreeSet<String>) {
        self.selected_types = universe.clone();
    }

    pub fn clear_types(&mut self) {
        self.selected_types.clear();
    }

    /// Flip membership of `id`. Returns whether it is now selected.
    ///
    /// Applying the same toggle twice restores the previous state.
    pub fn toggle_facility(&mut self, id: &FacilityId) -> bool {
        if self.selected_facilities.remove(id) {
            false
        } else {
            self.selected_facilities.insert(id.clone());
            true
        }
    }

    pub fn is_selected(&self, id: &FacilityId) -> bool {
        self.selected_facilities.contains(id)
    }

    /// Candidates visible under the current type selection.
    pub fn visible(&self, candidates: &[Facility]) -> Vec<Facility> {
        visible_facilities(candidates, &self.selected_types)
    }

    /// Update the state after the candidate set was replaced wholesale.
    ///
    /// Selected facility IDs missing from `new_candidates` are dropped, since
    /// provider IDs may be reused for different places by a later search.
    /// If every label of `previous` was selected, the new universe is
    /// selected in full; otherwise the type selection is kept as it is.
    pub fn on_candidates_replaced(&mut self, previous: &[Facility], new_candidates: &[Facility]) {
        let ids: BTreeSet<&FacilityId> = new_candidates.iter().map(|f| &f.id).collect();
        let before = self.selected_facilities.len();
        self.selected_facilities.retain(|id| ids.contains(id));

        let pruned = before - self.selected_facilities.len();
        if pruned > 0 {
            debug!(pruned, "dropped selections absent from new candidates");
        }

        if type_universe(previous).is_subset(&self.selected_types) {
            self.selected_types = type_universe(new_candidates);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const KINDS: &[&str] = &["Clinic", "PHC", "Pharmacy", "Private Hospital", "Health_care"];

    fn candidates() -> impl Strategy<Value = Vec<Facility>> {
        prop::collection::vec(0..KINDS.len(), 0..25).prop_map(|kinds| {
            kinds
                .into_iter()
                .enumerate()
                .map(|(i, k)| Facility::new(i.to_string(), "F", KINDS[k], 12.9, 77.6).unwrap())
                .collect()
        })
    }

    proptest! {
        #[test]
        fn nothing_selected_shows_nothing(list in candidates()) {
            prop_assert!(visible_facilities(&list, &BTreeSet::new()).is_empty());
        }

        #[test]
        fn universe_selected_is_identity(list in candidates()) {
            let universe = type_universe(&list);
            prop_assume!(!universe.is_empty());
            prop_assert_eq!(visible_facilities(&list, &universe), list);
        }

        /// Filtering never fabricates entries.
        #[test]
        fn visible_is_subsequence(list in candidates(), pick in prop::collection::btree_set(0..KINDS.len(), 0..KINDS.len())) {
            let selected: BTreeSet<String> = pick
                .into_iter()
                .map(|k| crate::domain::normalize_type_label(KINDS[k]))
                .collect();
            let visible = visible_facilities(&list, &selected);

            let mut rest = list.iter();
            for facility in &visible {
                prop_assert!(rest.any(|f| f == facility));
            }
        }

        #[test]
        fn facility_toggle_is_involution(id in "[0-9]{1,3}", start in prop::collection::btree_set("[0-9]{1,3}", 0..5)) {
            let mut state = FilterState {
                selected_types: BTreeSet::new(),
                selected_facilities: start.into_iter().map(FacilityId::from).collect(),
            };
            let before = state.clone();
            let id = FacilityId::from(id);
            state.toggle_facility(&id);
            state.toggle_facility(&id);
            prop_assert_eq!(state, before);
        }
    }
}
