//! Synchronous discovery state.
//!
//! Everything here is plain data plus pure transitions. The async service
//! takes the lock, applies one transition and releases it before awaiting.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::domain::{Facility, FacilityId, UserLocation};
use crate::filter::{FilterState, type_universe};
use crate::markers::{MarkerLayer, MarkerPlan};
use crate::ranking::rank;

use super::error::DiscoveryError;

/// Where the current candidate set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    Seed,
    Directory,
    Live,
    Cache,
}

/// Ticket for one live search. Only the latest ticket may apply results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic request sequence.
#[derive(Debug, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn issue(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket(self.latest)
    }

    /// Invalidate every outstanding ticket.
    pub fn supersede(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[derive(Debug)]
pub struct DiscoveryState {
    candidates: Vec<Facility>,
    candidate_origin: CandidateOrigin,
    origin: Option<UserLocation>,
    located_at: Option<DateTime<Utc>>,
    map_center: Option<UserLocation>,
    filter: FilterState,
    searching: bool,
    seq: RequestSeq,
    markers: MarkerLayer,
}

impl DiscoveryState {
    /// State showing `candidates` with every type selected.
    pub fn new(candidates: Vec<Facility>, candidate_origin: CandidateOrigin) -> Self {
        let mut state = Self {
            filter: FilterState::for_candidates(&candidates),
            candidates,
            candidate_origin,
            origin: None,
            located_at: None,
            map_center: None,
            searching: false,
            seq: RequestSeq::default(),
            markers: MarkerLayer::new(),
        };
        state.redraw();
        state
    }

    /// The latest raw candidate set, unranked.
    pub fn candidates(&self) -> &[Facility] {
        &self.candidates
    }

    pub fn candidate_origin(&self) -> CandidateOrigin {
        self.candidate_origin
    }

    pub fn origin(&self) -> Option<UserLocation> {
        self.origin
    }

    pub fn located_at(&self) -> Option<DateTime<Utc>> {
        self.located_at
    }

    pub fn map_center(&self) -> Option<UserLocation> {
        self.map_center
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Candidates ranked from the current origin.
    pub fn ranked(&self) -> Vec<Facility> {
        rank(self.candidates.clone(), self.origin.as_ref())
    }

    /// Ranked candidates narrowed by the type filter.
    pub fn visible(&self) -> Vec<Facility> {
        self.filter.visible(&self.ranked())
    }

    pub fn type_universe(&self) -> BTreeSet<String> {
        type_universe(&self.candidates)
    }

    pub fn markers(&self) -> &MarkerPlan {
        self.markers.current()
    }

    /// Replace the candidate set wholesale.
    pub fn replace_candidates(&mut self, candidates: Vec<Facility>, origin: CandidateOrigin) {
        debug!(count = candidates.len(), ?origin, "replacing candidates");
        self.filter
            .on_candidates_replaced(&self.candidates, &candidates);
        self.candidates = candidates;
        self.candidate_origin = origin;
        self.redraw();
    }

    /// Record a fresh fix. The map follows the user.
    pub fn set_origin(&mut self, location: UserLocation, at: DateTime<Utc>) {
        self.origin = Some(location);
        self.located_at = Some(at);
        self.map_center = Some(location);
        self.redraw();
    }

    /// Restore a persisted origin without moving the fix timestamp.
    pub fn restore_origin(&mut self, location: Option<UserLocation>) {
        self.origin = location;
        self.map_center = location;
        self.redraw();
    }

    pub fn set_map_center(&mut self, location: UserLocation) {
        self.map_center = Some(location);
    }

    /// Where a live search without an explicit centre should look.
    pub fn search_center(&self) -> Option<UserLocation> {
        self.map_center.or(self.origin)
    }

    pub fn toggle_type(&mut self, label: &str) -> bool {
        let selected = self.filter.toggle_type(label);
        self.redraw();
        selected
    }

    pub fn select_all_types(&mut self) {
        let universe = self.type_universe();
        self.filter.select_all(&universe);
        self.redraw();
    }

    pub fn clear_types(&mut self) {
        self.filter.clear_types();
        self.redraw();
    }

    /// Flip selection of a visible facility.
    pub fn toggle_facility(&mut self, id: &FacilityId) -> Result<bool, DiscoveryError> {
        if !self.visible().iter().any(|f| &f.id == id) {
            return Err(DiscoveryError::UnknownFacility(id.clone()));
        }
        let selected = self.filter.toggle_facility(id);
        self.redraw();
        Ok(selected)
    }

    /// Start a live search, refusing while one is outstanding.
    pub fn begin_search(&mut self) -> Result<SearchTicket, DiscoveryError> {
        if self.searching {
            return Err(DiscoveryError::SearchInProgress);
        }
        self.searching = true;
        Ok(self.seq.issue())
    }

    /// Finish a live search. Returns whether its results may be applied.
    ///
    /// A superseded ticket changes nothing, including the searching flag,
    /// which by then belongs to whatever superseded it.
    pub fn finish_search(&mut self, ticket: SearchTicket) -> bool {
        if !self.seq.is_current(ticket) {
            debug!(ticket = ticket.value(), "discarding stale search completion");
            return false;
        }
        self.searching = false;
        true
    }

    /// Invalidate any outstanding search and allow a new one.
    pub fn supersede_searches(&mut self) {
        self.seq.supersede();
        self.searching = false;
    }

    /// Back to the initial state with `candidates`.
    pub fn reset(&mut self, candidates: Vec<Facility>, origin: CandidateOrigin) {
        self.supersede_searches();
        self.filter = FilterState::for_candidates(&candidates);
        self.candidates = candidates;
        self.candidate_origin = origin;
        self.origin = None;
        self.located_at = None;
        self.map_center = None;
        self.redraw();
    }

    fn redraw(&mut self) {
        let visible = self.visible();
        self.markers
            .redraw(&visible, &self.filter.selected_facilities, self.origin.as_ref());
    }
}
