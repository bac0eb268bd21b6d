// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The participant view: one activity's collection, filters and selection.
//!
//! The collection is replaced wholesale when new data arrives. Each load is
//! tagged with a [`ViewTicket`]; results whose ticket is no longer current
//! belong to a view that has since moved on and are dropped.

use campus_activity::{
    FilterOptions, ParticipationStats, SelectionSet, aggregate, filter, filter_options,
};
use campus_activity_domain::{ActivityId, FilterSpec, Participant, Picture, UserId};
use chrono::{DateTime, TimeZone};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::DispatchError;

/// Identifies the view state an asynchronous load was started against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    /// The activity the load addresses.
    pub activity_id: ActivityId,
    /// The view generation when the load started.
    pub generation: u64,
}

/// State for the participant list of one activity.
#[derive(Debug, Clone, Default)]
pub struct ParticipantView {
    activity_id: Option<ActivityId>,
    activity_target: Option<u32>,
    generation: u64,
    participants: Arc<Vec<Participant>>,
    spec: FilterSpec,
    query: String,
    selection: SelectionSet,
}

impl ParticipantView {
    /// Creates a view with no activity selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected activity, if any.
    #[must_use]
    pub const fn activity_id(&self) -> Option<ActivityId> {
        self.activity_id
    }

    /// The selected activity's target headcount.
    #[must_use]
    pub const fn activity_target(&self) -> Option<u32> {
        self.activity_target
    }

    /// The current generation. Bumped every time the activity changes.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Switches to another activity.
    ///
    /// The collection and selection are cleared. Filters and the search
    /// query are kept. Loads started before the switch become stale.
    pub fn select_activity(&mut self, activity_id: ActivityId, target: Option<u32>) -> ViewTicket {
        self.generation += 1;
        self.activity_id = Some(activity_id);
        self.activity_target = target;
        self.participants = Arc::new(Vec::new());
        self.selection.deselect_all();
        ViewTicket {
            activity_id,
            generation: self.generation,
        }
    }

    /// Tears the view down. Every outstanding load becomes stale.
    pub fn clear_activity(&mut self) {
        self.generation += 1;
        self.activity_id = None;
        self.activity_target = None;
        self.participants = Arc::new(Vec::new());
        self.selection.deselect_all();
    }

    /// Returns a ticket for a load against the current state.
    #[must_use]
    pub fn ticket(&self) -> Option<ViewTicket> {
        self.activity_id.map(|activity_id| ViewTicket {
            activity_id,
            generation: self.generation,
        })
    }

    /// Returns true if results for `ticket` may still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        self.activity_id == Some(ticket.activity_id) && self.generation == ticket.generation
    }

    /// Replaces the collection with freshly loaded participants.
    ///
    /// Returns false, leaving the view untouched, if the ticket is stale.
    pub fn apply_participants(&mut self, ticket: &ViewTicket, participants: Vec<Participant>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                activity_id = %ticket.activity_id,
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale participant list"
            );
            return false;
        }
        self.participants = Arc::new(participants);
        true
    }

    /// Attaches loaded pictures to their participants.
    ///
    /// Participants not named in `pictures` keep what they had. Returns false
    /// if the ticket is stale.
    pub fn apply_pictures(
        &mut self,
        ticket: &ViewTicket,
        pictures: HashMap<UserId, Vec<Picture>>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                activity_id = %ticket.activity_id,
                generation = ticket.generation,
                "Discarding stale pictures"
            );
            return false;
        }
        let mut pictures: HashMap<UserId, Vec<Picture>> = pictures;
        let next: Vec<Participant> = self
            .participants
            .iter()
            .map(|participant| {
                let mut participant: Participant = participant.clone();
                if let Some(loaded) = pictures.remove(&participant.user_id) {
                    participant.pictures = loaded;
                }
                participant
            })
            .collect();
        self.participants = Arc::new(next);
        true
    }

    /// A shared handle to the raw collection.
    #[must_use]
    pub fn participants(&self) -> Arc<Vec<Participant>> {
        Arc::clone(&self.participants)
    }

    /// The structured filters.
    #[must_use]
    pub const fn filter_spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// The free-text search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the structured filters. The selection is kept.
    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.spec = spec;
    }

    /// Replaces the search query. The selection is kept.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// The filtered view, in collection order.
    #[must_use]
    pub fn visible<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<Participant> {
        filter(&self.participants, &self.spec, &self.query, now)
    }

    /// Ids of the filtered view, in collection order.
    #[must_use]
    pub fn visible_ids<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<UserId> {
        self.visible(now).iter().map(|p| p.user_id).collect()
    }

    /// The selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Selects exactly the visible participants and returns how many.
    pub fn select_all<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> usize {
        let visible: Vec<UserId> = self.visible_ids(now);
        let count: usize = visible.len();
        self.selection.select_all(visible);
        count
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    /// Toggles one participant and returns whether it is now selected.
    ///
    /// # Errors
    ///
    /// Returns an error when selecting an id that is not visible. Removing a
    /// hidden id that is already selected is allowed.
    pub fn toggle<Tz: TimeZone>(
        &mut self,
        user_id: UserId,
        now: &DateTime<Tz>,
    ) -> Result<bool, DispatchError> {
        if !self.selection.is_selected(user_id) && !self.visible_ids(now).contains(&user_id) {
            return Err(DispatchError::InvalidInput {
                field: String::from("user_id"),
                message: format!("Participant {user_id} is not in the current view"),
            });
        }
        Ok(self.selection.toggle(user_id))
    }

    /// Returns true if every visible participant is selected.
    #[must_use]
    pub fn is_all_selected<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.selection.is_all_selected(&self.visible_ids(now))
    }

    /// Selected ids that are currently visible.
    #[must_use]
    pub fn actionable_ids<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<UserId> {
        self.selection.actionable_ids(&self.visible_ids(now))
    }

    /// Selected participants that are currently visible.
    #[must_use]
    pub fn selected_participants<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<Participant> {
        self.selection.selected_data(&self.visible(now))
    }

    /// Statistics for the current collection, view and selection.
    #[must_use]
    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ParticipationStats {
        aggregate(
            &self.participants,
            self.visible(now).len(),
            self.selection.len(),
            self.activity_target,
        )
    }

    /// Distinct departments and faculties in the collection.
    #[must_use]
    pub fn options(&self) -> FilterOptions {
        filter_options(&self.participants)
    }
}
