// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-select state for the participant list.
//!
//! The selection is an immutable set behind an `Arc`. Every mutation builds a
//! new set and swaps it in, so a snapshot handed to an in-flight operation is
//! never observed half-updated.

use campus_activity_domain::{Participant, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The set of selected participant ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Arc<BTreeSet<UserId>>,
}

impl SelectionSet {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn replace(&mut self, next: BTreeSet<UserId>) {
        self.ids = Arc::new(next);
    }

    /// Replaces the selection with exactly the visible ids.
    pub fn select_all<I>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = UserId>,
    {
        self.replace(visible_ids.into_iter().collect());
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        self.replace(BTreeSet::new());
    }

    /// Flips membership of one id and returns whether it is now selected.
    pub fn toggle(&mut self, id: UserId) -> bool {
        let mut next: BTreeSet<UserId> = (*self.ids).clone();
        let selected: bool = if next.remove(&id) {
            false
        } else {
            next.insert(id);
            true
        };
        self.replace(next);
        selected
    }

    /// Returns true if the id is selected.
    #[must_use]
    pub fn is_selected(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns true if every visible id is selected.
    ///
    /// Always false when nothing is visible.
    #[must_use]
    pub fn is_all_selected(&self, visible_ids: &[UserId]) -> bool {
        !visible_ids.is_empty() && visible_ids.iter().all(|id| self.ids.contains(id))
    }

    /// Returns the selected participants, in collection order.
    #[must_use]
    pub fn selected_data(&self, participants: &[Participant]) -> Vec<Participant> {
        participants
            .iter()
            .filter(|p| self.ids.contains(&p.user_id))
            .cloned()
            .collect()
    }

    /// Returns the selected ids that are currently visible, in visible order.
    ///
    /// Ids selected under an earlier filter stay in the set but are not
    /// actionable until they become visible again.
    #[must_use]
    pub fn actionable_ids(&self, visible_ids: &[UserId]) -> Vec<UserId> {
        visible_ids
            .iter()
            .copied()
            .filter(|id| self.ids.contains(id))
            .collect()
    }

    /// Returns an immutable snapshot of the current selection.
    #[must_use]
    pub fn snapshot(&self) -> Arc<BTreeSet<UserId>> {
        Arc::clone(&self.ids)
    }

    /// Number of selected ids, including ones no longer visible.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
