// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participation statistics.
//!
//! Statistics are **computed**, not stored. Every call recounts from the
//! collection it is given.

use campus_activity_domain::{Participant, ParticipationStatus, PictureStatus};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Counts and rates for one activity's participant list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationStats {
    /// Number of participants in the collection.
    pub total: usize,
    /// Participants without a check-in.
    pub registered: usize,
    /// Participants checked in but not checked out.
    pub checked_in: usize,
    /// Participants with a check-out.
    pub completed: usize,
    /// Participants registered as students.
    pub students: usize,
    /// Participants registered as teachers.
    pub teachers: usize,
    /// Size of the current filtered view.
    pub filtered: usize,
    /// Size of the current selection.
    pub selected: usize,
    /// Pictures awaiting moderation.
    pub pictures_pending: usize,
    /// Approved pictures.
    pub pictures_approved: usize,
    /// Rejected pictures.
    pub pictures_rejected: usize,
    /// `total` as a percentage of the activity target.
    pub registration_rate: f64,
    /// `checked_in` as a percentage of `total`.
    pub check_in_rate: f64,
    /// `completed` as a percentage of `total`.
    pub completion_rate: f64,
}

/// Computes a percentage rounded to one decimal place.
///
/// A zero denominator is replaced by one, so the result is always finite.
#[must_use]
pub fn percentage(numerator: usize, denominator: usize) -> f64 {
    let numerator: f64 = numerator.to_f64().unwrap_or(0.0);
    let denominator: f64 = denominator.max(1).to_f64().unwrap_or(1.0);
    (numerator / denominator * 1000.0).round() / 10.0
}

/// Aggregates participation statistics.
///
/// # Arguments
///
/// * `participants` - The full collection for the activity
/// * `filtered_count` - Size of the filtered view
/// * `selected_count` - Size of the selection
/// * `activity_target` - The activity's target headcount, if any
#[must_use]
pub fn aggregate(
    participants: &[Participant],
    filtered_count: usize,
    selected_count: usize,
    activity_target: Option<u32>,
) -> ParticipationStats {
    let mut registered: usize = 0;
    let mut checked_in: usize = 0;
    let mut completed: usize = 0;
    let mut students: usize = 0;
    let mut pictures_pending: usize = 0;
    let mut pictures_approved: usize = 0;
    let mut pictures_rejected: usize = 0;

    for participant in participants {
        match participant.status() {
            ParticipationStatus::Pending => registered += 1,
            ParticipationStatus::CheckedIn => checked_in += 1,
            ParticipationStatus::Completed => completed += 1,
        }
        if participant.is_student() {
            students += 1;
        }
        pictures_pending += participant.picture_count(PictureStatus::Pending);
        pictures_approved += participant.picture_count(PictureStatus::Approved);
        pictures_rejected += participant.picture_count(PictureStatus::Rejected);
    }

    let total: usize = participants.len();
    let target: usize = activity_target
        .and_then(|t| t.to_usize())
        .unwrap_or_default();

    ParticipationStats {
        total,
        registered,
        checked_in,
        completed,
        students,
        teachers: total - students,
        filtered: filtered_count,
        selected: selected_count,
        pictures_pending,
        pictures_approved,
        pictures_rejected,
        registration_rate: percentage(total, target),
        check_in_rate: percentage(checked_in, total),
        completion_rate: percentage(completed, total),
    }
}
