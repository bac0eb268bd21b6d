// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Participant, UserId};
use std::collections::HashSet;

/// Validates the attendance and picture invariants of one participant.
///
/// # Arguments
///
/// * `participant` - The participant to validate
///
/// # Errors
///
/// Returns an error if:
/// - A check-out time is present without a check-in time
/// - An attached picture is owned by a different participant
pub fn validate_participant(participant: &Participant) -> Result<(), DomainError> {
    // Rule: check-out implies check-in
    if participant.check_in_time.is_none() && participant.check_out_time.is_some() {
        return Err(DomainError::CheckOutWithoutCheckIn {
            user_id: participant.user_id,
        });
    }

    if let Some(picture) = participant
        .pictures
        .iter()
        .find(|p| p.user_id != participant.user_id)
    {
        return Err(DomainError::PictureOwnerMismatch {
            picture_id: picture.picture_id,
            attached_to: participant.user_id,
            owner: picture.user_id,
        });
    }

    Ok(())
}

/// Validates a participant collection as returned for one activity.
///
/// Every participant must pass [`validate_participant`] and user ids must be
/// unique within the collection.
///
/// # Errors
///
/// Returns the first violation found, in collection order.
pub fn validate_participants(participants: &[Participant]) -> Result<(), DomainError> {
    let mut seen: HashSet<UserId> = HashSet::new();

    for participant in participants {
        validate_participant(participant)?;
        if !seen.insert(participant.user_id) {
            return Err(DomainError::DuplicateParticipant {
                user_id: participant.user_id,
            });
        }
    }

    Ok(())
}
