// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{PictureId, UserId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Participant role string is not recognised.
    InvalidRole(String),
    /// Picture status string is not recognised.
    InvalidPictureStatus(String),
    /// Activity status string is not recognised.
    InvalidActivityStatus(String),
    /// Attendance status filter string is not recognised.
    InvalidStatusFilter(String),
    /// Role filter string is not recognised.
    InvalidRoleFilter(String),
    /// Registration-date filter string is not recognised.
    InvalidDateFilter(String),
    /// Picture filter string is not recognised.
    InvalidPictureFilter(String),
    /// A participant has a check-out time but no check-in time.
    CheckOutWithoutCheckIn {
        /// The offending participant.
        user_id: UserId,
    },
    /// A picture is attached to a participant it does not belong to.
    PictureOwnerMismatch {
        /// The picture.
        picture_id: PictureId,
        /// The participant the picture is attached to.
        attached_to: UserId,
        /// The owner recorded on the picture.
        owner: UserId,
    },
    /// The same participant appears more than once in a collection.
    DuplicateParticipant {
        /// The duplicated participant.
        user_id: UserId,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(value) => write!(f, "Invalid participant role: {value}"),
            Self::InvalidPictureStatus(value) => write!(f, "Invalid picture status: {value}"),
            Self::InvalidActivityStatus(value) => write!(f, "Invalid activity status: {value}"),
            Self::InvalidStatusFilter(value) => write!(f, "Invalid status filter: {value}"),
            Self::InvalidRoleFilter(value) => write!(f, "Invalid role filter: {value}"),
            Self::InvalidDateFilter(value) => {
                write!(f, "Invalid registration date filter: {value}")
            }
            Self::InvalidPictureFilter(value) => write!(f, "Invalid picture filter: {value}"),
            Self::CheckOutWithoutCheckIn { user_id } => {
                write!(
                    f,
                    "Participant {user_id} has a check-out time but no check-in time"
                )
            }
            Self::PictureOwnerMismatch {
                picture_id,
                attached_to,
                owner,
            } => {
                write!(
                    f,
                    "Picture {picture_id} belongs to participant {owner} but is attached to {attached_to}"
                )
            }
            Self::DuplicateParticipant { user_id } => {
                write!(f, "Participant {user_id} appears more than once")
            }
        }
    }
}

impl std::error::Error for DomainError {}
