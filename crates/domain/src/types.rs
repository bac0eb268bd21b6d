// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of a registered participant (student or teacher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new user identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an uploaded participation picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PictureId(i64);

impl PictureId {
    /// Creates a new picture identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PictureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(i64);

impl ActivityId {
    /// Creates a new activity identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a participant registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// A student participant.
    Student,
    /// A teacher (staff) participant.
    Teacher,
}

impl ParticipantRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

impl FromStr for ParticipantRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a participant is in the attendance lifecycle.
///
/// Derived from the check-in/check-out timestamps, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    /// Registered, not yet checked in.
    Pending,
    /// Checked in, not yet checked out.
    CheckedIn,
    /// Checked out.
    Completed,
}

impl ParticipationStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::CheckedIn => "checked_in",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Moderation status of an uploaded picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PictureStatus {
    /// Awaiting moderation.
    #[default]
    Pending,
    /// Accepted as participation proof.
    Approved,
    /// Refused as participation proof.
    Rejected,
}

impl PictureStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for PictureStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidPictureStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PictureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An uploaded participation-proof image.
///
/// Status changes only happen on the backend through bulk approve/reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    /// The picture identifier.
    pub picture_id: PictureId,
    /// The participant who uploaded the picture.
    pub user_id: UserId,
    /// Current moderation status.
    pub status: PictureStatus,
    /// Whether automated recognition accepted the picture, if it ran.
    pub ai_success: Option<bool>,
    /// The reason given when the picture was rejected.
    pub reject_reason: Option<String>,
    /// When the picture was uploaded.
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Picture {
    /// Creates a pending picture with no recognition result.
    #[must_use]
    pub const fn new(picture_id: PictureId, user_id: UserId) -> Self {
        Self {
            picture_id,
            user_id,
            status: PictureStatus::Pending,
            ai_success: None,
            reject_reason: None,
            uploaded_at: None,
        }
    }

    /// Returns this picture with the given status.
    #[must_use]
    pub fn with_status(mut self, status: PictureStatus) -> Self {
        self.status = status;
        self
    }
}

/// A person registered for an activity.
///
/// Participants are produced by the gateway and never edited locally; the
/// only local enrichment is attaching pictures fetched from the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The participant identifier.
    pub user_id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Student or staff code.
    pub code: String,
    /// Contact email.
    pub email: String,
    /// The role the participant registered under.
    pub role: ParticipantRole,
    /// Department label.
    pub department: Option<String>,
    /// Faculty label.
    pub faculty: Option<String>,
    /// When the participant registered.
    pub registered_at: Option<DateTime<Utc>>,
    /// When the participant checked in.
    pub check_in_time: Option<DateTime<Utc>>,
    /// When the participant checked out.
    pub check_out_time: Option<DateTime<Utc>>,
    /// Uploaded participation pictures.
    #[serde(default)]
    pub pictures: Vec<Picture>,
}

impl Participant {
    /// Creates a participant with only identity fields set.
    #[must_use]
    pub fn new(user_id: UserId, first_name: &str, last_name: &str, role: ParticipantRole) -> Self {
        Self {
            user_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            code: String::new(),
            email: String::new(),
            role,
            department: None,
            faculty: None,
            registered_at: None,
            check_in_time: None,
            check_out_time: None,
            pictures: Vec::new(),
        }
    }

    /// Returns true if the participant registered as a student.
    #[must_use]
    pub const fn is_student(&self) -> bool {
        matches!(self.role, ParticipantRole::Student)
    }

    /// Returns true if the participant registered as a teacher.
    #[must_use]
    pub const fn is_teacher(&self) -> bool {
        matches!(self.role, ParticipantRole::Teacher)
    }

    /// Derives the attendance status from the check-in/check-out timestamps.
    ///
    /// A check-out always wins, so a record is `Completed` as soon as a
    /// check-out time is present.
    #[must_use]
    pub const fn status(&self) -> ParticipationStatus {
        if self.check_out_time.is_some() {
            ParticipationStatus::Completed
        } else if self.check_in_time.is_some() {
            ParticipationStatus::CheckedIn
        } else {
            ParticipationStatus::Pending
        }
    }

    /// Returns the display name as "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Counts this participant's pictures in the given status.
    #[must_use]
    pub fn picture_count(&self, status: PictureStatus) -> usize {
        self.pictures.iter().filter(|p| p.status == status).count()
    }
}

/// Lifecycle status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Registration is open.
    Open,
    /// The activity is taking place.
    Ongoing,
    /// The activity is over.
    Completed,
    /// The activity was called off.
    Cancelled,
}

impl ActivityStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ActivityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidActivityStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An activity together with its aggregate participation counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// The activity identifier.
    pub activity_id: ActivityId,
    /// Human-readable title.
    pub title: String,
    /// Lifecycle status.
    pub status: ActivityStatus,
    /// Target headcount, if the activity has one.
    pub max_participants: Option<u32>,
    /// Number of registered participants.
    pub registered_count: u32,
    /// Number of participants currently checked in.
    pub checked_in_count: u32,
    /// Number of participants who checked out.
    pub completed_count: u32,
}
