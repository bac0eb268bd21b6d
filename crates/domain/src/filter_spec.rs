// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filter specification for the participant list.
//!
//! Every field has a neutral value that matches everything. Fields are
//! independent and combine with logical AND.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generates `as_str`, `FromStr` and `Display` for a filter bucket enum.
macro_rules! filter_bucket {
    ($ty:ident, $err:ident, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Converts this bucket to its string representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Every bucket, in declaration order.
            pub const ALL_VALUES: &'static [Self] = &[$(Self::$variant),+];
        }

        impl FromStr for $ty {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(DomainError::$err(s.to_string())),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

/// Attendance status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No restriction.
    #[default]
    All,
    /// No check-in yet.
    Pending,
    /// Checked in, not checked out.
    CheckedIn,
    /// Checked out.
    Completed,
}

filter_bucket!(StatusFilter, InvalidStatusFilter, {
    All => "all",
    Pending => "pending",
    CheckedIn => "checked_in",
    Completed => "completed",
});

/// Role filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleFilter {
    /// No restriction.
    #[default]
    All,
    /// Students only.
    Student,
    /// Teachers only.
    Teacher,
}

filter_bucket!(RoleFilter, InvalidRoleFilter, {
    All => "all",
    Student => "student",
    Teacher => "teacher",
});

/// Registration-date bucket, evaluated against the caller's "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    /// No restriction.
    #[default]
    All,
    /// Registered since local midnight.
    Today,
    /// Registered since local midnight seven days ago.
    Week,
    /// Registered since local midnight thirty days ago.
    Month,
}

filter_bucket!(DateFilter, InvalidDateFilter, {
    All => "all",
    Today => "today",
    Week => "week",
    Month => "month",
});

impl DateFilter {
    /// Number of whole days before today covered by this bucket.
    ///
    /// `None` for `All`, which has no lower bound.
    #[must_use]
    pub const fn lookback_days(&self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Today => Some(0),
            Self::Week => Some(7),
            Self::Month => Some(30),
        }
    }
}

/// Picture moderation filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PictureFilter {
    /// No restriction.
    #[default]
    All,
    /// No pictures uploaded.
    None,
    /// At least one picture awaiting moderation.
    HasPending,
    /// At least one approved picture.
    HasApproved,
    /// At least one rejected picture.
    HasRejected,
    /// At least one picture, and every picture approved.
    AllApproved,
}

filter_bucket!(PictureFilter, InvalidPictureFilter, {
    All => "all",
    None => "none",
    HasPending => "has_pending",
    HasApproved => "has_approved",
    HasRejected => "has_rejected",
    AllApproved => "all_approved",
});

/// The structured participant list filters.
///
/// The free-text search query travels separately from these fields.
/// `FilterSpec::default()` is the neutral specification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Attendance status.
    #[serde(default)]
    pub status: StatusFilter,
    /// Registration role.
    #[serde(default)]
    pub role: RoleFilter,
    /// Exact department label, `None` for all.
    #[serde(default)]
    pub department: Option<String>,
    /// Exact faculty label, `None` for all.
    #[serde(default)]
    pub faculty: Option<String>,
    /// Registration-date bucket.
    #[serde(default)]
    pub registered: DateFilter,
    /// Picture moderation bucket.
    #[serde(default)]
    pub pictures: PictureFilter,
}

impl FilterSpec {
    /// Creates the neutral filter specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every field is at its neutral value.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.status == StatusFilter::All
            && self.role == RoleFilter::All
            && self.department.is_none()
            && self.faculty.is_none()
            && self.registered == DateFilter::All
            && self.pictures == PictureFilter::All
    }
}
