// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod filter_spec;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use filter_spec::{DateFilter, FilterSpec, PictureFilter, RoleFilter, StatusFilter};
pub use types::{
    Activity, ActivityId, ActivityStatus, Participant, ParticipantRole, ParticipationStatus,
    Picture, PictureId, PictureStatus, UserId,
};
pub use validation::{validate_participant, validate_participants};
