// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant filter engine.
//!
//! A [`FilterSpec`] plus a search query is decomposed into a list of
//! independent [`Predicate`]s. A participant is kept when every predicate
//! matches, so the order in which predicates are applied never changes the
//! result. Input order is preserved.
//!
//! Filtering is a pure function of its inputs. The caller supplies "now" so
//! the registration-date buckets are deterministic.

use campus_activity_domain::{
    DateFilter, FilterSpec, Participant, ParticipationStatus, PictureFilter, PictureStatus,
    RoleFilter, StatusFilter,
};
use chrono::{DateTime, Days, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// One independent condition derived from a filter specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match on name, code, email or department.
    /// Holds the lowercased, trimmed query.
    Query(String),
    /// Attendance status must equal the given status.
    Status(ParticipationStatus),
    /// Participant must be a student.
    Student,
    /// Participant must be a teacher.
    Teacher,
    /// Department label must equal the given value.
    Department(String),
    /// Faculty label must equal the given value.
    Faculty(String),
    /// Registration timestamp must be at or after the given instant.
    RegisteredSince(DateTime<Utc>),
    /// Picture moderation bucket.
    Pictures(PictureFilter),
}

impl Predicate {
    /// Returns true if the participant satisfies this predicate.
    #[must_use]
    pub fn matches(&self, participant: &Participant) -> bool {
        match self {
            Self::Query(needle) => matches_query(participant, needle),
            Self::Status(status) => participant.status() == *status,
            Self::Student => participant.is_student(),
            Self::Teacher => participant.is_teacher(),
            Self::Department(department) => {
                participant.department.as_deref() == Some(department.as_str())
            }
            Self::Faculty(faculty) => participant.faculty.as_deref() == Some(faculty.as_str()),
            Self::RegisteredSince(cutoff) => participant
                .registered_at
                .is_some_and(|registered| registered >= *cutoff),
            Self::Pictures(bucket) => matches_pictures(participant, *bucket),
        }
    }
}

fn matches_query(participant: &Participant, needle: &str) -> bool {
    let department: &str = participant.department.as_deref().unwrap_or_default();
    [
        participant.first_name.as_str(),
        participant.last_name.as_str(),
        participant.code.as_str(),
        participant.email.as_str(),
        department,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn matches_pictures(participant: &Participant, bucket: PictureFilter) -> bool {
    let has = |status: PictureStatus| participant.pictures.iter().any(|p| p.status == status);
    match bucket {
        PictureFilter::All => true,
        PictureFilter::None => participant.pictures.is_empty(),
        PictureFilter::HasPending => has(PictureStatus::Pending),
        PictureFilter::HasApproved => has(PictureStatus::Approved),
        PictureFilter::HasRejected => has(PictureStatus::Rejected),
        PictureFilter::AllApproved => {
            !participant.pictures.is_empty()
                && participant
                    .pictures
                    .iter()
                    .all(|p| p.status == PictureStatus::Approved)
        }
    }
}

/// Computes the earliest registration instant accepted by a date bucket.
///
/// Buckets are anchored on local midnight of `now` in `now`'s own timezone:
/// `Today` starts at today's midnight, `Week` at midnight seven days earlier
/// and `Month` at midnight thirty days earlier.
///
/// Returns `None` for [`DateFilter::All`].
#[must_use]
pub fn registration_cutoff<Tz: TimeZone>(
    bucket: DateFilter,
    now: &DateTime<Tz>,
) -> Option<DateTime<Utc>> {
    let days: u64 = bucket.lookback_days()?.unsigned_abs();
    let day = now
        .date_naive()
        .checked_sub_days(Days::new(days))
        .unwrap_or(chrono::NaiveDate::MIN);
    let local_midnight: NaiveDateTime = day.and_time(NaiveTime::MIN);

    // Midnight can fall into a DST gap, in which case the wall-clock
    // time is read as UTC.
    let resolved = now.timezone().from_local_datetime(&local_midnight);
    Some(resolved.earliest().map_or_else(
        || Utc.from_utc_datetime(&local_midnight),
        |midnight| midnight.with_timezone(&Utc),
    ))
}

/// Decomposes a filter specification and search query into predicates.
///
/// Neutral fields produce no predicate, so a neutral specification with an
/// empty query yields an empty list.
#[must_use]
pub fn predicates<Tz: TimeZone>(
    spec: &FilterSpec,
    search_query: &str,
    now: &DateTime<Tz>,
) -> Vec<Predicate> {
    let mut out: Vec<Predicate> = Vec::new();

    let query: String = search_query.trim().to_lowercase();
    if !query.is_empty() {
        out.push(Predicate::Query(query));
    }

    match spec.status {
        StatusFilter::All => {}
        StatusFilter::Pending => out.push(Predicate::Status(ParticipationStatus::Pending)),
        StatusFilter::CheckedIn => out.push(Predicate::Status(ParticipationStatus::CheckedIn)),
        StatusFilter::Completed => out.push(Predicate::Status(ParticipationStatus::Completed)),
    }

    match spec.role {
        RoleFilter::All => {}
        RoleFilter::Student => out.push(Predicate::Student),
        RoleFilter::Teacher => out.push(Predicate::Teacher),
    }

    if let Some(department) = &spec.department {
        out.push(Predicate::Department(department.clone()));
    }
    if let Some(faculty) = &spec.faculty {
        out.push(Predicate::Faculty(faculty.clone()));
    }

    if let Some(cutoff) = registration_cutoff(spec.registered, now) {
        out.push(Predicate::RegisteredSince(cutoff));
    }

    if spec.pictures != PictureFilter::All {
        out.push(Predicate::Pictures(spec.pictures));
    }

    out
}

/// Keeps the participants that satisfy every predicate, preserving order.
#[must_use]
pub fn apply_predicates(participants: &[Participant], predicates: &[Predicate]) -> Vec<Participant> {
    participants
        .iter()
        .filter(|participant| predicates.iter().all(|p| p.matches(participant)))
        .cloned()
        .collect()
}

/// Filters a participant collection.
///
/// # Arguments
///
/// * `participants` - The raw collection for the current activity
/// * `spec` - The structured filters
/// * `search_query` - Free-text query; empty or whitespace is a no-op
/// * `now` - The reference instant for registration-date buckets
///
/// # Returns
///
/// The matching participants, in input order.
#[must_use]
pub fn filter<Tz: TimeZone>(
    participants: &[Participant],
    spec: &FilterSpec,
    search_query: &str,
    now: &DateTime<Tz>,
) -> Vec<Participant> {
    apply_predicates(participants, &predicates(spec, search_query, now))
}
