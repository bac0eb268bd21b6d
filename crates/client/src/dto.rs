// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire representations of backend payloads.
//!
//! The backend speaks camelCase JSON with string enums. These types mirror
//! it exactly and convert into domain types, rejecting unknown enum values.

use campus_activity_domain::{
    Activity, ActivityId, ActivityStatus, DomainError, Participant, ParticipantRole, Picture,
    PictureId, PictureStatus, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub activity_id: i64,
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub registered_count: u32,
    #[serde(default)]
    pub checked_in_count: u32,
    #[serde(default)]
    pub completed_count: u32,
}

impl TryFrom<ActivityDto> for Activity {
    type Error = DomainError;

    fn try_from(dto: ActivityDto) -> Result<Self, Self::Error> {
        Ok(Self {
            activity_id: ActivityId::new(dto.activity_id),
            title: dto.title,
            status: dto.status.parse::<ActivityStatus>()?,
            max_participants: dto.max_participants,
            registered_count: dto.registered_count,
            checked_in_count: dto.checked_in_count,
            completed_count: dto.completed_count,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
}

impl TryFrom<ParticipantDto> for Participant {
    type Error = DomainError;

    fn try_from(dto: ParticipantDto) -> Result<Self, Self::Error> {
        let role: ParticipantRole = dto.role.to_lowercase().parse::<ParticipantRole>()?;
        Ok(Self {
            user_id: UserId::new(dto.user_id),
            first_name: dto.first_name,
            last_name: dto.last_name,
            code: dto.code.unwrap_or_default(),
            email: dto.email.unwrap_or_default(),
            role,
            department: dto.department.filter(|d| !d.trim().is_empty()),
            faculty: dto.faculty.filter(|f| !f.trim().is_empty()),
            registered_at: dto.registered_at,
            check_in_time: dto.check_in_time,
            check_out_time: dto.check_out_time,
            pictures: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureDto {
    pub picture_id: i64,
    pub user_id: i64,
    pub status: String,
    #[serde(default)]
    pub ai_success: Option<bool>,
    #[serde(default)]
    pub reject_reason: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl TryFrom<PictureDto> for Picture {
    type Error = DomainError;

    fn try_from(dto: PictureDto) -> Result<Self, Self::Error> {
        Ok(Self {
            picture_id: PictureId::new(dto.picture_id),
            user_id: UserId::new(dto.user_id),
            status: dto.status.to_lowercase().parse::<PictureStatus>()?,
            ai_success: dto.ai_success,
            reject_reason: dto.reject_reason,
            uploaded_at: dto.uploaded_at,
        })
    }
}

/// Body of `POST /pictures/bulk-approve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApproveRequest {
    pub picture_ids: Vec<i64>,
    pub auto_generate_certificate: bool,
}

/// Body of `POST /pictures/bulk-reject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRejectRequest {
    pub picture_ids: Vec<i64>,
    pub reason: String,
}

/// Converts a list of wire records, failing on the first invalid one.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn convert_all<D, T>(items: Vec<D>) -> Result<Vec<T>, DomainError>
where
    T: TryFrom<D, Error = DomainError>,
{
    items.into_iter().map(T::try_from).collect()
}
