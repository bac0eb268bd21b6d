// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The activity/participant gateway contract.
//!
//! The gateway is the only way the console talks to the backend. It is a
//! stateless shared resource: every call is independent and carries its own
//! session credentials.

use async_trait::async_trait;
use campus_activity_domain::{Activity, ActivityId, Participant, Picture, PictureId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// A certificate issued while approving pictures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCertificate {
    /// The participant the certificate was issued to.
    pub user_id: UserId,
    /// Backend identifier of the certificate.
    pub certificate_id: String,
}

/// Aggregate result of a bulk picture approval, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApproveResult {
    /// Pictures moved to approved.
    pub approved_count: u32,
    /// Pictures left untouched (already moderated, unknown, ...).
    pub skipped_count: u32,
    /// Certificates generated, when requested.
    #[serde(default)]
    pub certificates: Option<Vec<IssuedCertificate>>,
    /// Per-item error messages reported by the backend.
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

/// Aggregate result of a bulk picture rejection, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRejectResult {
    /// Pictures moved to rejected.
    pub rejected_count: u32,
    /// Pictures left untouched.
    pub skipped_count: u32,
    /// Per-item error messages reported by the backend.
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

/// Backend operations used by the participation console.
#[async_trait]
pub trait ActivityGateway: Send + Sync {
    /// Lists activities with their aggregate participation counts.
    async fn list_activities_with_participants(&self) -> Result<Vec<Activity>, GatewayError>;

    /// Lists the participants registered for an activity.
    async fn list_participants(
        &self,
        activity_id: ActivityId,
    ) -> Result<Vec<Participant>, GatewayError>;

    /// Lists the pictures one participant uploaded for an activity.
    async fn list_participant_pictures(
        &self,
        activity_id: ActivityId,
        user_id: UserId,
    ) -> Result<Vec<Picture>, GatewayError>;

    /// Approves a batch of pictures in a single request.
    async fn bulk_approve_pictures(
        &self,
        picture_ids: &[PictureId],
        auto_generate_certificate: bool,
    ) -> Result<BulkApproveResult, GatewayError>;

    /// Rejects a batch of pictures in a single request.
    async fn bulk_reject_pictures(
        &self,
        picture_ids: &[PictureId],
        reason: &str,
    ) -> Result<BulkRejectResult, GatewayError>;

    /// Checks one participant in.
    async fn check_in(&self, activity_id: ActivityId, user_id: UserId)
    -> Result<(), GatewayError>;

    /// Checks one participant out.
    async fn check_out(
        &self,
        activity_id: ActivityId,
        user_id: UserId,
    ) -> Result<(), GatewayError>;
}
