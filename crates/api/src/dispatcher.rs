// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk operation dispatch.
//!
//! Approve and reject are single batch calls. Check-in and check-out fan out
//! one gateway request per participant, issue them concurrently, and wait for
//! every one of them to settle before reporting.
//!
//! Every operation is checked in the same order: capability, then input,
//! then the in-flight flag for its kind. A rejection at any of these steps
//! means no gateway call was made.

use campus_activity::{ExportTable, export_participants};
use campus_activity_domain::{ActivityId, Participant, PictureId, UserId};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::capabilities::ConsoleCapabilities;
use crate::error::{DispatchError, GatewayError, translate_gateway_error};
use crate::gateway::{ActivityGateway, BulkApproveResult, BulkRejectResult};

/// The kinds of bulk operation the console can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Approve pictures.
    Approve,
    /// Reject pictures.
    Reject,
    /// Check participants in.
    CheckIn,
    /// Check participants out.
    CheckOut,
    /// Export participants.
    Export,
}

impl OperationKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
            Self::Export => "export",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a settled operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Every item succeeded.
    Success,
    /// Some items succeeded and some failed. Still a completed operation.
    PartialFailure,
    /// Every item of a fan-out failed on its own. The requests were all
    /// delivered and settled, so this is not fatal.
    AllFailed,
    /// The operation failed as a whole.
    Fatal,
}

/// Snapshot of one operation kind's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationPhase {
    /// True while a dispatch of this kind is awaiting the gateway.
    pub in_flight: bool,
    /// Outcome of the most recent settled dispatch, if any.
    pub last_outcome: Option<OperationOutcome>,
}

/// Which operation kinds are currently in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlightState {
    /// A bulk approval is awaiting the gateway.
    pub approving: bool,
    /// A bulk rejection is awaiting the gateway.
    pub rejecting: bool,
    /// A check-in fan-out is awaiting the gateway.
    pub checking_in: bool,
    /// A check-out fan-out is awaiting the gateway.
    pub checking_out: bool,
}

/// Result of one fan-out request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// The participant the request was made for.
    pub user_id: UserId,
    /// The failure, if the request did not succeed.
    pub error: Option<GatewayError>,
}

impl ItemOutcome {
    /// Returns true if the request succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate result of a check-in or check-out fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOutResult {
    /// The operation that was fanned out.
    pub kind: OperationKind,
    /// The activity the requests addressed.
    pub activity_id: ActivityId,
    /// Number of requests that succeeded.
    pub success_count: usize,
    /// Number of requests that failed.
    pub fail_count: usize,
    /// One outcome per requested id, in input order.
    pub outcomes: Vec<ItemOutcome>,
}

impl FanOutResult {
    fn from_outcomes(kind: OperationKind, activity_id: ActivityId, outcomes: Vec<ItemOutcome>) -> Self {
        let success_count: usize = outcomes.iter().filter(|o| o.is_success()).count();
        let fail_count: usize = outcomes.len() - success_count;
        Self {
            kind,
            activity_id,
            success_count,
            fail_count,
            outcomes,
        }
    }

    /// Returns the ids whose request failed, in input order.
    #[must_use]
    pub fn failed_ids(&self) -> Vec<UserId> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.user_id)
            .collect()
    }

    /// Classifies the aggregate.
    #[must_use]
    pub const fn outcome(&self) -> OperationOutcome {
        if self.fail_count == 0 {
            OperationOutcome::Success
        } else if self.success_count == 0 {
            OperationOutcome::AllFailed
        } else {
            OperationOutcome::PartialFailure
        }
    }
}

#[derive(Debug, Default)]
struct InFlightFlags {
    approving: AtomicBool,
    rejecting: AtomicBool,
    checking_in: AtomicBool,
    checking_out: AtomicBool,
}

impl InFlightFlags {
    const fn flag(&self, kind: OperationKind) -> Option<&AtomicBool> {
        match kind {
            OperationKind::Approve => Some(&self.approving),
            OperationKind::Reject => Some(&self.rejecting),
            OperationKind::CheckIn => Some(&self.checking_in),
            OperationKind::CheckOut => Some(&self.checking_out),
            OperationKind::Export => None,
        }
    }

    fn is_set(&self, kind: OperationKind) -> bool {
        self.flag(kind).is_some_and(|f| f.load(Ordering::Acquire))
    }
}

/// Clears an in-flight flag when dropped, on every exit path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool, kind: OperationKind) -> Result<Self, DispatchError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DispatchError::AlreadyInFlight { kind })?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Issues bulk operations against the gateway.
///
/// The dispatcher never touches local participant records. Callers refresh
/// from the gateway once an operation settles.
pub struct BulkDispatcher<G: ActivityGateway + ?Sized> {
    gateway: Arc<G>,
    capabilities: ConsoleCapabilities,
    flags: InFlightFlags,
    last_outcomes: Mutex<HashMap<OperationKind, OperationOutcome>>,
}

impl<G: ActivityGateway + ?Sized> BulkDispatcher<G> {
    /// Creates a dispatcher.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The shared gateway
    /// * `capabilities` - What the operator may do
    #[must_use]
    pub fn new(gateway: Arc<G>, capabilities: ConsoleCapabilities) -> Self {
        Self {
            gateway,
            capabilities,
            flags: InFlightFlags::default(),
            last_outcomes: Mutex::new(HashMap::new()),
        }
    }

    /// The capabilities this dispatcher enforces.
    #[must_use]
    pub const fn capabilities(&self) -> &ConsoleCapabilities {
        &self.capabilities
    }

    /// Returns which operation kinds are currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> InFlightState {
        InFlightState {
            approving: self.flags.is_set(OperationKind::Approve),
            rejecting: self.flags.is_set(OperationKind::Reject),
            checking_in: self.flags.is_set(OperationKind::CheckIn),
            checking_out: self.flags.is_set(OperationKind::CheckOut),
        }
    }

    /// Returns the lifecycle snapshot for one operation kind.
    #[must_use]
    pub fn phase(&self, kind: OperationKind) -> OperationPhase {
        let last_outcome: Option<OperationOutcome> = self
            .last_outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .copied();
        OperationPhase {
            in_flight: self.flags.is_set(kind),
            last_outcome,
        }
    }

    fn record(&self, kind: OperationKind, outcome: OperationOutcome) {
        self.last_outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, outcome);
    }

    fn begin(&self, kind: OperationKind) -> Result<InFlightGuard<'_>, DispatchError> {
        match self.flags.flag(kind) {
            Some(flag) => InFlightGuard::acquire(flag, kind),
            None => Err(DispatchError::InvalidInput {
                field: String::from("kind"),
                message: format!("{kind} is not a dispatched operation"),
            }),
        }
    }

    /// Approves a batch of pictures.
    ///
    /// The backend's aggregate is returned as reported.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The operator may not moderate pictures
    /// - `picture_ids` is empty
    /// - An approval is already in flight
    /// - The gateway call fails
    pub async fn approve(
        &self,
        picture_ids: &[PictureId],
        auto_generate_certificate: bool,
    ) -> Result<BulkApproveResult, DispatchError> {
        let kind: OperationKind = OperationKind::Approve;
        self.capabilities.require(kind)?;
        require_non_empty(picture_ids, "picture_ids")?;
        let _guard: InFlightGuard<'_> = self.begin(kind)?;

        info!(
            count = picture_ids.len(),
            auto_generate_certificate, "Dispatching bulk approve"
        );

        match self
            .gateway
            .bulk_approve_pictures(picture_ids, auto_generate_certificate)
            .await
        {
            Ok(result) => {
                let has_errors: bool = result.errors.as_ref().is_some_and(|e| !e.is_empty());
                let outcome: OperationOutcome = if has_errors {
                    OperationOutcome::PartialFailure
                } else {
                    OperationOutcome::Success
                };
                info!(
                    approved = result.approved_count,
                    skipped = result.skipped_count,
                    ?outcome,
                    "Bulk approve settled"
                );
                self.record(kind, outcome);
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, "Bulk approve failed");
                self.record(kind, OperationOutcome::Fatal);
                Err(translate_gateway_error(err))
            }
        }
    }

    /// Rejects a batch of pictures with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The operator may not moderate pictures
    /// - `picture_ids` is empty or `reason` is blank
    /// - A rejection is already in flight
    /// - The gateway call fails
    pub async fn reject(
        &self,
        picture_ids: &[PictureId],
        reason: &str,
    ) -> Result<BulkRejectResult, DispatchError> {
        let kind: OperationKind = OperationKind::Reject;
        self.capabilities.require(kind)?;
        require_non_empty(picture_ids, "picture_ids")?;
        let reason: &str = reason.trim();
        if reason.is_empty() {
            return Err(DispatchError::InvalidInput {
                field: String::from("reason"),
                message: String::from("A rejection reason is required"),
            });
        }
        let _guard: InFlightGuard<'_> = self.begin(kind)?;

        info!(count = picture_ids.len(), "Dispatching bulk reject");

        match self.gateway.bulk_reject_pictures(picture_ids, reason).await {
            Ok(result) => {
                let has_errors: bool = result.errors.as_ref().is_some_and(|e| !e.is_empty());
                let outcome: OperationOutcome = if has_errors {
                    OperationOutcome::PartialFailure
                } else {
                    OperationOutcome::Success
                };
                info!(
                    rejected = result.rejected_count,
                    skipped = result.skipped_count,
                    ?outcome,
                    "Bulk reject settled"
                );
                self.record(kind, outcome);
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, "Bulk reject failed");
                self.record(kind, OperationOutcome::Fatal);
                Err(translate_gateway_error(err))
            }
        }
    }

    /// Checks participants in, one concurrent request per id.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The operator may not check participants in
    /// - No activity is given or `user_ids` is empty
    /// - A check-in is already in flight
    /// - Any request reports an unauthorized session
    pub async fn check_in(
        &self,
        activity_id: Option<ActivityId>,
        user_ids: &[UserId],
    ) -> Result<FanOutResult, DispatchError> {
        self.fan_out(OperationKind::CheckIn, activity_id, user_ids)
            .await
    }

    /// Checks participants out, one concurrent request per id.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::check_in`], for check-out.
    pub async fn check_out(
        &self,
        activity_id: Option<ActivityId>,
        user_ids: &[UserId],
    ) -> Result<FanOutResult, DispatchError> {
        self.fan_out(OperationKind::CheckOut, activity_id, user_ids)
            .await
    }

    async fn fan_out(
        &self,
        kind: OperationKind,
        activity_id: Option<ActivityId>,
        user_ids: &[UserId],
    ) -> Result<FanOutResult, DispatchError> {
        self.capabilities.require(kind)?;
        let Some(activity_id) = activity_id else {
            return Err(DispatchError::InvalidInput {
                field: String::from("activity_id"),
                message: String::from("No activity selected"),
            });
        };
        require_non_empty(user_ids, "user_ids")?;
        let _guard: InFlightGuard<'_> = self.begin(kind)?;

        info!(
            %kind,
            activity_id = %activity_id,
            count = user_ids.len(),
            "Dispatching fan-out"
        );

        let gateway: &G = &self.gateway;
        let requests = user_ids.iter().map(|&user_id| async move {
            let result: Result<(), GatewayError> = if kind == OperationKind::CheckOut {
                gateway.check_out(activity_id, user_id).await
            } else {
                gateway.check_in(activity_id, user_id).await
            };
            if let Err(err) = &result {
                debug!(%kind, user_id = %user_id, error = %err, "Fan-out item failed");
            }
            ItemOutcome {
                user_id,
                error: result.err(),
            }
        });
        let outcomes: Vec<ItemOutcome> = join_all(requests).await;

        if let Some(message) = outcomes.iter().find_map(|o| match &o.error {
            Some(GatewayError::Unauthorized { message }) => Some(message.clone()),
            _ => None,
        }) {
            warn!(%kind, "Fan-out hit an unauthorized session");
            self.record(kind, OperationOutcome::Fatal);
            return Err(DispatchError::Unauthorized { message });
        }

        let result: FanOutResult = FanOutResult::from_outcomes(kind, activity_id, outcomes);
        info!(
            %kind,
            success = result.success_count,
            failed = result.fail_count,
            "Fan-out settled"
        );
        self.record(kind, result.outcome());
        Ok(result)
    }

    /// Builds the export table for the selected participants.
    ///
    /// Local only. No gateway call is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator may not export or the selection is
    /// empty.
    pub fn export(&self, selected: &[Participant]) -> Result<ExportTable, DispatchError> {
        let kind: OperationKind = OperationKind::Export;
        self.capabilities.require(kind)?;
        require_non_empty(selected, "selection")?;

        let table: ExportTable = export_participants(selected);
        debug!(rows = table.len(), "Built export table");
        self.record(kind, OperationOutcome::Success);
        Ok(table)
    }
}

fn require_non_empty<T>(items: &[T], field: &str) -> Result<(), DispatchError> {
    if items.is_empty() {
        return Err(DispatchError::InvalidInput {
            field: field.to_string(),
            message: String::from("Nothing selected"),
        });
    }
    Ok(())
}
