// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The activity participation console.
//!
//! Ties the gateway, the operator's capabilities, the bulk dispatcher and
//! the participant view together. Every bulk operation follows the same
//! two-phase protocol: dispatch and wait for the gateway, then refetch the
//! participant list. Local records are never patched.
//!
//! The view lock is only ever held for synchronous work; it is released
//! before any gateway call.

use campus_activity::{ExportTable, FilterOptions, ParticipationStats};
use campus_activity_domain::{
    Activity, ActivityId, FilterSpec, Participant, Picture, PictureId, PictureStatus, UserId,
    validate_participants,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::future::join_all;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::capabilities::ConsoleCapabilities;
use crate::csv_export::write_csv;
use crate::dispatcher::{BulkDispatcher, FanOutResult, ItemOutcome};
use crate::error::{DispatchError, GatewayError, translate_domain_error, translate_gateway_error};
use crate::gateway::{ActivityGateway, BulkApproveResult, BulkRejectResult};
use crate::view::{ParticipantView, ViewTicket};

/// A settled bulk operation and whether the follow-up refetch was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched<T> {
    /// The operation's result.
    pub result: T,
    /// True if the participant list was refetched and applied afterwards.
    pub refreshed: bool,
}

/// Outcome of loading pictures for the visible participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureLoadReport {
    /// Number of participants whose pictures were requested.
    pub requested: usize,
    /// Number of participants whose pictures arrived.
    pub loaded: usize,
    /// Requests that failed, in request order.
    pub failed: Vec<ItemOutcome>,
    /// False if the view moved on before the pictures arrived.
    pub applied: bool,
}

/// The participation console for one operator.
pub struct ActivityConsole<G: ActivityGateway + ?Sized> {
    gateway: Arc<G>,
    dispatcher: BulkDispatcher<G>,
    view: Mutex<ParticipantView>,
    timezone: Tz,
    with_pictures: AtomicBool,
}

impl<G: ActivityGateway + ?Sized> ActivityConsole<G> {
    /// Creates a console.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The shared gateway
    /// * `capabilities` - What the operator may do
    /// * `timezone` - The operator's zone, used for registration-date buckets
    #[must_use]
    pub fn new(gateway: Arc<G>, capabilities: ConsoleCapabilities, timezone: Tz) -> Self {
        Self {
            dispatcher: BulkDispatcher::new(Arc::clone(&gateway), capabilities),
            gateway,
            view: Mutex::new(ParticipantView::new()),
            timezone,
            with_pictures: AtomicBool::new(false),
        }
    }

    /// The dispatcher, for in-flight and phase snapshots.
    #[must_use]
    pub const fn dispatcher(&self) -> &BulkDispatcher<G> {
        &self.dispatcher
    }

    /// The operator's capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> &ConsoleCapabilities {
        self.dispatcher.capabilities()
    }

    /// The operator's zone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }

    /// Lists activities with their participation counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn list_activities(&self) -> Result<Vec<Activity>, DispatchError> {
        let activities: Vec<Activity> = self
            .gateway
            .list_activities_with_participants()
            .await
            .map_err(translate_gateway_error)?;
        debug!(count = activities.len(), "Listed activities");
        Ok(activities)
    }

    /// Switches to an activity and loads its participants.
    ///
    /// Pictures are not fetched until [`Self::load_pictures`] is called for
    /// the new activity.
    ///
    /// Returns whether the loaded list was applied. It is not applied if
    /// another switch happened while it was loading.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub async fn select_activity(
        &self,
        activity_id: ActivityId,
        target: Option<u32>,
    ) -> Result<bool, DispatchError> {
        let ticket: ViewTicket = self.view.lock().await.select_activity(activity_id, target);
        self.with_pictures.store(false, Ordering::Release);
        info!(activity_id = %activity_id, generation = ticket.generation, "Selected activity");
        self.load(ticket).await
    }

    /// Leaves the current activity. Outstanding loads are discarded.
    pub async fn close_activity(&self) {
        self.view.lock().await.clear_activity();
        self.with_pictures.store(false, Ordering::Release);
    }

    /// Refetches the participant list for the current activity.
    ///
    /// If pictures were loaded before, they are refetched for every
    /// participant as part of the same replacement.
    ///
    /// # Errors
    ///
    /// Returns an error if no activity is selected, the gateway call fails,
    /// or the returned data is inconsistent.
    pub async fn refresh(&self) -> Result<bool, DispatchError> {
        let ticket: Option<ViewTicket> = self.view.lock().await.ticket();
        let Some(ticket) = ticket else {
            return Err(no_activity());
        };
        self.load(ticket).await
    }

    async fn load(&self, ticket: ViewTicket) -> Result<bool, DispatchError> {
        let mut participants: Vec<Participant> = self
            .gateway
            .list_participants(ticket.activity_id)
            .await
            .map_err(translate_gateway_error)?;

        if self.with_pictures.load(Ordering::Acquire) {
            let user_ids: Vec<UserId> = participants.iter().map(|p| p.user_id).collect();
            let (mut pictures, failed) = self.fetch_pictures(ticket.activity_id, &user_ids).await?;
            if !failed.is_empty() {
                warn!(failed = failed.len(), "Some pictures could not be refetched");
            }
            for participant in &mut participants {
                if let Some(loaded) = pictures.remove(&participant.user_id) {
                    participant.pictures = loaded;
                }
            }
        }

        validate_participants(&participants).map_err(|e| translate_domain_error(&e))?;

        let count: usize = participants.len();
        let applied: bool = self
            .view
            .lock()
            .await
            .apply_participants(&ticket, participants);
        if applied {
            debug!(activity_id = %ticket.activity_id, count, "Applied participant list");
        }
        Ok(applied)
    }

    /// Loads pictures for every visible participant.
    ///
    /// One request per participant, all concurrent, all settled before the
    /// pictures are applied. Failed requests leave that participant's
    /// pictures as they were.
    ///
    /// # Errors
    ///
    /// Returns an error if no activity is selected or any request reports an
    /// unauthorized session.
    pub async fn load_pictures(&self) -> Result<PictureLoadReport, DispatchError> {
        let (ticket, visible_ids) = {
            let view = self.view.lock().await;
            (view.ticket(), view.visible_ids(&self.now()))
        };
        let Some(ticket) = ticket else {
            return Err(no_activity());
        };
        self.with_pictures.store(true, Ordering::Release);

        let (pictures, failed) = self.fetch_pictures(ticket.activity_id, &visible_ids).await?;
        let loaded: usize = pictures.len();
        let applied: bool = self.view.lock().await.apply_pictures(&ticket, pictures);
        info!(
            requested = visible_ids.len(),
            loaded,
            failed = failed.len(),
            applied,
            "Loaded pictures"
        );
        Ok(PictureLoadReport {
            requested: visible_ids.len(),
            loaded,
            failed,
            applied,
        })
    }

    async fn fetch_pictures(
        &self,
        activity_id: ActivityId,
        user_ids: &[UserId],
    ) -> Result<(HashMap<UserId, Vec<Picture>>, Vec<ItemOutcome>), DispatchError> {
        let gateway: &G = &self.gateway;
        let requests = user_ids.iter().map(|&user_id| async move {
            (
                user_id,
                gateway.list_participant_pictures(activity_id, user_id).await,
            )
        });
        let settled: Vec<(UserId, Result<Vec<Picture>, GatewayError>)> = join_all(requests).await;

        let mut pictures: HashMap<UserId, Vec<Picture>> = HashMap::new();
        let mut failed: Vec<ItemOutcome> = Vec::new();
        for (user_id, result) in settled {
            match result {
                Ok(loaded) => {
                    pictures.insert(user_id, loaded);
                }
                Err(GatewayError::Unauthorized { message }) => {
                    return Err(DispatchError::Unauthorized { message });
                }
                Err(err) => failed.push(ItemOutcome {
                    user_id,
                    error: Some(err),
                }),
            }
        }
        Ok((pictures, failed))
    }

    /// Replaces the structured filters.
    pub async fn set_filter(&self, spec: FilterSpec) {
        self.view.lock().await.set_filter(spec);
    }

    /// Replaces the search query.
    pub async fn set_query(&self, query: &str) {
        self.view.lock().await.set_query(query);
    }

    /// The filtered participants.
    pub async fn visible(&self) -> Vec<Participant> {
        self.view.lock().await.visible(&self.now())
    }

    /// Selects every visible participant.
    pub async fn select_all(&self) -> usize {
        self.view.lock().await.select_all(&self.now())
    }

    /// Clears the selection.
    pub async fn deselect_all(&self) {
        self.view.lock().await.deselect_all();
    }

    /// Toggles one visible participant.
    ///
    /// # Errors
    ///
    /// Returns an error when selecting an id outside the current view.
    pub async fn toggle(&self, user_id: UserId) -> Result<bool, DispatchError> {
        self.view.lock().await.toggle(user_id, &self.now())
    }

    /// Returns true if every visible participant is selected.
    pub async fn is_all_selected(&self) -> bool {
        self.view.lock().await.is_all_selected(&self.now())
    }

    /// The selected participants that are currently visible.
    pub async fn selected_participants(&self) -> Vec<Participant> {
        self.view.lock().await.selected_participants(&self.now())
    }

    /// Statistics for the current activity.
    pub async fn stats(&self) -> ParticipationStats {
        self.view.lock().await.stats(&self.now())
    }

    /// Departments and faculties present in the current collection.
    pub async fn options(&self) -> FilterOptions {
        self.view.lock().await.options()
    }

    async fn actionable(&self) -> (Option<ActivityId>, Vec<UserId>) {
        let view = self.view.lock().await;
        (view.activity_id(), view.actionable_ids(&self.now()))
    }

    async fn pending_pictures(&self) -> Vec<PictureId> {
        self.selected_participants()
            .await
            .iter()
            .flat_map(|p| p.pictures.iter())
            .filter(|picture| picture.status == PictureStatus::Pending)
            .map(|picture| picture.picture_id)
            .collect()
    }

    async fn refresh_after_dispatch(&self) -> bool {
        match self.refresh().await {
            Ok(applied) => applied,
            Err(err) => {
                warn!(error = %err, "Refresh after dispatch failed");
                false
            }
        }
    }

    /// Checks in the selected, visible participants, then refetches.
    ///
    /// # Errors
    ///
    /// See [`BulkDispatcher::check_in`].
    pub async fn check_in_selected(&self) -> Result<Dispatched<FanOutResult>, DispatchError> {
        let (activity_id, user_ids) = self.actionable().await;
        let result: FanOutResult = self.dispatcher.check_in(activity_id, &user_ids).await?;
        let refreshed: bool = self.refresh_after_dispatch().await;
        Ok(Dispatched { result, refreshed })
    }

    /// Checks out the selected, visible participants, then refetches.
    ///
    /// # Errors
    ///
    /// See [`BulkDispatcher::check_out`].
    pub async fn check_out_selected(&self) -> Result<Dispatched<FanOutResult>, DispatchError> {
        let (activity_id, user_ids) = self.actionable().await;
        let result: FanOutResult = self.dispatcher.check_out(activity_id, &user_ids).await?;
        let refreshed: bool = self.refresh_after_dispatch().await;
        Ok(Dispatched { result, refreshed })
    }

    /// Approves the pending pictures of the selected, visible participants,
    /// then refetches.
    ///
    /// # Errors
    ///
    /// See [`BulkDispatcher::approve`].
    pub async fn approve_selected(
        &self,
        auto_generate_certificate: bool,
    ) -> Result<Dispatched<BulkApproveResult>, DispatchError> {
        let picture_ids: Vec<PictureId> = self.pending_pictures().await;
        let result: BulkApproveResult = self
            .dispatcher
            .approve(&picture_ids, auto_generate_certificate)
            .await?;
        let refreshed: bool = self.refresh_after_dispatch().await;
        Ok(Dispatched { result, refreshed })
    }

    /// Rejects the pending pictures of the selected, visible participants,
    /// then refetches.
    ///
    /// # Errors
    ///
    /// See [`BulkDispatcher::reject`].
    pub async fn reject_selected(
        &self,
        reason: &str,
    ) -> Result<Dispatched<BulkRejectResult>, DispatchError> {
        let picture_ids: Vec<PictureId> = self.pending_pictures().await;
        let result: BulkRejectResult = self.dispatcher.reject(&picture_ids, reason).await?;
        let refreshed: bool = self.refresh_after_dispatch().await;
        Ok(Dispatched { result, refreshed })
    }

    /// Builds the export table for the selected, visible participants.
    ///
    /// # Errors
    ///
    /// See [`BulkDispatcher::export`].
    pub async fn export_selected(&self) -> Result<ExportTable, DispatchError> {
        let selected: Vec<Participant> = self.selected_participants().await;
        self.dispatcher.export(&selected)
    }

    /// Writes the export for the selected, visible participants as CSV and
    /// returns the number of data rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the export is not allowed, nothing is selected,
    /// or writing fails.
    pub async fn export_selected_csv<W: Write>(&self, writer: W) -> Result<usize, DispatchError> {
        let table: ExportTable = self.export_selected().await?;
        write_csv(&table, writer)
    }
}

fn no_activity() -> DispatchError {
    DispatchError::InvalidInput {
        field: String::from("activity_id"),
        message: String::from("No activity selected"),
    }
}
