// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use async_trait::async_trait;
use campus_activity_domain::{
    Activity, ActivityId, ActivityStatus, Participant, ParticipantRole, Picture, PictureId,
    PictureStatus, UserId,
};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{
    ActivityConsole, ActivityGateway, BulkApproveResult, BulkDispatcher, BulkRejectResult,
    ConsoleCapabilities, GatewayError,
};

pub const ACTIVITY: ActivityId = ActivityId::new(10);
pub const OTHER_ACTIVITY: ActivityId = ActivityId::new(20);

/// A gateway call, as recorded by [`MockGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListActivities,
    ListParticipants(ActivityId),
    ListPictures(UserId),
    Approve(Vec<PictureId>, bool),
    Reject(Vec<PictureId>, String),
    CheckIn(UserId),
    CheckOut(UserId),
}

/// An in-memory gateway.
///
/// Check-in, check-out and moderation mutate the stored records, so a
/// refetch after a dispatch observes the backend's new state.
#[derive(Default)]
pub struct MockGateway {
    activities: Vec<Activity>,
    participants: Mutex<HashMap<ActivityId, Vec<Participant>>>,
    pictures: Mutex<HashMap<UserId, Vec<Picture>>>,
    failing_ids: HashSet<UserId>,
    unauthorized_ids: HashSet<UserId>,
    batch_error: Option<GatewayError>,
    list_delays: HashMap<ActivityId, u64>,
    batch_delay_ms: u64,
    random_delays: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    pub fn with_participants(self, activity_id: ActivityId, participants: Vec<Participant>) -> Self {
        self.participants
            .lock()
            .unwrap()
            .insert(activity_id, participants);
        self
    }

    pub fn with_pictures(self, user_id: i64, pictures: Vec<Picture>) -> Self {
        self.pictures
            .lock()
            .unwrap()
            .insert(UserId::new(user_id), pictures);
        self
    }

    /// Per-item requests for these ids fail with a transport error.
    pub fn failing(mut self, ids: &[i64]) -> Self {
        self.failing_ids.extend(ids.iter().copied().map(UserId::new));
        self
    }

    /// Per-item requests for these ids fail as unauthorized.
    pub fn unauthorized(mut self, ids: &[i64]) -> Self {
        self.unauthorized_ids
            .extend(ids.iter().copied().map(UserId::new));
        self
    }

    /// Batch moderation calls fail with this error.
    pub fn with_batch_error(mut self, err: GatewayError) -> Self {
        self.batch_error = Some(err);
        self
    }

    pub fn with_list_delay(mut self, activity_id: ActivityId, ms: u64) -> Self {
        self.list_delays.insert(activity_id, ms);
        self
    }

    pub const fn with_batch_delay(mut self, ms: u64) -> Self {
        self.batch_delay_ms = ms;
        self
    }

    /// Per-item requests settle after a random delay of up to 20ms.
    pub const fn with_random_delays(mut self) -> Self {
        self.random_delays = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    pub fn list_participant_calls(&self) -> usize {
        self.call_count(|c| matches!(c, Call::ListParticipants(_)))
    }

    pub fn checked_in_ids(&self) -> Vec<UserId> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::CheckIn(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn item_delay(&self) {
        if self.random_delays {
            let ms: u64 = rand::random::<u64>() % 20;
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    fn item_failure(&self, user_id: UserId) -> Option<GatewayError> {
        if self.unauthorized_ids.contains(&user_id) {
            return Some(GatewayError::Unauthorized {
                message: String::from("session expired"),
            });
        }
        if self.failing_ids.contains(&user_id) {
            return Some(GatewayError::Transport {
                message: String::from("connection reset"),
            });
        }
        None
    }

    fn update_participant(
        &self,
        activity_id: ActivityId,
        user_id: UserId,
        update: impl FnOnce(&mut Participant),
    ) -> Result<(), GatewayError> {
        let mut participants = self.participants.lock().unwrap();
        let participant: &mut Participant = participants
            .get_mut(&activity_id)
            .and_then(|list| list.iter_mut().find(|p| p.user_id == user_id))
            .ok_or_else(|| GatewayError::NotFound {
                message: format!("participant {user_id}"),
            })?;
        update(participant);
        Ok(())
    }

    fn moderate(&self, picture_ids: &[PictureId], status: PictureStatus) -> (u32, u32, Vec<String>) {
        let mut pictures = self.pictures.lock().unwrap();
        let mut changed: u32 = 0;
        let mut skipped: u32 = 0;
        let mut errors: Vec<String> = Vec::new();
        for id in picture_ids {
            let found: Option<&mut Picture> = pictures
                .values_mut()
                .flat_map(|list| list.iter_mut())
                .find(|p| p.picture_id == *id);
            match found {
                Some(picture) if picture.status == PictureStatus::Pending => {
                    picture.status = status;
                    changed += 1;
                }
                Some(_) => skipped += 1,
                None => errors.push(format!("Picture {id} not found")),
            }
        }
        (changed, skipped, errors)
    }
}

#[async_trait]
impl ActivityGateway for MockGateway {
    async fn list_activities_with_participants(&self) -> Result<Vec<Activity>, GatewayError> {
        self.record(Call::ListActivities);
        Ok(self.activities.clone())
    }

    async fn list_participants(
        &self,
        activity_id: ActivityId,
    ) -> Result<Vec<Participant>, GatewayError> {
        self.record(Call::ListParticipants(activity_id));
        if let Some(ms) = self.list_delays.get(&activity_id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        let participants = self.participants.lock().unwrap();
        participants
            .get(&activity_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                message: format!("activity {activity_id}"),
            })
    }

    async fn list_participant_pictures(
        &self,
        _activity_id: ActivityId,
        user_id: UserId,
    ) -> Result<Vec<Picture>, GatewayError> {
        self.record(Call::ListPictures(user_id));
        self.item_delay().await;
        if let Some(err) = self.item_failure(user_id) {
            return Err(err);
        }
        Ok(self
            .pictures
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn bulk_approve_pictures(
        &self,
        picture_ids: &[PictureId],
        auto_generate_certificate: bool,
    ) -> Result<BulkApproveResult, GatewayError> {
        self.record(Call::Approve(picture_ids.to_vec(), auto_generate_certificate));
        tokio::time::sleep(Duration::from_millis(self.batch_delay_ms)).await;
        if let Some(err) = &self.batch_error {
            return Err(err.clone());
        }
        let (approved_count, skipped_count, errors) =
            self.moderate(picture_ids, PictureStatus::Approved);
        Ok(BulkApproveResult {
            approved_count,
            skipped_count,
            certificates: None,
            errors: if errors.is_empty() { None } else { Some(errors) },
        })
    }

    async fn bulk_reject_pictures(
        &self,
        picture_ids: &[PictureId],
        reason: &str,
    ) -> Result<BulkRejectResult, GatewayError> {
        self.record(Call::Reject(picture_ids.to_vec(), reason.to_string()));
        tokio::time::sleep(Duration::from_millis(self.batch_delay_ms)).await;
        if let Some(err) = &self.batch_error {
            return Err(err.clone());
        }
        let (rejected_count, skipped_count, errors) =
            self.moderate(picture_ids, PictureStatus::Rejected);
        Ok(BulkRejectResult {
            rejected_count,
            skipped_count,
            errors: if errors.is_empty() { None } else { Some(errors) },
        })
    }

    async fn check_in(&self, activity_id: ActivityId, user_id: UserId) -> Result<(), GatewayError> {
        self.record(Call::CheckIn(user_id));
        self.item_delay().await;
        if let Some(err) = self.item_failure(user_id) {
            return Err(err);
        }
        self.update_participant(activity_id, user_id, |p| {
            p.check_in_time = Some(utc(2026, 3, 15, 2, 0));
        })
    }

    async fn check_out(&self, activity_id: ActivityId, user_id: UserId) -> Result<(), GatewayError> {
        self.record(Call::CheckOut(user_id));
        self.item_delay().await;
        if let Some(err) = self.item_failure(user_id) {
            return Err(err);
        }
        self.update_participant(activity_id, user_id, |p| {
            p.check_out_time = Some(utc(2026, 3, 15, 4, 0));
        })
    }
}

pub fn timezone() -> Tz {
    chrono_tz::Asia::Ho_Chi_Minh
}

/// 2026-03-15 14:30 in Ho Chi Minh City.
pub fn fixed_now() -> DateTime<Tz> {
    timezone().with_ymd_and_hms(2026, 3, 15, 14, 30, 0).unwrap()
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

pub fn ids(values: &[i64]) -> Vec<UserId> {
    values.iter().copied().map(UserId::new).collect()
}

pub fn user_ids(participants: &[Participant]) -> Vec<i64> {
    participants.iter().map(|p| p.user_id.value()).collect()
}

pub fn create_participant(id: i64, role: ParticipantRole) -> Participant {
    let mut participant: Participant =
        Participant::new(UserId::new(id), "First", &format!("Last{id}"), role);
    participant.code = format!("C{id:04}");
    participant.email = format!("user{id}@example.edu");
    participant
}

pub fn create_picture(picture_id: i64, user_id: i64, status: PictureStatus) -> Picture {
    Picture::new(PictureId::new(picture_id), UserId::new(user_id)).with_status(status)
}

/// Five participants split across two departments, none checked in.
pub fn roster() -> Vec<Participant> {
    (1..=5)
        .map(|id| {
            let role: ParticipantRole = if id == 5 {
                ParticipantRole::Teacher
            } else {
                ParticipantRole::Student
            };
            let mut participant: Participant = create_participant(id, role);
            participant.department = Some(if id % 2 == 0 {
                String::from("Chemistry")
            } else {
                String::from("Physics")
            });
            participant.faculty = Some(String::from("Science"));
            participant.registered_at = Some(utc(2026, 3, 1, 3, 0));
            participant
        })
        .collect()
}

pub fn create_activity(activity_id: ActivityId, max_participants: Option<u32>) -> Activity {
    Activity {
        activity_id,
        title: format!("Activity {activity_id}"),
        status: ActivityStatus::Ongoing,
        max_participants,
        registered_count: 5,
        checked_in_count: 0,
        completed_count: 0,
    }
}

pub fn create_dispatcher(
    gateway: &Arc<MockGateway>,
    capabilities: ConsoleCapabilities,
) -> BulkDispatcher<MockGateway> {
    BulkDispatcher::new(Arc::clone(gateway), capabilities)
}

pub fn create_console(
    gateway: &Arc<MockGateway>,
    capabilities: ConsoleCapabilities,
) -> ActivityConsole<MockGateway> {
    ActivityConsole::new(Arc::clone(gateway), capabilities, timezone())
}
