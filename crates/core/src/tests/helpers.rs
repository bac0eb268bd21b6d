// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_activity_domain::{
    DateFilter, FilterSpec, Participant, ParticipantRole, Picture, PictureFilter, PictureId,
    PictureStatus, RoleFilter, StatusFilter, UserId,
};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// 2026-03-15 14:30 in Ho Chi Minh City (UTC+7, no DST).
pub fn fixed_now() -> DateTime<Tz> {
    chrono_tz::Asia::Ho_Chi_Minh
        .with_ymd_and_hms(2026, 3, 15, 14, 30, 0)
        .unwrap()
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
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

/// The three-participant scenario: pending, checked in, completed.
pub fn scenario_participants() -> Vec<Participant> {
    let pending: Participant = create_participant(1, ParticipantRole::Student);

    let mut checked_in: Participant = create_participant(2, ParticipantRole::Student);
    checked_in.check_in_time = Some(utc(2026, 3, 15, 1, 0));

    let mut completed: Participant = create_participant(3, ParticipantRole::Student);
    completed.check_in_time = Some(utc(2026, 3, 15, 1, 0));
    completed.check_out_time = Some(utc(2026, 3, 15, 3, 0));

    vec![pending, checked_in, completed]
}

/// A varied collection covering every filter dimension.
pub fn sample_participants() -> Vec<Participant> {
    let mut out: Vec<Participant> = Vec::new();

    let mut p: Participant = create_participant(1, ParticipantRole::Student);
    p.first_name = String::from("Minh");
    p.last_name = String::from("Nguyen");
    p.department = Some(String::from("Physics"));
    p.faculty = Some(String::from("Science"));
    // 01:00 local on the 15th
    p.registered_at = Some(utc(2026, 3, 14, 18, 0));
    out.push(p);

    let mut p: Participant = create_participant(2, ParticipantRole::Student);
    p.first_name = String::from("Lan");
    p.last_name = String::from("Tran");
    p.department = Some(String::from("Chemistry"));
    p.faculty = Some(String::from("Science"));
    // 23:00 local on the 14th
    p.registered_at = Some(utc(2026, 3, 14, 16, 0));
    p.check_in_time = Some(utc(2026, 3, 15, 2, 0));
    p.pictures = vec![create_picture(20, 2, PictureStatus::Pending)];
    out.push(p);

    let mut p: Participant = create_participant(3, ParticipantRole::Teacher);
    p.first_name = String::from("Anh");
    p.last_name = String::from("Pham");
    p.department = Some(String::from("Physics"));
    p.faculty = Some(String::from("Science"));
    p.registered_at = Some(utc(2026, 3, 10, 3, 0));
    p.check_in_time = Some(utc(2026, 3, 15, 2, 0));
    p.check_out_time = Some(utc(2026, 3, 15, 5, 0));
    p.pictures = vec![
        create_picture(30, 3, PictureStatus::Approved),
        create_picture(31, 3, PictureStatus::Approved),
    ];
    out.push(p);

    let mut p: Participant = create_participant(4, ParticipantRole::Student);
    p.first_name = String::from("Hoa");
    p.last_name = String::from("Le");
    p.department = Some(String::from("Literature"));
    p.faculty = Some(String::from("Humanities"));
    p.registered_at = Some(utc(2026, 3, 1, 3, 0));
    p.pictures = vec![
        create_picture(40, 4, PictureStatus::Approved),
        create_picture(41, 4, PictureStatus::Rejected),
    ];
    out.push(p);

    let mut p: Participant = create_participant(5, ParticipantRole::Teacher);
    p.first_name = String::from("Quang");
    p.last_name = String::from("Vo");
    p.email = String::from("quang.vo@physics.example.edu");
    p.faculty = Some(String::from("Science"));
    p.registered_at = Some(utc(2026, 1, 20, 3, 0));
    p.check_in_time = Some(utc(2026, 3, 15, 2, 0));
    out.push(p);

    let mut p: Participant = create_participant(6, ParticipantRole::Student);
    p.first_name = String::from("Thao");
    p.last_name = String::from("Dang");
    p.code = String::from("SV2026-PHY");
    p.department = Some(String::from("Physics"));
    p.check_in_time = Some(utc(2026, 3, 15, 2, 0));
    p.check_out_time = Some(utc(2026, 3, 15, 6, 0));
    p.pictures = vec![create_picture(60, 6, PictureStatus::Rejected)];
    out.push(p);

    out
}

pub fn ids(participants: &[Participant]) -> Vec<i64> {
    participants.iter().map(|p| p.user_id.value()).collect()
}

pub fn user_ids(values: &[i64]) -> Vec<UserId> {
    values.iter().copied().map(UserId::new).collect()
}

/// Every combination of filter values over the sample collection's labels.
pub fn spec_grid() -> Vec<FilterSpec> {
    let departments: [Option<String>; 3] = [
        None,
        Some(String::from("Physics")),
        Some(String::from("Biology")),
    ];
    let faculties: [Option<String>; 2] = [None, Some(String::from("Science"))];

    let mut specs: Vec<FilterSpec> = Vec::new();
    for status in StatusFilter::ALL_VALUES {
        for role in RoleFilter::ALL_VALUES {
            for department in &departments {
                for faculty in &faculties {
                    for registered in DateFilter::ALL_VALUES {
                        for pictures in PictureFilter::ALL_VALUES {
                            specs.push(FilterSpec {
                                status: *status,
                                role: *role,
                                department: department.clone(),
                                faculty: faculty.clone(),
                                registered: *registered,
                                pictures: *pictures,
                            });
                        }
                    }
                }
            }
        }
    }
    specs
}

/// Search queries exercised alongside the spec grid.
pub const QUERIES: &[&str] = &["", "   ", "an", "PHY", "example.edu", "zzz"];

/// All orderings of `items` (Heap's algorithm).
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        heap(k - 1, items, out);
        for i in 0..k - 1 {
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
            heap(k - 1, items, out);
        }
    }

    let mut working: Vec<T> = items.to_vec();
    let mut out: Vec<Vec<T>> = Vec::new();
    heap(working.len(), &mut working, &mut out);
    out
}
