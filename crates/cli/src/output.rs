// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-readable rendering of console results.

use campus_activity::ParticipationStats;
use campus_activity_api::{BulkApproveResult, BulkRejectResult, Dispatched, FanOutResult};
use campus_activity_domain::{Activity, Participant, PictureStatus};
use std::fmt::Write;

/// Renders activities as one line each.
#[must_use]
pub fn format_activities(activities: &[Activity]) -> String {
    let mut out: String = String::new();
    for activity in activities {
        let capacity: String = activity
            .max_participants
            .map_or_else(|| String::from("-"), |max| max.to_string());
        let _ = writeln!(
            out,
            "{:>6}  {:<10} {:>4}/{:<4} checked-in {:>4}  completed {:>4}  {}",
            activity.activity_id.to_string(),
            activity.status.to_string(),
            activity.registered_count,
            capacity,
            activity.checked_in_count,
            activity.completed_count,
            activity.title,
        );
    }
    out
}

/// Renders participants as one line each.
#[must_use]
pub fn format_participants(participants: &[Participant]) -> String {
    let mut out: String = String::new();
    for p in participants {
        let _ = writeln!(
            out,
            "{:>6}  {:<10} {:<8} {:<10} {:<20} pictures {}/{}/{}  {}",
            p.user_id.to_string(),
            p.code,
            p.role.to_string(),
            p.status().to_string(),
            p.department.as_deref().unwrap_or("-"),
            p.picture_count(PictureStatus::Pending),
            p.picture_count(PictureStatus::Approved),
            p.picture_count(PictureStatus::Rejected),
            p.full_name(),
        );
    }
    let _ = writeln!(out, "{} participant(s)", participants.len());
    out
}

/// Renders the statistics panel.
#[must_use]
pub fn format_stats(stats: &ParticipationStats) -> String {
    format!(
        "total {} | registered {} ({:.1}%) | checked in {} ({:.1}%) | completed {} ({:.1}%)\n\
         students {} | teachers {} | shown {} | selected {}\n\
         pictures pending {} | approved {} | rejected {}\n",
        stats.total,
        stats.registered,
        stats.registration_rate,
        stats.checked_in,
        stats.check_in_rate,
        stats.completed,
        stats.completion_rate,
        stats.students,
        stats.teachers,
        stats.filtered,
        stats.selected,
        stats.pictures_pending,
        stats.pictures_approved,
        stats.pictures_rejected,
    )
}

/// Renders a check-in or check-out result, listing every failure.
#[must_use]
pub fn format_fan_out(dispatched: &Dispatched<FanOutResult>) -> String {
    let result: &FanOutResult = &dispatched.result;
    let mut out: String = format!(
        "{} on activity {}: {} succeeded, {} failed\n",
        result.kind, result.activity_id, result.success_count, result.fail_count
    );
    for outcome in &result.outcomes {
        if let Some(error) = &outcome.error {
            let _ = writeln!(out, "  {}: {error}", outcome.user_id);
        }
    }
    push_refresh_note(&mut out, dispatched.refreshed);
    out
}

/// Renders a bulk approval result with issued certificates.
#[must_use]
pub fn format_approve(dispatched: &Dispatched<BulkApproveResult>) -> String {
    let result: &BulkApproveResult = &dispatched.result;
    let mut out: String = format!(
        "approved {}, skipped {}\n",
        result.approved_count, result.skipped_count
    );
    for certificate in result.certificates.iter().flatten() {
        let _ = writeln!(
            out,
            "  certificate {} issued to {}",
            certificate.certificate_id, certificate.user_id
        );
    }
    push_errors(&mut out, result.errors.as_deref());
    push_refresh_note(&mut out, dispatched.refreshed);
    out
}

/// Renders a bulk rejection result.
#[must_use]
pub fn format_reject(dispatched: &Dispatched<BulkRejectResult>) -> String {
    let result: &BulkRejectResult = &dispatched.result;
    let mut out: String = format!(
        "rejected {}, skipped {}\n",
        result.rejected_count, result.skipped_count
    );
    push_errors(&mut out, result.errors.as_deref());
    push_refresh_note(&mut out, dispatched.refreshed);
    out
}

fn push_errors(out: &mut String, errors: Option<&[String]>) {
    for error in errors.unwrap_or_default() {
        let _ = writeln!(out, "  error: {error}");
    }
}

fn push_refresh_note(out: &mut String, refreshed: bool) {
    if !refreshed {
        out.push_str("  (participant list could not be refreshed)\n");
    }
}
