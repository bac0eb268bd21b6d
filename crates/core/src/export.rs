// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tabular export of selected participants.
//!
//! This is a local transform only. Serializing the table to a file format is
//! the caller's concern.

use campus_activity_domain::{Participant, PictureStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Column headers of the participant export, in output order.
pub const EXPORT_HEADERS: &[&str] = &[
    "user_id",
    "code",
    "last_name",
    "first_name",
    "email",
    "role",
    "department",
    "faculty",
    "registered_at",
    "checked_in_at",
    "checked_out_at",
    "status",
    "pictures",
    "approved_pictures",
];

/// A header row plus one row of cells per participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows, one per participant, each the same width as `headers`.
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

fn export_row(participant: &Participant) -> Vec<String> {
    vec![
        participant.user_id.to_string(),
        participant.code.clone(),
        participant.last_name.clone(),
        participant.first_name.clone(),
        participant.email.clone(),
        participant.role.to_string(),
        participant.department.clone().unwrap_or_default(),
        participant.faculty.clone().unwrap_or_default(),
        format_timestamp(participant.registered_at),
        format_timestamp(participant.check_in_time),
        format_timestamp(participant.check_out_time),
        participant.status().to_string(),
        participant.pictures.len().to_string(),
        participant
            .picture_count(PictureStatus::Approved)
            .to_string(),
    ]
}

/// Builds the export table for the given participants, preserving order.
#[must_use]
pub fn export_participants(participants: &[Participant]) -> ExportTable {
    ExportTable {
        headers: EXPORT_HEADERS.iter().map(ToString::to_string).collect(),
        rows: participants.iter().map(export_row).collect(),
    }
}
