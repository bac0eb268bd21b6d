// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments.

use campus_activity_api::OperatorRole;
use campus_activity_domain::{
    DateFilter, FilterSpec, PictureFilter, RoleFilter, StatusFilter, UserId,
};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Campus Activity - participant console for university activities
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the activity backend API.
    #[arg(long, env = "CAMPUS_API_URL")]
    pub base_url: String,

    /// Bearer token of the operator's session.
    #[arg(long, env = "CAMPUS_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Operator role: admin, organizer or viewer.
    #[arg(long, env = "CAMPUS_OPERATOR_ROLE", default_value = "viewer")]
    pub operator_role: OperatorRole,

    /// IANA timezone used for registration-date filters.
    #[arg(long, default_value = "Asia/Ho_Chi_Minh")]
    pub timezone: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List activities with participation counts.
    Activities {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// List the filtered participants of an activity.
    Participants {
        #[command(flatten)]
        view: ViewArgs,
        /// Print participation statistics after the list.
        #[arg(long)]
        stats: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Check participants in.
    CheckIn {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Check participants out.
    CheckOut {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Approve the pending pictures of participants.
    Approve {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Generate certificates for approved participants.
        #[arg(long)]
        certificate: bool,
    },
    /// Reject the pending pictures of participants.
    Reject {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Reason shown to the participants.
        #[arg(long)]
        reason: String,
    },
    /// Export participants as CSV.
    Export {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output file. Standard output when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Which activity to open and how to filter its participants.
#[derive(clap::Args, Debug, Clone)]
pub struct ViewArgs {
    /// Activity id.
    #[arg(long)]
    pub activity: i64,

    /// Attendance status: all, pending, checked_in, completed.
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Participant role: all, student, teacher.
    #[arg(long, default_value = "all")]
    pub role: RoleFilter,

    /// Exact department label.
    #[arg(long)]
    pub department: Option<String>,

    /// Exact faculty label.
    #[arg(long)]
    pub faculty: Option<String>,

    /// Registration date: all, today, week, month.
    #[arg(long, default_value = "all")]
    pub registered: DateFilter,

    /// Pictures: all, none, has_pending, has_approved, has_rejected, all_approved.
    #[arg(long, default_value = "all")]
    pub pictures: PictureFilter,

    /// Free-text search over name, code, email and department.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Load participation pictures.
    #[arg(long)]
    pub with_pictures: bool,
}

impl ViewArgs {
    /// The structured filters these arguments describe.
    #[must_use]
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            status: self.status,
            role: self.role,
            department: self.department.clone(),
            faculty: self.faculty.clone(),
            registered: self.registered,
            pictures: self.pictures,
        }
    }
}

/// Which participants to act on.
#[derive(clap::Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Participant ids, comma separated. Every visible participant when omitted.
    #[arg(long = "user", value_delimiter = ',')]
    pub users: Vec<i64>,
}

impl SelectionArgs {
    /// Distinct requested ids in ascending order.
    #[must_use]
    pub fn user_ids(&self) -> Vec<UserId> {
        let unique: BTreeSet<i64> = self.users.iter().copied().collect();
        unique.into_iter().map(UserId::new).collect()
    }
}
