// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;

use campus_activity_api::{
    ActivityConsole, ActivityGateway, AuthenticatedOperator, ConsoleCapabilities, DispatchError,
    PictureLoadReport, compute_console_capabilities,
};
use campus_activity_client::{HttpGateway, HttpGatewayConfig};
use campus_activity_domain::{Activity, ActivityId, UserId};
use chrono_tz::Tz;
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::args::{Args, Command, SelectionArgs, ViewArgs};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Parses an IANA timezone name.
fn parse_timezone(name: &str) -> CliResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| format!("Unknown timezone '{name}': {e}").into())
}

/// Builds the gateway configuration from the command line.
fn gateway_config(args: &Args) -> HttpGatewayConfig {
    HttpGatewayConfig {
        base_url: args.base_url.clone(),
        token: args.token.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    }
}

/// Opens the activity named by `view`, applying its filters and query.
///
/// The activity's capacity is looked up so completion rates use the
/// same target as the admin console.
async fn open_view<G: ActivityGateway + ?Sized>(
    console: &ActivityConsole<G>,
    view: &ViewArgs,
    pictures: bool,
) -> CliResult<()> {
    let activity_id: ActivityId = ActivityId::new(view.activity);
    let activities: Vec<Activity> = console.list_activities().await?;
    let activity: &Activity = activities
        .iter()
        .find(|a| a.activity_id == activity_id)
        .ok_or_else(|| format!("Activity {activity_id} not found"))?;

    console.set_filter(view.filter_spec()).await;
    console.set_query(&view.query).await;
    console
        .select_activity(activity_id, activity.max_participants)
        .await?;
    info!(activity_id = %activity_id, title = %activity.title, "Opened activity");

    if pictures || view.with_pictures {
        let report: PictureLoadReport = console.load_pictures().await?;
        for failure in &report.failed {
            if let Some(error) = &failure.error {
                warn!(user_id = %failure.user_id, error = %error, "Failed to load pictures");
            }
        }
    }
    Ok(())
}

/// Selects the requested participants, or every visible one.
async fn select<G: ActivityGateway + ?Sized>(
    console: &ActivityConsole<G>,
    selection: &SelectionArgs,
) -> Result<usize, DispatchError> {
    let user_ids: Vec<UserId> = selection.user_ids();
    if user_ids.is_empty() {
        return Ok(console.select_all().await);
    }
    for user_id in &user_ids {
        console.toggle(*user_id).await?;
    }
    Ok(user_ids.len())
}

/// Executes one subcommand against the console.
async fn run<G: ActivityGateway + ?Sized>(
    console: &ActivityConsole<G>,
    command: Command,
) -> CliResult<()> {
    match command {
        Command::Activities { json } => {
            let activities: Vec<Activity> = console.list_activities().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&activities)?);
            } else {
                print!("{}", output::format_activities(&activities));
            }
        }
        Command::Participants { view, stats, json } => {
            open_view(console, &view, false).await?;
            let visible = console.visible().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                print!("{}", output::format_participants(&visible));
            }
            if stats {
                let stats = console.stats().await;
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    print!("{}", output::format_stats(&stats));
                }
            }
        }
        Command::CheckIn { view, selection } => {
            open_view(console, &view, false).await?;
            let count: usize = select(console, &selection).await?;
            info!(count, "Checking in participants");
            let dispatched = console.check_in_selected().await?;
            print!("{}", output::format_fan_out(&dispatched));
        }
        Command::CheckOut { view, selection } => {
            open_view(console, &view, false).await?;
            let count: usize = select(console, &selection).await?;
            info!(count, "Checking out participants");
            let dispatched = console.check_out_selected().await?;
            print!("{}", output::format_fan_out(&dispatched));
        }
        Command::Approve {
            view,
            selection,
            certificate,
        } => {
            open_view(console, &view, true).await?;
            select(console, &selection).await?;
            let dispatched = console.approve_selected(certificate).await?;
            print!("{}", output::format_approve(&dispatched));
        }
        Command::Reject {
            view,
            selection,
            reason,
        } => {
            open_view(console, &view, true).await?;
            select(console, &selection).await?;
            let dispatched = console.reject_selected(&reason).await?;
            print!("{}", output::format_reject(&dispatched));
        }
        Command::Export {
            view,
            selection,
            output,
        } => {
            open_view(console, &view, false).await?;
            select(console, &selection).await?;
            if let Some(path) = output {
                let file: File = File::create(&path)?;
                let rows: usize = console.export_selected_csv(BufWriter::new(file)).await?;
                info!(rows, path = %path.display(), "Wrote export");
            } else {
                console.export_selected_csv(std::io::stdout()).await?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing on stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let timezone: Tz = parse_timezone(&args.timezone)?;
    let gateway: Arc<HttpGateway> = Arc::new(HttpGateway::new(&gateway_config(&args))?);
    let operator: AuthenticatedOperator =
        AuthenticatedOperator::new(String::from("cli"), args.operator_role);
    let capabilities: ConsoleCapabilities = compute_console_capabilities(&operator);
    info!(
        base_url = %gateway.base_url(),
        role = %operator.role,
        timezone = %timezone,
        "Starting campus activity console"
    );

    let console: ActivityConsole<HttpGateway> = ActivityConsole::new(gateway, capabilities, timezone);
    run(&console, args.command).await
}
