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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod capabilities;
mod console;
mod csv_export;
mod dispatcher;
mod error;
mod gateway;
mod view;

#[cfg(test)]
mod tests;

pub use capabilities::{
    AuthenticatedOperator, Capability, ConsoleCapabilities, OperatorRole,
    compute_console_capabilities,
};
pub use console::{ActivityConsole, Dispatched, PictureLoadReport};
pub use csv_export::write_csv;
pub use dispatcher::{
    BulkDispatcher, FanOutResult, InFlightState, ItemOutcome, OperationKind, OperationOutcome,
    OperationPhase,
};
pub use error::{DispatchError, GatewayError, translate_domain_error, translate_gateway_error};
pub use gateway::{ActivityGateway, BulkApproveResult, BulkRejectResult, IssuedCertificate};
pub use view::{ParticipantView, ViewTicket};
