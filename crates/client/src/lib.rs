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

mod dto;
mod error;
mod http_gateway;

#[cfg(test)]
mod tests;

pub use dto::{
    ActivityDto, BulkApproveRequest, BulkRejectRequest, ParticipantDto, PictureDto, convert_all,
};
pub use error::{ClientError, classify_status, translate_client_error};
pub use http_gateway::{DEFAULT_TIMEOUT, HttpGateway, HttpGatewayConfig};
