// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport-level errors of the HTTP gateway.

use campus_activity_api::GatewayError;
use thiserror::Error;

/// Errors raised while talking HTTP to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL is unusable.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The session token cannot be sent as a header.
    #[error("Invalid session token: {reason}")]
    InvalidToken { reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read or decoded.
    #[error("Response from {url} could not be decoded: {reason}")]
    Decode { url: String, reason: String },

    /// The backend answered with a non-success status.
    #[error("{url} returned status {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },
}

/// Classifies a non-success HTTP status.
///
/// - 401, 403: unauthorized
/// - 404: not found
/// - 400, 409, 422: validation
/// - anything else: server
#[must_use]
pub fn classify_status(status: u16, message: String) -> GatewayError {
    match status {
        401 | 403 => GatewayError::Unauthorized { message },
        404 => GatewayError::NotFound { message },
        400 | 409 | 422 => GatewayError::Validation { message },
        _ => GatewayError::Server { status, message },
    }
}

/// Translates a client error into the gateway taxonomy.
#[must_use]
pub fn translate_client_error(err: ClientError) -> GatewayError {
    match err {
        ClientError::Status {
            status, message, ..
        } => classify_status(status, message),
        other @ (ClientError::InvalidBaseUrl { .. }
        | ClientError::InvalidToken { .. }
        | ClientError::Build(_)
        | ClientError::Request { .. }
        | ClientError::Decode { .. }) => GatewayError::Transport {
            message: other.to_string(),
        },
    }
}

impl From<ClientError> for GatewayError {
    fn from(err: ClientError) -> Self {
        translate_client_error(err)
    }
}
