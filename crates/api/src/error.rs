// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the gateway boundary and the bulk operation layer.

use crate::dispatcher::OperationKind;
use campus_activity_domain::DomainError;

/// Failures reported by the activity gateway, classified by status class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced a usable response (network, timeout,
    /// undecodable body).
    Transport {
        /// A description of the failure.
        message: String,
    },
    /// The session is not authenticated or not authorized.
    Unauthorized {
        /// The message reported by the backend.
        message: String,
    },
    /// The addressed resource does not exist.
    NotFound {
        /// The message reported by the backend.
        message: String,
    },
    /// The backend refused the request as invalid.
    Validation {
        /// The message reported by the backend.
        message: String,
    },
    /// The backend failed while handling the request.
    Server {
        /// The HTTP status code.
        status: u16,
        /// The message reported by the backend.
        message: String,
    },
}

impl GatewayError {
    /// Short name of the status class, used in logs and translated errors.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation",
            Self::Server { .. } => "server",
        }
    }

    /// Returns true for authentication/authorization failures.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "Gateway unreachable: {message}"),
            Self::Unauthorized { message } => write!(f, "Gateway refused session: {message}"),
            Self::NotFound { message } => write!(f, "Not found: {message}"),
            Self::Validation { message } => write!(f, "Rejected as invalid: {message}"),
            Self::Server { status, message } => {
                write!(f, "Gateway error (status {status}): {message}")
            }
        }
    }
}

impl std::error::Error for GatewayError {}

/// Errors surfaced by the dispatcher and the console.
///
/// A mix of successful and failed items is not an error; it is reported
/// through the normal result types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A precondition on the caller's input was violated. Nothing was sent.
    InvalidInput {
        /// The input that was invalid.
        field: String,
        /// A human-readable description of the problem.
        message: String,
    },
    /// The operator's capabilities do not allow this operation.
    Denied {
        /// The operation that was attempted.
        action: String,
    },
    /// An operation of the same kind is already in flight.
    AlreadyInFlight {
        /// The operation kind.
        kind: OperationKind,
    },
    /// The gateway could not be reached. No partial result exists.
    Transport {
        /// A description of the failure.
        message: String,
    },
    /// The gateway rejected the session; the caller should re-authenticate.
    Unauthorized {
        /// The message reported by the gateway.
        message: String,
    },
    /// The gateway refused a request that was delivered.
    Rejected {
        /// The status class of the refusal.
        class: String,
        /// The message reported by the gateway.
        message: String,
    },
    /// The gateway returned data that violates a domain invariant.
    InvalidData {
        /// A description of the violation.
        message: String,
    },
    /// Writing an export failed.
    Export {
        /// A description of the failure.
        message: String,
    },
}

impl DispatchError {
    /// Returns true if the error aborted the whole operation at the
    /// transport or session level.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Unauthorized { .. })
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            Self::Denied { action } => write!(f, "Not permitted: {action}"),
            Self::AlreadyInFlight { kind } => {
                write!(f, "A {kind} operation is already in progress")
            }
            Self::Transport { message } => write!(f, "Gateway unreachable: {message}"),
            Self::Unauthorized { message } => {
                write!(f, "Authentication required: {message}")
            }
            Self::Rejected { class, message } => {
                write!(f, "Gateway rejected the request ({class}): {message}")
            }
            Self::InvalidData { message } => write!(f, "Invalid gateway data: {message}"),
            Self::Export { message } => write!(f, "Export failed: {message}"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Translates a gateway error into a dispatch error.
///
/// Transport and session failures keep their identity so callers can tell
/// a fatal outcome from a refused request.
#[must_use]
pub fn translate_gateway_error(err: GatewayError) -> DispatchError {
    let class: &'static str = err.class();
    match err {
        GatewayError::Transport { message } => DispatchError::Transport { message },
        GatewayError::Unauthorized { message } => DispatchError::Unauthorized { message },
        GatewayError::NotFound { message } | GatewayError::Validation { message } => {
            DispatchError::Rejected {
                class: class.to_string(),
                message,
            }
        }
        GatewayError::Server { status, message } => DispatchError::Rejected {
            class: format!("{class}:{status}"),
            message,
        },
    }
}

/// Translates a domain validation failure on gateway data.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> DispatchError {
    DispatchError::InvalidData {
        message: err.to_string(),
    }
}
