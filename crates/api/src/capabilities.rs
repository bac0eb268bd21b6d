// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for permission-aware gating.
//!
//! The caller authenticates the operator elsewhere and passes the resulting
//! capabilities into the console. Nothing in this crate reads permissions
//! from ambient state. Capabilities do not replace backend authorization:
//! the gateway still enforces its own rules.

use crate::dispatcher::OperationKind;
use crate::error::DispatchError;
use std::str::FromStr;

/// Console operator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorRole {
    /// Full control: moderation, attendance, export.
    Admin,
    /// Runs activities on site: attendance and export, no moderation.
    Organizer,
    /// Read-only access plus export.
    Viewer,
}

impl OperatorRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Organizer => "organizer",
            Self::Viewer => "viewer",
        }
    }
}

impl FromStr for OperatorRole {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "organizer" => Ok(Self::Organizer),
            "viewer" => Ok(Self::Viewer),
            _ => Err(DispatchError::InvalidInput {
                field: String::from("role"),
                message: format!("Unknown operator role '{s}'"),
            }),
        }
    }
}

impl std::fmt::Display for OperatorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An operator whose session was established by the identity boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOperator {
    /// The operator's login or identifier.
    pub id: String,
    /// The operator's role.
    pub role: OperatorRole,
    /// Disabled operators keep their session but may do nothing.
    pub is_disabled: bool,
}

impl AuthenticatedOperator {
    /// Creates an enabled operator.
    #[must_use]
    pub const fn new(id: String, role: OperatorRole) -> Self {
        Self {
            id,
            role,
            is_disabled: false,
        }
    }
}

/// Whether an action is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(matches!(self, Self::Allowed))
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// What an operator may do on the participation screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConsoleCapabilities {
    /// Approve or reject participation pictures.
    pub can_moderate_pictures: Capability,
    /// Check participants in or out.
    pub can_check_in: Capability,
    /// Export selected participants.
    pub can_export: Capability,
}

impl ConsoleCapabilities {
    /// Capabilities with every action allowed.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            can_moderate_pictures: Capability::Allowed,
            can_check_in: Capability::Allowed,
            can_export: Capability::Allowed,
        }
    }

    /// Capabilities with every action denied.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            can_moderate_pictures: Capability::Denied,
            can_check_in: Capability::Denied,
            can_export: Capability::Denied,
        }
    }

    /// Returns the capability governing an operation kind.
    #[must_use]
    pub const fn for_kind(&self, kind: OperationKind) -> Capability {
        match kind {
            OperationKind::Approve | OperationKind::Reject => self.can_moderate_pictures,
            OperationKind::CheckIn | OperationKind::CheckOut => self.can_check_in,
            OperationKind::Export => self.can_export,
        }
    }

    /// Fails with [`DispatchError::Denied`] unless the operation is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the capability for `kind` is denied.
    pub fn require(&self, kind: OperationKind) -> Result<(), DispatchError> {
        if self.for_kind(kind).is_allowed() {
            Ok(())
        } else {
            Err(DispatchError::Denied {
                action: kind.to_string(),
            })
        }
    }
}

/// Computes console capabilities for an authenticated operator.
///
/// Capabilities depend on:
/// - Operator role
/// - Operator disabled state
#[must_use]
pub const fn compute_console_capabilities(operator: &AuthenticatedOperator) -> ConsoleCapabilities {
    // Disabled operators have no capabilities
    if operator.is_disabled {
        return ConsoleCapabilities::none();
    }

    match operator.role {
        OperatorRole::Admin => ConsoleCapabilities::all(),
        OperatorRole::Organizer => ConsoleCapabilities {
            can_moderate_pictures: Capability::Denied,
            can_check_in: Capability::Allowed,
            can_export: Capability::Allowed,
        },
        OperatorRole::Viewer => ConsoleCapabilities {
            can_moderate_pictures: Capability::Denied,
            can_check_in: Capability::Denied,
            can_export: Capability::Allowed,
        },
    }
}
