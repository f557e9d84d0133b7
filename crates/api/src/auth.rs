// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use daily_reporting_audit::Actor;
use daily_reporting_domain::{Designation, EmployeeCode, RoleTier, StaffId};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Roles of logged-in users.
///
/// Admin comes only from the system accounts. Every staff-backed login is a
/// manager or a user according to the designation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to every record and every mutation.
    Admin,
    /// Read access scoped to the reporting tree and managed units.
    Manager,
    /// Read access to the user's own record.
    User,
}

impl Role {
    /// The role a staff member logs in with.
    #[must_use]
    pub const fn for_designation(designation: Designation) -> Self {
        match designation.role_tier() {
            RoleTier::Manager => Self::Manager,
            RoleTier::Staff => Self::User,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The login username.
    pub username: String,
    /// The role assigned to this actor.
    pub role: Role,
    /// The backing staff record, when there is one.
    pub staff_id: Option<StaffId>,
    /// The backing staff member's employee code, when there is one.
    pub employee_code: Option<EmployeeCode>,
}

impl AuthenticatedActor {
    /// Creates an actor with no backing staff record.
    #[must_use]
    pub const fn new(username: String, role: Role) -> Self {
        Self {
            username,
            role,
            staff_id: None,
            employee_code: None,
        }
    }

    /// The actor used for fixtures and startup imports.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), Role::Admin)
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the logged-in user.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        if self.username == "system" {
            return Actor::system();
        }
        Actor::new(self.username.clone(), String::from(self.role.as_str()))
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Manager | Role::User => Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may add, edit or delete staff records.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_staff(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_staff")
    }

    /// Checks if an actor may import staff from a spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_import_staff(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "import_staff")
    }

    /// Checks if an actor may change zones, regions, districts or branches.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_organization(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_organization")
    }

    /// Checks if an actor may list login accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_list_users(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "list_users")
    }

    /// Checks if an actor may read the audit trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_view_audit(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "view_audit")
    }
}
