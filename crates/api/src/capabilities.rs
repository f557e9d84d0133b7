// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities are advisory only and do not replace the checks in
//! `AuthorizationService`.

use daily_reporting_domain::StaffMember;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthenticatedActor, Role};

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
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

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(value))
    }
}

/// What a logged-in user may do in general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCapabilities {
    pub can_manage_staff: Capability,
    pub can_manage_organization: Capability,
    pub can_import_staff: Capability,
    pub can_view_users: Capability,
    pub can_view_audit: Capability,
}

/// What a logged-in user may do to one staff record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCapabilities {
    pub can_edit: Capability,
    pub can_delete: Capability,
}

/// Computes global capabilities for an actor.
#[must_use]
pub const fn compute_global_capabilities(actor: &AuthenticatedActor) -> GlobalCapabilities {
    let admin: Capability = Capability::from_bool(matches!(actor.role, Role::Admin));
    GlobalCapabilities {
        can_manage_staff: admin,
        can_manage_organization: admin,
        can_import_staff: admin,
        can_view_users: admin,
        can_view_audit: admin,
    }
}

/// Computes capabilities of an actor on a staff record.
///
/// Only admins edit or delete, and system records are never deleted.
#[must_use]
pub const fn compute_staff_capabilities(
    actor: &AuthenticatedActor,
    target: &StaffMember,
) -> StaffCapabilities {
    let admin: bool = matches!(actor.role, Role::Admin);
    StaffCapabilities {
        can_edit: Capability::from_bool(admin),
        can_delete: Capability::from_bool(admin && !target.is_system),
    }
}
