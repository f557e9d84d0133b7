// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff designations and their fixed classification.
//!
//! Every designation maps to a role tier, a multi-unit management
//! capability, and whether it counts as the manager of its branch.
//! The table is the single place these facts are decided.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Seniority tier a designation grants once projected to a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleTier {
    /// Supervises other staff and sees their data.
    Manager,
    /// Sees only their own data.
    Staff,
}

/// Which kind of organizational unit a designation may manage directly,
/// on top of its primary branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManagedUnits {
    None,
    Zones,
    Branches,
}

/// The classification row for a single designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Role tier granted by the designation.
    pub role_tier: RoleTier,
    /// Units the designation may own directly.
    pub managed_units: ManagedUnits,
    /// Whether holders of this designation are the managers of their branch.
    pub branch_manager_like: bool,
}

/// A staff designation (the `function` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Designation {
    #[serde(rename = "ZONAL MANAGER")]
    ZonalManager,
    #[serde(rename = "REGIONAL MANAGER")]
    RegionalManager,
    #[serde(rename = "DISTRICT HEAD")]
    DistrictHead,
    #[serde(rename = "ASST. DISTRICT HEAD")]
    AssistantDistrictHead,
    #[serde(rename = "TL-DDS")]
    TeamLead,
    #[serde(rename = "BRANCH MANAGER")]
    BranchManager,
    #[serde(rename = "ASST. BRANCH MANAGER")]
    AssistantBranchManager,
    #[serde(rename = "BRANCH OFFICER")]
    BranchOfficer,
    #[serde(rename = "RELATIONSHIP OFFICER")]
    RelationshipOfficer,
    #[serde(rename = "DDS")]
    Dds,
    #[serde(rename = "ADMINISTRATOR")]
    Administrator,
}

impl Default for Designation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Designation {
    /// Designation assigned to imported rows whose label is unknown.
    pub const DEFAULT: Self = Self::BranchOfficer;

    /// Every designation, in display order.
    pub const ALL: [Self; 11] = [
        Self::ZonalManager,
        Self::RegionalManager,
        Self::DistrictHead,
        Self::AssistantDistrictHead,
        Self::TeamLead,
        Self::BranchManager,
        Self::AssistantBranchManager,
        Self::BranchOfficer,
        Self::RelationshipOfficer,
        Self::Dds,
        Self::Administrator,
    ];

    /// Returns the canonical label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ZonalManager => "ZONAL MANAGER",
            Self::RegionalManager => "REGIONAL MANAGER",
            Self::DistrictHead => "DISTRICT HEAD",
            Self::AssistantDistrictHead => "ASST. DISTRICT HEAD",
            Self::TeamLead => "TL-DDS",
            Self::BranchManager => "BRANCH MANAGER",
            Self::AssistantBranchManager => "ASST. BRANCH MANAGER",
            Self::BranchOfficer => "BRANCH OFFICER",
            Self::RelationshipOfficer => "RELATIONSHIP OFFICER",
            Self::Dds => "DDS",
            Self::Administrator => "ADMINISTRATOR",
        }
    }

    /// Returns the classification row for this designation.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        let (role_tier, managed_units, branch_manager_like) = match self {
            Self::ZonalManager => (RoleTier::Manager, ManagedUnits::Zones, false),
            Self::RegionalManager => (RoleTier::Manager, ManagedUnits::None, false),
            Self::DistrictHead | Self::AssistantDistrictHead | Self::TeamLead => {
                (RoleTier::Manager, ManagedUnits::Branches, false)
            }
            Self::BranchManager | Self::AssistantBranchManager => {
                (RoleTier::Manager, ManagedUnits::None, true)
            }
            Self::BranchOfficer | Self::RelationshipOfficer | Self::Dds | Self::Administrator => {
                (RoleTier::Staff, ManagedUnits::None, false)
            }
        };
        Classification {
            role_tier,
            managed_units,
            branch_manager_like,
        }
    }

    /// Returns the role tier granted by this designation.
    #[must_use]
    pub const fn role_tier(&self) -> RoleTier {
        self.classification().role_tier
    }

    /// Returns whether this designation may carry `managed_zones`.
    #[must_use]
    pub const fn manages_zones(&self) -> bool {
        matches!(self.classification().managed_units, ManagedUnits::Zones)
    }

    /// Returns whether this designation may carry `managed_branches`.
    #[must_use]
    pub const fn manages_branches(&self) -> bool {
        matches!(self.classification().managed_units, ManagedUnits::Branches)
    }

    /// Returns whether holders are considered the manager of their branch.
    #[must_use]
    pub const fn is_branch_manager_like(&self) -> bool {
        self.classification().branch_manager_like
    }

    /// Parses a designation label strictly.
    ///
    /// Matching ignores case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDesignation` for unknown labels.
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        let normalized: String = label.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.label() == normalized)
            .ok_or_else(|| DomainError::InvalidDesignation(label.trim().to_string()))
    }

    /// Parses a designation label leniently, as bulk import does.
    ///
    /// Unknown labels fall back to `Designation::DEFAULT`; the second
    /// element then carries a warning describing the coercion. A blank
    /// label takes the default silently.
    #[must_use]
    pub fn parse_lenient(label: &str) -> (Self, Option<String>) {
        if label.trim().is_empty() {
            return (Self::DEFAULT, None);
        }
        match Self::parse(label) {
            Ok(designation) => (designation, None),
            Err(_) => (
                Self::DEFAULT,
                Some(format!(
                    "unknown designation '{}', defaulted to '{}'",
                    label.trim(),
                    Self::DEFAULT.label()
                )),
            ),
        }
    }
}

impl FromStr for Designation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Designation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
