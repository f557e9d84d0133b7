// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::designation::Designation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel used for unassigned branch and location fields.
pub const UNASSIGNED: &str = "N/A";

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Opaque, stable identifier of a staff record. Assigned once at creation.
    StaffId
);
record_id!(
    /// Opaque identifier of a branch record.
    BranchId
);
record_id!(
    /// Opaque identifier of a zone record.
    ZoneId
);
record_id!(
    /// Opaque identifier of a region record.
    RegionId
);
record_id!(
    /// Opaque identifier of a district record.
    DistrictId
);

/// A staff member's employee code.
///
/// The code is the external identity key: reporting links and login
/// usernames refer to staff by code. Surrounding whitespace is dropped;
/// comparison is otherwise exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeCode {
    value: String,
}

impl EmployeeCode {
    /// Creates a new `EmployeeCode` from raw input.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether the code is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The zone, region and district a branch sits in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub zone: String,
    pub region: String,
    pub district_name: String,
}

impl Location {
    /// Creates a location from its three parts.
    #[must_use]
    pub fn new(zone: &str, region: &str, district_name: &str) -> Self {
        Self {
            zone: zone.to_string(),
            region: region.to_string(),
            district_name: district_name.to_string(),
        }
    }

    /// The location of an unassigned record: every part is `"N/A"`.
    #[must_use]
    pub fn unassigned() -> Self {
        Self::new(UNASSIGNED, UNASSIGNED, UNASSIGNED)
    }

    /// Returns whether every part is the unassigned sentinel.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.zone == UNASSIGNED && self.region == UNASSIGNED && self.district_name == UNASSIGNED
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::unassigned()
    }
}

/// Returns whether a branch name is the unassigned sentinel.
#[must_use]
pub fn is_unassigned_branch(branch_name: &str) -> bool {
    let trimmed: &str = branch_name.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNASSIGNED)
}

/// A staff member.
///
/// `location` is derived from `branch_name` and is never authoritative on
/// its own. `managed_zones` and `managed_branches` are empty unless the
/// designation qualifies for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: StaffId,
    pub employee_code: EmployeeCode,
    pub employee_name: String,
    pub contact_number: String,
    pub function: Designation,
    pub branch_name: String,
    #[serde(flatten)]
    pub location: Location,
    pub managed_zones: BTreeSet<String>,
    pub managed_branches: BTreeSet<String>,
    #[serde(rename = "reportsToEmployeeCode")]
    pub reports_to: Option<EmployeeCode>,
    /// Seeded records backing a system account. Never deleted.
    pub is_system: bool,
}

impl StaffMember {
    /// Returns whether the staff member has no branch.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        is_unassigned_branch(&self.branch_name)
    }

    /// Clears managed units the designation does not qualify for.
    pub fn clear_unqualified_managed_units(&mut self) {
        if !self.function.manages_zones() {
            self.managed_zones.clear();
        }
        if !self.function.manages_branches() {
            self.managed_branches.clear();
        }
    }
}

/// Input for creating a staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffDraft {
    pub employee_code: String,
    pub employee_name: String,
    pub contact_number: String,
    pub function: Designation,
    pub branch_name: String,
    pub managed_zones: BTreeSet<String>,
    pub managed_branches: BTreeSet<String>,
    #[serde(rename = "reportsToEmployeeCode")]
    pub reports_to: Option<String>,
}

/// A partial update to a staff member. `None` leaves a field unchanged.
///
/// `reports_to` is doubly optional: `Some(None)` clears the manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffPatch {
    pub employee_code: Option<String>,
    pub employee_name: Option<String>,
    pub contact_number: Option<String>,
    pub function: Option<Designation>,
    pub branch_name: Option<String>,
    pub managed_zones: Option<BTreeSet<String>>,
    pub managed_branches: Option<BTreeSet<String>>,
    pub reports_to: Option<Option<String>>,
}

impl StaffPatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One spreadsheet row of staff data, already parsed into cells.
///
/// Column names follow the import/export sheet. Location columns are
/// carried for completeness but are re-derived from the branch on import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportedStaffRow {
    #[serde(rename = "Staff Name")]
    pub staff_name: String,
    #[serde(rename = "Employee Code")]
    pub employee_code: String,
    #[serde(rename = "Designation")]
    pub designation: String,
    #[serde(rename = "Branch Name")]
    pub branch_name: String,
    #[serde(rename = "District Name")]
    pub district_name: String,
    #[serde(rename = "Zone")]
    pub zone: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Contact Number")]
    pub contact_number: String,
    #[serde(rename = "Managed Zones")]
    pub managed_zones: Vec<String>,
    #[serde(rename = "Managed Branches")]
    pub managed_branches: Vec<String>,
    #[serde(rename = "Reports To Employee Code")]
    pub reports_to: String,
}

/// A branch.
///
/// The manager summary fields are informational snapshots; the
/// authoritative manager of a branch is derived from staff records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: BranchId,
    pub branch_name: String,
    #[serde(flatten)]
    pub location: Location,
    pub branch_manager_name: String,
    pub branch_manager_code: String,
    pub mobile_number: String,
}

/// Input for creating a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BranchDraft {
    pub branch_name: String,
    pub zone: String,
    pub region: String,
    pub district_name: String,
    pub branch_manager_name: String,
    pub branch_manager_code: String,
    pub mobile_number: String,
}

/// A partial update to a branch. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BranchPatch {
    pub branch_name: Option<String>,
    pub zone: Option<String>,
    pub region: Option<String>,
    pub district_name: Option<String>,
    pub branch_manager_name: Option<String>,
    pub branch_manager_code: Option<String>,
    pub mobile_number: Option<String>,
}

/// A zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
}

/// A region, contained in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub zone_id: ZoneId,
}

/// A district, contained in a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: DistrictId,
    pub name: String,
    pub region_id: RegionId,
}
