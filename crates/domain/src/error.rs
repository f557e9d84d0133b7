// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Branch, BranchId, DistrictId, RegionId, StaffId, StaffMember, ZoneId};
use std::collections::BTreeMap;

/// Field name used for the staff member's display name.
pub const FIELD_EMPLOYEE_NAME: &str = "employeeName";
/// Field name used for the staff member's employee code.
pub const FIELD_EMPLOYEE_CODE: &str = "employeeCode";
/// Field name used for the staff member's contact number.
pub const FIELD_CONTACT_NUMBER: &str = "contactNumber";
/// Field name used for the branch a staff member or branch record refers to.
pub const FIELD_BRANCH_NAME: &str = "branchName";
/// Field name used for the staff member's designation.
pub const FIELD_FUNCTION: &str = "function";
/// Field name used for the reporting manager reference.
pub const FIELD_REPORTS_TO: &str = "reportsToEmployeeCode";
/// Field name used for the managed zone set.
pub const FIELD_MANAGED_ZONES: &str = "managedZones";
/// Field name used for the managed branch set.
pub const FIELD_MANAGED_BRANCHES: &str = "managedBranches";
/// Field name used for zone references.
pub const FIELD_ZONE: &str = "zone";
/// Field name used for region references.
pub const FIELD_REGION: &str = "region";
/// Field name used for district references.
pub const FIELD_DISTRICT_NAME: &str = "districtName";
/// Field name used for master data names (zones, regions, districts).
pub const FIELD_NAME: &str = "name";

/// An ordered map of field name to human-readable message.
///
/// This is the shape rendered next to each form field by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Creates an empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Creates a map holding a single field error.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors: Self = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Records a message for a field. The first message recorded for a field wins.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Returns the message recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a message was recorded for the field.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Returns whether no field errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Converts the map into a `Result`, failing with `DomainError::Validation`
    /// when any field error was recorded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the map is not empty.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }

    /// Consumes the map, returning the underlying ordered map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Kind of master data record referenced by `DomainError::MasterDataInUse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterDataKind {
    Zone,
    Region,
    District,
}

impl std::fmt::Display for MasterDataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zone => write!(f, "Zone"),
            Self::Region => write!(f, "Region"),
            Self::District => write!(f, "District"),
        }
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more fields failed validation.
    Validation(FieldErrors),
    /// The employee code is already used by another staff member.
    DuplicateEmployeeCode {
        /// The colliding employee code.
        employee_code: String,
    },
    /// A staff member may not report to themselves.
    SelfReporting {
        /// The staff member's employee code.
        employee_code: String,
    },
    /// The proposed reporting line would close a loop in the hierarchy.
    CircularReporting {
        /// The staff member whose manager was being changed.
        employee_code: String,
        /// The proposed manager, who is already a subordinate.
        reports_to: String,
    },
    /// The designation label is not one of the known designations.
    InvalidDesignation(String),
    /// No staff member has the given id.
    StaffNotFound(StaffId),
    /// No branch has the given id.
    BranchNotFound(BranchId),
    /// No zone has the given id.
    ZoneNotFound(ZoneId),
    /// No region has the given id.
    RegionNotFound(RegionId),
    /// No district has the given id.
    DistrictNotFound(DistrictId),
    /// A branch with this name already exists.
    DuplicateBranch(String),
    /// A master data record with this name already exists.
    DuplicateMasterData {
        /// The kind of record.
        kind: MasterDataKind,
        /// The duplicate name.
        name: String,
    },
    /// The branch cannot be removed while staff are still assigned to it.
    BranchInUse {
        /// The branch that was targeted.
        branch: Box<Branch>,
        /// Every staff member whose `branch_name` references the branch.
        staff: Vec<StaffMember>,
    },
    /// A zone, region, or district is still referenced and cannot be removed.
    MasterDataInUse {
        /// The kind of record.
        kind: MasterDataKind,
        /// The record's name.
        name: String,
        /// What still references the record.
        reason: String,
    },
    /// Seeded system records cannot be removed or re-keyed.
    SystemRecordProtected {
        /// The employee code of the protected record.
        employee_code: String,
    },
}

impl DomainError {
    /// Returns the field-level rendering of validation-family errors.
    ///
    /// `Validation`, `DuplicateEmployeeCode`, `SelfReporting` and
    /// `CircularReporting` are all recoverable by re-prompting the user
    /// with the returned map. Other kinds return `None`.
    #[must_use]
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::DuplicateEmployeeCode { .. } => {
                Some(FieldErrors::single(FIELD_EMPLOYEE_CODE, self.to_string()))
            }
            Self::SelfReporting { .. } | Self::CircularReporting { .. } => {
                Some(FieldErrors::single(FIELD_REPORTS_TO, self.to_string()))
            }
            Self::InvalidDesignation(_) => {
                Some(FieldErrors::single(FIELD_FUNCTION, self.to_string()))
            }
            Self::DuplicateBranch(_) => {
                Some(FieldErrors::single(FIELD_BRANCH_NAME, self.to_string()))
            }
            Self::DuplicateMasterData { .. } => {
                Some(FieldErrors::single(FIELD_NAME, self.to_string()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                let rendered: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect();
                write!(f, "Validation failed: {}", rendered.join("; "))
            }
            Self::DuplicateEmployeeCode { employee_code } => {
                write!(f, "Employee code '{employee_code}' already exists")
            }
            Self::SelfReporting { employee_code } => {
                write!(f, "Staff member '{employee_code}' cannot report to themselves")
            }
            Self::CircularReporting {
                employee_code,
                reports_to,
            } => {
                write!(
                    f,
                    "Circular reporting: '{reports_to}' already reports (directly or indirectly) to '{employee_code}'"
                )
            }
            Self::InvalidDesignation(label) => write!(f, "Unknown designation '{label}'"),
            Self::StaffNotFound(id) => write!(f, "Staff member {id} not found"),
            Self::BranchNotFound(id) => write!(f, "Branch {id} not found"),
            Self::ZoneNotFound(id) => write!(f, "Zone {id} not found"),
            Self::RegionNotFound(id) => write!(f, "Region {id} not found"),
            Self::DistrictNotFound(id) => write!(f, "District {id} not found"),
            Self::DuplicateBranch(name) => write!(f, "Branch '{name}' already exists"),
            Self::DuplicateMasterData { kind, name } => {
                write!(f, "{kind} '{name}' already exists")
            }
            Self::BranchInUse { branch, staff } => {
                write!(
                    f,
                    "Branch '{}' cannot be deleted: {} staff member(s) are still assigned to it",
                    branch.branch_name,
                    staff.len()
                )
            }
            Self::MasterDataInUse { kind, name, reason } => {
                write!(f, "{kind} '{name}' cannot be deleted: {reason}")
            }
            Self::SystemRecordProtected { employee_code } => {
                write!(
                    f,
                    "Staff member '{employee_code}' backs a system account and is protected"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
