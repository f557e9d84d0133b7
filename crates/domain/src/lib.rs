// Copyright (C) 2026 the Daily Reporting contributors
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

mod designation;
mod error;
mod hierarchy;
mod location;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use designation::{Classification, Designation, ManagedUnits, RoleTier};
pub use error::{
    DomainError, FIELD_BRANCH_NAME, FIELD_CONTACT_NUMBER, FIELD_DISTRICT_NAME,
    FIELD_EMPLOYEE_CODE, FIELD_EMPLOYEE_NAME, FIELD_FUNCTION, FIELD_MANAGED_BRANCHES,
    FIELD_MANAGED_ZONES, FIELD_NAME, FIELD_REGION, FIELD_REPORTS_TO, FIELD_ZONE, FieldErrors,
    MasterDataKind,
};
pub use hierarchy::{
    SubordinateInfo, branch_managers, direct_subordinates, is_acyclic,
    recursive_subordinate_info, reporting_chain, subordinate_info_for_code, would_create_cycle,
};
pub use location::MasterData;
pub use types::{
    Branch, BranchDraft, BranchId, BranchPatch, District, DistrictId, EmployeeCode,
    ImportedStaffRow, Location, Region, RegionId, StaffDraft, StaffId, StaffMember, StaffPatch,
    UNASSIGNED, Zone, ZoneId, is_unassigned_branch,
};
pub use validation::{
    CONTACT_NUMBER_DIGITS, MIN_EMPLOYEE_CODE_LEN, check_branch_name, check_contact_number,
    check_employee_code, check_employee_name, check_managed_branches, check_managed_zones,
    validate_branch, validate_employee_code_unique, validate_master_name,
    validate_reporting_line, validate_staff_fields,
};
