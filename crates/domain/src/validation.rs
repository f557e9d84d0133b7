// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{
    DomainError, FIELD_BRANCH_NAME, FIELD_CONTACT_NUMBER, FIELD_DISTRICT_NAME,
    FIELD_EMPLOYEE_CODE, FIELD_EMPLOYEE_NAME, FIELD_MANAGED_BRANCHES, FIELD_MANAGED_ZONES,
    FIELD_NAME, FIELD_REGION, FIELD_ZONE, FieldErrors, MasterDataKind,
};
use crate::hierarchy::would_create_cycle;
use crate::location::MasterData;
use crate::types::{
    BranchDraft, BranchId, EmployeeCode, StaffDraft, StaffId, StaffMember, is_unassigned_branch,
};
use std::collections::BTreeSet;

/// Minimum length of an employee code.
pub const MIN_EMPLOYEE_CODE_LEN: usize = 3;

/// Exact number of digits in a contact number.
pub const CONTACT_NUMBER_DIGITS: usize = 10;

/// Records an error if the employee name is empty.
pub fn check_employee_name(name: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.insert(FIELD_EMPLOYEE_NAME, "Staff name is required");
    }
}

/// Records an error if the employee code is empty or too short.
pub fn check_employee_code(code: &str, errors: &mut FieldErrors) {
    let trimmed: &str = code.trim();
    if trimmed.is_empty() {
        errors.insert(FIELD_EMPLOYEE_CODE, "Employee code is required");
    } else if trimmed.chars().count() < MIN_EMPLOYEE_CODE_LEN {
        errors.insert(
            FIELD_EMPLOYEE_CODE,
            format!("Employee code must be at least {MIN_EMPLOYEE_CODE_LEN} characters"),
        );
    }
}

/// Records an error unless the contact number is exactly ten digits.
pub fn check_contact_number(contact_number: &str, errors: &mut FieldErrors) {
    let trimmed: &str = contact_number.trim();
    if trimmed.is_empty() {
        errors.insert(FIELD_CONTACT_NUMBER, "Contact number is required");
    } else if trimmed.len() != CONTACT_NUMBER_DIGITS
        || !trimmed.chars().all(|c| c.is_ascii_digit())
    {
        errors.insert(
            FIELD_CONTACT_NUMBER,
            format!("Contact number must be exactly {CONTACT_NUMBER_DIGITS} digits"),
        );
    }
}

/// Records an error unless the branch is known or explicitly unassigned.
pub fn check_branch_name(branch_name: &str, master: &MasterData, errors: &mut FieldErrors) {
    if is_unassigned_branch(branch_name) {
        return;
    }
    let trimmed: &str = branch_name.trim();
    if master.branch_by_name(trimmed).is_none() {
        errors.insert(
            FIELD_BRANCH_NAME,
            format!("Branch '{trimmed}' does not exist"),
        );
    }
}

/// Records an error for the first managed zone that does not exist.
pub fn check_managed_zones(zones: &BTreeSet<String>, master: &MasterData, errors: &mut FieldErrors) {
    if let Some(unknown) = zones
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .find(|zone| !zone.is_empty() && master.zone_by_name(zone).is_none())
    {
        errors.insert(
            FIELD_MANAGED_ZONES,
            format!("Zone '{unknown}' does not exist"),
        );
    }
}

/// Records an error for the first managed branch that does not exist.
pub fn check_managed_branches(
    branches: &BTreeSet<String>,
    master: &MasterData,
    errors: &mut FieldErrors,
) {
    if let Some(unknown) = branches
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .find(|branch| !branch.is_empty() && master.branch_by_name(branch).is_none())
    {
        errors.insert(
            FIELD_MANAGED_BRANCHES,
            format!("Branch '{unknown}' does not exist"),
        );
    }
}

/// Validates the field-level constraints of a new staff member.
///
/// This does NOT check uniqueness or the reporting line; those need the
/// staff collection.
///
/// # Errors
///
/// Returns `DomainError::Validation` with one message per failing field.
pub fn validate_staff_fields(draft: &StaffDraft, master: &MasterData) -> Result<(), DomainError> {
    let mut errors: FieldErrors = FieldErrors::new();
    check_employee_name(&draft.employee_name, &mut errors);
    check_employee_code(&draft.employee_code, &mut errors);
    check_contact_number(&draft.contact_number, &mut errors);
    check_branch_name(&draft.branch_name, master, &mut errors);
    if draft.function.manages_zones() {
        check_managed_zones(&draft.managed_zones, master, &mut errors);
    }
    if draft.function.manages_branches() {
        check_managed_branches(&draft.managed_branches, master, &mut errors);
    }
    errors.into_result()
}

/// Validates that an employee code is not used by any other staff member.
///
/// # Arguments
///
/// * `employee_code` - The code to check
/// * `existing_staff` - The staff collection
/// * `exclude` - A record to ignore, used when updating that record
///
/// # Errors
///
/// Returns `DomainError::DuplicateEmployeeCode` if another record has the code.
pub fn validate_employee_code_unique(
    employee_code: &EmployeeCode,
    existing_staff: &[StaffMember],
    exclude: Option<StaffId>,
) -> Result<(), DomainError> {
    let taken: bool = existing_staff
        .iter()
        .filter(|member| Some(member.id) != exclude)
        .any(|member| &member.employee_code == employee_code);

    if taken {
        return Err(DomainError::DuplicateEmployeeCode {
            employee_code: employee_code.value().to_string(),
        });
    }
    Ok(())
}

/// Validates a proposed reporting line.
///
/// `all_staff` must already reflect the proposed record (for an insert)
/// or the pre-mutation collection (for an update); in both cases the
/// subordinates of `employee_code` are taken from it.
///
/// # Errors
///
/// Returns an error if:
/// - The staff member would report to themselves
/// - The manager does not exist
/// - The manager is already a transitive subordinate
pub fn validate_reporting_line(
    employee_code: &EmployeeCode,
    reports_to: &EmployeeCode,
    all_staff: &[StaffMember],
) -> Result<(), DomainError> {
    if employee_code == reports_to {
        return Err(DomainError::SelfReporting {
            employee_code: employee_code.value().to_string(),
        });
    }

    if !all_staff
        .iter()
        .any(|member| &member.employee_code == reports_to)
    {
        return Err(DomainError::Validation(FieldErrors::single(
            crate::error::FIELD_REPORTS_TO,
            format!("Reporting manager '{reports_to}' does not exist"),
        )));
    }

    if would_create_cycle(employee_code, reports_to, all_staff) {
        return Err(DomainError::CircularReporting {
            employee_code: employee_code.value().to_string(),
            reports_to: reports_to.value().to_string(),
        });
    }

    Ok(())
}

/// Validates a branch record against master data.
///
/// The name must be non-empty and unique (case-insensitive) among other
/// branches, and zone, region and district must form an existing chain.
///
/// # Errors
///
/// Returns `DomainError::DuplicateBranch` for a name collision, otherwise
/// `DomainError::Validation` with one message per failing field.
pub fn validate_branch(
    draft: &BranchDraft,
    master: &MasterData,
    exclude: Option<BranchId>,
) -> Result<(), DomainError> {
    let mut errors: FieldErrors = FieldErrors::new();
    let name: &str = draft.branch_name.trim();

    if name.is_empty() {
        errors.insert(FIELD_BRANCH_NAME, "Branch name is required");
    } else if is_unassigned_branch(name) {
        errors.insert(FIELD_BRANCH_NAME, "Branch name is reserved");
    }

    let zone = master.zone_by_name(&draft.zone);
    let region = master.region_by_name(&draft.region);
    let district = master.district_by_name(&draft.district_name);

    match zone {
        None => errors.insert(FIELD_ZONE, format!("Zone '{}' does not exist", draft.zone)),
        Some(zone) => {
            if let Some(region) = region.filter(|region| region.zone_id != zone.id) {
                errors.insert(
                    FIELD_REGION,
                    format!("Region '{}' is not in zone '{}'", region.name, zone.name),
                );
            }
        }
    }
    match region {
        None => errors.insert(
            FIELD_REGION,
            format!("Region '{}' does not exist", draft.region),
        ),
        Some(region) => {
            if let Some(district) = district.filter(|district| district.region_id != region.id) {
                errors.insert(
                    FIELD_DISTRICT_NAME,
                    format!(
                        "District '{}' is not in region '{}'",
                        district.name, region.name
                    ),
                );
            }
        }
    }
    if district.is_none() {
        errors.insert(
            FIELD_DISTRICT_NAME,
            format!("District '{}' does not exist", draft.district_name),
        );
    }

    errors.into_result()?;

    let duplicate: bool = master
        .branches
        .iter()
        .filter(|branch| Some(branch.id) != exclude)
        .any(|branch| branch.branch_name.eq_ignore_ascii_case(name));
    if duplicate {
        return Err(DomainError::DuplicateBranch(name.to_string()));
    }

    Ok(())
}

/// Validates the name of a new zone, region or district.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an empty name and
/// `DomainError::DuplicateMasterData` when the name is already taken
/// (case-insensitive) within `existing_names`.
pub fn validate_master_name<'a>(
    kind: MasterDataKind,
    name: &str,
    mut existing_names: impl Iterator<Item = &'a str>,
) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(FieldErrors::single(
            FIELD_NAME,
            format!("{kind} name is required"),
        )));
    }
    if existing_names.any(|existing| existing.eq_ignore_ascii_case(trimmed)) {
        return Err(DomainError::DuplicateMasterData {
            kind,
            name: trimmed.to_string(),
        });
    }
    Ok(())
}
