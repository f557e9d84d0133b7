// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::import::import_rows;
use crate::master_data::{
    add_branch, add_district, add_region, add_zone, remove_branch, remove_district,
    remove_region, remove_zone, update_branch,
};
use crate::state::{Outcome, State, TransitionResult};
use daily_reporting_audit::{Action, Actor, AuditEvent, Cause};
use daily_reporting_domain::{
    Designation, DomainError, EmployeeCode, FIELD_BRANCH_NAME, FieldErrors, MasterData,
    StaffDraft, StaffId, StaffMember, StaffPatch, UNASSIGNED, check_branch_name,
    check_contact_number, check_employee_code, check_employee_name, check_managed_branches,
    check_managed_zones, is_unassigned_branch, validate_employee_code_unique,
    validate_reporting_line, validate_staff_fields, would_create_cycle,
};
use std::collections::{BTreeSet, HashSet};

/// What a handler changed, plus the detail line for the audit trail.
pub(crate) type Applied = (Outcome, String);

/// Applies a command to the current state, producing a new state and audit event.
///
/// The command runs against a copy of `state`. On success the copy's
/// version is bumped and returned; on failure the copy is dropped and
/// `state` is untouched.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the command violates a domain rule or targets a
/// record that does not exist.
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let name: &'static str = command.name();
    let mut new_state: State = state.clone();

    let (outcome, details): Applied = match command {
        Command::SeedSystemStaff { draft } => seed_system_staff(&mut new_state, &draft),
        Command::AddStaff { draft } => add_staff(&mut new_state, &draft)?,
        Command::UpdateStaff { id, patch } => update_staff(&mut new_state, id, patch)?,
        Command::RemoveStaff { id } => remove_staff(&mut new_state, id)?,
        Command::RemoveStaffMultiple { ids } => remove_staff_multiple(&mut new_state, &ids),
        Command::RemoveAllStaff { except } => remove_all_staff(&mut new_state, except),
        Command::BulkImportStaff { rows } => {
            let summary = import_rows(&mut new_state, rows);
            let details: String = format!(
                "Imported {} staff member(s), skipped {}",
                summary.added, summary.skipped
            );
            (Outcome::Imported(summary), details)
        }
        Command::ReassignStaffBranches { assignments } => {
            reassign_staff_branches(&mut new_state, &assignments)?
        }
        Command::BulkUpdateDesignation { ids, designation } => {
            bulk_update_designation(&mut new_state, &ids, designation)?
        }
        Command::AddZone { name } => add_zone(&mut new_state, &name)?,
        Command::AddRegion { name, zone_name } => add_region(&mut new_state, &name, &zone_name)?,
        Command::AddDistrict { name, region_name } => {
            add_district(&mut new_state, &name, &region_name)?
        }
        Command::AddBranch { draft } => add_branch(&mut new_state, &draft)?,
        Command::UpdateBranch { id, patch } => update_branch(&mut new_state, id, patch)?,
        Command::RemoveZone { id } => remove_zone(&mut new_state, id)?,
        Command::RemoveRegion { id } => remove_region(&mut new_state, id)?,
        Command::RemoveDistrict { id } => remove_district(&mut new_state, id)?,
        Command::RemoveBranch { id } => remove_branch(&mut new_state, id)?,
    };

    new_state.version += 1;

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from(name), Some(details)),
        state.to_snapshot(),
        new_state.to_snapshot(),
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
        outcome,
    })
}

/// Maps blank and `"N/A"` branch input to the sentinel, otherwise trims.
pub(crate) fn normalize_branch_name(branch_name: &str) -> String {
    if is_unassigned_branch(branch_name) {
        String::from(UNASSIGNED)
    } else {
        branch_name.trim().to_string()
    }
}

/// Maps blank manager input to no manager.
fn normalize_reports_to(reports_to: Option<&str>) -> Option<EmployeeCode> {
    reports_to
        .map(EmployeeCode::new)
        .filter(|code| !code.is_empty())
}

pub(crate) fn normalize_names(names: &BTreeSet<String>) -> BTreeSet<String> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Builds a staff record from a draft, deriving its location.
fn build_staff(id: StaffId, draft: &StaffDraft, master: &MasterData, is_system: bool) -> StaffMember {
    let branch_name: String = normalize_branch_name(&draft.branch_name);
    let mut member: StaffMember = StaffMember {
        id,
        employee_code: EmployeeCode::new(&draft.employee_code),
        employee_name: draft.employee_name.trim().to_string(),
        contact_number: draft.contact_number.trim().to_string(),
        function: draft.function,
        location: master.location_for_branch(&branch_name),
        branch_name,
        managed_zones: normalize_names(&draft.managed_zones),
        managed_branches: normalize_names(&draft.managed_branches),
        reports_to: normalize_reports_to(draft.reports_to.as_deref()),
        is_system,
    };
    member.clear_unqualified_managed_units();
    member
}

/// Re-derives the location from the branch and drops unqualified managed units.
fn refresh_derived_fields(member: &mut StaffMember, master: &MasterData) {
    member.location = master.location_for_branch(&member.branch_name);
    member.clear_unqualified_managed_units();
}

fn seed_system_staff(state: &mut State, draft: &StaffDraft) -> Applied {
    let employee_code: EmployeeCode = EmployeeCode::new(&draft.employee_code);

    if let Some(existing) = state
        .staff
        .iter_mut()
        .find(|member| member.employee_code == employee_code)
    {
        existing.is_system = true;
        return (
            Outcome::Staff(existing.clone()),
            format!("Marked staff member '{employee_code}' as a system record"),
        );
    }

    let id: StaffId = state.next_staff_id();
    let mut member: StaffMember = build_staff(id, draft, &state.master, true);
    // Fixtures sit at the top of the hierarchy.
    member.reports_to = None;
    state.staff.push(member.clone());
    (
        Outcome::Staff(member),
        format!("Seeded system staff member '{employee_code}'"),
    )
}

fn add_staff(state: &mut State, draft: &StaffDraft) -> Result<Applied, DomainError> {
    validate_staff_fields(draft, &state.master)?;

    let employee_code: EmployeeCode = EmployeeCode::new(&draft.employee_code);
    validate_employee_code_unique(&employee_code, &state.staff, None)?;

    let id: StaffId = state.next_staff_id();
    let member: StaffMember = build_staff(id, draft, &state.master, false);

    if let Some(manager) = &member.reports_to {
        // Checked against the collection as it would be after the insert.
        let mut proposed: Vec<StaffMember> = state.staff.clone();
        proposed.push(member.clone());
        validate_reporting_line(&member.employee_code, manager, &proposed)?;
    }

    state.staff.push(member.clone());
    Ok((
        Outcome::Staff(member),
        format!("Added staff member '{employee_code}'"),
    ))
}

/// Validates the fields a patch sets. Absent fields are not re-checked.
fn validate_patch_fields(
    patch: &StaffPatch,
    function: Designation,
    master: &MasterData,
) -> Result<(), DomainError> {
    let mut errors: FieldErrors = FieldErrors::new();
    if let Some(name) = &patch.employee_name {
        check_employee_name(name, &mut errors);
    }
    if let Some(code) = &patch.employee_code {
        check_employee_code(code, &mut errors);
    }
    if let Some(contact_number) = &patch.contact_number {
        check_contact_number(contact_number, &mut errors);
    }
    if let Some(branch_name) = &patch.branch_name {
        check_branch_name(branch_name, master, &mut errors);
    }
    if let Some(zones) = patch.managed_zones.as_ref().filter(|_| function.manages_zones()) {
        check_managed_zones(zones, master, &mut errors);
    }
    if let Some(branches) = patch
        .managed_branches
        .as_ref()
        .filter(|_| function.manages_branches())
    {
        check_managed_branches(branches, master, &mut errors);
    }
    errors.into_result()
}

fn update_staff(state: &mut State, id: StaffId, patch: StaffPatch) -> Result<Applied, DomainError> {
    let index: usize = state.staff_index(id).ok_or(DomainError::StaffNotFound(id))?;
    let current: StaffMember = state.staff[index].clone();
    let function: Designation = patch.function.unwrap_or(current.function);

    validate_patch_fields(&patch, function, &state.master)?;

    let new_code: EmployeeCode = patch
        .employee_code
        .as_deref()
        .map_or_else(|| current.employee_code.clone(), EmployeeCode::new);
    let renamed: bool = new_code != current.employee_code;
    if renamed {
        if current.is_system {
            return Err(DomainError::SystemRecordProtected {
                employee_code: current.employee_code.value().to_string(),
            });
        }
        validate_employee_code_unique(&new_code, &state.staff, Some(id))?;
    }

    let reports_to: Option<EmployeeCode> = match &patch.reports_to {
        Some(value) => normalize_reports_to(value.as_deref()),
        None => current.reports_to.clone(),
    };
    let manager_changed: bool = reports_to != current.reports_to;

    let mut updated: StaffMember = current.clone();
    if let Some(name) = patch.employee_name {
        updated.employee_name = name.trim().to_string();
    }
    if let Some(contact_number) = patch.contact_number {
        updated.contact_number = contact_number.trim().to_string();
    }
    if let Some(branch_name) = patch.branch_name {
        updated.branch_name = normalize_branch_name(&branch_name);
    }
    if let Some(zones) = patch.managed_zones {
        updated.managed_zones = normalize_names(&zones);
    }
    if let Some(branches) = patch.managed_branches {
        updated.managed_branches = normalize_names(&branches);
    }
    updated.employee_code = new_code.clone();
    updated.function = function;
    updated.reports_to = reports_to;
    refresh_derived_fields(&mut updated, &state.master);

    let mut proposed: Vec<StaffMember> = state.staff.clone();
    proposed[index] = updated.clone();
    if renamed {
        for member in &mut proposed {
            if member.reports_to.as_ref() == Some(&current.employee_code) {
                member.reports_to = Some(new_code.clone());
            }
        }
    }

    // A rename can pick up dangling reports, so an unchanged manager is
    // re-checked too. Only a newly chosen manager has to exist.
    if let Some(manager) = updated
        .reports_to
        .as_ref()
        .filter(|_| manager_changed || renamed)
    {
        if manager_changed {
            validate_reporting_line(&new_code, manager, &proposed)?;
        } else if manager == &new_code {
            return Err(DomainError::SelfReporting {
                employee_code: new_code.value().to_string(),
            });
        } else if would_create_cycle(&new_code, manager, &proposed) {
            return Err(DomainError::CircularReporting {
                employee_code: new_code.value().to_string(),
                reports_to: manager.value().to_string(),
            });
        }
    }

    state.staff = proposed;

    Ok((
        Outcome::Staff(updated),
        format!("Updated staff member '{new_code}'"),
    ))
}

fn remove_staff(state: &mut State, id: StaffId) -> Result<Applied, DomainError> {
    let index: usize = state.staff_index(id).ok_or(DomainError::StaffNotFound(id))?;
    if state.staff[index].is_system {
        return Err(DomainError::SystemRecordProtected {
            employee_code: state.staff[index].employee_code.value().to_string(),
        });
    }
    let removed: StaffMember = state.staff.remove(index);
    Ok((
        Outcome::Removed(1),
        format!("Removed staff member '{}'", removed.employee_code),
    ))
}

fn remove_staff_multiple(state: &mut State, ids: &[StaffId]) -> Applied {
    let targets: HashSet<StaffId> = ids.iter().copied().collect();
    let before: usize = state.staff.len();
    state
        .staff
        .retain(|member| member.is_system || !targets.contains(&member.id));
    let removed: usize = before - state.staff.len();
    (
        Outcome::Removed(removed),
        format!("Removed {removed} of {} requested staff member(s)", targets.len()),
    )
}

fn remove_all_staff(state: &mut State, except: Option<StaffId>) -> Applied {
    let before: usize = state.staff.len();
    state
        .staff
        .retain(|member| member.is_system || Some(member.id) == except);
    let removed: usize = before - state.staff.len();
    (
        Outcome::Removed(removed),
        format!("Removed all {removed} non-system staff member(s)"),
    )
}

fn reassign_staff_branches(
    state: &mut State,
    assignments: &[(StaffId, String)],
) -> Result<Applied, DomainError> {
    let mut changed: Vec<StaffMember> = Vec::with_capacity(assignments.len());

    for (id, branch_name) in assignments {
        let index: usize = state.staff_index(*id).ok_or(DomainError::StaffNotFound(*id))?;
        let target: String = branch_name.trim().to_string();
        if state.master.branch_by_name(&target).is_none() {
            return Err(DomainError::Validation(FieldErrors::single(
                FIELD_BRANCH_NAME,
                format!("Branch '{target}' does not exist"),
            )));
        }

        let master: &MasterData = &state.master;
        let member: &mut StaffMember = &mut state.staff[index];
        member.branch_name = target;
        refresh_derived_fields(member, master);
        changed.push(member.clone());
    }

    let details: String = format!("Reassigned {} staff member(s)", changed.len());
    Ok((Outcome::StaffList(changed), details))
}

fn bulk_update_designation(
    state: &mut State,
    ids: &[StaffId],
    designation: Designation,
) -> Result<Applied, DomainError> {
    let mut changed: Vec<StaffMember> = Vec::with_capacity(ids.len());

    for id in ids {
        let index: usize = state.staff_index(*id).ok_or(DomainError::StaffNotFound(*id))?;
        let member: &mut StaffMember = &mut state.staff[index];
        member.function = designation;
        member.clear_unqualified_managed_units();
        changed.push(member.clone());
    }

    let details: String = format!(
        "Set designation '{designation}' on {} staff member(s)",
        changed.len()
    );
    Ok((Outcome::StaffList(changed), details))
}
