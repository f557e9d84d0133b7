// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lenient bulk import of spreadsheet rows.
//!
//! Only missing name/code and duplicate codes drop a row. Every other
//! data-quality problem is corrected in place and reported as a warning.

use crate::apply::normalize_branch_name;
use crate::state::{BulkImportSummary, State};
use daily_reporting_domain::{
    Designation, EmployeeCode, ImportedStaffRow, MasterData, StaffId, StaffMember, UNASSIGNED,
    is_unassigned_branch, would_create_cycle,
};
use std::collections::BTreeSet;

/// A reporting line to resolve once every row has been inserted.
struct PendingManager {
    row: usize,
    id: StaffId,
    manager: EmployeeCode,
}

fn known_names(
    names: &[String],
    exists: impl Fn(&str) -> bool,
    label: &str,
    row: usize,
    warnings: &mut Vec<String>,
) -> BTreeSet<String> {
    let mut kept: BTreeSet<String> = BTreeSet::new();
    for name in names.iter().map(|name| name.trim()).filter(|name| !name.is_empty()) {
        if exists(name) {
            kept.insert(name.to_string());
        } else {
            warnings.push(format!("Row {row}: unknown {label} '{name}' ignored"));
        }
    }
    kept
}

fn import_branch_name(
    raw: &str,
    master: &MasterData,
    row: usize,
    warnings: &mut Vec<String>,
) -> String {
    if is_unassigned_branch(raw) {
        return String::from(UNASSIGNED);
    }
    let branch_name: String = normalize_branch_name(raw);
    if master.branch_by_name(&branch_name).is_some() {
        branch_name
    } else {
        warnings.push(format!(
            "Row {row}: unknown branch '{branch_name}', set to '{UNASSIGNED}'"
        ));
        String::from(UNASSIGNED)
    }
}

/// Inserts rows in order and returns what happened.
///
/// Reporting lines are resolved after all rows are in, so a row may name a
/// manager that appears further down the sheet. Lines that would report to
/// self or close a loop are dropped with a warning.
pub(crate) fn import_rows(state: &mut State, rows: Vec<ImportedStaffRow>) -> BulkImportSummary {
    let mut summary: BulkImportSummary = BulkImportSummary::default();
    let mut pending: Vec<PendingManager> = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row_number: usize = index + 1;
        let employee_name: &str = row.staff_name.trim();
        let employee_code: EmployeeCode = EmployeeCode::new(&row.employee_code);

        if employee_name.is_empty() || employee_code.is_empty() {
            summary.skipped += 1;
            summary.warnings.push(format!(
                "Row {row_number}: missing staff name or employee code, skipped"
            ));
            continue;
        }
        if state.staff_by_code(&employee_code).is_some() {
            summary.skipped += 1;
            summary.warnings.push(format!(
                "Row {row_number}: employee code '{employee_code}' already exists, skipped"
            ));
            continue;
        }

        let (function, designation_warning): (Designation, Option<String>) =
            Designation::parse_lenient(&row.designation);
        if let Some(warning) = designation_warning {
            summary.warnings.push(format!("Row {row_number}: {warning}"));
        }

        let master: &MasterData = &state.master;
        let branch_name: String =
            import_branch_name(&row.branch_name, master, row_number, &mut summary.warnings);
        let managed_zones: BTreeSet<String> = if function.manages_zones() {
            known_names(
                &row.managed_zones,
                |name| master.zone_by_name(name).is_some(),
                "zone",
                row_number,
                &mut summary.warnings,
            )
        } else {
            BTreeSet::new()
        };
        let managed_branches: BTreeSet<String> = if function.manages_branches() {
            known_names(
                &row.managed_branches,
                |name| master.branch_by_name(name).is_some(),
                "branch",
                row_number,
                &mut summary.warnings,
            )
        } else {
            BTreeSet::new()
        };

        let member: StaffMember = StaffMember {
            id: state.next_staff_id(),
            employee_code,
            employee_name: employee_name.to_string(),
            contact_number: row.contact_number.trim().to_string(),
            function,
            location: state.master.location_for_branch(&branch_name),
            branch_name,
            managed_zones,
            managed_branches,
            reports_to: None,
            is_system: false,
        };

        let manager: EmployeeCode = EmployeeCode::new(&row.reports_to);
        if !manager.is_empty() {
            pending.push(PendingManager {
                row: row_number,
                id: member.id,
                manager,
            });
        }

        state.staff.push(member);
        summary.added += 1;
    }

    for line in pending {
        let Some(index) = state.staff_index(line.id) else {
            continue;
        };
        let employee_code: EmployeeCode = state.staff[index].employee_code.clone();
        let row: usize = line.row;

        if line.manager == employee_code {
            summary.warnings.push(format!(
                "Row {row}: '{employee_code}' cannot report to themselves, reporting line dropped"
            ));
            continue;
        }
        if would_create_cycle(&employee_code, &line.manager, &state.staff) {
            summary.warnings.push(format!(
                "Row {row}: reporting to '{}' would create a cycle, reporting line dropped",
                line.manager
            ));
            continue;
        }
        if state.staff_by_code(&line.manager).is_none() {
            summary.warnings.push(format!(
                "Row {row}: reporting manager '{}' not found",
                line.manager
            ));
        }
        state.staff[index].reports_to = Some(line.manager);
    }

    summary
}
