// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting hierarchy traversal.
//!
//! Staff form a forest through `reports_to`. Every walk here keeps a
//! visited set so that already-corrupted (cyclic) data still terminates.

use crate::types::{EmployeeCode, StaffMember};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Transitive subordinates of a staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubordinateInfo {
    /// Employee codes of every direct and indirect report.
    pub employee_codes: BTreeSet<EmployeeCode>,
    /// Branches those reports are assigned to. Unassigned staff add nothing.
    pub branch_names: BTreeSet<String>,
}

impl SubordinateInfo {
    /// Returns whether the given code is a (transitive) subordinate.
    #[must_use]
    pub fn contains(&self, employee_code: &EmployeeCode) -> bool {
        self.employee_codes.contains(employee_code)
    }

    /// Returns the number of transitive subordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employee_codes.len()
    }

    /// Returns whether there are no subordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employee_codes.is_empty()
    }
}

/// Groups staff by the code of the manager they report to.
fn reports_by_manager(all_staff: &[StaffMember]) -> HashMap<&str, Vec<&StaffMember>> {
    let mut index: HashMap<&str, Vec<&StaffMember>> = HashMap::new();
    for member in all_staff {
        if let Some(manager) = &member.reports_to {
            index.entry(manager.value()).or_default().push(member);
        }
    }
    index
}

/// Computes every transitive subordinate of the staff member with the given code.
///
/// Traversal is breadth-first from `root`. The root itself is never part
/// of the result, even when the data already contains a loop through it.
#[must_use]
pub fn subordinate_info_for_code(root: &EmployeeCode, all_staff: &[StaffMember]) -> SubordinateInfo {
    let index: HashMap<&str, Vec<&StaffMember>> = reports_by_manager(all_staff);
    let mut info: SubordinateInfo = SubordinateInfo::default();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(root.value());
    queue.push_back(root.value());

    while let Some(code) = queue.pop_front() {
        let Some(reports) = index.get(code) else {
            continue;
        };
        for report in reports {
            let report_code: &str = report.employee_code.value();
            if !visited.insert(report_code) {
                continue;
            }
            info.employee_codes.insert(report.employee_code.clone());
            if !report.is_unassigned() {
                info.branch_names.insert(report.branch_name.clone());
            }
            queue.push_back(report_code);
        }
    }

    info
}

/// Computes every transitive subordinate of `staff`.
#[must_use]
pub fn recursive_subordinate_info(staff: &StaffMember, all_staff: &[StaffMember]) -> SubordinateInfo {
    subordinate_info_for_code(&staff.employee_code, all_staff)
}

/// Returns the direct reports of the staff member with the given code,
/// in collection order.
#[must_use]
pub fn direct_subordinates<'a>(
    employee_code: &EmployeeCode,
    all_staff: &'a [StaffMember],
) -> Vec<&'a StaffMember> {
    all_staff
        .iter()
        .filter(|member| member.reports_to.as_ref() == Some(employee_code))
        .collect()
}

/// Returns whether making `employee_code` report to `proposed_manager`
/// would close a loop.
///
/// A loop forms when the proposed manager is the staff member or any of
/// their current transitive subordinates.
#[must_use]
pub fn would_create_cycle(
    employee_code: &EmployeeCode,
    proposed_manager: &EmployeeCode,
    all_staff: &[StaffMember],
) -> bool {
    employee_code == proposed_manager
        || subordinate_info_for_code(employee_code, all_staff).contains(proposed_manager)
}

/// Walks `reports_to` upward from `staff`, returning the chain of managers
/// (nearest first). The walk stops at a missing manager or a revisited code.
#[must_use]
pub fn reporting_chain<'a>(staff: &StaffMember, all_staff: &'a [StaffMember]) -> Vec<&'a StaffMember> {
    let by_code: HashMap<&str, &StaffMember> = all_staff
        .iter()
        .map(|member| (member.employee_code.value(), member))
        .collect();
    let mut chain: Vec<&StaffMember> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(staff.employee_code.value());

    let mut next: Option<&EmployeeCode> = staff.reports_to.as_ref();
    while let Some(code) = next {
        let Some(manager) = by_code.get(code.value()).copied() else {
            break;
        };
        if !visited.insert(manager.employee_code.value()) {
            break;
        }
        chain.push(manager);
        next = manager.reports_to.as_ref();
    }
    chain
}

/// Returns whether following `reports_to` from every staff member terminates.
#[must_use]
pub fn is_acyclic(all_staff: &[StaffMember]) -> bool {
    let by_code: HashMap<&str, &StaffMember> = all_staff
        .iter()
        .map(|member| (member.employee_code.value(), member))
        .collect();

    all_staff.iter().all(|start| {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current: Option<&StaffMember> = Some(start);
        while let Some(member) = current {
            if !seen.insert(member.employee_code.value()) {
                return false;
            }
            current = member
                .reports_to
                .as_ref()
                .and_then(|code| by_code.get(code.value()).copied());
        }
        true
    })
}

/// Returns the staff considered managers of a branch: those on the branch
/// whose designation is branch-manager-like.
#[must_use]
pub fn branch_managers<'a>(branch_name: &str, all_staff: &'a [StaffMember]) -> Vec<&'a StaffMember> {
    all_staff
        .iter()
        .filter(|member| member.branch_name == branch_name && member.function.is_branch_manager_like())
        .collect()
}
