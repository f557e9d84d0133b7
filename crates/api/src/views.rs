// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side views. Computed on every read and never stored.

use daily_reporting_domain::{
    Designation, EmployeeCode, StaffId, StaffMember, UNASSIGNED, direct_subordinates,
    recursive_subordinate_info,
};
use serde::Serialize;

use crate::auth::AuthenticatedActor;
use crate::capabilities::{StaffCapabilities, compute_staff_capabilities};

/// Shown when a reporting manager code names no existing record.
pub const UNKNOWN_MANAGER: &str = "Unknown";

/// A direct report, as listed on its manager's view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubordinateSummary {
    pub id: StaffId,
    pub employee_code: EmployeeCode,
    pub employee_name: String,
    pub function: Designation,
    pub branch_name: String,
}

impl From<&StaffMember> for SubordinateSummary {
    fn from(member: &StaffMember) -> Self {
        Self {
            id: member.id,
            employee_code: member.employee_code.clone(),
            employee_name: member.employee_name.clone(),
            function: member.function,
            branch_name: member.branch_name.clone(),
        }
    }
}

/// A staff record with its derived reporting data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffView {
    #[serde(flatten)]
    pub staff: StaffMember,
    /// The manager's name, `"N/A"` when unset, `"Unknown"` when dangling.
    pub reports_to_name: String,
    /// Direct reports only.
    pub subordinates: Vec<SubordinateSummary>,
    /// Direct and indirect reports.
    pub subordinate_count: usize,
    pub capabilities: StaffCapabilities,
}

/// Resolves a manager code to a display name.
#[must_use]
pub fn reports_to_name(reports_to: Option<&EmployeeCode>, all_staff: &[StaffMember]) -> String {
    let Some(code) = reports_to else {
        return String::from(UNASSIGNED);
    };
    all_staff
        .iter()
        .find(|member| &member.employee_code == code)
        .map_or_else(
            || String::from(UNKNOWN_MANAGER),
            |manager| manager.employee_name.clone(),
        )
}

impl StaffView {
    #[must_use]
    pub fn build(member: &StaffMember, all_staff: &[StaffMember], viewer: &AuthenticatedActor) -> Self {
        Self {
            reports_to_name: reports_to_name(member.reports_to.as_ref(), all_staff),
            subordinates: direct_subordinates(&member.employee_code, all_staff)
                .into_iter()
                .map(SubordinateSummary::from)
                .collect(),
            subordinate_count: recursive_subordinate_info(member, all_staff).len(),
            capabilities: compute_staff_capabilities(viewer, member),
            staff: member.clone(),
        }
    }
}
