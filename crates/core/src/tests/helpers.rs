// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, CoreError, State, TransitionResult, apply};
use daily_reporting_audit::{Actor, Cause};
use daily_reporting_domain::{
    Branch, BranchId, District, DistrictId, DomainError, EmployeeCode, ImportedStaffRow,
    Location, MasterData, Region, RegionId, StaffDraft, StaffMember, Zone, ZoneId,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

fn create_test_branch(id: u64, name: &str, location: Location) -> Branch {
    Branch {
        id: BranchId::new(id),
        branch_name: String::from(name),
        location,
        branch_manager_name: String::new(),
        branch_manager_code: String::new(),
        mobile_number: String::new(),
    }
}

/// Zone-1 (Region-A, District-X) holds `Branch-1` and `Branch-2`;
/// Zone-2 (Region-B, District-Y) holds `Branch-3`.
pub fn create_test_master_data() -> MasterData {
    let north: Location = Location::new("Zone-1", "Region-A", "District-X");
    let south: Location = Location::new("Zone-2", "Region-B", "District-Y");
    MasterData {
        zones: vec![
            Zone {
                id: ZoneId::new(1),
                name: String::from("Zone-1"),
            },
            Zone {
                id: ZoneId::new(2),
                name: String::from("Zone-2"),
            },
        ],
        regions: vec![
            Region {
                id: RegionId::new(1),
                name: String::from("Region-A"),
                zone_id: ZoneId::new(1),
            },
            Region {
                id: RegionId::new(2),
                name: String::from("Region-B"),
                zone_id: ZoneId::new(2),
            },
        ],
        districts: vec![
            District {
                id: DistrictId::new(1),
                name: String::from("District-X"),
                region_id: RegionId::new(1),
            },
            District {
                id: DistrictId::new(2),
                name: String::from("District-Y"),
                region_id: RegionId::new(2),
            },
        ],
        branches: vec![
            create_test_branch(1, "Branch-1", north.clone()),
            create_test_branch(2, "Branch-2", north),
            create_test_branch(3, "Branch-3", south),
        ],
    }
}

pub fn create_test_state() -> State {
    State::new(create_test_master_data())
}

pub fn create_test_draft(code: &str, reports_to: Option<&str>, branch_name: &str) -> StaffDraft {
    StaffDraft {
        employee_code: String::from(code),
        employee_name: format!("Staff {code}"),
        contact_number: String::from("9000000000"),
        branch_name: String::from(branch_name),
        reports_to: reports_to.map(String::from),
        ..StaffDraft::default()
    }
}

pub fn create_test_row(name: &str, code: &str, reports_to: &str) -> ImportedStaffRow {
    ImportedStaffRow {
        staff_name: String::from(name),
        employee_code: String::from(code),
        designation: String::from("BRANCH OFFICER"),
        branch_name: String::from("Branch-1"),
        contact_number: String::from("9000000000"),
        reports_to: String::from(reports_to),
        ..ImportedStaffRow::default()
    }
}

pub fn try_apply(state: &State, command: Command) -> Result<TransitionResult, CoreError> {
    apply(state, command, create_test_actor(), create_test_cause())
}

pub fn apply_ok(state: &State, command: Command) -> TransitionResult {
    try_apply(state, command).unwrap()
}

pub fn apply_err(state: &State, command: Command) -> DomainError {
    match try_apply(state, command) {
        Err(CoreError::DomainViolation(err)) => err,
        Ok(transition) => panic!("expected failure, got {:?}", transition.outcome),
    }
}

/// Adds a staff member and returns the resulting state.
pub fn with_staff(state: &State, code: &str, reports_to: Option<&str>, branch_name: &str) -> State {
    apply_ok(
        state,
        Command::AddStaff {
            draft: create_test_draft(code, reports_to, branch_name),
        },
    )
    .new_state
}

pub fn staff<'a>(state: &'a State, code: &str) -> &'a StaffMember {
    state.staff_by_code(&EmployeeCode::new(code)).unwrap()
}
