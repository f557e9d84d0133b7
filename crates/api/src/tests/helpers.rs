// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use daily_reporting_audit::Cause;
use daily_reporting_domain::{
    Branch, BranchId, Designation, District, DistrictId, EmployeeCode, Location, MasterData,
    Region, RegionId, StaffDraft, StaffMember, Zone, ZoneId,
};
use std::collections::BTreeSet;

use crate::{AuthenticatedActor, Directory, Role};

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
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

pub fn create_test_draft(
    code: &str,
    function: Designation,
    branch_name: &str,
    reports_to: Option<&str>,
) -> StaffDraft {
    StaffDraft {
        employee_code: String::from(code),
        employee_name: format!("Staff {code}"),
        contact_number: String::from("9000000000"),
        function,
        branch_name: String::from(branch_name),
        reports_to: reports_to.map(String::from),
        ..StaffDraft::default()
    }
}

/// The `admin` system account, as the login flow produces it.
pub fn create_test_admin(directory: &Directory) -> AuthenticatedActor {
    directory.login("admin", "admin123").unwrap().to_actor()
}

/// Logs a staff member in with their own code.
pub fn login_as(directory: &Directory, code: &str) -> AuthenticatedActor {
    directory.login(code, code).unwrap().to_actor()
}

pub fn create_test_outsider() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("outsider"), Role::User)
}

/// A directory with this hierarchy on top of the system records:
///
/// ```text
/// ZM01  ZONAL MANAGER   Branch-1  manages Zone-2
/// └── BM01  BRANCH MANAGER  Branch-1
///     └── BO01  BRANCH OFFICER  Branch-1
/// BO02  BRANCH OFFICER  Branch-2
/// BO03  BRANCH OFFICER  Branch-3
/// ```
pub fn create_test_directory() -> Directory {
    let mut directory: Directory = Directory::new(create_test_master_data()).unwrap();
    let admin: AuthenticatedActor = create_test_admin(&directory);

    let mut zonal: StaffDraft =
        create_test_draft("ZM01", Designation::ZonalManager, "Branch-1", None);
    zonal.managed_zones = BTreeSet::from([String::from("Zone-2")]);

    let drafts: Vec<StaffDraft> = vec![
        zonal,
        create_test_draft("BM01", Designation::BranchManager, "Branch-1", Some("ZM01")),
        create_test_draft("BO01", Designation::BranchOfficer, "Branch-1", Some("BM01")),
        create_test_draft("BO02", Designation::BranchOfficer, "Branch-2", None),
        create_test_draft("BO03", Designation::BranchOfficer, "Branch-3", None),
    ];
    for draft in drafts {
        directory
            .add_staff(&admin, draft, create_test_cause())
            .unwrap();
    }
    directory
}

pub fn staff<'a>(directory: &'a Directory, code: &str) -> &'a StaffMember {
    directory
        .state()
        .staff_by_code(&EmployeeCode::new(code))
        .unwrap()
}

pub fn codes<'a>(members: impl IntoIterator<Item = &'a StaffMember>) -> Vec<String> {
    members
        .into_iter()
        .map(|member| member.employee_code.value().to_string())
        .collect()
}
