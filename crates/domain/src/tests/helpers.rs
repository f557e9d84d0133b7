// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Branch, BranchId, Designation, District, DistrictId, EmployeeCode, Location, MasterData,
    Region, RegionId, StaffId, StaffMember, Zone, ZoneId,
};
use std::collections::BTreeSet;

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

/// Two zones, one region and one district each, and three branches:
/// `Branch-1` and `Branch-2` in Zone-1, `Branch-3` in Zone-2.
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

pub fn create_test_staff(
    id: u64,
    code: &str,
    reports_to: Option<&str>,
    branch_name: &str,
) -> StaffMember {
    let master: MasterData = create_test_master_data();
    StaffMember {
        id: StaffId::new(id),
        employee_code: EmployeeCode::new(code),
        employee_name: format!("Staff {code}"),
        contact_number: String::from("9000000000"),
        function: Designation::BranchOfficer,
        branch_name: String::from(branch_name),
        location: master.location_for_branch(branch_name),
        managed_zones: BTreeSet::new(),
        managed_branches: BTreeSet::new(),
        reports_to: reports_to.map(EmployeeCode::new),
        is_system: false,
    }
}
