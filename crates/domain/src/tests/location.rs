// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_master_data;
use crate::{Location, MasterData};

#[test]
fn test_resolve_branch_location_known_branch() {
    let master: MasterData = create_test_master_data();
    let location: Option<Location> = master.resolve_branch_location("Branch-3");
    assert_eq!(
        location,
        Some(Location::new("Zone-2", "Region-B", "District-Y"))
    );
}

#[test]
fn test_resolve_branch_location_unknown_branch() {
    let master: MasterData = create_test_master_data();
    assert!(master.resolve_branch_location("Nowhere").is_none());
    assert!(master.resolve_branch_location("N/A").is_none());
}

#[test]
fn test_location_for_unknown_branch_falls_back_to_unassigned() {
    let master: MasterData = create_test_master_data();
    assert!(master.location_for_branch("Nowhere").is_unassigned());
}

#[test]
fn test_branch_lookup_is_exact_match() {
    let master: MasterData = create_test_master_data();
    assert!(master.branch_by_name("branch-1").is_none());
    assert!(master.branch_by_name("Branch-1").is_some());
}

#[test]
fn test_regions_in_zone() {
    let master: MasterData = create_test_master_data();
    let names: Vec<&str> = master
        .regions_in_zone("Zone-1")
        .iter()
        .map(|region| region.name.as_str())
        .collect();
    assert_eq!(names, vec!["Region-A"]);
}

#[test]
fn test_regions_in_unknown_zone_is_empty() {
    let master: MasterData = create_test_master_data();
    assert!(master.regions_in_zone("Zone-9").is_empty());
}

#[test]
fn test_districts_in_region() {
    let master: MasterData = create_test_master_data();
    let names: Vec<&str> = master
        .districts_in_region("Region-B")
        .iter()
        .map(|district| district.name.as_str())
        .collect();
    assert_eq!(names, vec!["District-Y"]);
    assert!(master.districts_in_region("Region-Z").is_empty());
}

#[test]
fn test_branches_in_zone() {
    let master: MasterData = create_test_master_data();
    assert_eq!(master.branches_in_zone("Zone-1").len(), 2);
    assert_eq!(master.branches_in_zone("Zone-2").len(), 1);
}

#[test]
fn test_location_consistency() {
    let master: MasterData = create_test_master_data();
    assert!(master.is_consistent_location(&Location::new("Zone-1", "Region-A", "District-X")));
    assert!(!master.is_consistent_location(&Location::new("Zone-2", "Region-A", "District-X")));
    assert!(!master.is_consistent_location(&Location::new("Zone-1", "Region-A", "District-Y")));
}
