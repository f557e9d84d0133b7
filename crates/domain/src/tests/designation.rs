// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Designation, DomainError, ManagedUnits, RoleTier};

/// The keyword rule the classification table freezes: a label naming a
/// manager, a head, or a team lead grants the manager tier.
fn keyword_role_tier(label: &str) -> RoleTier {
    let upper: String = label.to_uppercase();
    if upper.contains("MANAGER") || upper.contains("HEAD") || upper.contains("TL") {
        RoleTier::Manager
    } else {
        RoleTier::Staff
    }
}

#[test]
fn test_role_tier_table_agrees_with_keyword_rule() {
    for designation in Designation::ALL {
        assert_eq!(
            designation.role_tier(),
            keyword_role_tier(designation.label()),
            "role tier mismatch for {designation}"
        );
    }
}

#[test]
fn test_only_zonal_manager_manages_zones() {
    let zone_managers: Vec<Designation> = Designation::ALL
        .into_iter()
        .filter(Designation::manages_zones)
        .collect();
    assert_eq!(zone_managers, vec![Designation::ZonalManager]);
}

#[test]
fn test_district_heads_and_team_leads_manage_branches() {
    let branch_managers: Vec<Designation> = Designation::ALL
        .into_iter()
        .filter(Designation::manages_branches)
        .collect();
    assert_eq!(
        branch_managers,
        vec![
            Designation::DistrictHead,
            Designation::AssistantDistrictHead,
            Designation::TeamLead,
        ]
    );
}

#[test]
fn test_branch_manager_like_designations() {
    assert!(Designation::BranchManager.is_branch_manager_like());
    assert!(Designation::AssistantBranchManager.is_branch_manager_like());
    assert!(!Designation::DistrictHead.is_branch_manager_like());
    assert!(!Designation::BranchOfficer.is_branch_manager_like());
}

#[test]
fn test_branch_officer_has_no_managed_units() {
    assert_eq!(
        Designation::BranchOfficer.classification().managed_units,
        ManagedUnits::None
    );
}

#[test]
fn test_parse_is_case_and_whitespace_insensitive() {
    assert_eq!(
        Designation::parse("  zonal manager ").unwrap(),
        Designation::ZonalManager
    );
    assert_eq!(Designation::parse("tl-dds").unwrap(), Designation::TeamLead);
}

#[test]
fn test_parse_rejects_unknown_label() {
    assert_eq!(
        Designation::parse("CEO"),
        Err(DomainError::InvalidDesignation(String::from("CEO")))
    );
}

#[test]
fn test_parse_lenient_defaults_unknown_label_with_warning() {
    let (designation, warning) = Designation::parse_lenient("Chief Happiness Officer");
    assert_eq!(designation, Designation::DEFAULT);
    assert!(warning.unwrap().contains("Chief Happiness Officer"));
}

#[test]
fn test_parse_lenient_blank_label_defaults_silently() {
    let (designation, warning) = Designation::parse_lenient("  ");
    assert_eq!(designation, Designation::DEFAULT);
    assert!(warning.is_none());
}

#[test]
fn test_parse_lenient_accepts_known_label_silently() {
    let (designation, warning) = Designation::parse_lenient("DDS");
    assert_eq!(designation, Designation::Dds);
    assert!(warning.is_none());
}

#[test]
fn test_labels_round_trip_through_parse() {
    for designation in Designation::ALL {
        assert_eq!(Designation::parse(designation.label()).unwrap(), designation);
    }
}

#[test]
fn test_serializes_as_label() {
    let json: String = serde_json::to_string(&Designation::AssistantDistrictHead).unwrap();
    assert_eq!(json, "\"ASST. DISTRICT HEAD\"");
}
