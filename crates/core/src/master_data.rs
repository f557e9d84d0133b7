// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Zone, region, district and branch commands.

use crate::apply::Applied;
use crate::state::{Outcome, State};
use daily_reporting_domain::{
    Branch, BranchDraft, BranchId, BranchPatch, District, DistrictId, DomainError, FIELD_REGION,
    FIELD_ZONE, FieldErrors, Location, MasterDataKind, Region, RegionId, StaffMember, Zone,
    ZoneId, validate_branch, validate_master_name,
};

pub(crate) fn add_zone(state: &mut State, name: &str) -> Result<Applied, DomainError> {
    validate_master_name(
        MasterDataKind::Zone,
        name,
        state.master.zones.iter().map(|zone| zone.name.as_str()),
    )?;
    let zone: Zone = Zone {
        id: state.next_zone_id(),
        name: name.trim().to_string(),
    };
    state.master.zones.push(zone.clone());
    let details: String = format!("Added zone '{}'", zone.name);
    Ok((Outcome::Zone(zone), details))
}

pub(crate) fn add_region(
    state: &mut State,
    name: &str,
    zone_name: &str,
) -> Result<Applied, DomainError> {
    validate_master_name(
        MasterDataKind::Region,
        name,
        state.master.regions.iter().map(|region| region.name.as_str()),
    )?;
    let zone_id: ZoneId = state
        .master
        .zone_by_name(zone_name.trim())
        .map(|zone| zone.id)
        .ok_or_else(|| {
            DomainError::Validation(FieldErrors::single(
                FIELD_ZONE,
                format!("Zone '{}' does not exist", zone_name.trim()),
            ))
        })?;
    let region: Region = Region {
        id: state.next_region_id(),
        name: name.trim().to_string(),
        zone_id,
    };
    state.master.regions.push(region.clone());
    let details: String = format!("Added region '{}' to zone '{}'", region.name, zone_name.trim());
    Ok((Outcome::Region(region), details))
}

pub(crate) fn add_district(
    state: &mut State,
    name: &str,
    region_name: &str,
) -> Result<Applied, DomainError> {
    validate_master_name(
        MasterDataKind::District,
        name,
        state
            .master
            .districts
            .iter()
            .map(|district| district.name.as_str()),
    )?;
    let region_id: RegionId = state
        .master
        .region_by_name(region_name.trim())
        .map(|region| region.id)
        .ok_or_else(|| {
            DomainError::Validation(FieldErrors::single(
                FIELD_REGION,
                format!("Region '{}' does not exist", region_name.trim()),
            ))
        })?;
    let district: District = District {
        id: state.next_district_id(),
        name: name.trim().to_string(),
        region_id,
    };
    state.master.districts.push(district.clone());
    let details: String = format!(
        "Added district '{}' to region '{}'",
        district.name,
        region_name.trim()
    );
    Ok((Outcome::District(district), details))
}

fn branch_from_draft(id: BranchId, draft: &BranchDraft) -> Branch {
    Branch {
        id,
        branch_name: draft.branch_name.trim().to_string(),
        location: Location::new(
            draft.zone.trim(),
            draft.region.trim(),
            draft.district_name.trim(),
        ),
        branch_manager_name: draft.branch_manager_name.trim().to_string(),
        branch_manager_code: draft.branch_manager_code.trim().to_string(),
        mobile_number: draft.mobile_number.trim().to_string(),
    }
}

fn trimmed_draft(draft: &BranchDraft) -> BranchDraft {
    BranchDraft {
        branch_name: draft.branch_name.trim().to_string(),
        zone: draft.zone.trim().to_string(),
        region: draft.region.trim().to_string(),
        district_name: draft.district_name.trim().to_string(),
        branch_manager_name: draft.branch_manager_name.trim().to_string(),
        branch_manager_code: draft.branch_manager_code.trim().to_string(),
        mobile_number: draft.mobile_number.trim().to_string(),
    }
}

pub(crate) fn add_branch(state: &mut State, draft: &BranchDraft) -> Result<Applied, DomainError> {
    let draft: BranchDraft = trimmed_draft(draft);
    validate_branch(&draft, &state.master, None)?;
    let branch: Branch = branch_from_draft(state.next_branch_id(), &draft);
    state.master.branches.push(branch.clone());
    let details: String = format!("Added branch '{}'", branch.branch_name);
    Ok((Outcome::Branch(branch), details))
}

/// Updates a branch and keeps staff consistent with it.
///
/// A rename rewrites every staff `branch_name` and `managed_branches`
/// entry naming the old branch. Staff on the branch then take its
/// (possibly new) location.
pub(crate) fn update_branch(
    state: &mut State,
    id: BranchId,
    patch: BranchPatch,
) -> Result<Applied, DomainError> {
    let index: usize = state
        .master
        .branches
        .iter()
        .position(|branch| branch.id == id)
        .ok_or(DomainError::BranchNotFound(id))?;
    let current: Branch = state.master.branches[index].clone();

    let merged: BranchDraft = trimmed_draft(&BranchDraft {
        branch_name: patch.branch_name.unwrap_or_else(|| current.branch_name.clone()),
        zone: patch.zone.unwrap_or_else(|| current.location.zone.clone()),
        region: patch.region.unwrap_or_else(|| current.location.region.clone()),
        district_name: patch
            .district_name
            .unwrap_or_else(|| current.location.district_name.clone()),
        branch_manager_name: patch
            .branch_manager_name
            .unwrap_or_else(|| current.branch_manager_name.clone()),
        branch_manager_code: patch
            .branch_manager_code
            .unwrap_or_else(|| current.branch_manager_code.clone()),
        mobile_number: patch.mobile_number.unwrap_or_else(|| current.mobile_number.clone()),
    });
    validate_branch(&merged, &state.master, Some(id))?;

    let updated: Branch = branch_from_draft(id, &merged);
    state.master.branches[index] = updated.clone();

    let old_name: &str = &current.branch_name;
    let new_name: &str = &updated.branch_name;
    let mut moved: usize = 0;
    for member in &mut state.staff {
        if member.branch_name == old_name {
            member.branch_name = new_name.to_string();
        }
        if member.managed_branches.remove(old_name) {
            member.managed_branches.insert(new_name.to_string());
        }
        if member.branch_name == new_name && member.location != updated.location {
            member.location = updated.location.clone();
            moved += 1;
        }
    }

    let details: String = if old_name == new_name {
        format!("Updated branch '{new_name}' ({moved} staff relocated)")
    } else {
        format!("Renamed branch '{old_name}' to '{new_name}' ({moved} staff relocated)")
    };
    Ok((Outcome::Branch(updated), details))
}

fn in_use(kind: MasterDataKind, name: &str, reason: String) -> DomainError {
    DomainError::MasterDataInUse {
        kind,
        name: name.to_string(),
        reason,
    }
}

pub(crate) fn remove_zone(state: &mut State, id: ZoneId) -> Result<Applied, DomainError> {
    let zone: Zone = state
        .master
        .zone(id)
        .cloned()
        .ok_or(DomainError::ZoneNotFound(id))?;

    let regions: usize = state
        .master
        .regions
        .iter()
        .filter(|region| region.zone_id == id)
        .count();
    if regions > 0 {
        return Err(in_use(
            MasterDataKind::Zone,
            &zone.name,
            format!("{regions} region(s) belong to it"),
        ));
    }
    let branches: usize = state.master.branches_in_zone(&zone.name).len();
    if branches > 0 {
        return Err(in_use(
            MasterDataKind::Zone,
            &zone.name,
            format!("{branches} branch(es) are located in it"),
        ));
    }
    let managers: usize = state
        .staff
        .iter()
        .filter(|member| member.managed_zones.contains(&zone.name))
        .count();
    if managers > 0 {
        return Err(in_use(
            MasterDataKind::Zone,
            &zone.name,
            format!("{managers} staff member(s) manage it"),
        ));
    }

    state.master.zones.retain(|existing| existing.id != id);
    Ok((Outcome::Removed(1), format!("Removed zone '{}'", zone.name)))
}

pub(crate) fn remove_region(state: &mut State, id: RegionId) -> Result<Applied, DomainError> {
    let region: Region = state
        .master
        .region(id)
        .cloned()
        .ok_or(DomainError::RegionNotFound(id))?;

    let districts: usize = state
        .master
        .districts
        .iter()
        .filter(|district| district.region_id == id)
        .count();
    if districts > 0 {
        return Err(in_use(
            MasterDataKind::Region,
            &region.name,
            format!("{districts} district(s) belong to it"),
        ));
    }
    let branches: usize = state
        .master
        .branches
        .iter()
        .filter(|branch| branch.location.region == region.name)
        .count();
    if branches > 0 {
        return Err(in_use(
            MasterDataKind::Region,
            &region.name,
            format!("{branches} branch(es) are located in it"),
        ));
    }

    state.master.regions.retain(|existing| existing.id != id);
    Ok((
        Outcome::Removed(1),
        format!("Removed region '{}'", region.name),
    ))
}

pub(crate) fn remove_district(state: &mut State, id: DistrictId) -> Result<Applied, DomainError> {
    let district: District = state
        .master
        .district(id)
        .cloned()
        .ok_or(DomainError::DistrictNotFound(id))?;

    let branches: usize = state
        .master
        .branches
        .iter()
        .filter(|branch| branch.location.district_name == district.name)
        .count();
    if branches > 0 {
        return Err(in_use(
            MasterDataKind::District,
            &district.name,
            format!("{branches} branch(es) are located in it"),
        ));
    }

    state.master.districts.retain(|existing| existing.id != id);
    Ok((
        Outcome::Removed(1),
        format!("Removed district '{}'", district.name),
    ))
}

/// Removes a branch, refusing while any staff member is assigned to it.
///
/// The refusal carries exactly the blocking staff so the caller can
/// reassign them and retry. Managed-branch entries naming a removed
/// branch are pruned.
pub(crate) fn remove_branch(state: &mut State, id: BranchId) -> Result<Applied, DomainError> {
    let branch: Branch = state
        .master
        .branch(id)
        .cloned()
        .ok_or(DomainError::BranchNotFound(id))?;

    let blocking: Vec<StaffMember> = state
        .staff_on_branch(&branch.branch_name)
        .into_iter()
        .cloned()
        .collect();
    if !blocking.is_empty() {
        return Err(DomainError::BranchInUse {
            branch: Box::new(branch),
            staff: blocking,
        });
    }

    state.master.branches.retain(|existing| existing.id != id);
    for member in &mut state.staff {
        member.managed_branches.remove(&branch.branch_name);
    }

    Ok((
        Outcome::Removed(1),
        format!("Removed branch '{}'", branch.branch_name),
    ))
}
