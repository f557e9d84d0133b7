// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Master data and location lookups.
//!
//! Lookups are pure and never fail: an unknown name resolves to nothing,
//! or to the `"N/A"` location for callers that need a value.

use crate::types::{
    Branch, BranchId, District, DistrictId, Location, Region, RegionId, Zone, ZoneId,
    is_unassigned_branch,
};
use serde::{Deserialize, Serialize};

/// Zones, regions, districts and branches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterData {
    pub zones: Vec<Zone>,
    pub regions: Vec<Region>,
    pub districts: Vec<District>,
    pub branches: Vec<Branch>,
}

impl MasterData {
    /// Creates empty master data.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zones: Vec::new(),
            regions: Vec::new(),
            districts: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// Resolves the location of a branch by exact name.
    ///
    /// Returns `None` for unknown branches and for the unassigned sentinel.
    #[must_use]
    pub fn resolve_branch_location(&self, branch_name: &str) -> Option<Location> {
        self.branch_by_name(branch_name)
            .map(|branch| branch.location.clone())
    }

    /// Resolves the location of a branch, falling back to the `"N/A"` location.
    #[must_use]
    pub fn location_for_branch(&self, branch_name: &str) -> Location {
        self.resolve_branch_location(branch_name)
            .unwrap_or_else(Location::unassigned)
    }

    /// Returns the regions of the named zone, in insertion order.
    #[must_use]
    pub fn regions_in_zone(&self, zone_name: &str) -> Vec<&Region> {
        let Some(zone) = self.zone_by_name(zone_name) else {
            return Vec::new();
        };
        self.regions
            .iter()
            .filter(|region| region.zone_id == zone.id)
            .collect()
    }

    /// Returns the districts of the named region, in insertion order.
    #[must_use]
    pub fn districts_in_region(&self, region_name: &str) -> Vec<&District> {
        let Some(region) = self.region_by_name(region_name) else {
            return Vec::new();
        };
        self.districts
            .iter()
            .filter(|district| district.region_id == region.id)
            .collect()
    }

    /// Returns the branches in the named zone.
    #[must_use]
    pub fn branches_in_zone(&self, zone_name: &str) -> Vec<&Branch> {
        self.branches
            .iter()
            .filter(|branch| branch.location.zone == zone_name)
            .collect()
    }

    /// Finds a branch by exact name. The unassigned sentinel never matches.
    #[must_use]
    pub fn branch_by_name(&self, branch_name: &str) -> Option<&Branch> {
        if is_unassigned_branch(branch_name) {
            return None;
        }
        self.branches
            .iter()
            .find(|branch| branch.branch_name == branch_name)
    }

    /// Finds a branch by id.
    #[must_use]
    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.iter().find(|branch| branch.id == id)
    }

    /// Finds a zone by exact name.
    #[must_use]
    pub fn zone_by_name(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.name == name)
    }

    /// Finds a zone by id.
    #[must_use]
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// Finds a region by exact name.
    #[must_use]
    pub fn region_by_name(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.name == name)
    }

    /// Finds a region by id.
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Finds a district by exact name.
    #[must_use]
    pub fn district_by_name(&self, name: &str) -> Option<&District> {
        self.districts.iter().find(|district| district.name == name)
    }

    /// Finds a district by id.
    #[must_use]
    pub fn district(&self, id: DistrictId) -> Option<&District> {
        self.districts.iter().find(|district| district.id == id)
    }

    /// Returns whether the zone → region → district chain of a location exists.
    #[must_use]
    pub fn is_consistent_location(&self, location: &Location) -> bool {
        let Some(zone) = self.zone_by_name(&location.zone) else {
            return false;
        };
        let Some(region) = self.region_by_name(&location.region) else {
            return false;
        };
        let Some(district) = self.district_by_name(&location.district_name) else {
            return false;
        };
        region.zone_id == zone.id && district.region_id == region.id
    }
}
