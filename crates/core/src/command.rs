// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_reporting_domain::{
    BranchDraft, BranchId, BranchPatch, Designation, DistrictId, ImportedStaffRow, RegionId,
    StaffDraft, StaffId, StaffPatch, ZoneId,
};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert the staff record backing a system account.
    ///
    /// If a record with the code already exists it is tagged as a system
    /// record instead. Field rules are not applied to fixtures.
    SeedSystemStaff {
        /// The fixture record.
        draft: StaffDraft,
    },
    /// Add a staff member after full validation.
    AddStaff {
        /// The new record's fields.
        draft: StaffDraft,
    },
    /// Change some fields of a staff member.
    UpdateStaff {
        /// The record to change.
        id: StaffId,
        /// The fields to change.
        patch: StaffPatch,
    },
    /// Remove one staff member. Their reports keep a dangling manager code.
    RemoveStaff {
        /// The record to remove.
        id: StaffId,
    },
    /// Remove several staff members. Unknown and system ids are skipped.
    RemoveStaffMultiple {
        /// The records to remove.
        ids: Vec<StaffId>,
    },
    /// Remove every non-system staff member.
    RemoveAllStaff {
        /// A record to keep in addition to the system records.
        except: Option<StaffId>,
    },
    /// Leniently import spreadsheet rows.
    BulkImportStaff {
        /// Rows in sheet order.
        rows: Vec<ImportedStaffRow>,
    },
    /// Move staff members to other branches, all or nothing.
    ReassignStaffBranches {
        /// Pairs of staff id and target branch name.
        assignments: Vec<(StaffId, String)>,
    },
    /// Give several staff members the same designation.
    BulkUpdateDesignation {
        /// The records to change.
        ids: Vec<StaffId>,
        /// The new designation.
        designation: Designation,
    },
    /// Create a zone.
    AddZone {
        /// The zone name.
        name: String,
    },
    /// Create a region inside an existing zone.
    AddRegion {
        /// The region name.
        name: String,
        /// The parent zone name.
        zone_name: String,
    },
    /// Create a district inside an existing region.
    AddDistrict {
        /// The district name.
        name: String,
        /// The parent region name.
        region_name: String,
    },
    /// Create a branch.
    AddBranch {
        /// The branch fields.
        draft: BranchDraft,
    },
    /// Change a branch, cascading renames and moves to staff.
    UpdateBranch {
        /// The branch to change.
        id: BranchId,
        /// The fields to change.
        patch: BranchPatch,
    },
    /// Remove a zone that nothing references.
    RemoveZone {
        /// The zone to remove.
        id: ZoneId,
    },
    /// Remove a region that nothing references.
    RemoveRegion {
        /// The region to remove.
        id: RegionId,
    },
    /// Remove a district that nothing references.
    RemoveDistrict {
        /// The district to remove.
        id: DistrictId,
    },
    /// Remove a branch no staff member is assigned to.
    RemoveBranch {
        /// The branch to remove.
        id: BranchId,
    },
}

impl Command {
    /// The name recorded in the audit trail for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SeedSystemStaff { .. } => "SeedSystemStaff",
            Self::AddStaff { .. } => "AddStaff",
            Self::UpdateStaff { .. } => "UpdateStaff",
            Self::RemoveStaff { .. } => "RemoveStaff",
            Self::RemoveStaffMultiple { .. } => "RemoveStaffMultiple",
            Self::RemoveAllStaff { .. } => "RemoveAllStaff",
            Self::BulkImportStaff { .. } => "BulkImportStaff",
            Self::ReassignStaffBranches { .. } => "ReassignStaffBranches",
            Self::BulkUpdateDesignation { .. } => "BulkUpdateDesignation",
            Self::AddZone { .. } => "AddZone",
            Self::AddRegion { .. } => "AddRegion",
            Self::AddDistrict { .. } => "AddDistrict",
            Self::AddBranch { .. } => "AddBranch",
            Self::UpdateBranch { .. } => "UpdateBranch",
            Self::RemoveZone { .. } => "RemoveZone",
            Self::RemoveRegion { .. } => "RemoveRegion",
            Self::RemoveDistrict { .. } => "RemoveDistrict",
            Self::RemoveBranch { .. } => "RemoveBranch",
        }
    }
}
