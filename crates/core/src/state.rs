// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_reporting_audit::{AuditEvent, StateSnapshot};
use daily_reporting_domain::{
    Branch, BranchId, District, DistrictId, EmployeeCode, MasterData, Region, RegionId, StaffId,
    StaffMember, Zone, ZoneId,
};

/// Next identifier to hand out for each record kind.
///
/// Identifiers are never reused, even after the record is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCounters {
    staff: u64,
    branch: u64,
    zone: u64,
    region: u64,
    district: u64,
}

impl IdCounters {
    /// Starts each counter after the highest id already present.
    fn after(staff: &[StaffMember], master: &MasterData) -> Self {
        fn next(max: Option<u64>) -> u64 {
            max.map_or(1, |value| value + 1)
        }
        Self {
            staff: next(staff.iter().map(|m| m.id.value()).max()),
            branch: next(master.branches.iter().map(|b| b.id.value()).max()),
            zone: next(master.zones.iter().map(|z| z.id.value()).max()),
            region: next(master.regions.iter().map(|r| r.id.value()).max()),
            district: next(master.districts.iter().map(|d| d.id.value()).max()),
        }
    }
}

/// The complete directory: staff plus master data.
///
/// States are values. Every transition clones the current state, changes
/// the copy, and hands it back, so a rejected command leaves nothing behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// All staff members, in insertion order.
    pub staff: Vec<StaffMember>,
    /// Zones, regions, districts and branches.
    pub master: MasterData,
    /// Incremented by every successful transition.
    pub version: u64,
    ids: IdCounters,
}

impl State {
    /// Creates a state with the given master data and no staff.
    #[must_use]
    pub fn new(master: MasterData) -> Self {
        Self::from_parts(Vec::new(), master)
    }

    /// Creates a state from existing records. The version starts at 0.
    #[must_use]
    pub fn from_parts(staff: Vec<StaffMember>, master: MasterData) -> Self {
        let ids: IdCounters = IdCounters::after(&staff, &master);
        Self {
            staff,
            master,
            version: 0,
            ids,
        }
    }

    /// Finds a staff member by id.
    #[must_use]
    pub fn staff_by_id(&self, id: StaffId) -> Option<&StaffMember> {
        self.staff.iter().find(|member| member.id == id)
    }

    /// Finds a staff member by employee code.
    #[must_use]
    pub fn staff_by_code(&self, employee_code: &EmployeeCode) -> Option<&StaffMember> {
        self.staff
            .iter()
            .find(|member| &member.employee_code == employee_code)
    }

    /// Staff members assigned to the named branch.
    #[must_use]
    pub fn staff_on_branch(&self, branch_name: &str) -> Vec<&StaffMember> {
        self.staff
            .iter()
            .filter(|member| member.branch_name == branch_name)
            .collect()
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            version: self.version,
            staff_count: self.staff.len(),
            branch_count: self.master.branches.len(),
            zone_count: self.master.zones.len(),
            region_count: self.master.regions.len(),
            district_count: self.master.districts.len(),
        }
    }

    pub(crate) fn staff_index(&self, id: StaffId) -> Option<usize> {
        self.staff.iter().position(|member| member.id == id)
    }

    pub(crate) fn next_staff_id(&mut self) -> StaffId {
        let id: StaffId = StaffId::new(self.ids.staff);
        self.ids.staff += 1;
        id
    }

    pub(crate) fn next_branch_id(&mut self) -> BranchId {
        let id: BranchId = BranchId::new(self.ids.branch);
        self.ids.branch += 1;
        id
    }

    pub(crate) fn next_zone_id(&mut self) -> ZoneId {
        let id: ZoneId = ZoneId::new(self.ids.zone);
        self.ids.zone += 1;
        id
    }

    pub(crate) fn next_region_id(&mut self) -> RegionId {
        let id: RegionId = RegionId::new(self.ids.region);
        self.ids.region += 1;
        id
    }

    pub(crate) fn next_district_id(&mut self) -> DistrictId {
        let id: DistrictId = DistrictId::new(self.ids.district);
        self.ids.district += 1;
        id
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(MasterData::new())
    }
}

/// Counts and messages from a lenient bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkImportSummary {
    /// Rows that became staff records.
    pub added: usize,
    /// Rows dropped as duplicates or for missing name or code.
    pub skipped: usize,
    /// Data-quality issues that were corrected rather than rejected.
    pub warnings: Vec<String>,
}

/// What a successful transition produced, for the caller to report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A staff record was created or changed.
    Staff(StaffMember),
    /// Several staff records were changed.
    StaffList(Vec<StaffMember>),
    /// A number of records were removed.
    Removed(usize),
    /// A bulk import finished.
    Imported(BulkImportSummary),
    Zone(Zone),
    Region(Region),
    District(District),
    Branch(Branch),
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// What the transition produced.
    pub outcome: Outcome,
}
