// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The staff directory store.
//!
//! `Directory` owns the current state, the audit log and the login
//! projection. Every mutation goes through `execute`, which commits the
//! new state, records the audit event, and rebuilds the projection before
//! returning, so readers never see a projection older than the state.

use daily_reporting::{
    BulkImportSummary, Command, Outcome, State, TransitionResult, apply, validate_branch_exists,
    validate_staff_exists,
};
use daily_reporting_audit::{AuditLog, AuditRecord, Cause};
use daily_reporting_domain::{
    Branch, BranchDraft, BranchId, BranchPatch, Designation, District, DistrictId,
    FIELD_BRANCH_NAME, ImportedStaffRow, MasterData, Region, RegionId, StaffDraft, StaffId,
    StaffMember, StaffPatch, SubordinateInfo, UNASSIGNED, Zone, ZoneId, branch_managers,
    recursive_subordinate_info,
};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::csv_import::{self, CsvPreviewResult};
use crate::error::{ApiError, AuthError, translate_core_error, translate_domain_error};
use crate::projection::{AuthProjection, ProjectedUser, SYSTEM_ACCOUNTS};
use crate::views::StaffView;
use crate::visibility::Visibility;

fn unexpected(outcome: &Outcome) -> ApiError {
    ApiError::Internal {
        message: format!("Unexpected command outcome: {outcome:?}"),
    }
}

fn staff_outcome(outcome: Outcome) -> Result<StaffMember, ApiError> {
    match outcome {
        Outcome::Staff(member) => Ok(member),
        other => Err(unexpected(&other)),
    }
}

fn staff_list_outcome(outcome: Outcome) -> Result<Vec<StaffMember>, ApiError> {
    match outcome {
        Outcome::StaffList(members) => Ok(members),
        other => Err(unexpected(&other)),
    }
}

fn removed_outcome(outcome: Outcome) -> Result<usize, ApiError> {
    match outcome {
        Outcome::Removed(count) => Ok(count),
        other => Err(unexpected(&other)),
    }
}

fn branch_outcome(outcome: Outcome) -> Result<Branch, ApiError> {
    match outcome {
        Outcome::Branch(branch) => Ok(branch),
        other => Err(unexpected(&other)),
    }
}

/// The in-memory staff directory.
#[derive(Debug, Clone)]
pub struct Directory {
    state: State,
    projection: AuthProjection,
    audit_log: AuditLog,
}

impl Directory {
    /// Creates a directory over the given master data and seeds the
    /// records backing the system accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails.
    pub fn new(master: MasterData) -> Result<Self, ApiError> {
        Self::from_state(State::new(master))
    }

    /// Creates a directory over existing records and seeds the system
    /// accounts. Existing records with a system code are tagged instead.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails.
    pub fn from_state(state: State) -> Result<Self, ApiError> {
        let projection: AuthProjection = AuthProjection::recompute(&state.staff, state.version);
        let mut directory: Self = Self {
            state,
            projection,
            audit_log: AuditLog::new(),
        };

        let system: AuthenticatedActor = AuthenticatedActor::system();
        for account in &SYSTEM_ACCOUNTS {
            let draft: StaffDraft = StaffDraft {
                employee_code: String::from(account.employee_code),
                employee_name: String::from(account.employee_name),
                function: account.function,
                branch_name: String::from(UNASSIGNED),
                ..StaffDraft::default()
            };
            directory.execute(
                &system,
                Command::SeedSystemStaff { draft },
                Cause::new(
                    String::from("system_seed"),
                    format!("Seed record for system account '{}'", account.username),
                ),
            )?;
        }

        Ok(directory)
    }

    /// Applies a command and commits the result.
    fn execute(
        &mut self,
        actor: &AuthenticatedActor,
        command: Command,
        cause: Cause,
    ) -> Result<Outcome, ApiError> {
        let name: &'static str = command.name();
        let transition: TransitionResult =
            apply(&self.state, command, actor.to_audit_actor(), cause).map_err(|err| {
                warn!(command = name, actor = %actor.username, error = %err, "Command rejected");
                translate_core_error(err)
            })?;

        Ok(self.commit(transition))
    }

    fn commit(&mut self, transition: TransitionResult) -> Outcome {
        let TransitionResult {
            new_state,
            audit_event,
            outcome,
        } = transition;

        info!(
            action = %audit_event.action.name,
            actor = %audit_event.actor.id,
            version = new_state.version,
            details = audit_event.action.details.as_deref().unwrap_or_default(),
            "Committed"
        );

        self.state = new_state;
        self.audit_log.append(audit_event);
        self.projection = AuthProjection::recompute(&self.state.staff, self.state.version);
        debug!(
            version = self.projection.version(),
            users = self.projection.users().len(),
            "Recomputed login accounts"
        );

        outcome
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// The login accounts derived from the current state.
    #[must_use]
    pub const fn projection(&self) -> &AuthProjection {
        &self.projection
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// Resolves credentials to a login account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` for any mismatch.
    pub fn login(&self, username: &str, password: &str) -> Result<&ProjectedUser, AuthError> {
        match self.projection.login(username, password) {
            Ok(user) => {
                info!(username, role = %user.role, "Login succeeded");
                Ok(user)
            }
            Err(err) => {
                warn!(username, "Login failed");
                Err(err)
            }
        }
    }

    /// Finds a login account by username.
    #[must_use]
    pub fn user(&self, username: &str) -> Option<&ProjectedUser> {
        self.projection.user(username)
    }

    /// Lists login accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn users(&self, actor: &AuthenticatedActor) -> Result<&[ProjectedUser], ApiError> {
        AuthorizationService::authorize_list_users(actor)?;
        Ok(self.projection.users())
    }

    // ------------------------------------------------------------------
    // Staff reads
    // ------------------------------------------------------------------

    /// Lists the staff the actor may see, in collection order.
    #[must_use]
    pub fn list_staff(&self, actor: &AuthenticatedActor) -> Vec<StaffView> {
        let visibility: Visibility = Visibility::for_actor(actor, &self.state);
        visibility
            .filter(&self.state.staff)
            .into_iter()
            .map(|member| StaffView::build(member, &self.state.staff, actor))
            .collect()
    }

    /// Returns one staff member.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the record does not exist or is out
    /// of the actor's scope.
    pub fn get_staff(&self, actor: &AuthenticatedActor, id: StaffId) -> Result<StaffView, ApiError> {
        let member: &StaffMember = self.visible_staff(actor, id)?;
        Ok(StaffView::build(member, &self.state.staff, actor))
    }

    /// Returns every transitive report of a staff member that the actor
    /// may see, in collection order.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the record does not exist or is out
    /// of the actor's scope.
    pub fn subordinates(
        &self,
        actor: &AuthenticatedActor,
        id: StaffId,
    ) -> Result<Vec<StaffView>, ApiError> {
        let member: &StaffMember = self.visible_staff(actor, id)?;
        let info: SubordinateInfo = recursive_subordinate_info(member, &self.state.staff);
        let visibility: Visibility = Visibility::for_actor(actor, &self.state);

        Ok(self
            .state
            .staff
            .iter()
            .filter(|report| info.contains(&report.employee_code) && visibility.can_see(report))
            .map(|report| StaffView::build(report, &self.state.staff, actor))
            .collect())
    }

    fn visible_staff(&self, actor: &AuthenticatedActor, id: StaffId) -> Result<&StaffMember, ApiError> {
        let member: &StaffMember =
            validate_staff_exists(&self.state, id).map_err(translate_domain_error)?;
        if Visibility::for_actor(actor, &self.state).can_see(member) {
            Ok(member)
        } else {
            debug!(actor = %actor.username, staff_id = %id, "Staff record out of scope");
            Err(ApiError::ResourceNotFound {
                resource_type: String::from("Staff member"),
                message: format!("Staff member {id} not found"),
            })
        }
    }

    /// The managers of a branch, derived from staff designations.
    #[must_use]
    pub fn branch_managers(&self, branch_name: &str) -> Vec<&StaffMember> {
        branch_managers(branch_name, &self.state.staff)
    }

    // ------------------------------------------------------------------
    // Staff mutations
    // ------------------------------------------------------------------

    /// Adds a staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the record fails
    /// validation.
    pub fn add_staff(
        &mut self,
        actor: &AuthenticatedActor,
        draft: StaffDraft,
        cause: Cause,
    ) -> Result<StaffMember, ApiError> {
        AuthorizationService::authorize_manage_staff(actor)?;
        staff_outcome(self.execute(actor, Command::AddStaff { draft }, cause)?)
    }

    /// Changes some fields of a staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the record does not
    /// exist, or the change fails validation.
    pub fn update_staff(
        &mut self,
        actor: &AuthenticatedActor,
        id: StaffId,
        patch: StaffPatch,
        cause: Cause,
    ) -> Result<StaffMember, ApiError> {
        AuthorizationService::authorize_manage_staff(actor)?;
        staff_outcome(self.execute(actor, Command::UpdateStaff { id, patch }, cause)?)
    }

    /// Removes a staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the record does not
    /// exist, or it is a system record.
    pub fn remove_staff(
        &mut self,
        actor: &AuthenticatedActor,
        id: StaffId,
        cause: Cause,
    ) -> Result<(), ApiError> {
        AuthorizationService::authorize_manage_staff(actor)?;
        removed_outcome(self.execute(actor, Command::RemoveStaff { id }, cause)?)?;
        Ok(())
    }

    /// Removes several staff members and returns how many went.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn remove_staff_multiple(
        &mut self,
        actor: &AuthenticatedActor,
        ids: Vec<StaffId>,
        cause: Cause,
    ) -> Result<usize, ApiError> {
        AuthorizationService::authorize_manage_staff(actor)?;
        removed_outcome(self.execute(actor, Command::RemoveStaffMultiple { ids }, cause)?)
    }

    /// Removes every non-system staff member except `except`.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn remove_all_staff(
        &mut self,
        actor: &AuthenticatedActor,
        except: Option<StaffId>,
        cause: Cause,
    ) -> Result<usize, ApiError> {
        AuthorizationService::authorize_manage_staff(actor)?;
        removed_outcome(self.execute(actor, Command::RemoveAllStaff { except }, cause)?)
    }

    /// Imports spreadsheet rows leniently.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn bulk_import(
        &mut self,
        actor: &AuthenticatedActor,
        rows: Vec<ImportedStaffRow>,
        cause: Cause,
    ) -> Result<BulkImportSummary, ApiError> {
        AuthorizationService::authorize_import_staff(actor)?;
        let outcome: Outcome = self.execute(actor, Command::BulkImportStaff { rows }, cause)?;
        let Outcome::Imported(summary) = outcome else {
            return Err(unexpected(&outcome));
        };
        for warning in &summary.warnings {
            warn!(warning = %warning, "Bulk import corrected a row");
        }
        Ok(summary)
    }

    /// Parses CSV content and imports the rows leniently.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the CSV cannot be
    /// parsed.
    pub fn import_csv(
        &mut self,
        actor: &AuthenticatedActor,
        csv_content: &str,
        cause: Cause,
    ) -> Result<BulkImportSummary, ApiError> {
        AuthorizationService::authorize_import_staff(actor)?;
        let rows: Vec<ImportedStaffRow> = csv_import::parse_rows(csv_content)?;
        self.bulk_import(actor, rows, cause)
    }

    /// Previews CSV content without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the CSV cannot be
    /// parsed.
    pub fn preview_csv(
        &self,
        actor: &AuthenticatedActor,
        csv_content: &str,
    ) -> Result<CsvPreviewResult, ApiError> {
        AuthorizationService::authorize_import_staff(actor)?;
        Ok(csv_import::preview(csv_content, &self.state)?)
    }

    /// Writes the staff the actor may see as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV writer fails.
    pub fn export_csv(&self, actor: &AuthenticatedActor) -> Result<String, ApiError> {
        let visibility: Visibility = Visibility::for_actor(actor, &self.state);
        let visible: Vec<StaffMember> = visibility
            .filter(&self.state.staff)
            .into_iter()
            .cloned()
            .collect();
        Ok(csv_import::export(&visible)?)
    }

    /// Moves staff members to other branches, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, a record does not
    /// exist, or a target branch is unknown.
    pub fn reassign_staff_branches(
        &mut self,
        actor: &AuthenticatedActor,
        assignments: Vec<(StaffId, String)>,
        cause: Cause,
    ) -> Result<Vec<StaffMember>, ApiError> {
        AuthorizationService::authorize_manage_staff(actor)?;
        staff_list_outcome(self.execute(
            actor,
            Command::ReassignStaffBranches { assignments },
            cause,
        )?)
    }

    /// Gives several staff members the same designation.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or a record does not
    /// exist.
    pub fn bulk_update_designation(
        &mut self,
        actor: &AuthenticatedActor,
        ids: Vec<StaffId>,
        designation: Designation,
        cause: Cause,
    ) -> Result<Vec<StaffMember>, ApiError> {
        AuthorizationService::authorize_manage_staff(actor)?;
        staff_list_outcome(self.execute(
            actor,
            Command::BulkUpdateDesignation { ids, designation },
            cause,
        )?)
    }

    // ------------------------------------------------------------------
    // Master data
    // ------------------------------------------------------------------

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.state.master.zones
    }

    #[must_use]
    pub fn regions_in_zone(&self, zone_name: &str) -> Vec<&Region> {
        self.state.master.regions_in_zone(zone_name)
    }

    #[must_use]
    pub fn districts_in_region(&self, region_name: &str) -> Vec<&District> {
        self.state.master.districts_in_region(region_name)
    }

    #[must_use]
    pub fn branches(&self) -> &[Branch] {
        &self.state.master.branches
    }

    /// Adds a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the name is empty
    /// or taken.
    pub fn add_zone(
        &mut self,
        actor: &AuthenticatedActor,
        name: String,
        cause: Cause,
    ) -> Result<Zone, ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        match self.execute(actor, Command::AddZone { name }, cause)? {
            Outcome::Zone(zone) => Ok(zone),
            other => Err(unexpected(&other)),
        }
    }

    /// Adds a region to an existing zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the name is empty or
    /// taken, or the zone does not exist.
    pub fn add_region(
        &mut self,
        actor: &AuthenticatedActor,
        name: String,
        zone_name: String,
        cause: Cause,
    ) -> Result<Region, ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        match self.execute(actor, Command::AddRegion { name, zone_name }, cause)? {
            Outcome::Region(region) => Ok(region),
            other => Err(unexpected(&other)),
        }
    }

    /// Adds a district to an existing region.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the name is empty or
    /// taken, or the region does not exist.
    pub fn add_district(
        &mut self,
        actor: &AuthenticatedActor,
        name: String,
        region_name: String,
        cause: Cause,
    ) -> Result<District, ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        match self.execute(actor, Command::AddDistrict { name, region_name }, cause)? {
            Outcome::District(district) => Ok(district),
            other => Err(unexpected(&other)),
        }
    }

    /// Adds a branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the branch fails
    /// validation.
    pub fn add_branch(
        &mut self,
        actor: &AuthenticatedActor,
        draft: BranchDraft,
        cause: Cause,
    ) -> Result<Branch, ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        branch_outcome(self.execute(actor, Command::AddBranch { draft }, cause)?)
    }

    /// Changes a branch. Renames and moves carry over to its staff.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the branch does not
    /// exist, or the change fails validation.
    pub fn update_branch(
        &mut self,
        actor: &AuthenticatedActor,
        id: BranchId,
        patch: BranchPatch,
        cause: Cause,
    ) -> Result<Branch, ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        branch_outcome(self.execute(actor, Command::UpdateBranch { id, patch }, cause)?)
    }

    /// Removes a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the zone does not
    /// exist, or something still references it.
    pub fn remove_zone(
        &mut self,
        actor: &AuthenticatedActor,
        id: ZoneId,
        cause: Cause,
    ) -> Result<(), ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        removed_outcome(self.execute(actor, Command::RemoveZone { id }, cause)?)?;
        Ok(())
    }

    /// Removes a region.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the region does not
    /// exist, or something still references it.
    pub fn remove_region(
        &mut self,
        actor: &AuthenticatedActor,
        id: RegionId,
        cause: Cause,
    ) -> Result<(), ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        removed_outcome(self.execute(actor, Command::RemoveRegion { id }, cause)?)?;
        Ok(())
    }

    /// Removes a district.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the district does not
    /// exist, or something still references it.
    pub fn remove_district(
        &mut self,
        actor: &AuthenticatedActor,
        id: DistrictId,
        cause: Cause,
    ) -> Result<(), ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        removed_outcome(self.execute(actor, Command::RemoveDistrict { id }, cause)?)?;
        Ok(())
    }

    /// Removes a branch no staff member is assigned to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BranchInUse` listing every staff member still on
    /// the branch. Nothing is reassigned.
    pub fn remove_branch(
        &mut self,
        actor: &AuthenticatedActor,
        id: BranchId,
        cause: Cause,
    ) -> Result<(), ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        removed_outcome(self.execute(actor, Command::RemoveBranch { id }, cause)?)?;
        Ok(())
    }

    /// Moves every staff member off a branch, then removes it.
    ///
    /// Each blocking staff member goes to their entry in `overrides`, or
    /// else to `default_branch`. Both steps are applied to a scratch state
    /// and committed together, so a failure in either leaves the directory
    /// unchanged. Returns the number of staff reassigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the branch does not
    /// exist, a blocking staff member has no target, a target is unknown,
    /// or the branch is still in use after reassignment.
    pub fn reassign_and_remove_branch(
        &mut self,
        actor: &AuthenticatedActor,
        id: BranchId,
        default_branch: Option<&str>,
        overrides: &[(StaffId, String)],
        cause: &Cause,
    ) -> Result<usize, ApiError> {
        AuthorizationService::authorize_manage_organization(actor)?;
        AuthorizationService::authorize_manage_staff(actor)?;

        let branch_name: String = validate_branch_exists(&self.state, id)
            .map_err(translate_domain_error)?
            .branch_name
            .clone();

        let mut assignments: Vec<(StaffId, String)> = Vec::new();
        for member in self.state.staff_on_branch(&branch_name) {
            let target: &str = overrides
                .iter()
                .find(|(staff_id, _)| *staff_id == member.id)
                .map(|(_, target)| target.as_str())
                .or(default_branch)
                .ok_or_else(|| {
                    ApiError::field(
                        FIELD_BRANCH_NAME,
                        format!(
                            "No target branch given for '{}'",
                            member.employee_code
                        ),
                    )
                })?;
            assignments.push((member.id, target.to_string()));
        }

        let reassigned: usize = assignments.len();
        let mut transitions: Vec<TransitionResult> = Vec::with_capacity(2);
        let mut scratch: State = self.state.clone();

        if !assignments.is_empty() {
            let moved: TransitionResult = apply(
                &scratch,
                Command::ReassignStaffBranches { assignments },
                actor.to_audit_actor(),
                cause.clone(),
            )
            .map_err(translate_core_error)?;
            scratch = moved.new_state.clone();
            transitions.push(moved);
        }

        let removed: TransitionResult = apply(
            &scratch,
            Command::RemoveBranch { id },
            actor.to_audit_actor(),
            cause.clone(),
        )
        .map_err(|err| {
            warn!(branch = %branch_name, error = %err, "Branch removal rejected after reassignment");
            translate_core_error(err)
        })?;
        transitions.push(removed);

        for transition in transitions {
            self.commit(transition);
        }
        info!(branch = %branch_name, reassigned, "Reassigned staff and removed branch");
        Ok(reassigned)
    }

    // ------------------------------------------------------------------
    // Audit
    // ------------------------------------------------------------------

    /// Audit records after `since` (all records when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn audit(
        &self,
        actor: &AuthenticatedActor,
        since: Option<u64>,
    ) -> Result<&[AuditRecord], ApiError> {
        AuthorizationService::authorize_view_audit(actor)?;
        Ok(self.audit_log.since(since.unwrap_or(0)))
    }
}
