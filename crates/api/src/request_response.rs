// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use daily_reporting::BulkImportSummary;
use daily_reporting_audit::AuditRecord;
use daily_reporting_domain::{
    Designation, DomainError, FIELD_FUNCTION, StaffDraft, StaffId, StaffPatch,
};
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::capabilities::GlobalCapabilities;
use crate::csv_import::CsvPreviewResult;
use crate::error::ApiError;
use crate::projection::ProjectedUser;
use crate::views::StaffView;

/// Distinguishes an absent field from an explicit `null`.
///
/// With `#[serde(default)]` an absent field stays `None` while `null`
/// becomes `Some(None)`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Parses a designation label strictly, as forms do.
fn parse_function(label: &str) -> Result<Designation, ApiError> {
    Designation::parse(label).map_err(|err: DomainError| ApiError::field(FIELD_FUNCTION, err.to_string()))
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LoginRequest {
    /// An employee code or a system account username.
    pub username: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub session_token: String,
    pub user: ProjectedUser,
    pub capabilities: GlobalCapabilities,
}

/// API response describing the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub user: ProjectedUser,
    pub capabilities: GlobalCapabilities,
}

/// API response listing login accounts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersResponse {
    pub users: Vec<ProjectedUser>,
    /// The state version the accounts were derived from.
    pub version: u64,
}

/// API request to add a staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateStaffRequest {
    pub employee_code: String,
    pub employee_name: String,
    pub contact_number: String,
    /// The designation label.
    pub function: String,
    pub branch_name: String,
    pub managed_zones: BTreeSet<String>,
    pub managed_branches: BTreeSet<String>,
    pub reports_to_employee_code: Option<String>,
}

impl CreateStaffRequest {
    /// Converts the request into a domain draft.
    ///
    /// # Errors
    ///
    /// Returns a `function` field error for an unknown designation.
    pub fn into_draft(self) -> Result<StaffDraft, ApiError> {
        Ok(StaffDraft {
            function: parse_function(&self.function)?,
            employee_code: self.employee_code,
            employee_name: self.employee_name,
            contact_number: self.contact_number,
            branch_name: self.branch_name,
            managed_zones: self.managed_zones,
            managed_branches: self.managed_branches,
            reports_to: self.reports_to_employee_code,
        })
    }
}

/// API request to change some fields of a staff member.
///
/// Absent fields are left unchanged. `reportsToEmployeeCode: null` clears
/// the manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateStaffRequest {
    pub employee_code: Option<String>,
    pub employee_name: Option<String>,
    pub contact_number: Option<String>,
    pub function: Option<String>,
    pub branch_name: Option<String>,
    pub managed_zones: Option<BTreeSet<String>>,
    pub managed_branches: Option<BTreeSet<String>>,
    #[serde(deserialize_with = "deserialize_some")]
    pub reports_to_employee_code: Option<Option<String>>,
}

impl UpdateStaffRequest {
    /// Converts the request into a domain patch.
    ///
    /// # Errors
    ///
    /// Returns a `function` field error for an unknown designation.
    pub fn into_patch(self) -> Result<StaffPatch, ApiError> {
        Ok(StaffPatch {
            function: self.function.as_deref().map(parse_function).transpose()?,
            employee_code: self.employee_code,
            employee_name: self.employee_name,
            contact_number: self.contact_number,
            branch_name: self.branch_name,
            managed_zones: self.managed_zones,
            managed_branches: self.managed_branches,
            reports_to: self.reports_to_employee_code,
        })
    }
}

/// API request to remove several staff members.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct DeleteStaffRequest {
    pub ids: Vec<StaffId>,
}

/// API request to remove every non-system staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct DeleteAllStaffRequest {
    /// A record to keep.
    pub except: Option<StaffId>,
}

/// API request to give several staff members the same designation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct BulkDesignationRequest {
    pub ids: Vec<StaffId>,
    /// The designation label.
    pub function: String,
}

impl BulkDesignationRequest {
    /// Parses the designation label.
    ///
    /// # Errors
    ///
    /// Returns a `function` field error for an unknown designation.
    pub fn designation(&self) -> Result<Designation, ApiError> {
        parse_function(&self.function)
    }
}

/// A per-staff target branch in a reassign-and-delete request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchOverride {
    pub staff_id: StaffId,
    pub branch_name: String,
}

/// API request to move every staff member off a branch and delete it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReassignAndDeleteRequest {
    /// Target for every blocking staff member without an override.
    pub default_branch: Option<String>,
    pub overrides: Vec<BranchOverride>,
}

/// API request to add a zone.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateZoneRequest {
    pub name: String,
}

/// API request to add a region.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateRegionRequest {
    pub name: String,
    /// The parent zone name.
    pub zone: String,
}

/// API request to add a district.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateDistrictRequest {
    pub name: String,
    /// The parent region name.
    pub region: String,
}

/// API response listing staff.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStaffResponse {
    pub staff: Vec<StaffView>,
}

/// API response for a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RemovedResponse {
    pub removed: usize,
}

/// API response for a bulk import.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub added: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

impl From<BulkImportSummary> for ImportResponse {
    fn from(summary: BulkImportSummary) -> Self {
        Self {
            added: summary.added,
            skipped: summary.skipped,
            warnings: summary.warnings,
        }
    }
}

/// API response for a CSV preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub preview: CsvPreviewResult,
}

/// API response listing audit records.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuditResponse {
    pub records: Vec<AuditRecord>,
}
