// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod capabilities;
mod csv_import;
mod directory;
mod error;
mod projection;
mod request_response;
mod views;
mod visibility;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use capabilities::{
    Capability, GlobalCapabilities, StaffCapabilities, compute_global_capabilities,
    compute_staff_capabilities,
};
pub use csv_import::{
    COLUMNS, CsvError, CsvPreviewResult, CsvRowResult, CsvRowStatus, export, parse_rows, preview,
};
pub use directory::Directory;
pub use error::{
    ApiError, AuthError, LOGIN_FAILED_MESSAGE, translate_core_error, translate_domain_error,
};
pub use projection::{AuthProjection, ProjectedUser, SYSTEM_ACCOUNTS, SystemAccount};
pub use request_response::{
    AuditResponse, BranchOverride, BulkDesignationRequest, CreateDistrictRequest,
    CreateRegionRequest, CreateStaffRequest, CreateZoneRequest, DeleteAllStaffRequest,
    DeleteStaffRequest, ImportResponse, ListStaffResponse, ListUsersResponse, LoginRequest,
    LoginResponse, PreviewResponse, ReassignAndDeleteRequest, RemovedResponse,
    UpdateStaffRequest, WhoAmIResponse,
};
pub use views::{StaffView, SubordinateSummary, UNKNOWN_MANAGER, reports_to_name};
pub use visibility::Visibility;
