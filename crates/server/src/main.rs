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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod demo;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use daily_reporting::BulkImportSummary;
use daily_reporting_api::{
    ApiError, AuditResponse, AuthenticatedActor, BulkDesignationRequest, CreateDistrictRequest,
    CreateRegionRequest, CreateStaffRequest, CreateZoneRequest, DeleteAllStaffRequest,
    DeleteStaffRequest, Directory, GlobalCapabilities, ImportResponse, ListStaffResponse,
    ListUsersResponse, LoginRequest, LoginResponse, PreviewResponse, ProjectedUser,
    ReassignAndDeleteRequest, RemovedResponse, StaffView, SubordinateSummary, UpdateStaffRequest,
    WhoAmIResponse, compute_global_capabilities,
};
use daily_reporting_audit::Cause;
use daily_reporting_domain::{
    Branch, BranchDraft, BranchId, BranchPatch, Designation, District, DistrictId, MasterData,
    Region, RegionId, StaffDraft, StaffId, StaffMember, StaffPatch, Zone, ZoneId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use session::{SessionStore, SessionUser};

/// Daily Reporting Server - HTTP server for the staff directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// JSON file with zones, regions, districts and branches.
    /// If not provided, a small demo hierarchy is loaded.
    #[arg(long)]
    master_data: Option<PathBuf>,

    /// Staff CSV imported at startup
    #[arg(long)]
    seed_csv: Option<PathBuf>,
}

/// Application state shared across handlers.
///
/// The directory and the session table are locked independently; no
/// handler holds both at once.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Mutex<Directory>>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    fn new(directory: Directory) -> Self {
        Self {
            directory: Arc::new(Mutex::new(directory)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    /// Always true.
    error: bool,
    message: String,
    /// Per-field messages for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field_errors: Option<BTreeMap<String, String>>,
    /// Staff blocking a branch deletion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    staff: Option<Vec<StaffMember>>,
}

/// HTTP error wrapper.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
    field_errors: Option<BTreeMap<String, String>>,
    staff: Option<Vec<StaffMember>>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            field_errors: None,
            staff: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            field_errors: self.field_errors,
            staff: self.staff,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self::new(StatusCode::UNAUTHORIZED, message),
            ApiError::Unauthorized { .. } => Self::new(StatusCode::FORBIDDEN, message),
            ApiError::ValidationFailed { errors } => Self {
                field_errors: Some(errors),
                ..Self::new(StatusCode::BAD_REQUEST, message)
            },
            ApiError::InvalidCsvFormat { .. } => Self::new(StatusCode::BAD_REQUEST, message),
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::BranchInUse { staff, .. } => Self {
                staff: Some(staff),
                ..Self::new(StatusCode::CONFLICT, message)
            },
            ApiError::DomainRuleViolation { .. } => Self::new(StatusCode::CONFLICT, message),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

/// Builds the audit cause for an HTTP request.
fn request_cause(action: &str) -> Cause {
    Cause::new(String::from("http_request"), format!("{action} via HTTP API"))
}

/// A branch together with its current managers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BranchResponse {
    #[serde(flatten)]
    branch: Branch,
    /// Branch-manager-like staff currently on the branch.
    managers: Vec<SubordinateSummary>,
}

#[derive(Debug, Serialize)]
struct ListBranchesResponse {
    branches: Vec<BranchResponse>,
}

#[derive(Debug, Serialize)]
struct ListZonesResponse {
    zones: Vec<Zone>,
}

#[derive(Debug, Serialize)]
struct ListRegionsResponse {
    zone: String,
    regions: Vec<Region>,
}

#[derive(Debug, Serialize)]
struct ListDistrictsResponse {
    region: String,
    districts: Vec<District>,
}

/// Response for reassign-and-delete.
#[derive(Debug, Serialize)]
struct ReassignResponse {
    reassigned: usize,
}

#[derive(Debug, Deserialize)]
struct AuditQuery {
    /// Only records with a greater sequence number.
    since: Option<u64>,
}

// ----------------------------------------------------------------------
// Session handlers
// ----------------------------------------------------------------------

/// Handler for POST `/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %req.username, "Handling login request");

    let directory = app_state.directory.lock().await;
    let user: ProjectedUser = directory
        .login(&req.username, &req.password)
        .map_err(ApiError::from)?
        .clone();
    drop(directory);

    let session_token: String = app_state.sessions.lock().await.create(&user.username);
    let capabilities: GlobalCapabilities = compute_global_capabilities(&user.to_actor());

    Ok(Json(LoginResponse {
        session_token,
        user,
        capabilities,
    }))
}

/// Handler for POST `/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, token): SessionUser,
) -> StatusCode {
    info!(username = %actor.username, "Handling logout request");
    app_state.sessions.lock().await.remove(&token);
    StatusCode::NO_CONTENT
}

/// Handler for GET `/whoami`.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let directory = app_state.directory.lock().await;
    let user: ProjectedUser = directory.user(&actor.username).cloned().ok_or_else(|| {
        HttpError::new(
            StatusCode::UNAUTHORIZED,
            String::from("Session user no longer exists"),
        )
    })?;
    drop(directory);

    Ok(Json(WhoAmIResponse {
        capabilities: compute_global_capabilities(&actor),
        user,
    }))
}

/// Handler for GET `/users`.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let directory = app_state.directory.lock().await;
    let users: Vec<ProjectedUser> = directory.users(&actor)?.to_vec();
    Ok(Json(ListUsersResponse {
        users,
        version: directory.projection().version(),
    }))
}

// ----------------------------------------------------------------------
// Staff handlers
// ----------------------------------------------------------------------

/// Handler for GET `/staff`. Scoped to what the caller may see.
async fn handle_list_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Json<ListStaffResponse> {
    let directory = app_state.directory.lock().await;
    Json(ListStaffResponse {
        staff: directory.list_staff(&actor),
    })
}

/// Handler for POST `/staff`.
async fn handle_create_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<CreateStaffRequest>,
) -> Result<Json<StaffView>, HttpError> {
    info!(
        actor = %actor.username,
        employee_code = %req.employee_code,
        "Handling create_staff request"
    );

    let draft: StaffDraft = req.into_draft()?;
    let mut directory = app_state.directory.lock().await;
    let created: StaffMember = directory.add_staff(&actor, draft, request_cause("Add staff"))?;
    Ok(Json(directory.get_staff(&actor, created.id)?))
}

/// Handler for GET `/staff/{id}`.
async fn handle_get_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<StaffId>,
) -> Result<Json<StaffView>, HttpError> {
    let directory = app_state.directory.lock().await;
    Ok(Json(directory.get_staff(&actor, id)?))
}

/// Handler for PATCH `/staff/{id}`.
async fn handle_update_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<StaffId>,
    Json(req): Json<UpdateStaffRequest>,
) -> Result<Json<StaffView>, HttpError> {
    info!(actor = %actor.username, staff_id = %id, "Handling update_staff request");

    let patch: StaffPatch = req.into_patch()?;
    let mut directory = app_state.directory.lock().await;
    directory.update_staff(&actor, id, patch, request_cause("Update staff"))?;
    Ok(Json(directory.get_staff(&actor, id)?))
}

/// Handler for DELETE `/staff/{id}`.
async fn handle_delete_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<StaffId>,
) -> Result<Json<RemovedResponse>, HttpError> {
    info!(actor = %actor.username, staff_id = %id, "Handling delete_staff request");

    let mut directory = app_state.directory.lock().await;
    directory.remove_staff(&actor, id, request_cause("Remove staff"))?;
    Ok(Json(RemovedResponse { removed: 1 }))
}

/// Handler for POST `/staff/delete`.
async fn handle_delete_staff_multiple(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<DeleteStaffRequest>,
) -> Result<Json<RemovedResponse>, HttpError> {
    info!(actor = %actor.username, count = req.ids.len(), "Handling delete_staff_multiple request");

    let mut directory = app_state.directory.lock().await;
    let removed: usize =
        directory.remove_staff_multiple(&actor, req.ids, request_cause("Remove staff"))?;
    Ok(Json(RemovedResponse { removed }))
}

/// Handler for POST `/staff/delete_all`.
async fn handle_delete_all_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<DeleteAllStaffRequest>,
) -> Result<Json<RemovedResponse>, HttpError> {
    info!(actor = %actor.username, "Handling delete_all_staff request");

    let mut directory = app_state.directory.lock().await;
    let removed: usize =
        directory.remove_all_staff(&actor, req.except, request_cause("Remove all staff"))?;
    Ok(Json(RemovedResponse { removed }))
}

/// Handler for POST `/staff/designation`.
async fn handle_bulk_designation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<BulkDesignationRequest>,
) -> Result<Json<ListStaffResponse>, HttpError> {
    let designation: Designation = req.designation()?;
    info!(
        actor = %actor.username,
        count = req.ids.len(),
        designation = %designation.label(),
        "Handling bulk_designation request"
    );

    let mut directory = app_state.directory.lock().await;
    let updated: Vec<StaffMember> = directory.bulk_update_designation(
        &actor,
        req.ids,
        designation,
        request_cause("Bulk designation change"),
    )?;
    let staff: Vec<StaffView> = updated
        .iter()
        .map(|member| directory.get_staff(&actor, member.id))
        .collect::<Result<Vec<StaffView>, ApiError>>()?;
    Ok(Json(ListStaffResponse { staff }))
}

/// Handler for POST `/staff/import`. The body is CSV text.
async fn handle_import_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    body: String,
) -> Result<Json<ImportResponse>, HttpError> {
    info!(actor = %actor.username, bytes = body.len(), "Handling import_staff request");

    let mut directory = app_state.directory.lock().await;
    let summary: BulkImportSummary =
        directory.import_csv(&actor, &body, request_cause("Import staff"))?;
    Ok(Json(ImportResponse::from(summary)))
}

/// Handler for POST `/staff/import/preview`. Never mutates.
async fn handle_preview_import(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    body: String,
) -> Result<Json<PreviewResponse>, HttpError> {
    let directory = app_state.directory.lock().await;
    Ok(Json(PreviewResponse {
        preview: directory.preview_csv(&actor, &body)?,
    }))
}

/// Handler for GET `/staff/export`. Scoped to what the caller may see.
async fn handle_export_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Response, HttpError> {
    let directory = app_state.directory.lock().await;
    let csv: String = directory.export_csv(&actor)?;
    drop(directory);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"staff.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Handler for GET `/staff/{id}/subordinates`.
async fn handle_list_subordinates(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<StaffId>,
) -> Result<Json<ListStaffResponse>, HttpError> {
    let directory = app_state.directory.lock().await;
    Ok(Json(ListStaffResponse {
        staff: directory.subordinates(&actor, id)?,
    }))
}

// ----------------------------------------------------------------------
// Branch handlers
// ----------------------------------------------------------------------

/// Handler for GET `/branches`.
async fn handle_list_branches(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_, _): SessionUser,
) -> Json<ListBranchesResponse> {
    let directory = app_state.directory.lock().await;
    let branches: Vec<BranchResponse> = directory
        .branches()
        .iter()
        .map(|branch| BranchResponse {
            managers: directory
                .branch_managers(&branch.branch_name)
                .into_iter()
                .map(SubordinateSummary::from)
                .collect(),
            branch: branch.clone(),
        })
        .collect();
    Json(ListBranchesResponse { branches })
}

/// Handler for POST `/branches`.
async fn handle_create_branch(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(draft): Json<BranchDraft>,
) -> Result<Json<Branch>, HttpError> {
    info!(actor = %actor.username, branch = %draft.branch_name, "Handling create_branch request");

    let mut directory = app_state.directory.lock().await;
    Ok(Json(directory.add_branch(
        &actor,
        draft,
        request_cause("Add branch"),
    )?))
}

/// Handler for PATCH `/branches/{id}`.
async fn handle_update_branch(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<BranchId>,
    Json(patch): Json<BranchPatch>,
) -> Result<Json<Branch>, HttpError> {
    info!(actor = %actor.username, branch_id = %id, "Handling update_branch request");

    let mut directory = app_state.directory.lock().await;
    Ok(Json(directory.update_branch(
        &actor,
        id,
        patch,
        request_cause("Update branch"),
    )?))
}

/// Handler for DELETE `/branches/{id}`.
///
/// Responds 409 with the blocking staff while anyone is still assigned.
async fn handle_delete_branch(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<BranchId>,
) -> Result<StatusCode, HttpError> {
    info!(actor = %actor.username, branch_id = %id, "Handling delete_branch request");

    let mut directory = app_state.directory.lock().await;
    directory.remove_branch(&actor, id, request_cause("Remove branch"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/branches/{id}/reassign_and_delete`.
async fn handle_reassign_and_delete_branch(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<BranchId>,
    Json(req): Json<ReassignAndDeleteRequest>,
) -> Result<Json<ReassignResponse>, HttpError> {
    info!(
        actor = %actor.username,
        branch_id = %id,
        overrides = req.overrides.len(),
        "Handling reassign_and_delete_branch request"
    );

    let overrides: Vec<(StaffId, String)> = req
        .overrides
        .into_iter()
        .map(|entry| (entry.staff_id, entry.branch_name))
        .collect();

    let mut directory = app_state.directory.lock().await;
    let reassigned: usize = directory.reassign_and_remove_branch(
        &actor,
        id,
        req.default_branch.as_deref(),
        &overrides,
        &request_cause("Reassign staff and remove branch"),
    )?;
    Ok(Json(ReassignResponse { reassigned }))
}

// ----------------------------------------------------------------------
// Zone, region and district handlers
// ----------------------------------------------------------------------

/// Handler for GET `/zones`.
async fn handle_list_zones(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_, _): SessionUser,
) -> Json<ListZonesResponse> {
    let directory = app_state.directory.lock().await;
    Json(ListZonesResponse {
        zones: directory.zones().to_vec(),
    })
}

/// Handler for POST `/zones`.
async fn handle_create_zone(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<CreateZoneRequest>,
) -> Result<Json<Zone>, HttpError> {
    info!(actor = %actor.username, zone = %req.name, "Handling create_zone request");

    let mut directory = app_state.directory.lock().await;
    Ok(Json(directory.add_zone(
        &actor,
        req.name,
        request_cause("Add zone"),
    )?))
}

/// Handler for DELETE `/zones/{zone}`.
async fn handle_delete_zone(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<ZoneId>,
) -> Result<StatusCode, HttpError> {
    let mut directory = app_state.directory.lock().await;
    directory.remove_zone(&actor, id, request_cause("Remove zone"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/zones/{zone}/regions`.
async fn handle_list_regions(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_, _): SessionUser,
    Path(zone): Path<String>,
) -> Json<ListRegionsResponse> {
    let directory = app_state.directory.lock().await;
    let regions: Vec<Region> = directory
        .regions_in_zone(&zone)
        .into_iter()
        .cloned()
        .collect();
    Json(ListRegionsResponse { zone, regions })
}

/// Handler for POST `/regions`.
async fn handle_create_region(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<CreateRegionRequest>,
) -> Result<Json<Region>, HttpError> {
    info!(actor = %actor.username, region = %req.name, zone = %req.zone, "Handling create_region request");

    let mut directory = app_state.directory.lock().await;
    Ok(Json(directory.add_region(
        &actor,
        req.name,
        req.zone,
        request_cause("Add region"),
    )?))
}

/// Handler for DELETE `/regions/{region}`.
async fn handle_delete_region(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<RegionId>,
) -> Result<StatusCode, HttpError> {
    let mut directory = app_state.directory.lock().await;
    directory.remove_region(&actor, id, request_cause("Remove region"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/regions/{region}/districts`.
async fn handle_list_districts(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_, _): SessionUser,
    Path(region): Path<String>,
) -> Json<ListDistrictsResponse> {
    let directory = app_state.directory.lock().await;
    let districts: Vec<District> = directory
        .districts_in_region(&region)
        .into_iter()
        .cloned()
        .collect();
    Json(ListDistrictsResponse { region, districts })
}

/// Handler for POST `/districts`.
async fn handle_create_district(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<CreateDistrictRequest>,
) -> Result<Json<District>, HttpError> {
    info!(actor = %actor.username, district = %req.name, region = %req.region, "Handling create_district request");

    let mut directory = app_state.directory.lock().await;
    Ok(Json(directory.add_district(
        &actor,
        req.name,
        req.region,
        request_cause("Add district"),
    )?))
}

/// Handler for DELETE `/districts/{id}`.
async fn handle_delete_district(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(id): Path<DistrictId>,
) -> Result<StatusCode, HttpError> {
    let mut directory = app_state.directory.lock().await;
    directory.remove_district(&actor, id, request_cause("Remove district"))?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------
// Audit
// ----------------------------------------------------------------------

/// Handler for GET `/audit`.
async fn handle_audit(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Query(query): Query<AuditQuery>,
) -> Result<Json<AuditResponse>, HttpError> {
    let directory = app_state.directory.lock().await;
    Ok(Json(AuditResponse {
        records: directory.audit(&actor, query.since)?.to_vec(),
    }))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route("/users", get(handle_list_users))
        .route("/staff", get(handle_list_staff).post(handle_create_staff))
        .route(
            "/staff/{id}",
            get(handle_get_staff)
                .patch(handle_update_staff)
                .delete(handle_delete_staff),
        )
        .route("/staff/{id}/subordinates", get(handle_list_subordinates))
        .route("/staff/delete", post(handle_delete_staff_multiple))
        .route("/staff/delete_all", post(handle_delete_all_staff))
        .route("/staff/designation", post(handle_bulk_designation))
        .route("/staff/import", post(handle_import_staff))
        .route("/staff/import/preview", post(handle_preview_import))
        .route("/staff/export", get(handle_export_staff))
        .route(
            "/branches",
            get(handle_list_branches).post(handle_create_branch),
        )
        .route(
            "/branches/{id}",
            patch(handle_update_branch).delete(handle_delete_branch),
        )
        .route(
            "/branches/{id}/reassign_and_delete",
            post(handle_reassign_and_delete_branch),
        )
        .route("/zones", get(handle_list_zones).post(handle_create_zone))
        .route("/zones/{zone}", delete(handle_delete_zone))
        .route("/zones/{zone}/regions", get(handle_list_regions))
        .route("/regions", post(handle_create_region))
        .route("/regions/{region}", delete(handle_delete_region))
        .route("/regions/{region}/districts", get(handle_list_districts))
        .route("/districts", post(handle_create_district))
        .route("/districts/{id}", delete(handle_delete_district))
        .route("/audit", get(handle_audit))
        .with_state(app_state)
}

/// Builds the directory from the command-line inputs.
fn load_directory(args: &Args) -> Result<Directory, Box<dyn std::error::Error>> {
    let mut directory: Directory = if let Some(path) = &args.master_data {
        info!("Loading master data from: {}", path.display());
        let content: String = std::fs::read_to_string(path)?;
        let master: MasterData = serde_json::from_str(&content)?;
        Directory::new(master)?
    } else {
        info!("Loading demo master data");
        let mut directory: Directory = Directory::new(MasterData::new())?;
        demo::load_demo_hierarchy(&mut directory)?;
        directory
    };

    if let Some(path) = &args.seed_csv {
        info!("Importing staff from: {}", path.display());
        let content: String = std::fs::read_to_string(path)?;
        let summary: BulkImportSummary = directory.import_csv(
            &AuthenticatedActor::system(),
            &content,
            Cause::new(
                String::from("startup_seed"),
                format!("Seed staff from {}", path.display()),
            ),
        )?;
        info!(
            added = summary.added,
            skipped = summary.skipped,
            warnings = summary.warnings.len(),
            "Seed import complete"
        );
    }

    Ok(directory)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Daily Reporting Server");

    let directory: Directory = load_directory(&args)?;
    info!(
        staff = directory.state().staff.len(),
        branches = directory.branches().len(),
        "Directory ready"
    );

    let app: Router = build_router(AppState::new(directory));

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
