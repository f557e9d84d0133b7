// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Test app over the demo hierarchy with no staff besides the system records.
fn create_test_app() -> Router {
    let mut directory: Directory = Directory::new(MasterData::new()).unwrap();
    demo::load_demo_hierarchy(&mut directory).unwrap();
    build_router(AppState::new(directory))
}

/// Sends a request and returns the status with the JSON body
/// (`Value::Null` for an empty body).
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response: Response = app.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

/// Sends a plain-text body, as the CSV endpoints expect.
async fn send_text(app: &Router, uri: &str, token: &str, body: &str) -> (HttpStatusCode, Value) {
    let request: Request<Body> = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header("content-type", "text/csv")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response: Response = app.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK, "login failed: {body}");
    body["sessionToken"].as_str().unwrap().to_string()
}

fn staff_body(code: &str, function: &str, branch: &str, reports_to: Option<&str>) -> Value {
    json!({
        "employeeCode": code,
        "employeeName": format!("Staff {code}"),
        "contactNumber": "9000000000",
        "function": function,
        "branchName": branch,
        "reportsToEmployeeCode": reports_to,
    })
}

async fn create_staff(app: &Router, token: &str, body: Value) -> Value {
    let (status, created) = send(app, "POST", "/staff", Some(token), Some(body)).await;
    assert_eq!(status, HttpStatusCode::OK, "create failed: {created}");
    created
}

#[tokio::test]
async fn test_login_with_wrong_password_returns_generic_401() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "admin", "password": "wrong" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid Employee Code or password");
}

#[tokio::test]
async fn test_login_as_admin_returns_token_and_capabilities() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "admin", "password": "admin123" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert!(
        body["sessionToken"]
            .as_str()
            .unwrap()
            .starts_with("session_")
    );
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["capabilities"]["canManageStaff"], true);
}

#[tokio::test]
async fn test_request_without_token_is_rejected() {
    let app: Router = create_test_app();

    let (status, _) = send(&app, "GET", "/staff", None, None).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/staff", Some("session_bogus"), None).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app: Router = create_test_app();
    let token: String = login(&app, "admin", "admin123").await;

    let (status, _) = send(&app, "POST", "/logout", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/whoami", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_added_staff_can_log_in_with_their_code() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;

    let created: Value = create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Main Branch", None),
    )
    .await;
    assert_eq!(created["zone"], "North Zone");
    assert_eq!(created["districtName"], "Central District");
    assert_eq!(created["reportsToName"], "N/A");

    let token: String = login(&app, "BO100", "BO100").await;
    let (status, whoami) = send(&app, "GET", "/whoami", Some(&token), None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(whoami["user"]["role"], "user");
    assert_eq!(whoami["capabilities"]["canManageStaff"], false);
}

#[tokio::test]
async fn test_invalid_staff_returns_field_errors() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;

    let mut body: Value = staff_body("BO100", "BRANCH OFFICER", "Nowhere Branch", None);
    body["contactNumber"] = json!("12345");
    let (status, error) = send(&app, "POST", "/staff", Some(&admin), Some(body)).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(error["fieldErrors"]["contactNumber"].is_string());
    assert!(error["fieldErrors"]["branchName"].is_string());

    let (_, list) = send(&app, "GET", "/staff", Some(&admin), None).await;
    assert_eq!(list["staff"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_duplicate_employee_code_is_a_field_error() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Main Branch", None),
    )
    .await;

    let (status, error) = send(
        &app,
        "POST",
        "/staff",
        Some(&admin),
        Some(staff_body("BO100", "BRANCH OFFICER", "Hill Branch", None)),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(error["fieldErrors"]["employeeCode"].is_string());
}

#[tokio::test]
async fn test_non_admin_cannot_mutate() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Main Branch", None),
    )
    .await;
    let user: String = login(&app, "BO100", "BO100").await;

    let (status, _) = send(
        &app,
        "POST",
        "/staff",
        Some(&user),
        Some(staff_body("BO200", "BRANCH OFFICER", "Main Branch", None)),
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "POST",
        "/zones",
        Some(&user),
        Some(json!({ "name": "West Zone" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_staff_cascades_code_to_reports() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    let manager: Value = create_staff(
        &app,
        &admin,
        staff_body("BM100", "BRANCH MANAGER", "Main Branch", None),
    )
    .await;
    let report: Value = create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Main Branch", Some("BM100")),
    )
    .await;

    let uri: String = format!("/staff/{}", manager["id"]);
    let (status, updated) = send(
        &app,
        "PATCH",
        &uri,
        Some(&admin),
        Some(json!({ "employeeCode": "BM200" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(updated["employeeCode"], "BM200");

    let uri: String = format!("/staff/{}", report["id"]);
    let (_, report) = send(&app, "GET", &uri, Some(&admin), None).await;
    assert_eq!(report["reportsToEmployeeCode"], "BM200");
    assert_eq!(report["reportsToName"], "Staff BM100");
}

#[tokio::test]
async fn test_circular_reporting_is_rejected() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    let manager: Value = create_staff(
        &app,
        &admin,
        staff_body("BM100", "BRANCH MANAGER", "Main Branch", None),
    )
    .await;
    create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Main Branch", Some("BM100")),
    )
    .await;

    let uri: String = format!("/staff/{}", manager["id"]);
    let (status, error) = send(
        &app,
        "PATCH",
        &uri,
        Some(&admin),
        Some(json!({ "reportsToEmployeeCode": "BO100" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(error["fieldErrors"]["reportsToEmployeeCode"].is_string());
}

#[tokio::test]
async fn test_unknown_staff_returns_404() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;

    let (status, _) = send(&app, "GET", "/staff/999", Some(&admin), None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_system_record_cannot_be_deleted() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;

    let (status, _) = send(&app, "DELETE", "/staff/1", Some(&admin), None).await;
    assert_eq!(status, HttpStatusCode::CONFLICT);

    let (status, removed) = send(
        &app,
        "POST",
        "/staff/delete_all",
        Some(&admin),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(removed["removed"], 0);
}

#[tokio::test]
async fn test_manager_sees_only_their_scope() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    let manager: Value = create_staff(
        &app,
        &admin,
        staff_body("BM100", "BRANCH MANAGER", "Main Branch", None),
    )
    .await;
    create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Main Branch", Some("BM100")),
    )
    .await;
    let outsider: Value = create_staff(
        &app,
        &admin,
        staff_body("BO200", "BRANCH OFFICER", "Harbour Branch", None),
    )
    .await;

    let token: String = login(&app, "BM100", "BM100").await;
    let (status, list) = send(&app, "GET", "/staff", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    let codes: Vec<&str> = list["staff"]
        .as_array()
        .unwrap()
        .iter()
        .map(|member| member["employeeCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["BM100", "BO100"]);

    let (_, own) = send(
        &app,
        "GET",
        &format!("/staff/{}", manager["id"]),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(own["subordinateCount"], 1);

    let uri: String = format!("/staff/{}", outsider["id"]);
    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subordinates_endpoint_is_transitive() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    let top: Value = create_staff(
        &app,
        &admin,
        staff_body("ZM100", "ZONAL MANAGER", "Main Branch", None),
    )
    .await;
    create_staff(
        &app,
        &admin,
        staff_body("BM100", "BRANCH MANAGER", "Main Branch", Some("ZM100")),
    )
    .await;
    create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Market Branch", Some("BM100")),
    )
    .await;

    let uri: String = format!("/staff/{}/subordinates", top["id"]);
    let (status, list) = send(&app, "GET", &uri, Some(&admin), None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(list["staff"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_branch_delete_is_blocked_then_reassigned() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Beach Branch", None),
    )
    .await;

    let (_, branches) = send(&app, "GET", "/branches", Some(&admin), None).await;
    let beach: &Value = branches["branches"]
        .as_array()
        .unwrap()
        .iter()
        .find(|branch| branch["branchName"] == "Beach Branch")
        .unwrap();
    let id: u64 = beach["id"].as_u64().unwrap();

    let (status, error) = send(
        &app,
        "DELETE",
        &format!("/branches/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(error["staff"][0]["employeeCode"], "BO100");

    let (status, result) = send(
        &app,
        "POST",
        &format!("/branches/{id}/reassign_and_delete"),
        Some(&admin),
        Some(json!({ "defaultBranch": "Harbour Branch" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(result["reassigned"], 1);

    let (_, list) = send(&app, "GET", "/staff", Some(&admin), None).await;
    let moved: &Value = list["staff"]
        .as_array()
        .unwrap()
        .iter()
        .find(|member| member["employeeCode"] == "BO100")
        .unwrap();
    assert_eq!(moved["branchName"], "Harbour Branch");

    let (_, branches) = send(&app, "GET", "/branches", Some(&admin), None).await;
    assert!(
        branches["branches"]
            .as_array()
            .unwrap()
            .iter()
            .all(|branch| branch["branchName"] != "Beach Branch")
    );
}

#[tokio::test]
async fn test_branch_list_reports_managers() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    create_staff(
        &app,
        &admin,
        staff_body("BM100", "BRANCH MANAGER", "Hill Branch", None),
    )
    .await;

    let (_, branches) = send(&app, "GET", "/branches", Some(&admin), None).await;
    let hill: &Value = branches["branches"]
        .as_array()
        .unwrap()
        .iter()
        .find(|branch| branch["branchName"] == "Hill Branch")
        .unwrap();

    assert_eq!(hill["zone"], "North Zone");
    assert_eq!(hill["managers"][0]["employeeCode"], "BM100");
}

#[tokio::test]
async fn test_master_data_listing_and_creation() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;

    let (_, zones) = send(&app, "GET", "/zones", Some(&admin), None).await;
    assert_eq!(zones["zones"].as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app,
        "POST",
        "/zones",
        Some(&admin),
        Some(json!({ "name": "West Zone" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let (status, _) = send(
        &app,
        "POST",
        "/regions",
        Some(&admin),
        Some(json!({ "name": "West Region", "zone": "West Zone" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (_, regions) = send(
        &app,
        "GET",
        "/zones/West%20Zone/regions",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(regions["regions"][0]["name"], "West Region");

    let (_, districts) = send(
        &app,
        "GET",
        "/regions/North%20Region/districts",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(districts["districts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_zone_in_use_cannot_be_deleted() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;

    let (_, zones) = send(&app, "GET", "/zones", Some(&admin), None).await;
    let id: u64 = zones["zones"][0]["id"].as_u64().unwrap();

    let (status, _) = send(&app, "DELETE", &format!("/zones/{id}"), Some(&admin), None).await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
}

#[tokio::test]
async fn test_csv_import_preview_and_export() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    let csv: &str = "Staff Name,Employee Code,Designation,Branch Name,Contact Number,Reports To Employee Code\n\
                     Asha,BM100,Branch Manager,Main Branch,9000000001,\n\
                     Ravi,BO100,Branch Officer,Main Branch,9000000002,BM100\n\
                     ,BO200,Branch Officer,Main Branch,9000000003,\n";

    let (status, preview) = send_text(&app, "/staff/import/preview", &admin, csv).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(preview["validCount"], 2);
    assert_eq!(preview["invalidCount"], 1);

    let (_, list) = send(&app, "GET", "/staff", Some(&admin), None).await;
    assert_eq!(list["staff"].as_array().unwrap().len(), 2);

    let (status, imported) = send_text(&app, "/staff/import", &admin, csv).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(imported["added"], 2);
    assert_eq!(imported["skipped"], 1);

    let request: Request<Body> = Request::builder()
        .method("GET")
        .uri("/staff/export")
        .header("Authorization", format!("Bearer {admin}"))
        .body(Body::empty())
        .unwrap();
    let response: Response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let exported: String = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(exported.starts_with("Staff Name,Employee Code"));
    assert!(exported.contains("BO100"));
}

#[tokio::test]
async fn test_csv_without_required_headers_returns_400() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;

    let (status, error) = send_text(&app, "/staff/import", &admin, "Name,Code\nA,B\n").await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("Staff Name"));
}

#[tokio::test]
async fn test_bulk_designation_clears_managed_units() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    let mut body: Value = staff_body("ZM100", "ZONAL MANAGER", "Main Branch", None);
    body["managedZones"] = json!(["South Zone"]);
    let zonal: Value = create_staff(&app, &admin, body).await;

    let (status, result) = send(
        &app,
        "POST",
        "/staff/designation",
        Some(&admin),
        Some(json!({ "ids": [zonal["id"]], "function": "BRANCH OFFICER" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(result["staff"][0]["function"], "BRANCH OFFICER");
    assert_eq!(result["staff"][0]["managedZones"], json!([]));
}

#[tokio::test]
async fn test_users_and_audit_are_admin_only() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Main Branch", None),
    )
    .await;

    let (status, users) = send(&app, "GET", "/users", Some(&admin), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    let usernames: Vec<&str> = users["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["admin", "zm", "BO100"]);

    let (status, audit) = send(&app, "GET", "/audit", Some(&admin), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    let records: &Vec<Value> = audit["records"].as_array().unwrap();
    let last: u64 = records.last().unwrap()["sequence"].as_u64().unwrap();

    let (_, tail) = send(
        &app,
        "GET",
        &format!("/audit?since={}", last - 1),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(tail["records"].as_array().unwrap().len(), 1);

    let user: String = login(&app, "BO100", "BO100").await;
    let (status, _) = send(&app, "GET", "/users", Some(&user), None).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    let (status, _) = send(&app, "GET", "/audit", Some(&user), None).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_removed_staff_session_stops_working() {
    let app: Router = create_test_app();
    let admin: String = login(&app, "admin", "admin123").await;
    let created: Value = create_staff(
        &app,
        &admin,
        staff_body("BO100", "BRANCH OFFICER", "Main Branch", None),
    )
    .await;
    let token: String = login(&app, "BO100", "BO100").await;

    let uri: String = format!("/staff/{}", created["id"]);
    let (status, _) = send(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, _) = send(&app, "GET", "/whoami", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}
