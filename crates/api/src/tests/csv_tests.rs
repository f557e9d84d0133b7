// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_reporting::BulkImportSummary;
use daily_reporting_domain::{Designation, ImportedStaffRow, Location, StaffMember};
use std::collections::BTreeSet;

use crate::{
    ApiError, AuthenticatedActor, COLUMNS, CsvError, CsvPreviewResult, CsvRowStatus, Directory,
    parse_rows,
};

use super::helpers::{
    create_test_admin, create_test_cause, create_test_directory, create_test_master_data, staff,
};

#[test]
fn test_parse_rows_normalizes_headers() {
    let csv: &str = "  staff   NAME ,EMPLOYEE CODE,designation\nJane Roe, JR01 ,tl-dds\n";

    let rows: Vec<ImportedStaffRow> = parse_rows(csv).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].staff_name, "Jane Roe");
    assert_eq!(rows[0].employee_code, "JR01");
    assert_eq!(rows[0].designation, "tl-dds");
    assert!(rows[0].branch_name.is_empty());
}

#[test]
fn test_parse_rows_splits_managed_lists() {
    let csv: &str = "Staff Name,Employee Code,Managed Zones,Managed Branches\n\
                     Jane Roe,JR01,\"Zone-1, Zone-2\",\"Branch-1,,Branch-3\"\n";

    let rows: Vec<ImportedStaffRow> = parse_rows(csv).unwrap();

    assert_eq!(rows[0].managed_zones, vec!["Zone-1", "Zone-2"]);
    assert_eq!(rows[0].managed_branches, vec!["Branch-1", "Branch-3"]);
}

#[test]
fn test_parse_rows_requires_name_and_code_headers() {
    let result: Result<Vec<ImportedStaffRow>, CsvError> = parse_rows("Designation,Zone\nDDS,Zone-1\n");

    match result {
        Err(CsvError::MissingHeaders { missing }) => {
            assert_eq!(missing, vec!["Staff Name", "Employee Code"]);
        }
        other => panic!("Expected MissingHeaders, got {other:?}"),
    }
}

#[test]
fn test_missing_headers_surface_as_invalid_csv() {
    let mut directory: Directory = create_test_directory();
    let admin: AuthenticatedActor = create_test_admin(&directory);

    let result = directory.import_csv(&admin, "Name,Code\nA,B\n", create_test_cause());

    match result {
        Err(ApiError::InvalidCsvFormat { reason }) => {
            assert!(reason.contains("Missing required headers"));
        }
        other => panic!("Expected InvalidCsvFormat, got {other:?}"),
    }
}

#[test]
fn test_preview_reports_status_per_row_without_mutating() {
    let directory: Directory = create_test_directory();
    let admin: AuthenticatedActor = create_test_admin(&directory);
    let version: u64 = directory.state().version;
    let csv: &str = "Staff Name,Employee Code,Designation,Branch Name,Contact Number,Reports To Employee Code\n\
                     New One,NEW1,DDS,Branch-1,9000000000,BM01\n\
                     Existing,BO01,DDS,Branch-1,9000000000,\n\
                     ,NEW2,DDS,Branch-1,9000000000,\n\
                     New One Again,NEW1,DDS,Branch-1,9000000000,\n\
                     Odd One,NEW3,CHIEF,Nowhere,12,NEW9\n";

    let preview: CsvPreviewResult = directory.preview_csv(&admin, csv).unwrap();

    let statuses: Vec<CsvRowStatus> = preview.rows.iter().map(|row| row.status).collect();
    assert_eq!(
        statuses,
        vec![
            CsvRowStatus::Valid,
            CsvRowStatus::Duplicate,
            CsvRowStatus::Invalid,
            CsvRowStatus::Duplicate,
            CsvRowStatus::Valid,
        ]
    );
    assert_eq!(preview.total_rows, 5);
    assert_eq!(preview.valid_count, 2);
    assert_eq!(preview.duplicate_count, 2);
    assert_eq!(preview.invalid_count, 1);
    assert!(preview.rows[0].warnings.is_empty());
    assert_eq!(preview.rows[4].warnings.len(), 4);
    assert_eq!(directory.state().version, version);
}

#[test]
fn test_preview_accepts_managers_later_in_the_sheet() {
    let directory: Directory = create_test_directory();
    let admin: AuthenticatedActor = create_test_admin(&directory);
    let csv: &str = "Staff Name,Employee Code,Branch Name,Contact Number,Reports To Employee Code\n\
                     Report,REP1,Branch-2,9000000000,MGR1\n\
                     Manager,MGR1,Branch-2,9000000000,\n";

    let preview: CsvPreviewResult = directory.preview_csv(&admin, csv).unwrap();

    assert!(preview.rows.iter().all(|row| row.warnings.is_empty()));
}

#[test]
fn test_import_csv_adds_rows_and_derives_location() {
    let mut directory: Directory = create_test_directory();
    let admin: AuthenticatedActor = create_test_admin(&directory);
    let csv: &str = "Staff Name,Employee Code,Designation,Branch Name,Zone,Region,District Name,Contact Number,Managed Branches,Reports To Employee Code\n\
                     Head,DH01,DISTRICT HEAD,Branch-3,Wrong,Wrong,Wrong,9000000000,\"Branch-1,Branch-9\",\n\
                     Officer,OF01,RELATIONSHIP OFFICER,Branch-3,,,,9000000000,,DH01\n";

    let summary: BulkImportSummary = directory
        .import_csv(&admin, csv, create_test_cause())
        .unwrap();

    assert_eq!(summary.added, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.warnings.len(), 1);
    assert_eq!(
        staff(&directory, "DH01").location,
        Location::new("Zone-2", "Region-B", "District-Y")
    );
    assert_eq!(
        staff(&directory, "DH01").managed_branches,
        BTreeSet::from([String::from("Branch-1")])
    );
    assert_eq!(
        staff(&directory, "OF01").reports_to.as_ref().unwrap().value(),
        "DH01"
    );
}

#[test]
fn test_export_writes_sheet_columns_in_order() {
    let directory: Directory = create_test_directory();
    let admin: AuthenticatedActor = create_test_admin(&directory);

    let csv: String = directory.export_csv(&admin).unwrap();
    let mut lines = csv.lines();

    assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
    let zonal: &str = lines.nth(2).unwrap();
    assert_eq!(
        zonal,
        "Staff ZM01,ZM01,ZONAL MANAGER,Branch-1,District-X,Zone-1,Region-A,9000000000,Zone-2,,"
    );
}

#[test]
fn test_exported_sheet_imports_into_empty_directory() {
    let source: Directory = create_test_directory();
    let admin: AuthenticatedActor = create_test_admin(&source);
    let csv: String = source.export_csv(&admin).unwrap();

    let mut target: Directory = Directory::new(create_test_master_data()).unwrap();
    let target_admin: AuthenticatedActor = create_test_admin(&target);
    let summary: BulkImportSummary = target
        .import_csv(&target_admin, &csv, create_test_cause())
        .unwrap();

    // The two system records already exist in the target.
    assert_eq!(summary.added, 5);
    assert_eq!(summary.skipped, 2);
    let mut expected: StaffMember = staff(&source, "BO01").clone();
    expected.id = staff(&target, "BO01").id;
    assert_eq!(staff(&target, "BO01"), &expected);
    assert_eq!(staff(&target, "ZM01").function, Designation::ZonalManager);
}
