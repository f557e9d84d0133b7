// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV adapter for the staff spreadsheet.
//!
//! Rows use the same columns as the spreadsheet import/export sheet.
//! Previewing never mutates state; importing hands the parsed rows to
//! the lenient bulk import.

use csv::StringRecord;
use daily_reporting::State;
use daily_reporting_domain::{
    Designation, EmployeeCode, FieldErrors, ImportedStaffRow, StaffMember, check_contact_number,
    is_unassigned_branch,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// CSV errors.
#[derive(Debug, Error)]
pub enum CsvError {
    /// One or more required columns are absent.
    #[error("Missing required headers: {}", .missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    /// The header row could not be read.
    #[error("Failed to read CSV headers: {0}")]
    Headers(csv::Error),

    /// A data row could not be read.
    #[error("Row {row_number}: {source}")]
    Row {
        row_number: usize,
        source: csv::Error,
    },

    /// The export could not be written.
    #[error("Failed to write CSV: {reason}")]
    Write { reason: String },
}

/// Column headers in sheet order.
pub const COLUMNS: [&str; 11] = [
    "Staff Name",
    "Employee Code",
    "Designation",
    "Branch Name",
    "District Name",
    "Zone",
    "Region",
    "Contact Number",
    "Managed Zones",
    "Managed Branches",
    "Reports To Employee Code",
];

const REQUIRED_HEADERS: [&str; 2] = ["Staff Name", "Employee Code"];

/// Normalizes a header for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, CsvError> {
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !header_map.contains_key(&normalize_header(required)))
        .map(|required| String::from(*required))
        .collect();

    if !missing.is_empty() {
        return Err(CsvError::MissingHeaders { missing });
    }
    Ok(header_map)
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn row_from_record(record: &StringRecord, header_map: &HashMap<String, usize>) -> ImportedStaffRow {
    let cell = |column: &str| -> String {
        header_map
            .get(&normalize_header(column))
            .and_then(|&idx| record.get(idx))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };

    ImportedStaffRow {
        staff_name: cell("Staff Name"),
        employee_code: cell("Employee Code"),
        designation: cell("Designation"),
        branch_name: cell("Branch Name"),
        district_name: cell("District Name"),
        zone: cell("Zone"),
        region: cell("Region"),
        contact_number: cell("Contact Number"),
        managed_zones: split_list(&cell("Managed Zones")),
        managed_branches: split_list(&cell("Managed Branches")),
        reports_to: cell("Reports To Employee Code"),
    }
}

/// Parses CSV content into spreadsheet rows.
///
/// Missing optional columns read as empty cells. Rows may have fewer
/// cells than the header.
///
/// # Errors
///
/// Returns an error if the header is unreadable, lacks a required column,
/// or any row cannot be read.
pub fn parse_rows(csv_content: &str) -> Result<Vec<ImportedStaffRow>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader.headers().map_err(CsvError::Headers)?.clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut rows: Vec<ImportedStaffRow> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record: StringRecord = result.map_err(|source| CsvError::Row {
            row_number: idx + 1,
            source,
        })?;
        rows.push(row_from_record(&record, &header_map));
    }
    Ok(rows)
}

/// Status of a previewed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CsvRowStatus {
    /// The row would be imported.
    Valid,
    /// The employee code already exists or appears earlier in the sheet.
    Duplicate,
    /// The row lacks a staff name or employee code.
    Invalid,
}

/// A single row result from a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvRowResult {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    pub employee_code: String,
    pub staff_name: String,
    pub status: CsvRowStatus,
    /// Problems the import would correct rather than reject.
    pub warnings: Vec<String>,
}

/// Result of a CSV preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvPreviewResult {
    pub rows: Vec<CsvRowResult>,
    pub total_rows: usize,
    pub valid_count: usize,
    pub duplicate_count: usize,
    pub invalid_count: usize,
}

fn row_warnings(row: &ImportedStaffRow, state: &State, sheet_codes: &HashSet<String>) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    let (function, designation_warning): (Designation, Option<String>) =
        Designation::parse_lenient(&row.designation);
    warnings.extend(designation_warning);

    if !is_unassigned_branch(&row.branch_name)
        && state.master.branch_by_name(&row.branch_name).is_none()
    {
        warnings.push(format!(
            "unknown branch '{}', will be set to 'N/A'",
            row.branch_name
        ));
    }

    let mut contact_errors: FieldErrors = FieldErrors::new();
    check_contact_number(&row.contact_number, &mut contact_errors);
    warnings.extend(contact_errors.iter().map(|(_, message)| message.to_string()));

    if function.manages_zones() {
        warnings.extend(
            row.managed_zones
                .iter()
                .filter(|zone| state.master.zone_by_name(zone).is_none())
                .map(|zone| format!("unknown zone '{zone}' ignored")),
        );
    }
    if function.manages_branches() {
        warnings.extend(
            row.managed_branches
                .iter()
                .filter(|branch| state.master.branch_by_name(branch).is_none())
                .map(|branch| format!("unknown branch '{branch}' ignored")),
        );
    }

    let manager: EmployeeCode = EmployeeCode::new(&row.reports_to);
    if !manager.is_empty() {
        if manager.value() == row.employee_code {
            warnings.push(String::from(
                "cannot report to themselves, reporting line will be dropped",
            ));
        } else if state.staff_by_code(&manager).is_none()
            && !sheet_codes.contains(manager.value())
        {
            warnings.push(format!("reporting manager '{manager}' not found"));
        }
    }

    warnings
}

/// Previews CSV content against the current state without mutating it.
///
/// # Errors
///
/// Returns an error if the CSV cannot be parsed.
pub fn preview(csv_content: &str, state: &State) -> Result<CsvPreviewResult, CsvError> {
    let rows: Vec<ImportedStaffRow> = parse_rows(csv_content)?;
    let sheet_codes: HashSet<String> = rows
        .iter()
        .map(|row| row.employee_code.clone())
        .filter(|code| !code.is_empty())
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut results: Vec<CsvRowResult> = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let status: CsvRowStatus = if row.staff_name.is_empty() || row.employee_code.is_empty() {
            CsvRowStatus::Invalid
        } else if state
            .staff_by_code(&EmployeeCode::new(&row.employee_code))
            .is_some()
            || !seen.insert(row.employee_code.clone())
        {
            CsvRowStatus::Duplicate
        } else {
            CsvRowStatus::Valid
        };

        let warnings: Vec<String> = match status {
            CsvRowStatus::Valid => row_warnings(row, state, &sheet_codes),
            CsvRowStatus::Duplicate | CsvRowStatus::Invalid => Vec::new(),
        };

        results.push(CsvRowResult {
            row_number: idx + 1,
            employee_code: row.employee_code.clone(),
            staff_name: row.staff_name.clone(),
            status,
            warnings,
        });
    }

    let count = |wanted: CsvRowStatus| results.iter().filter(|row| row.status == wanted).count();
    Ok(CsvPreviewResult {
        total_rows: results.len(),
        valid_count: count(CsvRowStatus::Valid),
        duplicate_count: count(CsvRowStatus::Duplicate),
        invalid_count: count(CsvRowStatus::Invalid),
        rows: results,
    })
}

fn join(names: &std::collections::BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<&str>>().join(",")
}

/// Writes staff records as CSV in sheet column order.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn export(staff: &[StaffMember]) -> Result<String, CsvError> {
    let write_error = |err: csv::Error| CsvError::Write {
        reason: err.to_string(),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS).map_err(write_error)?;

    for member in staff {
        let reports_to: &str = member.reports_to.as_ref().map_or("", EmployeeCode::value);
        writer
            .write_record([
                member.employee_name.as_str(),
                member.employee_code.value(),
                member.function.label(),
                member.branch_name.as_str(),
                member.location.district_name.as_str(),
                member.location.zone.as_str(),
                member.location.region.as_str(),
                member.contact_number.as_str(),
                join(&member.managed_zones).as_str(),
                join(&member.managed_branches).as_str(),
                reports_to,
            ])
            .map_err(write_error)?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|err| CsvError::Write {
        reason: err.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|err| CsvError::Write {
        reason: err.to_string(),
    })
}
