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

mod apply;
mod command;
mod error;
mod import;
mod master_data;
mod state;

#[cfg(test)]
mod tests;

use daily_reporting_domain::{Branch, BranchId, DomainError, StaffId, StaffMember};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{BulkImportSummary, IdCounters, Outcome, State, TransitionResult};

/// Looks up a staff member by id.
///
/// This is a read-only validation that does not create audit events.
///
/// # Errors
///
/// Returns `DomainError::StaffNotFound` if no record has the id.
pub fn validate_staff_exists(state: &State, id: StaffId) -> Result<&StaffMember, DomainError> {
    state.staff_by_id(id).ok_or(DomainError::StaffNotFound(id))
}

/// Looks up a branch by id.
///
/// This is a read-only validation that does not create audit events.
///
/// # Errors
///
/// Returns `DomainError::BranchNotFound` if no branch has the id.
pub fn validate_branch_exists(state: &State, id: BranchId) -> Result<&Branch, DomainError> {
    state
        .master
        .branch(id)
        .ok_or(DomainError::BranchNotFound(id))
}
