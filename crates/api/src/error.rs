// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::csv_import::CsvError;
use daily_reporting::CoreError;
use daily_reporting_domain::{DomainError, FieldErrors, StaffMember};
use std::collections::BTreeMap;

/// The single message returned for any failed login.
///
/// Unknown usernames and wrong passwords are deliberately indistinguishable.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid Employee Code or password";

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl AuthError {
    /// The error returned for every failed login.
    #[must_use]
    pub fn login_failed() -> Self {
        Self::AuthenticationFailed {
            reason: String::from(LOGIN_FAILED_MESSAGE),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => write!(f, "{reason}"),
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// One or more fields failed validation. Rendered next to each field.
    ValidationFailed {
        /// Field name to message.
        errors: BTreeMap<String, String>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A branch still has staff assigned and cannot be deleted.
    BranchInUse {
        /// The branch name.
        branch_name: String,
        /// The staff that must be reassigned first.
        staff: Vec<StaffMember>,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The uploaded CSV could not be read.
    InvalidCsvFormat {
        /// Why the CSV was rejected.
        reason: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Builds a single-field validation error.
    #[must_use]
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            errors: FieldErrors::single(field, message).into_inner(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => write!(f, "{reason}"),
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ValidationFailed { errors } => {
                let rendered: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect();
                write!(f, "Validation failed: {}", rendered.join("; "))
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::BranchInUse { branch_name, staff } => {
                write!(
                    f,
                    "Branch '{branch_name}' cannot be deleted: {} staff member(s) are still assigned to it",
                    staff.len()
                )
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidCsvFormat { reason } => write!(f, "Invalid CSV: {reason}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<CsvError> for ApiError {
    fn from(err: CsvError) -> Self {
        Self::InvalidCsvFormat {
            reason: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    if let Some(fields) = err.field_errors() {
        return ApiError::ValidationFailed {
            errors: fields.into_inner(),
        };
    }

    let message: String = err.to_string();
    match err {
        DomainError::StaffNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Staff member"),
            message,
        },
        DomainError::BranchNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Branch"),
            message,
        },
        DomainError::ZoneNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Zone"),
            message,
        },
        DomainError::RegionNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Region"),
            message,
        },
        DomainError::DistrictNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("District"),
            message,
        },
        DomainError::BranchInUse { branch, staff } => ApiError::BranchInUse {
            branch_name: branch.branch_name,
            staff,
        },
        DomainError::MasterDataInUse { .. } => ApiError::DomainRuleViolation {
            rule: String::from("master_data_in_use"),
            message,
        },
        DomainError::SystemRecordProtected { .. } => ApiError::DomainRuleViolation {
            rule: String::from("system_record_protected"),
            message,
        },
        // Every remaining kind renders as a field map above.
        DomainError::Validation(_)
        | DomainError::DuplicateEmployeeCode { .. }
        | DomainError::SelfReporting { .. }
        | DomainError::CircularReporting { .. }
        | DomainError::InvalidDesignation(_)
        | DomainError::DuplicateBranch(_)
        | DomainError::DuplicateMasterData { .. } => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
