// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login accounts derived from the staff collection.
//!
//! The projection is a pure function of the staff records and the fixed
//! system accounts. It is rebuilt after every committed mutation and
//! never patched in place.

use daily_reporting_domain::{
    Designation, EmployeeCode, StaffId, StaffMember, direct_subordinates,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::auth::{AuthenticatedActor, Role};
use crate::error::AuthError;

/// A fixed login that is not derived from an employee code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemAccount {
    pub username: &'static str,
    pub password: &'static str,
    /// Code of the seeded staff record backing this account.
    pub employee_code: &'static str,
    pub employee_name: &'static str,
    pub function: Designation,
}

/// The two built-in administrator accounts.
pub const SYSTEM_ACCOUNTS: [SystemAccount; 2] = [
    SystemAccount {
        username: "admin",
        password: "admin123",
        employee_code: "ADMIN",
        employee_name: "System Administrator",
        function: Designation::Administrator,
    },
    SystemAccount {
        username: "zm",
        password: "zm123",
        employee_code: "ZM",
        employee_name: "Zonal Manager",
        function: Designation::ZonalManager,
    },
];

/// A login account as seen by the rest of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedUser {
    pub username: String,
    pub role: Role,
    pub employee_code: Option<EmployeeCode>,
    pub employee_name: String,
    pub staff_id: Option<StaffId>,
    pub function: Option<Designation>,
    pub branch_name: Option<String>,
    /// Employee codes of direct reports only.
    pub subordinates: Vec<EmployeeCode>,
}

impl ProjectedUser {
    /// The actor this login acts as.
    #[must_use]
    pub fn to_actor(&self) -> AuthenticatedActor {
        AuthenticatedActor {
            username: self.username.clone(),
            role: self.role,
            staff_id: self.staff_id,
            employee_code: self.employee_code.clone(),
        }
    }
}

fn direct_codes(employee_code: &EmployeeCode, staff: &[StaffMember]) -> Vec<EmployeeCode> {
    direct_subordinates(employee_code, staff)
        .into_iter()
        .map(|member| member.employee_code.clone())
        .collect()
}

fn system_user(account: &SystemAccount, staff: &[StaffMember]) -> ProjectedUser {
    let code: EmployeeCode = EmployeeCode::new(account.employee_code);
    let backing: Option<&StaffMember> = staff.iter().find(|member| member.employee_code == code);

    ProjectedUser {
        username: String::from(account.username),
        role: Role::Admin,
        employee_name: backing.map_or_else(
            || String::from(account.employee_name),
            |member| member.employee_name.clone(),
        ),
        staff_id: backing.map(|member| member.id),
        function: Some(backing.map_or(account.function, |member| member.function)),
        branch_name: backing.map(|member| member.branch_name.clone()),
        subordinates: direct_codes(&code, staff),
        employee_code: Some(code),
    }
}

fn staff_user(member: &StaffMember, staff: &[StaffMember]) -> ProjectedUser {
    ProjectedUser {
        username: member.employee_code.value().to_string(),
        role: Role::for_designation(member.function),
        employee_code: Some(member.employee_code.clone()),
        employee_name: member.employee_name.clone(),
        staff_id: Some(member.id),
        function: Some(member.function),
        branch_name: Some(member.branch_name.clone()),
        subordinates: direct_codes(&member.employee_code, staff),
    }
}

/// Every login account together with its password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthProjection {
    users: Vec<ProjectedUser>,
    passwords: BTreeMap<String, String>,
    version: u64,
}

impl AuthProjection {
    /// Rebuilds the projection from the staff collection.
    ///
    /// System accounts come first, then one account per staff member in
    /// collection order. Staff with an empty code, staff backing a system
    /// account, and codes equal to a system username get no login.
    #[must_use]
    pub fn recompute(staff: &[StaffMember], version: u64) -> Self {
        let mut users: Vec<ProjectedUser> = Vec::with_capacity(staff.len() + SYSTEM_ACCOUNTS.len());
        let mut passwords: BTreeMap<String, String> = BTreeMap::new();

        for account in &SYSTEM_ACCOUNTS {
            users.push(system_user(account, staff));
            passwords.insert(String::from(account.username), String::from(account.password));
        }

        let reserved = |code: &str| {
            SYSTEM_ACCOUNTS
                .iter()
                .any(|account| account.username == code || account.employee_code == code)
        };

        for member in staff {
            let code: &str = member.employee_code.value();
            if code.is_empty() || reserved(code) || passwords.contains_key(code) {
                continue;
            }
            users.push(staff_user(member, staff));
            passwords.insert(code.to_string(), code.to_string());
        }

        Self {
            users,
            passwords,
            version,
        }
    }

    /// Resolves a username and password to an account.
    ///
    /// # Errors
    ///
    /// Returns the same `AuthError` whether the username is unknown or
    /// the password is wrong.
    pub fn login(&self, username: &str, password: &str) -> Result<&ProjectedUser, AuthError> {
        if self.passwords.get(username).map(String::as_str) != Some(password) {
            return Err(AuthError::login_failed());
        }
        self.user(username).ok_or_else(AuthError::login_failed)
    }

    /// Finds an account by username.
    #[must_use]
    pub fn user(&self, username: &str) -> Option<&ProjectedUser> {
        self.users.iter().find(|user| user.username == username)
    }

    #[must_use]
    pub fn users(&self) -> &[ProjectedUser] {
        &self.users
    }

    #[must_use]
    pub const fn passwords(&self) -> &BTreeMap<String, String> {
        &self.passwords
    }

    /// The state version this projection was computed from.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}
