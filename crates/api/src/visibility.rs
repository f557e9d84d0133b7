// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Which staff records a logged-in user may read.

use daily_reporting::State;
use daily_reporting_domain::{
    EmployeeCode, StaffId, StaffMember, SubordinateInfo, recursive_subordinate_info,
};
use std::collections::BTreeSet;

use crate::auth::{AuthenticatedActor, Role};

/// The read scope of an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Every record.
    All,
    /// Records whose code or branch is in scope.
    Scoped {
        employee_codes: BTreeSet<EmployeeCode>,
        branch_names: BTreeSet<String>,
    },
    /// The actor's own record, if they have one.
    SelfOnly(Option<StaffId>),
}

impl Visibility {
    /// Computes the scope of `actor` against the current state.
    ///
    /// A manager sees themselves, every transitive report, and everyone on
    /// their own branch, their reports' branches, their managed branches,
    /// and the branches of their managed zones.
    #[must_use]
    pub fn for_actor(actor: &AuthenticatedActor, state: &State) -> Self {
        let member: Option<&StaffMember> = actor.staff_id.and_then(|id| state.staff_by_id(id));

        match (actor.role, member) {
            (Role::Admin, _) => Self::All,
            (Role::Manager, Some(member)) => Self::manager_scope(member, state),
            (Role::Manager, None) => Self::SelfOnly(None),
            (Role::User, member) => Self::SelfOnly(member.map(|m| m.id)),
        }
    }

    fn manager_scope(member: &StaffMember, state: &State) -> Self {
        let info: SubordinateInfo = recursive_subordinate_info(member, &state.staff);

        let mut employee_codes: BTreeSet<EmployeeCode> = info.employee_codes;
        employee_codes.insert(member.employee_code.clone());

        let mut branch_names: BTreeSet<String> = info.branch_names;
        if !member.is_unassigned() {
            branch_names.insert(member.branch_name.clone());
        }
        branch_names.extend(member.managed_branches.iter().cloned());
        for zone in &member.managed_zones {
            branch_names.extend(
                state
                    .master
                    .branches_in_zone(zone)
                    .into_iter()
                    .map(|branch| branch.branch_name.clone()),
            );
        }

        Self::Scoped {
            employee_codes,
            branch_names,
        }
    }

    /// Returns whether the record is in scope.
    #[must_use]
    pub fn can_see(&self, member: &StaffMember) -> bool {
        match self {
            Self::All => true,
            Self::Scoped {
                employee_codes,
                branch_names,
            } => {
                employee_codes.contains(&member.employee_code)
                    || branch_names.contains(&member.branch_name)
            }
            Self::SelfOnly(id) => *id == Some(member.id),
        }
    }

    /// Returns the visible records, in collection order.
    #[must_use]
    pub fn filter<'a>(&self, staff: &'a [StaffMember]) -> Vec<&'a StaffMember> {
        staff.iter().filter(|member| self.can_see(member)).collect()
    }
}
