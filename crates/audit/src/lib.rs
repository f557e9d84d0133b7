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
    clippy::all
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// An actor is a logged-in user, or the system itself for seeding and
/// startup imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The username of the actor, or `"system"`.
    pub id: String,
    /// The type of actor (e.g., "admin", "manager", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor used for fixtures and startup loading.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), String::from("system"))
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`AddStaff`", "`RemoveBranch`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// Counts describing the directory at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// The state version the counts were taken from.
    pub version: u64,
    pub staff_count: usize,
    pub branch_count: usize,
    pub zone_count: usize,
    pub region_count: usize,
    pub district_count: usize,
}

impl StateSnapshot {
    /// Returns whether any record count differs between two snapshots.
    #[must_use]
    pub const fn counts_differ(&self, other: &Self) -> bool {
        self.staff_count != other.staff_count
            || self.branch_count != other.branch_count
            || self.zone_count != other.zone_count
            || self.region_count != other.region_count
            || self.district_count != other.district_count
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change produces exactly one audit event.
/// Failed transitions produce none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}

/// An audit event as stored in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Position in the log, starting at 1.
    pub sequence: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    pub event: AuditEvent,
}

/// Append-only, in-memory audit log.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    records: Vec<AuditRecord>,
}

impl AuditLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends an event stamped with the current UTC time.
    pub fn append(&mut self, event: AuditEvent) -> &AuditRecord {
        self.append_at(event, OffsetDateTime::now_utc())
    }

    /// Appends an event with an explicit timestamp.
    pub fn append_at(&mut self, event: AuditEvent, recorded_at: OffsetDateTime) -> &AuditRecord {
        let sequence: u64 = self.records.last().map_or(1, |last| last.sequence + 1);
        self.records.push(AuditRecord {
            sequence,
            recorded_at,
            event,
        });
        &self.records[self.records.len() - 1]
    }

    /// All records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    /// Records with a sequence number greater than `sequence`.
    #[must_use]
    pub fn since(&self, sequence: u64) -> &[AuditRecord] {
        let start: usize = self
            .records
            .partition_point(|record| record.sequence <= sequence);
        &self.records[start..]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
