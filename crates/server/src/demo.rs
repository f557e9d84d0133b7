// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Built-in demo master data, used when no master-data file is given.

use daily_reporting_api::{ApiError, AuthenticatedActor, Directory};
use daily_reporting_audit::Cause;
use daily_reporting_domain::BranchDraft;

/// Zone, region, district and the branches in that district.
const DEMO_HIERARCHY: &[(&str, &str, &str, &[&str])] = &[
    ("North Zone", "North Region", "Central District", &["Main Branch", "Market Branch"]),
    ("North Zone", "North Region", "Hill District", &["Hill Branch"]),
    ("South Zone", "South Region", "Coast District", &["Harbour Branch", "Beach Branch"]),
];

fn demo_cause() -> Cause {
    Cause::new(String::from("demo_seed"), String::from("Load demo master data"))
}

/// Loads the demo zones, regions, districts and branches.
///
/// Goes through the regular directory operations so the records are
/// validated and audited like any other.
///
/// # Errors
///
/// Returns an error if any record is rejected.
pub fn load_demo_hierarchy(directory: &mut Directory) -> Result<(), ApiError> {
    let system: AuthenticatedActor = AuthenticatedActor::system();

    for (zone, region, district, branches) in DEMO_HIERARCHY {
        if directory.state().master.zone_by_name(zone).is_none() {
            directory.add_zone(&system, (*zone).to_string(), demo_cause())?;
        }
        if directory.state().master.region_by_name(region).is_none() {
            directory.add_region(
                &system,
                (*region).to_string(),
                (*zone).to_string(),
                demo_cause(),
            )?;
        }
        directory.add_district(
            &system,
            (*district).to_string(),
            (*region).to_string(),
            demo_cause(),
        )?;
        for branch in *branches {
            let draft: BranchDraft = BranchDraft {
                branch_name: (*branch).to_string(),
                zone: (*zone).to_string(),
                region: (*region).to_string(),
                district_name: (*district).to_string(),
                ..BranchDraft::default()
            };
            directory.add_branch(&system, draft, demo_cause())?;
        }
    }

    Ok(())
}
