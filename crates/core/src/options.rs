// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_activity_domain::Participant;
use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct department and faculty labels present in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterOptions {
    /// Sorted, de-duplicated department labels.
    pub departments: Vec<String>,
    /// Sorted, de-duplicated faculty labels.
    pub faculties: Vec<String>,
}

/// Collects the labels offered by the department and faculty filters.
///
/// Blank labels are skipped.
#[must_use]
pub fn filter_options(participants: &[Participant]) -> FilterOptions {
    let mut departments: BTreeSet<String> = BTreeSet::new();
    let mut faculties: BTreeSet<String> = BTreeSet::new();

    for participant in participants {
        if let Some(department) = participant.department.as_deref()
            && !department.trim().is_empty()
        {
            departments.insert(department.to_string());
        }
        if let Some(faculty) = participant.faculty.as_deref()
            && !faculty.trim().is_empty()
        {
            faculties.insert(faculty.to_string());
        }
    }

    FilterOptions {
        departments: departments.into_iter().collect(),
        faculties: faculties.into_iter().collect(),
    }
}
