use itertools::Itertools;

use crate::data::{TeachingAssignment, WorkloadRow};
use crate::ledger::AvailabilityLedger;

/// Weekly committed slots for each known faculty member, busiest first.
///
/// Ties keep the order of `faculty`. Names the ledger has never seen show
/// up with zero.
pub fn summarize<S: AsRef<str>>(ledger: &AvailabilityLedger, faculty: &[S]) -> Vec<WorkloadRow> {
    let counts = ledger.iter().map(|(f, _, _)| f).counts();
    let mut rows: Vec<WorkloadRow> = faculty
        .iter()
        .map(|f| WorkloadRow {
            faculty: f.as_ref().to_string(),
            total_weekly_slots: counts.get(f.as_ref()).copied().unwrap_or(0),
        })
        .collect();
    rows.sort_by(|a, b| b.total_weekly_slots.cmp(&a.total_weekly_slots));
    rows
}

/// Distinct faculty names of the mapping table in first-seen order.
pub fn known_faculty(mappings: &[TeachingAssignment]) -> Vec<String> {
    mappings
        .iter()
        .map(|m| m.faculty.clone())
        .unique()
        .collect()
}
