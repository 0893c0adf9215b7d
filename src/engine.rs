use itertools::Itertools;
use log::{debug, info, warn};
use rand::Rng;
use std::time::Instant;

use crate::data::{GenerationOutput, SectionTimetable, TeachingAssignment, UnplacedSession};
use crate::error::GenerationError;
use crate::grid::WeekGrid;
use crate::labs::place_labs;
use crate::ledger::AvailabilityLedger;
use crate::pairing::{RotationStrategy, lab_subjects, resolve_pairings};
use crate::theory::fill_theory;
use crate::workload;

/// Distinct semesters in the mapping table, sorted.
pub fn semesters(mappings: &[TeachingAssignment]) -> Vec<String> {
    mappings
        .iter()
        .map(|m| m.semester.clone())
        .unique()
        .sorted()
        .collect()
}

/// Builds one section's week: labs first, then theory into what is left.
pub fn schedule_section<R: Rng + ?Sized>(
    section: &str,
    rows: &[&TeachingAssignment],
    rotation: RotationStrategy,
    ledger: &mut AvailabilityLedger,
    rng: &mut R,
) -> (WeekGrid, Vec<UnplacedSession>) {
    let mut grid = WeekGrid::new();
    let mut unplaced = Vec::new();

    match resolve_pairings(rows, rotation) {
        Ok(pairings) => {
            let labs = place_labs(section, &pairings, &mut grid, ledger, rng);
            debug!(
                "[{}] {} of {} lab pairings placed",
                section,
                labs.placed.len(),
                pairings.len()
            );
            unplaced.extend(labs.unplaced);
        }
        Err(reason) => {
            let short = UnplacedSession {
                section: section.to_string(),
                subjects: lab_subjects(rows),
                reason,
            };
            warn!("{}", short);
            unplaced.push(short);
        }
    }

    let theory = fill_theory(section, rows, &mut grid, ledger, rng);
    debug!("[{}] {} lectures placed", section, theory.placed);
    unplaced.extend(theory.unplaced);
    (grid, unplaced)
}

/// Runs the whole semester, section by section in sorted order, against a
/// shared ledger.
///
/// The ledger is only ever added to. Bookings already in it from earlier
/// runs count as taken.
pub fn generate<R: Rng + ?Sized>(
    mappings: &[TeachingAssignment],
    semester: Option<&str>,
    faculty: &[String],
    rotation: RotationStrategy,
    ledger: &mut AvailabilityLedger,
    rng: &mut R,
) -> Result<GenerationOutput, GenerationError> {
    if mappings.is_empty() {
        warn!("Generation requested without any subject mappings.");
        return Err(GenerationError::NoMappings);
    }
    let start_time = Instant::now();

    let semester = match semester {
        Some(s) => s.to_string(),
        // mappings is non-empty, so there is at least one semester
        None => semesters(mappings).swap_remove(0),
    };
    let rows: Vec<&TeachingAssignment> = mappings
        .iter()
        .filter(|m| m.semester == semester)
        .collect();
    if rows.is_empty() {
        return Err(GenerationError::UnknownSemester(semester));
    }

    let sections: Vec<&str> = rows
        .iter()
        .map(|m| m.section.as_str())
        .unique()
        .sorted()
        .collect();
    info!(
        "Generating semester {} for {} sections ({} mappings, {} bookings already in ledger)...",
        semester,
        sections.len(),
        rows.len(),
        ledger.len()
    );

    let mut timetables = Vec::with_capacity(sections.len());
    let mut unplaced = Vec::new();
    for section in sections {
        let section_rows: Vec<&TeachingAssignment> = rows
            .iter()
            .copied()
            .filter(|m| m.section == section)
            .collect();
        let before = ledger.len();
        let (grid, missing) = schedule_section(section, &section_rows, rotation, ledger, rng);
        info!(
            "Section {}: {} slots committed, {} sessions unplaced.",
            section,
            ledger.len() - before,
            missing.len()
        );
        unplaced.extend(missing);
        timetables.push(SectionTimetable {
            section: section.to_string(),
            grid,
        });
    }

    let roster = if faculty.is_empty() {
        workload::known_faculty(mappings)
    } else {
        faculty.to_vec()
    };
    let workload = workload::summarize(ledger, &roster);
    info!("Timetable generated in {:.2?}", start_time.elapsed());

    Ok(GenerationOutput {
        semester,
        timetables,
        workload,
        unplaced,
        ledger_size: ledger.len(),
    })
}
