use log::{trace, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::data::{Day, TimeSlot, UnplacedReason, UnplacedSession};
use crate::grid::{Cell, WeekGrid};
use crate::ledger::AvailabilityLedger;
use crate::pairing::LabPairing;

/// A placed lab pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabPlacement {
    pub day: Day,
    pub block: (TimeSlot, TimeSlot),
    pub pairing: LabPairing,
}

/// Result of running the lab pass over one section.
#[derive(Debug, Default)]
pub struct LabOutcome {
    pub placed: Vec<LabPlacement>,
    pub unplaced: Vec<UnplacedSession>,
}

fn block_is_free(
    pairing: &LabPairing,
    day: Day,
    (first, second): (TimeSlot, TimeSlot),
    grid: &WeekGrid,
    ledger: &AvailabilityLedger,
) -> bool {
    grid.is_free(day, first)
        && grid.is_free(day, second)
        && !ledger.any_busy(
            &[pairing.faculty_one.as_str(), pairing.faculty_two.as_str()],
            day,
            &[first, second],
        )
}

/// Greedily puts each pairing into a two-slot block on its own weekday.
///
/// Pairings are tried in order, so earlier ones get first pick. The block
/// order is reshuffled in place for every day tried. A pairing with nowhere
/// to go is dropped and reported in [`LabOutcome::unplaced`].
pub fn place_labs<R: Rng + ?Sized>(
    section: &str,
    pairings: &[LabPairing],
    grid: &mut WeekGrid,
    ledger: &mut AvailabilityLedger,
    rng: &mut R,
) -> LabOutcome {
    let mut outcome = LabOutcome::default();
    let mut blocks = TimeSlot::LAB_BLOCKS.to_vec();
    let mut used_days: HashSet<Day> = HashSet::new();

    for pairing in pairings {
        if pairing.faculty_one == pairing.faculty_two {
            let dropped = UnplacedSession {
                section: section.to_string(),
                subjects: pairing.subjects(),
                reason: UnplacedReason::SameFaculty {
                    faculty: pairing.faculty_one.clone(),
                },
            };
            warn!("{}", dropped);
            outcome.unplaced.push(dropped);
            continue;
        }

        let mut found = None;
        'days: for day in Day::LAB_DAYS {
            if used_days.contains(&day) {
                continue;
            }
            blocks.shuffle(rng);
            for &block in &blocks {
                if block_is_free(pairing, day, block, grid, ledger) {
                    found = Some((day, block));
                    break 'days;
                }
            }
        }

        let Some((day, (first, second))) = found else {
            let dropped = UnplacedSession {
                section: section.to_string(),
                subjects: pairing.subjects(),
                reason: UnplacedReason::NoFreeLabBlock,
            };
            warn!("{}", dropped);
            outcome.unplaced.push(dropped);
            continue;
        };

        let cell = Cell::Lab {
            batch_one: pairing.batch_one.clone(),
            batch_two: pairing.batch_two.clone(),
        };
        grid.place(day, first, cell.clone());
        grid.place(day, second, cell);
        for faculty in [&pairing.faculty_one, &pairing.faculty_two] {
            for slot in [first, second] {
                ledger.book(faculty, day, slot);
            }
        }
        used_days.insert(day);
        trace!(
            "[{}] lab {}/{} on {} {}..{}",
            section, pairing.batch_one, pairing.batch_two, day, first, second
        );
        outcome.placed.push(LabPlacement {
            day,
            block: (first, second),
            pairing: pairing.clone(),
        });
    }

    outcome
}
