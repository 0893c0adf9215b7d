use log::{trace, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::{Day, SessionType, TeachingAssignment, TimeSlot, UnplacedReason, UnplacedSession};
use crate::grid::{Cell, WeekGrid};
use crate::ledger::AvailabilityLedger;

/// Lectures every theory subject gets per week.
pub const WEEKLY_THEORY_SESSIONS: usize = 3;

#[derive(Debug, Default)]
pub struct TheoryOutcome {
    /// Number of single-slot lectures written into the grid.
    pub placed: usize,
    pub unplaced: Vec<UnplacedSession>,
}

fn slot_is_free(
    theory: &TeachingAssignment,
    day: Day,
    slot: TimeSlot,
    grid: &WeekGrid,
    ledger: &AvailabilityLedger,
) -> bool {
    grid.is_free(day, slot)
        && !ledger.is_busy(&theory.faculty, day, slot)
        && !grid.day_mentions(day, &theory.subject)
}

/// Spreads each theory assignment over distinct days, one lecture a day.
///
/// Days are walked Monday to Saturday. For each day the teaching slots are
/// reshuffled in place and the first free one is taken. A subject never
/// appears twice in a day's row. Whatever can't be placed stays unplaced.
pub fn fill_theory<R: Rng + ?Sized>(
    section: &str,
    assignments: &[&TeachingAssignment],
    grid: &mut WeekGrid,
    ledger: &mut AvailabilityLedger,
    rng: &mut R,
) -> TheoryOutcome {
    let mut outcome = TheoryOutcome::default();
    let mut slots = TimeSlot::TEACHING.to_vec();

    for theory in assignments
        .iter()
        .filter(|a| a.session_type == SessionType::Theory)
    {
        let mut needed = WEEKLY_THEORY_SESSIONS;
        for day in Day::ALL {
            if needed == 0 {
                break;
            }
            slots.shuffle(rng);
            let Some(&slot) = slots
                .iter()
                .find(|&&s| slot_is_free(theory, day, s, grid, ledger))
            else {
                continue;
            };
            grid.place(
                day,
                slot,
                Cell::Theory {
                    subject: theory.subject.clone(),
                    faculty: theory.faculty.clone(),
                },
            );
            ledger.book(&theory.faculty, day, slot);
            needed -= 1;
            outcome.placed += 1;
            trace!("[{}] {} ({}) on {} {}", section, theory.subject, theory.faculty, day, slot);
        }

        if needed > 0 {
            let short = UnplacedSession {
                section: section.to_string(),
                subjects: vec![theory.subject.clone()],
                reason: UnplacedReason::NoFreeSlot {
                    placed: WEEKLY_THEORY_SESSIONS - needed,
                    required: WEEKLY_THEORY_SESSIONS,
                },
            };
            warn!("{}", short);
            outcome.unplaced.push(short);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Batch;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn theory(faculty: &str, subject: &str) -> TeachingAssignment {
        TeachingAssignment {
            faculty: faculty.into(),
            subject: subject.into(),
            section: "A".into(),
            semester: "3".into(),
            session_type: SessionType::Theory,
            batch: Batch::Whole,
        }
    }

    fn days_with(grid: &WeekGrid, subject: &str) -> Vec<Day> {
        Day::ALL
            .into_iter()
            .filter(|d| grid.day_mentions(*d, subject))
            .collect()
    }

    #[test]
    fn takes_the_first_three_days_when_nothing_is_booked() {
        let rows = vec![theory("Rao", "DBMS")];
        let refs: Vec<_> = rows.iter().collect();
        let mut grid = WeekGrid::new();
        let mut ledger = AvailabilityLedger::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let out = fill_theory("A", &refs, &mut grid, &mut ledger, &mut rng);
        assert_eq!(out.placed, 3);
        assert!(out.unplaced.is_empty());
        assert_eq!(
            days_with(&grid, "DBMS"),
            vec![Day::Monday, Day::Tuesday, Day::Wednesday]
        );
        assert_eq!(ledger.count_for("Rao"), 3);
        let rendered: Vec<_> = grid
            .cells()
            .filter(|(_, _, c)| c.mentions("DBMS"))
            .map(|(_, _, c)| c.render())
            .collect();
        assert!(rendered.iter().all(|r| r == "DBMS\n(Rao)"));
    }

    #[test]
    fn lab_rows_are_left_alone() {
        let mut lab = theory("Rao", "OS");
        lab.session_type = SessionType::Lab;
        let refs = vec![&lab];
        let mut grid = WeekGrid::new();
        let mut ledger = AvailabilityLedger::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let out = fill_theory("A", &refs, &mut grid, &mut ledger, &mut rng);
        assert_eq!(out.placed, 0);
        assert!(out.unplaced.is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn never_repeats_a_subject_within_a_day() {
        // Same subject split across two lecturers still counts as one subject.
        let rows = vec![theory("Rao", "MATHS"), theory("Das", "MATHS")];
        let refs: Vec<_> = rows.iter().collect();
        let mut grid = WeekGrid::new();
        let mut ledger = AvailabilityLedger::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let out = fill_theory("A", &refs, &mut grid, &mut ledger, &mut rng);
        assert_eq!(out.placed, 6);
        assert_eq!(days_with(&grid, "MATHS"), Day::ALL.to_vec());
        for day in Day::ALL {
            let count = TimeSlot::COLUMNS
                .iter()
                .filter(|s| grid.get(day, **s).mentions("MATHS"))
                .count();
            assert_eq!(count, 1, "{} has MATHS {} times", day, count);
        }
    }

    #[test]
    fn lab_on_the_same_day_blocks_the_subject() {
        let mut grid = WeekGrid::new();
        for day in [Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday] {
            grid.place(
                day,
                TimeSlot::Nine,
                Cell::Lab {
                    batch_one: "OS".into(),
                    batch_two: "JAVA".into(),
                },
            );
        }
        let rows = vec![theory("Rao", "OS")];
        let refs: Vec<_> = rows.iter().collect();
        let mut ledger = AvailabilityLedger::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let out = fill_theory("A", &refs, &mut grid, &mut ledger, &mut rng);
        assert_eq!(out.placed, 2);
        assert_eq!(
            out.unplaced[0].reason,
            UnplacedReason::NoFreeSlot {
                placed: 2,
                required: 3
            }
        );
    }

    #[test]
    fn busy_lecturer_ends_under_filled_without_error() {
        let mut ledger = AvailabilityLedger::new();
        for day in Day::ALL {
            let free = match day {
                Day::Monday => Some(TimeSlot::Two),
                Day::Thursday => Some(TimeSlot::Nine),
                _ => None,
            };
            for slot in TimeSlot::TEACHING {
                if Some(slot) != free {
                    ledger.book("Iyer", day, slot);
                }
            }
        }
        let booked = ledger.len();
        let rows = vec![theory("Iyer", "CN")];
        let refs: Vec<_> = rows.iter().collect();
        let mut grid = WeekGrid::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let out = fill_theory("A", &refs, &mut grid, &mut ledger, &mut rng);
        assert_eq!(out.placed, 2);
        assert_eq!(grid.get(Day::Monday, TimeSlot::Two).render(), "CN\n(Iyer)");
        assert_eq!(grid.get(Day::Thursday, TimeSlot::Nine).render(), "CN\n(Iyer)");
        assert_eq!(ledger.len(), booked + 2);
        assert_eq!(out.unplaced.len(), 1);
    }
}
