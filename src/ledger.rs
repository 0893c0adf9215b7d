use std::collections::HashSet;

use crate::data::{Day, TimeSlot};

/// Every (faculty, day, slot) commitment made so far.
///
/// One ledger is shared by all sections of a run so nobody gets booked twice
/// across sections. It keeps growing across runs until [`reset`] is called.
///
/// [`reset`]: AvailabilityLedger::reset
#[derive(Debug, Clone, Default)]
pub struct AvailabilityLedger {
    busy: HashSet<(String, Day, TimeSlot)>,
}

impl AvailabilityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self, faculty: &str, day: Day, slot: TimeSlot) -> bool {
        // HashSet<(String, ..)> can't be probed with a borrowed tuple.
        self.busy.contains(&(faculty.to_string(), day, slot))
    }

    pub fn any_busy(&self, faculty: &[&str], day: Day, slots: &[TimeSlot]) -> bool {
        faculty
            .iter()
            .any(|f| slots.iter().any(|s| self.is_busy(f, day, *s)))
    }

    /// Records a commitment. Returns false if it was already there.
    pub fn book(&mut self, faculty: &str, day: Day, slot: TimeSlot) -> bool {
        self.busy.insert((faculty.to_string(), day, slot))
    }

    pub fn len(&self) -> usize {
        self.busy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.busy.is_empty()
    }

    pub fn count_for(&self, faculty: &str) -> usize {
        self.busy.iter().filter(|(f, _, _)| f == faculty).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Day, TimeSlot)> {
        self.busy.iter().map(|(f, d, s)| (f.as_str(), *d, *s))
    }

    /// Forgets every booking and returns how many there were.
    pub fn reset(&mut self) -> usize {
        let cleared = self.busy.len();
        self.busy.clear();
        cleared
    }
}
