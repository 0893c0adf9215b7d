use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::WeekGrid;
use crate::pairing::RotationStrategy;

/// Day of the teaching week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Saturday never hosts a lab.
    pub const LAB_DAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "MONDAY",
            Day::Tuesday => "TUESDAY",
            Day::Wednesday => "WEDNESDAY",
            Day::Thursday => "THURSDAY",
            Day::Friday => "FRIDAY",
            Day::Saturday => "SATURDAY",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the eight fixed columns of a day. Two of them are breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum TimeSlot {
    #[serde(rename = "09:00-10:00")]
    Nine,
    #[serde(rename = "10:00-11:00")]
    Ten,
    #[serde(rename = "11:00-11:15 BREAK")]
    Break,
    #[serde(rename = "11:15-12:15")]
    QuarterPastEleven,
    #[serde(rename = "12:15-01:15")]
    QuarterPastTwelve,
    #[serde(rename = "01:15-02:00 LUNCH")]
    Lunch,
    #[serde(rename = "02:00-03:00")]
    Two,
    #[serde(rename = "03:00-04:00")]
    Three,
}

impl TimeSlot {
    pub const COLUMNS: [TimeSlot; 8] = [
        TimeSlot::Nine,
        TimeSlot::Ten,
        TimeSlot::Break,
        TimeSlot::QuarterPastEleven,
        TimeSlot::QuarterPastTwelve,
        TimeSlot::Lunch,
        TimeSlot::Two,
        TimeSlot::Three,
    ];

    pub const TEACHING: [TimeSlot; 6] = [
        TimeSlot::Nine,
        TimeSlot::Ten,
        TimeSlot::QuarterPastEleven,
        TimeSlot::QuarterPastTwelve,
        TimeSlot::Two,
        TimeSlot::Three,
    ];

    /// Contiguous two-hour spans a lab pairing can occupy.
    pub const LAB_BLOCKS: [(TimeSlot, TimeSlot); 3] = [
        (TimeSlot::Nine, TimeSlot::Ten),
        (TimeSlot::QuarterPastEleven, TimeSlot::QuarterPastTwelve),
        (TimeSlot::Two, TimeSlot::Three),
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Nine => "09:00-10:00",
            TimeSlot::Ten => "10:00-11:00",
            TimeSlot::Break => "11:00-11:15 BREAK",
            TimeSlot::QuarterPastEleven => "11:15-12:15",
            TimeSlot::QuarterPastTwelve => "12:15-01:15",
            TimeSlot::Lunch => "01:15-02:00 LUNCH",
            TimeSlot::Two => "02:00-03:00",
            TimeSlot::Three => "03:00-04:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SessionType {
    Theory,
    Lab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Batch {
    #[default]
    #[serde(rename = "-")]
    Whole,
    #[serde(rename = "B-1")]
    One,
    #[serde(rename = "B-2")]
    Two,
}

/// One row of the mapping table: who teaches what to whom.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachingAssignment {
    pub faculty: String,
    pub subject: String,
    pub section: String,
    pub semester: String,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    #[serde(default)]
    pub batch: Batch,
}

/// Why a session did not make it into the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum UnplacedReason {
    /// Not enough distinct lab subjects to build a rotation.
    InsufficientLabSubjects { found: usize, required: usize },
    /// Both batches would need the same person at the same time.
    SameFaculty { faculty: String },
    /// No free day/block left for the pairing.
    NoFreeLabBlock,
    /// Theory subject ended the pass under-filled.
    NoFreeSlot { placed: usize, required: usize },
}

/// A session the engine could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedSession {
    pub section: String,
    pub subjects: Vec<String>,
    pub reason: UnplacedReason,
}

impl fmt::Display for UnplacedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subjects = self.subjects.join("/");
        match &self.reason {
            UnplacedReason::InsufficientLabSubjects { found, required } => write!(
                f,
                "[{}] only {} lab subjects ({}), rotation needs {}",
                self.section, found, subjects, required
            ),
            UnplacedReason::SameFaculty { faculty } => write!(
                f,
                "[{}] lab pairing {} dropped: {} teaches both batches",
                self.section, subjects, faculty
            ),
            UnplacedReason::NoFreeLabBlock => write!(
                f,
                "[{}] lab pairing {} dropped: no free day/block",
                self.section, subjects
            ),
            UnplacedReason::NoFreeSlot { placed, required } => write!(
                f,
                "[{}] {} placed {} of {} weekly sessions",
                self.section, subjects, placed, required
            ),
        }
    }
}

/// Faculty and how many slots the ledger commits them to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRow {
    pub faculty: String,
    pub total_weekly_slots: usize,
}

/// The grid produced for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTimetable {
    pub section: String,
    pub grid: WeekGrid,
}

/// Everything one generation run hands back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    pub semester: String,
    pub timetables: Vec<SectionTimetable>,
    pub workload: Vec<WorkloadRow>,
    pub unplaced: Vec<UnplacedSession>,
    pub ledger_size: usize,
}

/// Body of a generation request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Faculty roster for the workload table. Falls back to the names in
    /// `mappings` when absent.
    #[serde(default)]
    pub faculty: Option<Vec<String>>,
    pub mappings: Vec<TeachingAssignment>,
    /// Defaults to the first semester in sorted order.
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rotation: Option<RotationStrategy>,
}
