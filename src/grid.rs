use serde::{Serialize, Serializer};

use crate::data::{Day, TimeSlot};

const BREAK_MARKER: &str = "B\nR\nE\nA\nK";
const LUNCH_MARKER: &str = "L\nU\nN\nC\nH";

/// Content of one day/slot cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Theory { subject: String, faculty: String },
    /// Two lab subjects running side by side, one per batch.
    Lab { batch_one: String, batch_two: String },
    Marker(&'static str),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// True if the cell schedules `subject` in any role.
    pub fn mentions(&self, subject: &str) -> bool {
        match self {
            Cell::Theory { subject: s, .. } => s == subject,
            Cell::Lab {
                batch_one,
                batch_two,
            } => batch_one == subject || batch_two == subject,
            Cell::Empty | Cell::Marker(_) => false,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Theory { subject, faculty } => format!("{}\n({})", subject, faculty),
            Cell::Lab {
                batch_one,
                batch_two,
            } => format!("{} LAB(B1)\n/\n{} LAB(B2)", batch_one, batch_two),
            Cell::Marker(text) => (*text).to_string(),
        }
    }
}

/// A section's week: six days by eight time columns.
///
/// Cells are write-once. [`WeekGrid::place`] refuses to overwrite anything
/// that is already filled, markers included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    cells: [[Cell; 8]; 6],
}

impl Default for WeekGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekGrid {
    /// Empty week with the break and lunch labels printed once, on Wednesday.
    pub fn new() -> Self {
        let mut grid = Self::blank();
        grid.cells[Day::Wednesday.index()][TimeSlot::Break.index()] = Cell::Marker(BREAK_MARKER);
        grid.cells[Day::Wednesday.index()][TimeSlot::Lunch.index()] = Cell::Marker(LUNCH_MARKER);
        grid
    }

    pub fn blank() -> Self {
        Self {
            cells: Default::default(),
        }
    }

    pub fn get(&self, day: Day, slot: TimeSlot) -> &Cell {
        &self.cells[day.index()][slot.index()]
    }

    pub fn is_free(&self, day: Day, slot: TimeSlot) -> bool {
        self.get(day, slot).is_empty()
    }

    /// Writes `cell` if the target is still empty. Returns whether it did.
    pub fn place(&mut self, day: Day, slot: TimeSlot, cell: Cell) -> bool {
        let target = &mut self.cells[day.index()][slot.index()];
        if !target.is_empty() {
            return false;
        }
        *target = cell;
        true
    }

    pub fn day_mentions(&self, day: Day, subject: &str) -> bool {
        self.cells[day.index()].iter().any(|c| c.mentions(subject))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Day, TimeSlot, &Cell)> {
        Day::ALL.into_iter().flat_map(move |day| {
            TimeSlot::COLUMNS
                .into_iter()
                .map(move |slot| (day, slot, self.get(day, slot)))
        })
    }

    /// Rendered strings, day-major, `""` for empty cells.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(Cell::render).collect())
            .collect()
    }
}

#[derive(Serialize)]
struct GridView {
    days: [&'static str; 6],
    columns: [&'static str; 8],
    rows: Vec<Vec<String>>,
}

impl Serialize for WeekGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GridView {
            days: Day::ALL.map(Day::label),
            columns: TimeSlot::COLUMNS.map(TimeSlot::label),
            rows: self.rows(),
        }
        .serialize(serializer)
    }
}
